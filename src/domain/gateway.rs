use {
    super::id::OrderId,
    super::response::GatewayReply,
    super::trade::MicroPayOrder,
    std::{future::Future, pin::Pin},
};

pub type GatewayFuture<'a> = Pin<Box<dyn Future<Output = GatewayReply> + Send + 'a>>;

/// The remote payment gateway. Implementations own signing, serialization and
/// the per-call timeout; a timed-out call is a `TransportError`.
pub trait GatewayClient: Send + Sync {
    fn submit<'a>(&'a self, order: &'a MicroPayOrder) -> GatewayFuture<'a>;

    fn query<'a>(&'a self, out_trade_no: &'a OrderId) -> GatewayFuture<'a>;

    fn reverse<'a>(&'a self, out_trade_no: &'a OrderId) -> GatewayFuture<'a>;
}
