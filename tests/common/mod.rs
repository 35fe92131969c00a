#![allow(dead_code)]

use micropay_sync::domain::error::TransportError;
use micropay_sync::domain::gateway::{GatewayClient, GatewayFuture};
use micropay_sync::domain::id::{AuthCode, OrderId};
use micropay_sync::domain::money::TotalFee;
use micropay_sync::domain::response::{GatewayReply, GatewayResponse};
use micropay_sync::domain::trade::{MicroPayOrder, MicroPayOrderParams};
use micropay_sync::services::reconciler::Reconciler;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Replies handed out in order; once the queue runs dry the last reply
/// repeats.
#[derive(Default)]
struct Script {
    queue: VecDeque<GatewayReply>,
    last: Option<GatewayReply>,
    calls: usize,
}

impl Script {
    fn next(&mut self) -> GatewayReply {
        self.calls += 1;
        if let Some(reply) = self.queue.pop_front() {
            self.last = Some(reply.clone());
            return reply;
        }
        self.last
            .clone()
            .unwrap_or_else(|| Err(TransportError::Http("script exhausted".into())))
    }
}

/// In-memory gateway that plays back scripted replies and counts calls.
#[derive(Default)]
pub struct ScriptedGateway {
    submit: Mutex<Script>,
    query: Mutex<Script>,
    reverse: Mutex<Script>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submits(self, replies: impl IntoIterator<Item = GatewayReply>) -> Self {
        self.submit.lock().unwrap().queue.extend(replies);
        self
    }

    pub fn queries(self, replies: impl IntoIterator<Item = GatewayReply>) -> Self {
        self.query.lock().unwrap().queue.extend(replies);
        self
    }

    pub fn reverses(self, replies: impl IntoIterator<Item = GatewayReply>) -> Self {
        self.reverse.lock().unwrap().queue.extend(replies);
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit.lock().unwrap().calls
    }

    pub fn query_calls(&self) -> usize {
        self.query.lock().unwrap().calls
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse.lock().unwrap().calls
    }
}

impl GatewayClient for ScriptedGateway {
    fn submit<'a>(&'a self, _order: &'a MicroPayOrder) -> GatewayFuture<'a> {
        let reply = self.submit.lock().unwrap().next();
        Box::pin(async move { reply })
    }

    fn query<'a>(&'a self, _out_trade_no: &'a OrderId) -> GatewayFuture<'a> {
        let reply = self.query.lock().unwrap().next();
        Box::pin(async move { reply })
    }

    fn reverse<'a>(&'a self, _out_trade_no: &'a OrderId) -> GatewayFuture<'a> {
        let reply = self.reverse.lock().unwrap().next();
        Box::pin(async move { reply })
    }
}

/// Reconciler over `gateway`, plus the sender side of its shutdown signal.
pub fn reconciler(gateway: &Arc<ScriptedGateway>) -> (Reconciler, watch::Sender<bool>) {
    let (tx, rx) = watch::channel(false);
    let gateway: Arc<dyn GatewayClient> = gateway.clone();
    (Reconciler::new(gateway, rx), tx)
}

pub fn order(out_trade_no: &str) -> MicroPayOrder {
    MicroPayOrder::new(MicroPayOrderParams {
        out_trade_no: OrderId::new(out_trade_no).unwrap(),
        auth_code: AuthCode::new("134567890123456789").unwrap(),
        body: "coffee".to_string(),
        total_fee: TotalFee::new(1800).unwrap(),
        spbill_create_ip: "10.0.0.8".to_string(),
        attach: None,
    })
    .unwrap()
}

pub fn order_id(out_trade_no: &str) -> OrderId {
    OrderId::new(out_trade_no).unwrap()
}

// ── Reply builders ─────────────────────────────────────────────────────────

pub fn reply(fields: &[(&str, &str)]) -> GatewayReply {
    Ok(fields.iter().copied().collect::<GatewayResponse>())
}

pub fn transport_failure() -> GatewayReply {
    Err(TransportError::Timeout)
}

pub fn submit_failed(err_code: &str) -> GatewayReply {
    reply(&[
        ("return_code", "SUCCESS"),
        ("result_code", "FAIL"),
        ("err_code", err_code),
    ])
}

pub fn submit_accepted() -> GatewayReply {
    reply(&[("return_code", "SUCCESS"), ("result_code", "SUCCESS")])
}

pub fn query_state(trade_state: &str) -> GatewayReply {
    reply(&[
        ("return_code", "SUCCESS"),
        ("result_code", "SUCCESS"),
        ("trade_state", trade_state),
        ("transaction_id", "4200000001201610160000000001"),
    ])
}

pub fn query_paid() -> GatewayReply {
    query_state("SUCCESS")
}

pub fn query_pending() -> GatewayReply {
    query_state("USERPAYING")
}

pub fn query_error(err_code: &str) -> GatewayReply {
    reply(&[
        ("return_code", "SUCCESS"),
        ("result_code", "FAIL"),
        ("err_code", err_code),
    ])
}

pub fn reverse_reply(result_code: &str, recall: &str) -> GatewayReply {
    reply(&[
        ("return_code", "SUCCESS"),
        ("result_code", result_code),
        ("recall", recall),
    ])
}
