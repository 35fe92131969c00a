use thiserror::Error;

/// Terminal failure of a `pay` call. Every variant ends the trade's lifecycle
/// from this service's point of view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayError {
    #[error("validation: {0}")]
    Validation(String),

    /// Submission came back without a usable payload. The caller may retry the
    /// whole `pay` call.
    #[error("gateway interface failure")]
    InterfaceFailure,

    #[error("gateway rejected trade: {0}")]
    GatewayRejected(String),

    #[error("order failed: {0}")]
    OrderFailed(String),

    /// Polling never resolved; the trade was reversed.
    #[error("payment timed out, trade reversed")]
    Timeout,

    /// Polling never resolved and the reversal could not be confirmed. Funds
    /// may have been captured; needs manual reconciliation.
    #[error("payment timed out and reversal failed")]
    CancelFailure,
}

/// A gateway call that produced no usable payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("http: {0}")]
    Http(String),

    #[error("http status {0}")]
    Status(u16),

    #[error("encode: {0}")]
    Encode(String),

    #[error("decode: {0}")]
    Decode(String),

    #[error("signing: {0}")]
    Signing(String),

    #[error("response signature mismatch")]
    Signature,
}
