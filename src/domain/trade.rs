use {
    super::error::PayError,
    super::id::{AuthCode, OrderId},
    super::money::TotalFee,
    super::outcome::Outcome,
    super::response::GatewayResponse,
    serde::Serialize,
    std::time::Duration,
};

/// Everything Submit needs to charge a presented payment code.
#[derive(Debug, Clone)]
pub struct MicroPayOrder {
    pub out_trade_no: OrderId,
    pub auth_code: AuthCode,
    pub body: String,
    pub total_fee: TotalFee,
    pub spbill_create_ip: String,
    pub attach: Option<String>,
}

pub struct MicroPayOrderParams {
    pub out_trade_no: OrderId,
    pub auth_code: AuthCode,
    pub body: String,
    pub total_fee: TotalFee,
    pub spbill_create_ip: String,
    pub attach: Option<String>,
}

impl MicroPayOrder {
    pub const MAX_BODY_LEN: usize = 128;

    pub fn new(p: MicroPayOrderParams) -> Result<Self, PayError> {
        if p.body.trim().is_empty() {
            return Err(PayError::Validation("body must not be empty".into()));
        }
        if p.body.len() > Self::MAX_BODY_LEN {
            return Err(PayError::Validation(format!(
                "body longer than {} bytes",
                Self::MAX_BODY_LEN
            )));
        }
        if p.spbill_create_ip.is_empty() {
            return Err(PayError::Validation(
                "spbill_create_ip must not be empty".into(),
            ));
        }
        Ok(Self {
            out_trade_no: p.out_trade_no,
            auth_code: p.auth_code,
            body: p.body,
            total_fee: p.total_fee,
            spbill_create_ip: p.spbill_create_ip,
            attach: p.attach,
        })
    }
}

/// Bounds on the polling phase of `pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    max_query_attempts: u32,
    query_interval: Duration,
}

impl PollPolicy {
    pub const DEFAULT_MAX_QUERY_ATTEMPTS: u32 = 6;
    pub const DEFAULT_QUERY_INTERVAL: Duration = Duration::from_secs(2);

    pub fn new(max_query_attempts: u32, query_interval: Duration) -> Result<Self, PayError> {
        if max_query_attempts == 0 {
            return Err(PayError::Validation(
                "max_query_attempts must be at least 1".into(),
            ));
        }
        Ok(Self {
            max_query_attempts,
            query_interval,
        })
    }

    pub fn max_query_attempts(&self) -> u32 {
        self.max_query_attempts
    }

    pub fn query_interval(&self) -> Duration {
        self.query_interval
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_query_attempts: Self::DEFAULT_MAX_QUERY_ATTEMPTS,
            query_interval: Self::DEFAULT_QUERY_INTERVAL,
        }
    }
}

/// Result of a single caller-driven order query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub succeeded: bool,
    pub ambiguous: bool,
    pub payload: Option<GatewayResponse>,
}

impl From<Outcome> for QueryReport {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Resolved(payload) => Self {
                succeeded: true,
                ambiguous: false,
                payload: Some(payload),
            },
            Outcome::Indeterminate => Self {
                succeeded: false,
                ambiguous: true,
                payload: None,
            },
            Outcome::Rejected(_) | Outcome::ProtocolError(_) => Self {
                succeeded: false,
                ambiguous: false,
                payload: None,
            },
        }
    }
}
