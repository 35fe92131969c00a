use super::{
    codes::{BizResult, CommStatus, ErrorCode, RecallFlag, TradeState},
    response::{GatewayReply, GatewayResponse},
};

/// Semantic reading of a Submit or Query reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(GatewayResponse),
    Rejected(String),
    Indeterminate,
    ProtocolError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationResult {
    Cancelled,
    MustRecall,
    Failed,
}

const MALFORMED: &str = "malformed response";

/// Submission never resolves a trade; only a definitive business failure or a
/// malformed reply ends the flow here.
pub fn classify_submission(reply: &GatewayReply) -> Outcome {
    let Ok(resp) = reply else {
        return Outcome::ProtocolError(MALFORMED.into());
    };
    let (Some(comm), Some(biz)) = (resp.comm_status(), resp.biz_result()) else {
        return Outcome::ProtocolError(MALFORMED.into());
    };

    match (comm, biz, resp.err_code()) {
        (CommStatus::Success, BizResult::Fail, Some(code)) if !code.is_retryable() => {
            Outcome::Rejected(code.as_str().to_string())
        }
        (CommStatus::Success, BizResult::Fail, None) => Outcome::Rejected("UNKNOWN".into()),
        _ => Outcome::Indeterminate,
    }
}

/// Anything that is neither paid nor a missing order is treated as transient.
pub fn classify_query(reply: &GatewayReply) -> Outcome {
    let Ok(resp) = reply else {
        return Outcome::Indeterminate;
    };

    if resp.comm_status() == Some(CommStatus::Success)
        && resp.biz_result() == Some(BizResult::Success)
    {
        match resp.trade_state() {
            Some(TradeState::Completed) => return Outcome::Resolved(resp.clone()),
            Some(TradeState::AwaitingUser) => return Outcome::Indeterminate,
            _ => {}
        }
    }

    match resp.err_code() {
        Some(ErrorCode::OrderNotExist) => Outcome::Rejected("order not found".into()),
        _ => Outcome::Indeterminate,
    }
}

pub fn classify_cancellation(reply: &GatewayReply) -> CancellationResult {
    let Ok(resp) = reply else {
        return CancellationResult::Failed;
    };
    if !resp.is_comm_success() {
        return CancellationResult::Failed;
    }

    let biz_success = resp.biz_result() == Some(BizResult::Success);
    match resp.recall() {
        Some(RecallFlag::No) if !biz_success => CancellationResult::Cancelled,
        Some(RecallFlag::Yes) => CancellationResult::MustRecall,
        _ => CancellationResult::Failed,
    }
}
