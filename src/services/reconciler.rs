use {
    crate::domain::{
        codes::TradeState,
        error::PayError,
        gateway::GatewayClient,
        id::OrderId,
        outcome::{
            CancellationResult, Outcome, classify_cancellation, classify_query,
            classify_submission,
        },
        response::GatewayResponse,
        trade::{MicroPayOrder, PollPolicy, QueryReport},
    },
    std::{sync::Arc, time::Duration},
    tokio::sync::watch,
};

/// Reversal is reissued while the gateway asks for a recall, up to this depth
/// (depth starts at 0, so at most `MAX_RECALL_DEPTH + 1` Reverse calls).
pub const MAX_RECALL_DEPTH: u32 = 10;

/// Longest a `pay` run can last when every gateway call runs into
/// `call_timeout`: the submission, each query plus its wait, and the full
/// recall chain.
pub fn worst_case_duration(policy: PollPolicy, call_timeout: Duration) -> Duration {
    let attempts = policy.max_query_attempts();
    let calls = attempts.saturating_add(MAX_RECALL_DEPTH + 2);
    call_timeout
        .saturating_mul(calls)
        .saturating_add(policy.query_interval().saturating_mul(attempts))
}

/// Drives one trade from submission to a terminal outcome:
/// submit, poll until resolved, reverse if it never resolves.
///
/// Holds no per-trade state, so one instance serves any number of concurrent
/// `pay` calls for distinct orders. Calls for the same order must be
/// serialized by the caller.
#[derive(Clone)]
pub struct Reconciler {
    gateway: Arc<dyn GatewayClient>,
    shutdown: watch::Receiver<bool>,
}

impl Reconciler {
    pub fn new(gateway: Arc<dyn GatewayClient>, shutdown: watch::Receiver<bool>) -> Self {
        Self { gateway, shutdown }
    }

    /// Submit the order and confirm its outcome.
    ///
    /// Only a query reporting the trade as paid yields `Ok`; the returned
    /// payload is that query reply. A shutdown signal cuts polling short and
    /// goes straight to reversal.
    #[tracing::instrument(
        name = "pay",
        skip_all,
        fields(out_trade_no = %order.out_trade_no, total_fee = %order.total_fee)
    )]
    pub async fn pay(
        &self,
        order: &MicroPayOrder,
        policy: PollPolicy,
    ) -> Result<GatewayResponse, PayError> {
        let out_trade_no = &order.out_trade_no;

        let reply = self.gateway.submit(order).await;
        match &reply {
            Err(e) => {
                tracing::warn!(error = %e, "submission transport failure");
                return Err(PayError::InterfaceFailure);
            }
            Ok(resp) if resp.comm_status().is_none() => {
                tracing::warn!("submission reply has no return_code");
                return Err(PayError::InterfaceFailure);
            }
            Ok(_) => {}
        }

        match classify_submission(&reply) {
            Outcome::Rejected(code) => {
                tracing::warn!(err_code = %code, "gateway rejected submission");
                return Err(PayError::GatewayRejected(code));
            }
            Outcome::ProtocolError(reason) => {
                tracing::warn!(%reason, "submission reply unusable");
                return Err(PayError::InterfaceFailure);
            }
            Outcome::Resolved(_) | Outcome::Indeterminate => {
                tracing::info!("submitted, confirming outcome");
            }
        }

        if let Some(payload) = self.poll(out_trade_no, policy).await? {
            return Ok(payload);
        }

        if self.cancel(out_trade_no).await {
            tracing::warn!("payment not confirmed, trade reversed");
            Err(PayError::Timeout)
        } else {
            tracing::error!("payment not confirmed and reversal failed, needs manual reconciliation");
            Err(PayError::CancelFailure)
        }
    }

    /// `Ok(None)` means polling ended without a definitive answer.
    async fn poll(
        &self,
        out_trade_no: &OrderId,
        policy: PollPolicy,
    ) -> Result<Option<GatewayResponse>, PayError> {
        let mut shutdown = self.shutdown.clone();

        for attempt in 1..=policy.max_query_attempts() {
            let reply = self.gateway.query(out_trade_no).await;
            if let Ok(resp) = &reply {
                if let Some(TradeState::Other(state)) = resp.trade_state() {
                    tracing::warn!(attempt, trade_state = %state, "unrecognized trade state, retrying");
                }
            }

            match classify_query(&reply) {
                Outcome::Resolved(payload) => {
                    tracing::info!(attempt, "payment confirmed");
                    return Ok(Some(payload));
                }
                Outcome::Rejected(reason) => {
                    tracing::warn!(attempt, %reason, "order failed");
                    return Err(PayError::OrderFailed(reason));
                }
                Outcome::Indeterminate | Outcome::ProtocolError(_) => {
                    tracing::debug!(attempt, "trade still pending");
                    if !pause(policy.query_interval(), &mut shutdown).await {
                        tracing::warn!(attempt, "shutdown requested, abandoning poll");
                        return Ok(None);
                    }
                }
            }
        }

        tracing::warn!(
            attempts = policy.max_query_attempts(),
            "query attempts exhausted"
        );
        Ok(None)
    }

    /// Single query, classified. For callers that poll from outside `pay`.
    pub async fn query(&self, out_trade_no: &OrderId) -> QueryReport {
        classify_query(&self.gateway.query(out_trade_no).await).into()
    }

    /// Reverse the trade, reissuing while the gateway asks for a recall.
    /// `true` only when the gateway confirmed the reversal.
    #[tracing::instrument(name = "cancel", skip_all, fields(out_trade_no = %out_trade_no))]
    pub async fn cancel(&self, out_trade_no: &OrderId) -> bool {
        for depth in 0..=MAX_RECALL_DEPTH {
            match classify_cancellation(&self.gateway.reverse(out_trade_no).await) {
                CancellationResult::Cancelled => {
                    tracing::info!(depth, "trade reversed");
                    return true;
                }
                CancellationResult::MustRecall => {
                    tracing::debug!(depth, "gateway asked to recall reversal");
                }
                CancellationResult::Failed => {
                    tracing::warn!(depth, "reversal failed");
                    return false;
                }
            }
        }

        tracing::warn!(max_depth = MAX_RECALL_DEPTH, "recall depth exceeded");
        false
    }
}

/// Wait `interval` unless shutdown is (or becomes) requested. Returns `false`
/// when interrupted.
async fn pause(interval: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return false;
    }

    let sleep = tokio::time::sleep(interval);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return true,
            Ok(()) = shutdown.changed() => {
                if *shutdown.borrow_and_update() {
                    return false;
                }
            }
        }
    }
}
