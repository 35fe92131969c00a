pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;

use {
    crate::{domain::trade::PollPolicy, services::reconciler::Reconciler},
    std::time::Duration,
    tokio_util::task::TaskTracker,
};

#[derive(Clone)]
pub struct AppState {
    pub reconciler: Reconciler,
    pub poll_policy: PollPolicy,
    /// Per-call gateway timeout, used to bound request-supplied poll policies.
    pub gateway_timeout: Duration,
    pub request_timeout: Duration,
    /// Reconciliations outlive their HTTP request; `main` drains this on
    /// shutdown.
    pub tasks: TaskTracker,
}
