use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            error::PayError,
            id::{AuthCode, OrderId},
            money::TotalFee,
            trade::{MicroPayOrder, MicroPayOrderParams, PollPolicy, QueryReport},
        },
        services::reconciler::worst_case_duration,
    },
    axum::{
        Json, Router,
        extract::{DefaultBodyLimit, Path, State},
        http::StatusCode,
        routing::{get, post},
    },
    serde::Deserialize,
    std::time::Duration,
    tower_http::{timeout::TimeoutLayer, trace::TraceLayer},
};

#[derive(Debug, Deserialize)]
pub struct MicroPayRequest {
    pub out_trade_no: String,
    pub auth_code: String,
    pub body: String,
    pub total_fee: u64,
    pub spbill_create_ip: String,
    pub attach: Option<String>,
    pub max_query_attempts: Option<u32>,
    pub query_interval_secs: Option<u64>,
}

pub fn router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/micropay", post(micropay_handler))
        .route("/orders/{out_trade_no}", get(query_handler))
        .route("/orders/{out_trade_no}/reverse", post(reverse_handler))
        .layer(DefaultBodyLimit::max(16 * 1024))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tracing::instrument(name = "micropay", skip_all, fields(out_trade_no = tracing::field::Empty))]
pub async fn micropay_handler(
    State(state): State<AppState>,
    Json(req): Json<MicroPayRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    tracing::Span::current().record("out_trade_no", tracing::field::display(&req.out_trade_no));

    let order = MicroPayOrder::new(MicroPayOrderParams {
        out_trade_no: OrderId::new(req.out_trade_no)?,
        auth_code: AuthCode::new(req.auth_code)?,
        body: req.body,
        total_fee: TotalFee::new(req.total_fee)?,
        spbill_create_ip: req.spbill_create_ip,
        attach: req.attach,
    })?;

    let defaults = state.poll_policy;
    let policy = PollPolicy::new(
        req.max_query_attempts
            .unwrap_or(defaults.max_query_attempts()),
        req.query_interval_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.query_interval()),
    )?;
    let worst_case = worst_case_duration(policy, state.gateway_timeout);
    if worst_case > state.request_timeout {
        return Err(PayError::Validation(format!(
            "poll policy may run for {}s, over the {}s request timeout",
            worst_case.as_secs(),
            state.request_timeout.as_secs()
        ))
        .into());
    }

    // Tracked task: a dropped connection must not stop a reconciliation
    // between submission and reversal.
    let reconciler = state.reconciler.clone();
    let payload = state
        .tasks
        .spawn(async move { reconciler.pay(&order, policy).await })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "reconciliation task aborted, trade state unknown");
            PayError::CancelFailure
        })??;

    Ok(Json(serde_json::json!({
        "status": "paid",
        "payload": payload,
    })))
}

pub async fn query_handler(
    State(state): State<AppState>,
    Path(out_trade_no): Path<String>,
) -> Result<Json<QueryReport>, ApiError> {
    let out_trade_no = OrderId::new(out_trade_no)?;
    let report = state.reconciler.query(&out_trade_no).await;
    tracing::info!(
        %out_trade_no,
        succeeded = report.succeeded,
        ambiguous = report.ambiguous,
        "order queried"
    );
    Ok(Json(report))
}

pub async fn reverse_handler(
    State(state): State<AppState>,
    Path(out_trade_no): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let out_trade_no = OrderId::new(out_trade_no)?;

    let reconciler = state.reconciler.clone();
    let target = out_trade_no.clone();
    let cancelled = state
        .tasks
        .spawn(async move { reconciler.cancel(&target).await })
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "reversal task aborted, trade state unknown");
            false
        });

    if !cancelled {
        tracing::error!(%out_trade_no, "caller-driven reversal failed");
    }
    Ok(Json(serde_json::json!({ "cancelled": cancelled })))
}
