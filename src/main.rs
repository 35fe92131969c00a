use {
    micropay_sync::{
        AppState, adapters::http::router, adapters::wechat::WechatClient, config::Config,
        services::reconciler::Reconciler,
    },
    std::sync::Arc,
    tokio::{signal, sync::watch},
    tokio_util::task::TaskTracker,
    tracing_subscriber::EnvFilter,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("invalid configuration");

    let gateway = WechatClient::new(&config.gateway).expect("failed to build gateway client");
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let tasks = TaskTracker::new();
    let state = AppState {
        reconciler: Reconciler::new(Arc::new(gateway), shutdown_rx),
        poll_policy: config.poll_policy,
        gateway_timeout: config.gateway.timeout,
        request_timeout: config.http_request_timeout,
        tasks: tasks.clone(),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // In-flight reconciliations stop polling and reverse.
            let _ = shutdown_tx.send(true);
        })
        .await
        .expect("server error");

    tasks.close();
    if !tasks.is_empty() {
        tracing::info!(in_flight = tasks.len(), "waiting for reconciliations to unwind");
    }
    tasks.wait().await;
    tracing::info!("shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
