use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notifier_api::config::ServerConfig;
use notifier_api::router::build_app_router;
use notifier_api::state::AppState;
use notifier_events::{
    ChangeEventRouter, DisabledGateway, Dispatcher, EventBus, FcmConfig, FcmGateway,
    PgNotificationLog, PgUserStore, PushGateway,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "notifier_api=debug,notifier_events=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = notifier_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    notifier_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    notifier_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    tracing::info!("Event bus created");

    // --- Push gateway ---
    let gateway: Arc<dyn PushGateway> = match FcmConfig::from_env() {
        Some(fcm) => {
            tracing::info!(project_id = %fcm.project_id, "FCM push delivery enabled");
            Arc::new(FcmGateway::new(fcm).expect("Failed to build FCM client"))
        }
        None => {
            tracing::warn!("FCM_PROJECT_ID/FCM_ACCESS_TOKEN not set, push delivery disabled");
            Arc::new(DisabledGateway)
        }
    };

    // --- Change event router ---
    let dispatcher = Dispatcher::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgNotificationLog::new(pool.clone(), Arc::clone(&event_bus))),
        gateway,
    );
    let router_cancel = CancellationToken::new();
    let router_handle = tokio::spawn(
        ChangeEventRouter::new(dispatcher).run(event_bus.subscribe(), router_cancel.clone()),
    );
    tracing::info!("Change event router started");

    // --- App state ---
    let state = AppState { pool, event_bus };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, draining change handlers");

    router_cancel.cancel();
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, router_handle).await.is_err() {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Change handlers still running at shutdown deadline"
        );
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
