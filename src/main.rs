mod address;
mod bulk;
mod config;
mod error;
mod gateway;
mod handlers;
mod types;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use config::Config;
use gateway::TwilioClient;
use handlers::AppState;

fn router(state: Arc<AppState>, allowed_origin: HeaderValue) -> Router {
    // Other origins must get no CORS headers at all.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/send-bulk-whatsapp/", post(handlers::send_bulk_whatsapp))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Resolves on Ctrl-C or SIGTERM. In-flight requests are drained before exit.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received, draining in-flight requests");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values already in the environment win over .env entries.
    let dotenv = dotenvy::dotenv();
    pretty_env_logger::init_timed();
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env()?;
    info!("Loaded config: {:?}", config);
    if config.use_sandbox {
        info!("Sandbox mode on: every message is sent from the sandbox number");
    }

    let gateway = Arc::new(TwilioClient::new(&config));
    let state = Arc::new(AppState {
        gateway,
        use_sandbox: config.use_sandbox,
    });

    let app = router(state, config.allowed_origin.clone());

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
