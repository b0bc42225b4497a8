use anyhow::Result;
use panel_tilt_advisor::{api, config, controller, telemetry};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let dotenv = dotenvy::dotenv();

    init_tracing();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "failed to read .env file");
        }
    }

    let cfg = Config::load()?;

    let app_state = controller::AppState::new(cfg.clone())?;
    let app = api::router(app_state);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!(
            "WARNING: Server binding to 0.0.0.0 - service will be accessible from network! \
            For production, bind to 127.0.0.1 unless behind a firewall/reverse proxy."
        );
    }

    info!(%addr, classifier = %cfg.classifier.mode, "starting Panel Tilt Advisor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
