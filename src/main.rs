use chrono::Local;
use growth_dashboard::{AppState, Config, Dashboard, MentorChat, router};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let today = Local::now().date_naive();
    let dashboard = if config.sample_data {
        Dashboard::with_sample_data(today)
    } else {
        Dashboard::new(today)
    };
    let state = AppState::new(dashboard, MentorChat::new(config.reply_delay));
    let chat = state.chat.clone();

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!(
        reply_delay_ms = config.reply_delay.as_millis() as u64,
        sample_data = config.sample_data,
        "listening on http://{addr}"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    chat.shutdown();
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    }
}
