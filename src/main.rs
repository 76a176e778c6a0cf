mod models;
mod handlers;
mod services;
mod config;
mod errors;
mod otp;
mod deadline;
mod state;
mod routes;
mod extract;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use anyhow::Context;
use mockable::DefaultClock;
use tracing_subscriber::EnvFilter;
use crate::{
    services::{RedisService, SmtpMailer},
    config::Config,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize Redis client
    let redis_url = config
        .redis_url()
        .context("Sentinel URL not configured")?;
    let redis_client = Arc::new(
        redis::Client::open(redis_url).context("Failed to create Redis client")?,
    );
    let store = RedisService::new(redis_client);

    let mailer = SmtpMailer::new(&config.smtp).context("Failed to configure SMTP relay")?;

    let state = AppState::new(
        Arc::new(store),
        Arc::new(mailer),
        Arc::new(DefaultClock),
        config.voting.duration_secs,
        config.smtp.from.clone(),
        config.auth.bcrypt_cost,
    );
    tracing::info!("Voting closes at {}", state.deadline.closes_at());

    let app = routes::build_router(state, config.server.max_body_size);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on {}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}
