// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Course Portal web server
//!
//! Serves the landing redirect, social login and user directory.

use anyhow::Context;
use course_portal::{
    config::Config,
    services::{user_source, SocialLoginInitiator, SupabaseAuth},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        port = config.port,
        data_source = %config.data_source,
        api_base_path = %config.api_base_path,
        "Starting Course Portal"
    );

    // Auth backend client
    let auth_backend = SupabaseAuth::new(&config.auth_url, &config.auth_anon_key)
        .context("Failed to initialize auth backend client")?;
    tracing::info!(auth_url = %config.auth_url, "Auth backend client initialized");

    let users = user_source(&config).context("Failed to initialize user directory")?;

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        social_login: SocialLoginInitiator::new(Arc::new(auth_backend)),
        users,
    });

    // Build router
    let app = course_portal::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("course_portal=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
