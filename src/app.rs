/*
 * Responsibility
 * - Config → tracing → dependencies (PgPool, stores, TokenService) → Router
 * - Apply middleware (HTTP / CORS)
 * - Start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::not_found};
use crate::config::Config;
use crate::middleware;
use crate::repos::{PgTripRepo, PgUserRepo};
use crate::services::auth::{TokenService, password};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,trip_planner=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // Development: crash so it gets noticed. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("database connection established");

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    tokio::task::spawn_blocking(password::prepare_dummy_hash)
        .await
        .context("failed to prepare password hashing")?;

    let tokens = TokenService::new(
        &config.token_secret,
        config.token_ttl_seconds,
        config.token_leeway_seconds,
    );

    Ok(AppState::new(
        Arc::new(PgUserRepo::new(pool.clone())),
        Arc::new(PgTripRepo::new(pool)),
        Arc::new(tokens),
    ))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(api::routes(state.clone()))
        .fallback(not_found)
        .with_state(state);

    let router = middleware::http::apply(router);
    middleware::cors::apply(router, config)
}
