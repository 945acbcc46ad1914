mod admin;
mod auth;
mod config;
mod error;
mod home_ws;
mod agent_ws;
mod http;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use futures_util::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use state::{AppState, STATE_CHANNEL};
use store::{KvStore, RedisStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(true),
        )
        .init();

    let config = Config::from_env().unwrap_or_else(|err| {
        tracing::error!(%err, "invalid configuration");
        panic!("invalid configuration: {err}");
    });

    let kv = RedisStore::connect(&config.kv_url)
        .await
        .unwrap_or_else(|err| {
            tracing::error!(%err, "failed to connect to the KV store");
            panic!("failed to connect to the KV store: {err}");
        });
    let kv: Arc<dyn KvStore> = Arc::new(kv);

    let listen_addr = config.listen_addr.clone();
    let app_state = Arc::new(AppState::new(config, kv.clone()));

    spawn_state_subscriber(app_state.clone(), kv);

    let app = Router::new()
        .route("/register", post(http::register))
        .route("/vote", post(http::vote))
        .route("/state", get(http::get_state))
        .route("/health", get(http::health))
        .route("/admin/ban/{kind}", post(admin::ban))
        .route("/admin/unban", post(admin::unban))
        .route("/admin/bans", get(admin::list_bans))
        .route("/agent/stream", get(agent_ws::agent_stream))
        .route("/home/connect", get(home_ws::home_connect))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .unwrap_or_else(|err| panic!("failed to bind {listen_addr}: {err}"));

    tracing::info!(addr = %listen_addr, "relay server listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

/// Feeds every `state_update` published by another replica on
/// [`STATE_CHANNEL`] into this replica's cache and agent broadcast, so
/// agents connected to any replica see the same state (spec §9).
fn spawn_state_subscriber(app_state: Arc<AppState>, kv: Arc<dyn KvStore>) {
    tokio::spawn(async move {
        let mut stream = match kv.subscribe(STATE_CHANNEL).await {
            Ok(stream) => stream,
            Err(err) => {
                tracing::error!(%err, "failed to subscribe to state channel");
                return;
            }
        };
        while let Some(message) = stream.next().await {
            app_state.apply_remote_state(&message).await;
        }
        tracing::warn!("state channel subscription ended");
    });
}
