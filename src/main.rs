mod chat;
mod config;
mod db;
mod poller;
mod query;
mod retry;
mod routes;
mod services;
mod state;

use crate::poller::PollGate;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env();

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("database init failed");

    let port = config.port;
    let app_url = config.app_url.clone();
    let state = state::AppState::new(pool, config);

    // The refresher keeps /api/pulse warm; dropping the controller stops it.
    let gate = PollGate::new();
    let _pulse_refresher = services::pulse::spawn_pulse_refresher(state.clone(), &gate);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, %app_url, "opsboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
