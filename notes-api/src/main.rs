mod app;
mod auth;
mod config;
mod ctx;
mod db;
mod errors;
mod extract;
mod notes;
mod shared;
mod state;
mod users;
mod validation;

use std::net::SocketAddr;

use app::AppParams;
use auth::TokenService;
pub use config::config;
pub use db::{init_db, DB};
pub use errors::{Error, Result};
use shared::tracing::{add_tracing_layer, setup_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config();

    setup_tracing(config.log_json);

    let conn = init_db().await?;
    let tokens = TokenService::new(&config.token_config()?);

    let app = add_tracing_layer(app::create(AppParams { db: conn, tokens }));

    let port = config.port;
    let listener = TcpListener::bind(format!("127.0.0.1:{port}"))
        .await
        .map_err(|e| Error::Unexpected(format!("failed to bind port {port}: {e}")))?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("listening on http://{addr}");
    }

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| Error::Unexpected(e.to_string()))?;

    Ok(())
}
