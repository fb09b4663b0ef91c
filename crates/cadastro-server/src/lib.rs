//! cadastro-server - HTTP layer for the clinic registry services.
//!
//! One generic service body, instantiated twice: the `medicos-api` and
//! `pacientes-api` binaries call [`run`] with their entity schema and
//! default port.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use std::net::SocketAddr;

use cadastro_core::{EntitySchema, Store};
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

/// Start the registry service for one entity and serve until shutdown.
pub async fn run(schema: &'static EntitySchema, default_port: u16) -> anyhow::Result<()> {
    let config = Config::load(schema, default_port)?;
    telemetry::init(config.log_collector.as_deref())?;

    info!(
        "cadastro-server v{} serving /{}",
        env!("CARGO_PKG_VERSION"),
        schema.resource
    );

    let store = Store::open(&config.database_path, schema);
    store.init()?;
    info!("Database ready at {}", config.database_path.display());

    let app = routes::create_router(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
