//! medicos-api - Professional registry service.

use cadastro_core::schema::MEDICOS;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cadastro_server::run(&MEDICOS, 5001).await
}
