//! pacientes-api - Patient registry service.

use cadastro_core::schema::PACIENTES;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cadastro_server::run(&PACIENTES, 5000).await
}
