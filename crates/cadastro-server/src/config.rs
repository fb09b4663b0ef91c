//! Server configuration.

use std::path::PathBuf;

use cadastro_core::EntitySchema;

/// Per-process configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage directory shared by both services
    pub data_dir: PathBuf,
    /// This service's database file inside the storage directory
    pub database_path: PathBuf,
    /// TCP port to listen on
    pub port: u16,
    /// Optional `host:port` of an external log collector
    pub log_collector: Option<String>,
}

impl Config {
    /// Load configuration from the environment or defaults.
    ///
    /// Storage layout (both services point at the same directory):
    /// ```text
    /// data/                     # CADASTRO_DATA_DIR overrides
    /// ├── medicos.db
    /// └── pacientes.db
    /// ```
    ///
    /// `PORT` overrides the service's default port and
    /// `CADASTRO_LOG_COLLECTOR` enables log shipping. The storage
    /// directory is created if absent.
    pub fn load(schema: &EntitySchema, default_port: u16) -> anyhow::Result<Self> {
        let data_dir = std::env::var("CADASTRO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        std::fs::create_dir_all(&data_dir)?;

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse()?,
            Err(_) => default_port,
        };

        Ok(Self {
            database_path: data_dir.join(format!("{}.db", schema.table)),
            data_dir,
            port,
            log_collector: std::env::var("CADASTRO_LOG_COLLECTOR").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadastro_core::schema::{MEDICOS, PACIENTES};
    use std::env;

    #[test]
    fn test_config_load_with_custom_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let custom_path = temp_dir.path().join("storage");

        // Save current value to restore later
        let old_val = env::var("CADASTRO_DATA_DIR").ok();
        // SAFETY: This test runs in isolation and we restore the env var afterward
        unsafe { env::set_var("CADASTRO_DATA_DIR", &custom_path) };

        let medicos = Config::load(&MEDICOS, 5001).unwrap();
        let pacientes = Config::load(&PACIENTES, 5000).unwrap();

        // Both services share the storage directory, one db file each
        assert_eq!(medicos.data_dir, custom_path);
        assert_eq!(medicos.database_path, custom_path.join("medicos.db"));
        assert_eq!(pacientes.database_path, custom_path.join("pacientes.db"));
        assert_eq!(medicos.port, 5001);
        assert_eq!(pacientes.port, 5000);

        // The storage directory gets created on load
        assert!(custom_path.exists());

        // Cleanup
        // SAFETY: Restoring environment to previous state
        unsafe {
            if let Some(val) = old_val {
                env::set_var("CADASTRO_DATA_DIR", val);
            } else {
                env::remove_var("CADASTRO_DATA_DIR");
            }
        }
    }
}
