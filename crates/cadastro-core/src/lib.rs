//! cadastro-core - Core library for the clinic registry services
//!
//! Shared functionality between the medicos and pacientes APIs:
//!
//! - **schema**: entity schemas, field validation and patch building
//! - **store**: direct SQLite record access
//! - **error**: common error types

pub mod error;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use schema::{EntitySchema, FieldSpec, MEDICOS, PACIENTES};
pub use store::Store;
