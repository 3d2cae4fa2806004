//! Shared domain types for the Zoomies backend.
//!
//! - [`schema`]: the input schema registry: canonical per-entity field
//!   tables, derived (picked / required / refined) schemas and the typed
//!   records they produce.
//! - [`error`]: the domain error type shared across crates.

pub mod error;
pub mod schema;
pub mod types;

pub use error::CoreError;
pub use schema::{SchemaName, SchemaRegistry, ValidatedRecord, ValidationError};
