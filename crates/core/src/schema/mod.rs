//! Input schema registry.
//!
//! Every request schema is derived from one canonical schema per entity
//! (the insert shape of its storage table) by picking a subset of fields,
//! optionally forcing them to be present and refining individual fields.
//! Derived schemas are compiled once into [`CompiledSchema`] validators and
//! looked up by [`SchemaName`].
//!
//! Validation is all-or-nothing: a [`ValidationError`] lists every field
//! violation, and fields outside the declared set are silently dropped.

pub mod canonical;
pub mod derived;
pub mod field;
pub mod records;
pub mod registry;
pub mod violation;

pub use canonical::Entity;
pub use derived::{CompiledSchema, DerivedSchema};
pub use field::{Constraint, FieldDef, FieldKind, Presence};
pub use records::SchemaInput;
pub use registry::{SchemaName, SchemaRegistry};
pub use violation::{FieldViolation, ValidatedRecord, ValidationError, ViolationCode};
