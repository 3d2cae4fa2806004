use crate::schema::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Raw input failed one or more field constraints.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A schema name that is not part of the registry.
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    /// A derived schema references a field its canonical schema does not have.
    #[error("Invalid schema definition for {entity}: {message}")]
    SchemaDefinition {
        entity: &'static str,
        message: String,
    },
}
