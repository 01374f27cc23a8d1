use crate::entity::EntityId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Setup errors, detected before any pair is scored
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Schema must declare at least one attribute")]
    EmptySchema,

    #[error("Attribute '{0}' has negative weight")]
    NegativeWeight(String),

    #[error("Attribute '{0}' has a non-finite weight")]
    NonFiniteWeight(String),

    #[error("Total attribute weight cannot be zero")]
    ZeroTotalWeight,

    #[error("Attribute '{0}' is declared more than once")]
    DuplicateAttribute(String),

    #[error("Invalid scale: min {min} must not exceed max {max}")]
    InvalidScale { min: f64, max: f64 },
}

/// Input data errors, reported per offending entity or column
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    #[error("Entity {id} has {actual} attribute values, expected {expected}")]
    ValueCountMismatch {
        id: EntityId,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row}: column '{column}' is not numeric: '{value}'")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Entity {id} has a non-finite value for '{attribute}'")]
    NonFiniteValue { id: EntityId, attribute: String },

    #[error("Entity id {0} appears more than once")]
    DuplicateEntityId(EntityId),
}
