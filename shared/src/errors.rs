//! Error types shared by the tracker crates

use thiserror::Error;

/// Payload shape errors raised while decoding backend JSON
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Unexpected payload shape for {entity}: {message}")]
    Shape { entity: &'static str, message: String },

    #[error("Invalid number for {field}: {value}")]
    Number { field: &'static str, value: String },

    #[error("Invalid time of day: {0}")]
    TimeOfDay(String),
}

impl DecodeError {
    pub fn shape(entity: &'static str, err: impl std::fmt::Display) -> Self {
        DecodeError::Shape {
            entity,
            message: err.to_string(),
        }
    }
}

/// Form input errors raised before a request is sent
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{label}: {message}")]
    Field {
        field: String,
        label: String,
        message: String,
    },

    #[error("{}", .0.join(", "))]
    Many(Vec<String>),
}
