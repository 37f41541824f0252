//! Error types for the nutrition lookup client.
//!
//! # Design
//! A single enum covers the whole lookup chain so the composite resolver can
//! propagate any step's failure with `?`. Non-2xx responses keep their status,
//! category and raw body; measure mismatches keep the labels that were
//! available so callers can report them.

use thiserror::Error;

use crate::classify::StatusClass;

/// Errors returned by `NutritionClient` and the resolver.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connect, DNS, TLS, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The provider answered with a status outside 200..300.
    #[error("response code is {status}, and is {}", .class.description())]
    UnexpectedStatus {
        status: u16,
        class: StatusClass,
        body: String,
    },

    /// The body was not JSON, or lacked the structure the step needs.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Qualifiers were given as something other than a list of strings.
    #[error("qualifiers must be a list of URI strings, even for a single value: {0}")]
    QualifierType(String),

    #[error("quantity must be a finite, non-negative number, got {0}")]
    InvalidQuantity(f64),

    #[error("no food candidates found for barcode {barcode}")]
    NoFoodCandidates { barcode: String },

    /// The requested unit label is not among the food's measures.
    #[error("measure '{requested}' not available, choose one of: {}", .available.join(", "))]
    MeasureNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("attribute '{attribute}' not present in nutrient response")]
    AttributeNotFound { attribute: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
