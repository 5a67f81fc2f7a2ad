//! Custom drink errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomDrinkError {
    #[error("a base flavor is required")]
    MissingBaseFlavor,

    #[error("unknown flavor {0:?}")]
    UnknownFlavor(String),

    #[error("unknown add-on {0:?}")]
    UnknownAddOn(String),

    #[error("unknown size {0:?}")]
    UnknownSize(String),

    #[error("{field} must be between 0 and 100")]
    LevelOutOfRange { field: &'static str },

    #[error("malformed custom drink options: {0}")]
    MalformedOptions(String),

    #[error("custom drink price overflowed")]
    Overflow,
}
