//! Error types for the cable drop generator

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CabledropError {
    // Generation errors
    #[error(
        "No cable drops could be generated. Make sure HP and FAT placemarks share a BOUNDARY \
         and are no further apart than the maximum distance"
    )]
    NoDropsProduced,

    #[error("Invalid drop style '{style}'. Use straight or curved")]
    InvalidStyle { style: String },

    // Format errors
    #[error("Unsupported format: .{extension} (supported: {})", supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    #[error("{format} error: {message}")]
    FormatError { format: String, message: String },

    #[error("Invalid {format} file: {reason}")]
    FormatValidation { format: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, CabledropError>;
