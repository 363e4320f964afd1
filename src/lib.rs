//! nc2csv Library
//!
//! A Rust library for converting NetCDF classic-format files (CDF-1 and
//! CDF-2) into flat CSV tables suitable for spreadsheet consumption.
//!
//! This library provides tools for:
//! - Parsing the NetCDF classic binary container (dimensions, attributes,
//!   fixed and record variables)
//! - Tabularizing multi-dimensional variables into one row per coordinate
//!   tuple, with a bounded row budget
//! - Falling back to a per-variable flat listing when a file has no
//!   tabularizable data
//! - Serializing rows to CSV with the exact field semantics of the legacy
//!   web converter this tool replaces

pub mod config;
pub mod constants;
pub mod converter;

// Core application modules
pub mod app {
    pub mod models;
    pub mod source;
    pub mod services {
        pub mod classic_reader;
        pub mod csv_writer;
        pub mod tabularizer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Dimension, Row, Value, VariableData, VariableMeta};
pub use app::source::{DatasetSource, MemoryDataset};
pub use config::ConverterConfig;
pub use converter::{Conversion, OutputMode, convert_bytes, convert_file};

/// Result type alias for the converter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for NetCDF conversion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a parseable NetCDF classic file
    #[error("invalid NetCDF file: {message}")]
    InvalidFormat { message: String },

    /// The file magic is valid but the version byte is not supported
    #[error("unsupported NetCDF version byte: {version} (only classic CDF-1/CDF-2 are supported)")]
    UnsupportedVersion { version: u8 },

    /// A variable or its data could not be located in the dataset
    #[error("missing data: {name}")]
    MissingData { name: String },

    /// The caller supplied an unusable input (bad extension, empty payload)
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Directory traversal error
    #[error("directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an unsupported version error
    pub fn unsupported_version(version: u8) -> Self {
        Self::UnsupportedVersion { version }
    }

    /// Create a missing data error
    pub fn missing_data(name: impl Into<String>) -> Self {
        Self::MissingData { name: name.into() }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "directory traversal failed".to_string(),
            source: error,
        }
    }
}
