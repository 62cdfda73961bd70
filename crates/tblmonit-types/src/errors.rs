//! Error types for tblmonit startup.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tblmonit operations.
///
/// Every variant is fatal at startup: the binary reports it once and exits
/// with a non-zero status. Recoverable conditions (such as an unknown time
/// zone name) are modelled as warnings, never as errors.
#[derive(Error, Debug)]
pub enum TblmonitError {
    /// The current user's home directory could not be determined
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    /// Discovery found no configuration file in the search directory
    #[error("Config file \"{base_name}\" not found in \"{}\"", .dir.display())]
    ConfigNotFound {
        /// Directory that was searched
        dir: PathBuf,
        /// Base name without extension
        base_name: String,
    },

    /// The configuration file extension does not map to a known format
    #[error("Failed to read config file {}: unsupported config type", .path.display())]
    UnsupportedFormat {
        /// Offending file
        path: PathBuf,
    },

    /// The configuration file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The configuration file content is malformed
    #[error("Failed to read config file {}: {message}", .path.display())]
    ConfigParse {
        /// Offending file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A configuration key has the wrong shape for its field
    #[error("Failed to decode config file {}: key '{key}': {message}", .path.display())]
    ConfigDecode {
        /// Offending file
        path: PathBuf,
        /// Key as written in the source
        key: String,
        /// What was wrong with it
        message: String,
    },

    /// The log sink could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// A specialized Result type for tblmonit operations.
pub type Result<T> = std::result::Result<T, TblmonitError>;
