//! Configuration types and structures.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Base name (without extension) of the discovered configuration file.
pub const CONFIG_BASE_NAME: &str = ".tblmonit";

/// Where the configuration file comes from.
///
/// Exactly one mode is active per run; an explicit path always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Path given with `--config`
    Explicit(PathBuf),
    /// Search `dir` for `base_name.<ext>`
    Discovered {
        /// Directory to search
        dir: PathBuf,
        /// File name without extension
        base_name: String,
    },
}

impl ConfigLocation {
    /// Discovery in the given home directory under the standard base name.
    pub fn in_home(home: impl AsRef<Path>) -> Self {
        ConfigLocation::Discovered {
            dir: home.as_ref().to_path_buf(),
            base_name: CONFIG_BASE_NAME.to_string(),
        }
    }

    /// Whether this location came from the command line.
    pub fn is_explicit(&self) -> bool {
        matches!(self, ConfigLocation::Explicit(_))
    }
}

/// The decoded configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Time zone identifier (IANA name), possibly empty
    pub time_zone: String,

    /// File the configuration was read from
    #[serde(skip)]
    pub source: PathBuf,

    /// Keys present in the sources that this layer does not interpret
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_keys: Vec<String>,
}

impl ResolvedConfig {
    /// Path of the file that was actually read.
    pub fn config_file_used(&self) -> &Path {
        &self.source
    }
}
