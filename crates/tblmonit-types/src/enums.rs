//! Common enumerations used throughout tblmonit.

use std::fmt;
use std::path::Path;

/// Process-wide log verbosity tier.
///
/// Ordered from quietest to most detailed; `Disabled` is the default until
/// bootstrap decides otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogVerbosity {
    /// No log output at all
    #[default]
    Disabled,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
}

impl fmt::Display for LogVerbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogVerbosity::Disabled => write!(f, "disabled"),
            LogVerbosity::Info => write!(f, "info"),
            LogVerbosity::Debug => write!(f, "debug"),
        }
    }
}

/// Configuration file formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// JSON document
    Json,
    /// TOML document
    Toml,
    /// YAML document
    Yaml,
}

impl ConfigFormat {
    /// Extensions tried during discovery, in search order.
    pub const SEARCH_EXTENSIONS: &'static [&'static str] = &["json", "toml", "yaml", "yml"];

    /// Map a file extension (without the dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }

    /// Detect the format of a path from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_default_is_disabled() {
        assert_eq!(LogVerbosity::default(), LogVerbosity::Disabled);
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(LogVerbosity::Disabled < LogVerbosity::Info);
        assert!(LogVerbosity::Info < LogVerbosity::Debug);
    }

    #[test]
    fn test_verbosity_display() {
        assert_eq!(LogVerbosity::Disabled.to_string(), "disabled");
        assert_eq!(LogVerbosity::Debug.to_string(), "debug");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path("/home/u/.tblmonit.yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path("cfg.JSON"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path("cfg.toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path("cfg.ini"), None);
        assert_eq!(ConfigFormat::from_path("/home/u/.tblmonit"), None);
    }

    #[test]
    fn test_search_extensions_all_known() {
        for ext in ConfigFormat::SEARCH_EXTENSIONS {
            assert!(ConfigFormat::from_extension(ext).is_some(), "{ext}");
        }
    }
}
