//! Configuration loading for tblmonit.
//!
//! This module locates the configuration file, layers environment overrides
//! on top of it, and decodes the result into a [`ResolvedConfig`].
//!
//! ## Configuration Layers
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables
//! 2. Values loaded from file
//! 3. Default values
//!
//! Every recognised key may be supplied by an environment variable named
//! after the key in upper case (`timeZone` is read from `TIMEZONE`). Empty
//! variables count as unset.
//!
//! ## Location
//!
//! A non-empty `--config` path is read as-is. Otherwise the home directory
//! is searched for `.tblmonit.json`, `.tblmonit.toml`, `.tblmonit.yaml` and
//! `.tblmonit.yml`, in that order.
//!
//! ## Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use std::path::Path;
//! use tblmonit_core::config;
//!
//! let vars: HashMap<String, String> = std::env::vars().collect();
//! let (resolved, report) = config::load("", Some(Path::new("/home/alice")), &vars)?;
//! println!("time zone: {:?} from {}", resolved.time_zone, report.file.display());
//! # Ok::<(), tblmonit_core::TblmonitError>(())
//! ```

use crate::util::data::{deep_merge, kind_of, lowercase_keys, parse_document};
use crate::util::fs::expand_path;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tblmonit_types::{ConfigFormat, ConfigLocation, ResolvedConfig, Result, TblmonitError};

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Default values
    Default = 0,
    /// Values loaded from file
    File = 1,
    /// Values from environment variables
    Environment = 2,
}

impl ConfigLayer {
    /// All layers, lowest priority first.
    pub const ALL: [ConfigLayer; 3] = [ConfigLayer::Default, ConfigLayer::File, ConfigLayer::Environment];
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLayer::Default => write!(f, "default"),
            ConfigLayer::File => write!(f, "file"),
            ConfigLayer::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration key this layer knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigKey {
    /// Name as written in configuration files
    pub name: &'static str,
}

impl ConfigKey {
    /// Case-folded name used for matching.
    pub fn canonical(&self) -> String {
        self.name.to_lowercase()
    }

    /// Environment variable that overrides this key.
    pub fn env_var(&self) -> String {
        self.name.to_uppercase()
    }
}

/// The time zone identifier.
pub const TIME_ZONE: ConfigKey = ConfigKey { name: "timeZone" };

/// Every key decoded into [`ResolvedConfig`].
pub const KNOWN_KEYS: &[ConfigKey] = &[TIME_ZONE];

/// Layered configuration data backed by one file.
#[derive(Clone, Debug)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: PathBuf,
}

impl Config {
    /// Read and parse the configuration file at `path`.
    ///
    /// The format is taken from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| TblmonitError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let content = fs::read_to_string(path).map_err(|source| TblmonitError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_content(&content, format, path)
    }

    /// Build a configuration from already-read file content.
    pub fn from_content(content: &str, format: ConfigFormat, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = lowercase_keys(parse_document(content, format, path)?);

        let mut layers = HashMap::new();
        layers.insert(ConfigLayer::Default, Self::defaults());
        layers.insert(ConfigLayer::File, value);

        Ok(Self {
            layers,
            file_path: path.to_path_buf(),
        })
    }

    /// Layer environment overrides for every known key on top of the file.
    pub fn with_env(mut self, vars: &HashMap<String, String>) -> Self {
        let mut overrides = Map::new();

        for key in KNOWN_KEYS {
            let var = key.env_var();
            match vars.get(&var) {
                Some(value) if !value.is_empty() => {
                    overrides.insert(key.canonical(), Value::String(value.clone()));
                }
                _ => {}
            }
        }

        if !overrides.is_empty() {
            self.layers.insert(ConfigLayer::Environment, Value::Object(overrides));
        }
        self
    }

    /// Highest-priority layer that supplies `key`, if any.
    pub fn layer_for(&self, key: &str) -> Option<ConfigLayer> {
        let key = key.to_lowercase();
        ConfigLayer::ALL
            .iter()
            .rev()
            .find(|layer| {
                self.layers
                    .get(*layer)
                    .and_then(|data| data.get(&key))
                    .is_some()
            })
            .copied()
    }

    /// Decode the merged layers into a [`ResolvedConfig`].
    ///
    /// Known keys must have the right type; anything else is listed in
    /// `extra_keys` and left for other subsystems.
    pub fn decode(&self) -> Result<ResolvedConfig> {
        let mut resolved = ResolvedConfig {
            source: self.file_path.clone(),
            ..ResolvedConfig::default()
        };

        let map = match self.merged_data() {
            Value::Object(map) => map,
            other => {
                return Err(TblmonitError::ConfigDecode {
                    path: self.file_path.clone(),
                    key: String::new(),
                    message: format!("expected a mapping, found {}", kind_of(&other)),
                })
            }
        };

        for (key, value) in map {
            if key == TIME_ZONE.canonical() {
                resolved.time_zone = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => {
                        return Err(TblmonitError::ConfigDecode {
                            path: self.file_path.clone(),
                            key: TIME_ZONE.name.to_string(),
                            message: format!("expected a string, found {}", kind_of(&other)),
                        })
                    }
                };
            } else {
                resolved.extra_keys.push(key);
            }
        }

        Ok(resolved)
    }

    fn defaults() -> Value {
        let mut map = Map::new();
        map.insert(TIME_ZONE.canonical(), Value::String(String::new()));
        Value::Object(map)
    }

    fn merged_data(&self) -> Value {
        let mut merged = Value::Object(Map::new());

        for layer in &ConfigLayer::ALL {
            if let Some(layer_data) = self.layers.get(layer) {
                merged = deep_merge(merged, layer_data.clone());
            }
        }

        merged
    }
}

/// Decide where the configuration comes from.
///
/// A non-empty explicit path always wins and never needs the home
/// directory. Without one, a missing home directory is fatal.
pub fn locate(explicit: &str, home: Option<&Path>) -> Result<ConfigLocation> {
    if !explicit.is_empty() {
        return Ok(ConfigLocation::Explicit(expand_path(explicit, home)));
    }

    let home = home.ok_or(TblmonitError::HomeDirNotFound)?;
    Ok(ConfigLocation::in_home(home))
}

/// Candidate files for a location, in the order they are tried.
pub fn candidates(location: &ConfigLocation) -> Vec<PathBuf> {
    match location {
        ConfigLocation::Explicit(path) => vec![path.clone()],
        ConfigLocation::Discovered { dir, base_name } => ConfigFormat::SEARCH_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", base_name, ext)))
            .collect(),
    }
}

/// Turn a location into the concrete file to read.
///
/// Discovery returns the first `base_name.<ext>` that exists, trying
/// [`ConfigFormat::SEARCH_EXTENSIONS`] in order.
pub fn find_config_file(location: &ConfigLocation) -> Result<PathBuf> {
    match location {
        ConfigLocation::Explicit(path) => Ok(path.clone()),
        ConfigLocation::Discovered { dir, base_name } => candidates(location)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| TblmonitError::ConfigNotFound {
                dir: dir.clone(),
                base_name: base_name.clone(),
            }),
    }
}

/// What the loader found on its way to a [`ResolvedConfig`].
///
/// Loading runs before the log sink exists, so this is kept and logged
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// How the file was located
    pub location: ConfigLocation,
    /// Files considered before and including the one read
    pub searched: Vec<PathBuf>,
    /// File that was read
    pub file: PathBuf,
    /// Highest-priority layer supplying each known key
    pub origins: Vec<(ConfigKey, ConfigLayer)>,
}

/// Locate, read, layer, and decode the configuration.
pub fn load(
    explicit: &str,
    home: Option<&Path>,
    vars: &HashMap<String, String>,
) -> Result<(ResolvedConfig, LoadReport)> {
    let location = locate(explicit, home)?;
    let file = find_config_file(&location)?;

    let mut searched = candidates(&location);
    if let Some(pos) = searched.iter().position(|candidate| *candidate == file) {
        searched.truncate(pos + 1);
    }

    let config = Config::load(&file)?.with_env(vars);
    let origins = KNOWN_KEYS
        .iter()
        .filter_map(|key| config.layer_for(key.name).map(|layer| (*key, layer)))
        .collect();
    let resolved = config.decode()?;

    Ok((
        resolved,
        LoadReport {
            location,
            searched,
            file,
            origins,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_config_layers() {
        let config = Config::from_content("timeZone: Asia/Tokyo\n", ConfigFormat::Yaml, "/tmp/c.yaml").unwrap();
        assert_eq!(config.layer_for("timeZone"), Some(ConfigLayer::File));

        let config = config.with_env(&env(&[("TIMEZONE", "Europe/Paris")]));
        assert_eq!(config.layer_for("timezone"), Some(ConfigLayer::Environment));
        assert_eq!(config.decode().unwrap().time_zone, "Europe/Paris");
    }

    #[test]
    fn test_default_layer_supplies_empty_time_zone() {
        let config = Config::from_content("", ConfigFormat::Yaml, "/tmp/c.yaml").unwrap();
        assert_eq!(config.layer_for("timeZone"), Some(ConfigLayer::Default));
        assert_eq!(config.decode().unwrap().time_zone, "");
    }

    #[test]
    fn test_empty_env_var_is_unset() {
        let config = Config::from_content("timeZone: Asia/Tokyo\n", ConfigFormat::Yaml, "/tmp/c.yaml")
            .unwrap()
            .with_env(&env(&[("TIMEZONE", "")]));
        assert_eq!(config.decode().unwrap().time_zone, "Asia/Tokyo");
    }

    #[test]
    fn test_env_supplies_key_missing_from_file() {
        let config = Config::from_content("{}", ConfigFormat::Json, "/tmp/c.json")
            .unwrap()
            .with_env(&env(&[("TIMEZONE", "America/New_York")]));
        assert_eq!(config.decode().unwrap().time_zone, "America/New_York");
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let config = Config::from_content("TIMEZONE: UTC\n", ConfigFormat::Yaml, "/tmp/c.yaml").unwrap();
        assert_eq!(config.decode().unwrap().time_zone, "UTC");
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let config = Config::from_content("timeZone: 9\n", ConfigFormat::Yaml, "/tmp/c.yaml").unwrap();
        let err = config.decode().unwrap_err();
        match err {
            TblmonitError::ConfigDecode { key, path, .. } => {
                assert_eq!(key, "timeZone");
                assert_eq!(path, PathBuf::from("/tmp/c.yaml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_null_time_zone_is_empty() {
        let config = Config::from_content("timeZone:\n", ConfigFormat::Yaml, "/tmp/c.yaml").unwrap();
        assert_eq!(config.decode().unwrap().time_zone, "");
    }

    #[test]
    fn test_decode_collects_extra_keys() {
        let yaml = "timeZone: UTC\nproject: my-gcp-project\ntables:\n  - dataset.events\n";
        let resolved = Config::from_content(yaml, ConfigFormat::Yaml, "/tmp/c.yaml").unwrap().decode().unwrap();
        assert_eq!(resolved.extra_keys, vec!["project".to_string(), "tables".to_string()]);
        assert_eq!(resolved.config_file_used(), Path::new("/tmp/c.yaml"));
    }

    #[test]
    fn test_locate_explicit_wins_without_home() {
        let loc = locate("/etc/tblmonit.yaml", None).unwrap();
        assert_eq!(loc, ConfigLocation::Explicit(PathBuf::from("/etc/tblmonit.yaml")));
    }

    #[test]
    fn test_locate_without_home_fails() {
        let err = locate("", None).unwrap_err();
        assert!(matches!(err, TblmonitError::HomeDirNotFound));
    }

    #[test]
    fn test_discovery_order() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".tblmonit.yaml"), "timeZone: Asia/Tokyo\n").unwrap();
        fs::write(home.path().join(".tblmonit.json"), r#"{"timeZone": "UTC"}"#).unwrap();

        let found = find_config_file(&ConfigLocation::in_home(home.path())).unwrap();
        assert_eq!(found, home.path().join(".tblmonit.json"));
    }

    #[test]
    fn test_discovery_not_found() {
        let home = TempDir::new().unwrap();
        let err = find_config_file(&ConfigLocation::in_home(home.path())).unwrap_err();
        assert!(matches!(err, TblmonitError::ConfigNotFound { .. }));
        assert!(err.to_string().contains(".tblmonit"));
    }

    #[test]
    fn test_load_discovered_yml() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".tblmonit.yml"), "timeZone: Asia/Tokyo\n").unwrap();

        let (resolved, report) = load("", Some(home.path()), &no_env()).unwrap();
        assert_eq!(resolved.time_zone, "Asia/Tokyo");
        assert_eq!(resolved.source, home.path().join(".tblmonit.yml"));
        assert!(!report.location.is_explicit());
        assert_eq!(report.file, home.path().join(".tblmonit.yml"));
        assert_eq!(report.searched, candidates(&ConfigLocation::in_home(home.path())));
        assert_eq!(report.origins, vec![(TIME_ZONE, ConfigLayer::File)]);
    }

    #[test]
    fn test_load_env_overrides_file() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".tblmonit.yaml"), "timeZone: Asia/Tokyo\n").unwrap();

        let (resolved, report) = load("", Some(home.path()), &env(&[("TIMEZONE", "Europe/Berlin")])).unwrap();
        assert_eq!(resolved.time_zone, "Europe/Berlin");
        assert_eq!(report.origins, vec![(TIME_ZONE, ConfigLayer::Environment)]);
        assert_eq!(report.searched.len(), 3);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = load(path.to_str().unwrap(), None, &no_env()).unwrap_err();
        match &err {
            TblmonitError::ConfigRead { path: failed, .. } => assert_eq!(failed, &path),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_load_explicit_skips_discovery() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".tblmonit.yaml"), "timeZone: Asia/Tokyo\n").unwrap();
        let explicit = home.path().join("other.toml");
        fs::write(&explicit, "timeZone = \"UTC\"\n").unwrap();

        let (resolved, report) = load(explicit.to_str().unwrap(), Some(home.path()), &no_env()).unwrap();
        assert_eq!(resolved.time_zone, "UTC");
        assert_eq!(resolved.source, explicit);
        assert!(report.location.is_explicit());
        assert_eq!(report.searched, vec![explicit.clone()]);
    }

    #[test]
    fn test_load_explicit_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tblmonit.conf");
        fs::write(&path, "timeZone=UTC\n").unwrap();

        let err = load(path.to_str().unwrap(), None, &no_env()).unwrap_err();
        assert!(matches!(err, TblmonitError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_explicit_tilde_path() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join("tm.yaml"), "timeZone: UTC\n").unwrap();

        let (resolved, _) = load("~/tm.yaml", Some(home.path()), &no_env()).unwrap();
        assert_eq!(resolved.source, home.path().join("tm.yaml"));
    }
}
