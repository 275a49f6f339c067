//! Configuration types for the natural-order sorter

use crate::compare::Collation;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Natural ascending order (default)
    #[default]
    #[value(alias = "asc")]
    Ascending,
    /// Reverse of the ascending result
    #[value(alias = "desc")]
    Descending,
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Order::Ascending),
            "desc" | "descending" => Ok(Order::Descending),
            _ => Err(Error::InvalidArgument(format!("unknown order: {}", s))),
        }
    }
}

/// Which directory entries appear in a tree listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Files only; directories are still descended into
    #[value(alias = "file")]
    Files,
    /// Directories only
    #[value(aliases = ["folder", "dirs"])]
    Directories,
    /// Files and directories (default)
    #[default]
    Both,
}

impl EntryKind {
    /// Whether files are collected at each level
    pub fn includes_files(&self) -> bool {
        matches!(self, EntryKind::Files | EntryKind::Both)
    }

    /// Whether directories stay in the final listing
    pub fn includes_directories(&self) -> bool {
        matches!(self, EntryKind::Directories | EntryKind::Both)
    }
}

impl FromStr for EntryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "files" => Ok(EntryKind::Files),
            "folder" | "folders" | "dir" | "dirs" | "directory" | "directories" => {
                Ok(EntryKind::Directories)
            }
            "both" | "all" => Ok(EntryKind::Both),
            _ => Err(Error::InvalidArgument(format!("unknown entry kind: {}", s))),
        }
    }
}

/// Configuration for the sorter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ascending or descending output
    pub order: Order,

    /// Entry kinds included in directory listings
    pub entry_kind: EntryKind,

    /// Levels to descend below the root (0 = unlimited)
    pub depth: usize,

    /// Text collation: "system", "code-point" or a locale tag
    pub collation: Collation,

    /// Number of threads for listing directories (0 = auto)
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: Order::default(),
            entry_kind: EntryKind::default(),
            depth: 0,
            collation: Collation::default(),
            threads: 0,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            source: e,
        })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# natsort configuration file (TOML)

# Output order: "ascending" or "descending"
order = "ascending"

# Entries to list: "files", "directories" or "both"
# - files: directories are still walked, but only files are printed
entry_kind = "both"

# Levels to descend below the root directory (0 = unlimited)
depth = 0

# Text collation for non-numeric characters
# - "system": the operating system locale (default)
# - "code-point": raw Unicode order, no locale data
# - a locale tag such as "zh-CN", "de" or "sv"
collation = "system"

# Threads used to list sibling directories (0 = auto-detect)
threads = 0
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { source: toml::ser::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_order_from_str() {
        assert_eq!("ASC".parse::<Order>().unwrap(), Order::Ascending);
        assert_eq!("descending".parse::<Order>().unwrap(), Order::Descending);
        assert!(matches!(
            "sideways".parse::<Order>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_entry_kind_from_str() {
        assert_eq!("file".parse::<EntryKind>().unwrap(), EntryKind::Files);
        assert_eq!("Folder".parse::<EntryKind>().unwrap(), EntryKind::Directories);
        assert_eq!("both".parse::<EntryKind>().unwrap(), EntryKind::Both);
        assert!(matches!(
            "links".parse::<EntryKind>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_entry_kind_visibility() {
        assert!(EntryKind::Files.includes_files());
        assert!(!EntryKind::Files.includes_directories());
        assert!(!EntryKind::Directories.includes_files());
        assert!(EntryKind::Both.includes_files() && EntryKind::Both.includes_directories());
    }

    #[test]
    fn test_sample_config_parses_to_default() {
        let config: Config = toml::from_str(&Config::sample_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("order = \"descending\"\ncollation = \"sv\"").unwrap();
        assert_eq!(config.order, Order::Descending);
        assert_eq!(config.entry_kind, EntryKind::Both);
        assert_eq!(config.depth, 0);
        assert_eq!(config.collation, Collation::Locale("sv".into()));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("natsort.toml");

        let config = Config {
            order: Order::Descending,
            entry_kind: EntryKind::Files,
            depth: 3,
            collation: Collation::CodePoint,
            threads: 2,
        };
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file("/nonexistent/natsort.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
