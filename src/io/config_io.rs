use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ChecklistConfig;

pub const CONFIG_FILE: &str = "checklist.toml";

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Find `checklist.toml` by walking up from `start`.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<ChecklistConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the config from an explicit path, or the nearest `checklist.toml`
/// above `cwd`, or fall back to defaults. Returns the path actually used.
pub fn load_config(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<(ChecklistConfig, Option<PathBuf>), ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover_config(cwd),
    };
    match path {
        Some(path) => {
            let config = read_config(&path)?;
            Ok((config, Some(path)))
        }
        None => Ok((ChecklistConfig::default(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r##"[checklist]
title = "Deployment Checklist"

[[items]]
text = "Verify staging environment"
checked = true

[[items]]
text = "Run integration tests"
priority = "high"
assignee = "ana"
due = "2025-06-01"

[[users]]
id = "ana"
name = "Ana Lima"

[ui]
show_key_hints = true

[ui.priority_colors]
high = "#FF0000"

[log]
level = "debug"
"##;

    #[test]
    fn test_read_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, SAMPLE).unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.checklist.title, "Deployment Checklist");
        assert_eq!(config.items.len(), 2);
        assert!(config.items[0].checked);
        assert_eq!(config.items[1].priority.as_deref(), Some("high"));
        assert_eq!(
            config.items[1].due,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(config.users[0].name, "Ana Lima");
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.priority_colors["high"], "#FF0000");
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.log.file, None);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ChecklistConfig = toml::from_str("").unwrap();
        assert_eq!(config.checklist.title, "Checklist");
        assert!(config.items.is_empty());
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_discover_walks_up() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), SAMPLE).unwrap();

        let found = discover_config(&nested).unwrap();
        assert_eq!(found, tmp.path().join(CONFIG_FILE));
    }

    #[test]
    fn test_load_without_file_is_default() {
        let tmp = TempDir::new().unwrap();
        // A temp dir normally has no checklist.toml above it
        if discover_config(tmp.path()).is_some() {
            return;
        }
        let (config, path) = load_config(None, tmp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.checklist.title, "Checklist");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = load_config(Some(&missing), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_parse_error_names_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "[[items]]\nchecked = true\n").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().starts_with("could not parse"));
    }
}
