//! Settings file loading.

use crate::config::settings::Settings;
use crate::error::{HarnessError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HarnessError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HarnessError::Io(e)
        }
    })?;

    debug!("Loaded settings from {}", path.display());
    parse_settings(&content, path)
}

/// Parse YAML content into Settings.
///
/// An empty document yields the defaults.
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| HarnessError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load settings from `path` when given, defaults otherwise.
pub fn load_settings_or_default(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => load_settings(path),
        None => {
            debug!("No settings file given, using defaults");
            Ok(Settings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_settings_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yaml");
        fs::write(&path, "service_name: basic_network\ncleanup: false\n").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.service_name, "basic_network");
        assert!(!settings.cleanup);
    }

    #[test]
    fn load_settings_missing_file() {
        let result = load_settings(Path::new("/nonexistent/settings.yaml"));
        assert!(matches!(result, Err(HarnessError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_settings_invalid_yaml() {
        let result = parse_settings("service_name: [unclosed", Path::new("s.yaml"));
        match result {
            Err(HarnessError::ConfigParseError { path, .. }) => {
                assert_eq!(path, Path::new("s.yaml"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn parse_settings_wrong_type() {
        let result = parse_settings("http_timeout_secs: soon", Path::new("s.yaml"));
        assert!(matches!(result, Err(HarnessError::ConfigParseError { .. })));
    }

    #[test]
    fn empty_document_is_default() {
        let settings = parse_settings("\n", Path::new("s.yaml")).unwrap();
        assert_eq!(settings.service_name, Settings::default().service_name);
    }

    #[test]
    fn no_path_means_defaults() {
        let settings = load_settings_or_default(None).unwrap();
        assert_eq!(settings.customer, "generic");
    }
}
