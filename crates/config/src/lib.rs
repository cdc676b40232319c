//! Configuration loading for Herald applications
//!
//! Provides utilities for the shared Herald config directory
//! (~/.config/herald/) and for loading dotenv-style environment files,
//! one per deployment environment (`.env.local`, `.env.production`).
//!
//! Call [`init`] at application startup to bootstrap the config directory.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Initialize the Herald config directory.
///
/// Creates ~/.config/herald/ if it doesn't exist.
/// Call this once at application startup.
pub fn init() -> Result<PathBuf> {
    ensure_config_dir()
}

/// Get the Herald config directory (~/.config/herald/)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("herald"))
}

/// Get the path to a config file within the Herald config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Ensure the Herald config directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

/// Parse a dotenv-style environment file into a key/value map.
///
/// Supported syntax: one `KEY=VALUE` per line, `#` comments, blank lines,
/// optional single or double quotes around the value. Values are not
/// interpolated. The caller decides how the map merges with the process
/// environment (process variables conventionally win).
pub fn parse_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read environment file: {}", path.display()))?;

    let mut vars = HashMap::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').with_context(|| {
            format!(
                "Malformed line {} in {} (expected KEY=VALUE)",
                lineno + 1,
                path.display()
            )
        })?;
        vars.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }
    Ok(vars)
}

/// Strip one matching pair of surrounding quotes, if present.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_dir() {
        let dir = config_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with("herald"));
    }

    #[test]
    fn test_config_path() {
        let path = config_path("watermark");
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.ends_with("herald/watermark"));
    }

    #[test]
    fn test_parse_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# deployment credentials").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "PORTAL_BASE_URL=https://portal.example.com").unwrap();
        writeln!(file, "PORTAL_USERNAME = parent01 ").unwrap();
        writeln!(file, "MAIL_PASSWORD=\"s3cret=value\"").unwrap();
        writeln!(file, "RECIPIENT='family@example.com'").unwrap();

        let vars = parse_env_file(file.path()).unwrap();
        assert_eq!(vars["PORTAL_BASE_URL"], "https://portal.example.com");
        assert_eq!(vars["PORTAL_USERNAME"], "parent01");
        assert_eq!(vars["MAIL_PASSWORD"], "s3cret=value");
        assert_eq!(vars["RECIPIENT"], "family@example.com");
    }

    #[test]
    fn test_parse_env_file_malformed_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NOT A KEY VALUE PAIR").unwrap();
        assert!(parse_env_file(file.path()).is_err());
    }

    #[test]
    fn test_parse_env_file_missing() {
        assert!(parse_env_file(Path::new("/nonexistent/.env.local")).is_err());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"quoted\""), "quoted");
        assert_eq!(unquote("'quoted'"), "quoted");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\"mismatched'"), "\"mismatched'");
        assert_eq!(unquote("\""), "\"");
    }
}
