//! Client configuration: where the directory lives and how the panel paces requests.
//!
//! Values come from defaults, then `.usersearch.toml` (project-local, falling back
//! to the per-user config directory), then the `USERSEARCH_BASE_URL` environment
//! variable. Front ends apply their own flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ConfigError;

/// Quiescence window before typed input is treated as a committed query.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SEARCH_PATH: &str = "/api/search";
pub const DEFAULT_SUGGESTED_PATH: &str = "/api/users/suggested";

/// Project-local config file name.
pub const CONFIG_FILE_NAME: &str = ".usersearch.toml";

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "USERSEARCH_BASE_URL";

/// Known keys in `.usersearch.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] =
    &["base_url", "search_path", "suggested_path", "debounce_ms", "timeout_secs"];

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme and host of the directory backend, e.g. `https://example.com`.
    pub base_url: String,
    pub search_path: String,
    pub suggested_path: String,
    pub debounce: Duration,
    /// Per-request timeout. `None` waits as long as the transport does.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            suggested_path: DEFAULT_SUGGESTED_PATH.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            timeout: None,
        }
    }
}

/// Per-user config file: `~/.usersearch/config.toml`, or
/// `%APPDATA%\usersearch\config.toml` on Windows.
pub fn user_config_file() -> Option<PathBuf> {
    let (var, dir) = if cfg!(windows) { ("APPDATA", "usersearch") } else { ("HOME", ".usersearch") };
    let base = std::env::var_os(var).or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(PathBuf::from(base).join(dir).join("config.toml"))
}

/// Number of single-character edits turning `typed` into `known`.
fn typo_distance(typed: &str, known: &str) -> usize {
    let known: Vec<char> = known.chars().collect();
    let mut row: Vec<usize> = (0..=known.len()).collect();
    for (i, t) in typed.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, k) in known.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if t == *k { diagonal } else { 1 + diagonal.min(above).min(row[j]) };
            diagonal = above;
        }
    }
    row[known.len()]
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl ClientConfig {
    /// Resolve configuration for a process started in `cwd`, reading the
    /// per-user file and `USERSEARCH_BASE_URL` from the environment.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from(cwd, user_config_file(), std::env::var(BASE_URL_ENV).ok())
    }

    /// Uses `cwd/.usersearch.toml` if present, otherwise `global` if it exists,
    /// otherwise defaults. `env` is applied last as the base URL override.
    pub fn load_from(
        cwd: &Path,
        global: Option<PathBuf>,
        env: Option<String>,
    ) -> Result<Self, ConfigError> {
        let local = cwd.join(CONFIG_FILE_NAME);
        let mut config = match global {
            _ if local.is_file() => Self::from_file(&local)?,
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_override(env)?;
        Ok(config)
    }

    /// Defaults merged with the keys set in one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let table = content.parse::<toml::Table>().map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::default();
        config.apply_table(&table)?;
        Ok(config)
    }

    /// Overlay the keys present in `table`. Unknown keys are warned about, not rejected.
    pub fn apply_table(&mut self, table: &toml::Table) -> Result<(), ConfigError> {
        for key in table.keys() {
            if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
                continue;
            }
            let suggestion = KNOWN_CONFIG_KEYS
                .iter()
                .min_by_key(|k| typo_distance(key, k))
                .copied()
                .unwrap_or_default();
            if typo_distance(key, suggestion) <= 3 {
                warn!(
                    key = key.as_str(),
                    suggestion,
                    "Unknown key in {CONFIG_FILE_NAME} — did you mean '{suggestion}'?"
                );
            } else {
                warn!(
                    key = key.as_str(),
                    "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                );
            }
        }

        if let Some(v) = table.get("base_url") {
            let url = string_value("base_url", v)?;
            self.set_base_url(&url)?;
        }
        if let Some(v) = table.get("search_path") {
            self.search_path = path_value("search_path", v)?;
        }
        if let Some(v) = table.get("suggested_path") {
            self.suggested_path = path_value("suggested_path", v)?;
        }
        if let Some(v) = table.get("debounce_ms") {
            self.debounce = Duration::from_millis(non_negative("debounce_ms", v)?);
        }
        if let Some(v) = table.get("timeout_secs") {
            match non_negative("timeout_secs", v)? {
                0 => self.timeout = None,
                secs => self.timeout = Some(Duration::from_secs(secs)),
            }
        }
        Ok(())
    }

    /// Apply the `USERSEARCH_BASE_URL` value, if any.
    pub fn apply_env_override(&mut self, value: Option<String>) -> Result<(), ConfigError> {
        match value {
            Some(url) if !url.trim().is_empty() => self.set_base_url(&url),
            _ => Ok(()),
        }
    }

    /// Validate and store a base URL, dropping any trailing slash.
    pub fn set_base_url(&mut self, url: &str) -> Result<(), ConfigError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "base_url",
                message: format!("'{url}' must start with http:// or https://"),
            });
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(())
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, self.search_path)
    }

    pub fn suggested_url(&self) -> String {
        format!("{}{}", self.base_url, self.suggested_path)
    }
}

fn string_value(key: &'static str, v: &toml::Value) -> Result<String, ConfigError> {
    v.as_str().map(str::to_string).ok_or_else(|| ConfigError::Invalid {
        key,
        message: format!("expected a string, found {}", v.type_str()),
    })
}

fn path_value(key: &'static str, v: &toml::Value) -> Result<String, ConfigError> {
    let s = string_value(key, v)?;
    if s.starts_with('/') {
        Ok(s)
    } else {
        Ok(format!("/{s}"))
    }
}

fn non_negative(key: &'static str, v: &toml::Value) -> Result<u64, ConfigError> {
    match v.as_integer() {
        Some(n) if n >= 0 => Ok(n as u64),
        Some(n) => Err(ConfigError::Invalid { key, message: format!("{n} is negative") }),
        None => Err(ConfigError::Invalid {
            key,
            message: format!("expected an integer, found {}", v.type_str()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> toml::Table {
        src.parse::<toml::Table>().unwrap()
    }

    #[test]
    fn defaults_use_half_second_debounce() {
        let c = ClientConfig::default();
        assert_eq!(c.debounce, Duration::from_millis(500));
        assert_eq!(c.search_url(), "http://localhost:3000/api/search");
        assert_eq!(c.suggested_url(), "http://localhost:3000/api/users/suggested");
        assert!(c.timeout.is_none());
    }

    #[test]
    fn table_overrides_known_keys() {
        let mut c = ClientConfig::default();
        c.apply_table(&table(
            r#"
            base_url = "https://social.example/"
            search_path = "v2/search"
            debounce_ms = 250
            timeout_secs = 10
            "#,
        ))
        .unwrap();
        assert_eq!(c.base_url, "https://social.example");
        assert_eq!(c.search_path, "/v2/search");
        assert_eq!(c.debounce, Duration::from_millis(250));
        assert_eq!(c.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let mut c = ClientConfig::default();
        c.apply_table(&table("debounce = 100")).unwrap();
        assert_eq!(c, ClientConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let mut c = ClientConfig::default();
        assert!(c.apply_table(&table(r#"base_url = "ftp://nope""#)).is_err());
        assert!(c.apply_table(&table("debounce_ms = -1")).is_err());
        assert!(c.apply_table(&table(r#"debounce_ms = "fast""#)).is_err());
    }

    #[test]
    fn env_override_wins_and_blank_is_ignored() {
        let mut c = ClientConfig::default();
        c.apply_env_override(Some("   ".into())).unwrap();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        c.apply_env_override(Some("http://10.0.0.2:8080".into())).unwrap();
        assert_eq!(c.base_url, "http://10.0.0.2:8080");
    }

    #[test]
    fn loads_project_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "suggested_path = \"/api/suggested\"\n")
            .unwrap();
        let c = ClientConfig::from_file(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(c.suggested_path, "/api/suggested");
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "base_url = ").unwrap();
        let err = ClientConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME), "{err}");
    }

    #[test]
    fn typo_distance_counts_edits() {
        assert_eq!(typo_distance("base_ur", "base_url"), 1);
        assert_eq!(typo_distance("debounce_ms", "debounce_ms"), 0);
        assert_eq!(typo_distance("serch_pth", "search_path"), 2);
        assert_eq!(typo_distance("", "timeout_secs"), 12);
    }

    #[test]
    fn local_file_beats_user_file_and_env_applies_last() {
        let cwd = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let global = home.path().join("config.toml");
        std::fs::write(&global, "base_url = \"http://global.test\"\ndebounce_ms = 100\n").unwrap();

        let c = ClientConfig::load_from(cwd.path(), Some(global.clone()), None).unwrap();
        assert_eq!(c.base_url, "http://global.test");
        assert_eq!(c.debounce, Duration::from_millis(100));

        std::fs::write(cwd.path().join(CONFIG_FILE_NAME), "search_path = \"/find\"\n").unwrap();
        let c = ClientConfig::load_from(cwd.path(), Some(global.clone()), None).unwrap();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.search_path, "/find");
        assert_eq!(c.debounce, Duration::from_millis(DEFAULT_DEBOUNCE_MS));

        let c = ClientConfig::load_from(cwd.path(), Some(global), Some("https://env.test/".into()))
            .unwrap();
        assert_eq!(c.base_url, "https://env.test");
        assert_eq!(c.search_path, "/find");
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let cwd = tempfile::tempdir().unwrap();
        let absent = cwd.path().join("nowhere").join("config.toml");
        let c = ClientConfig::load_from(cwd.path(), Some(absent), None).unwrap();
        assert_eq!(c, ClientConfig::default());
        let c = ClientConfig::load_from(cwd.path(), None, None).unwrap();
        assert_eq!(c, ClientConfig::default());
    }
}
