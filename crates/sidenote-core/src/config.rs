//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/sidenote/config.toml)
//! 3. Environment variables (SIDENOTE_* prefix)
//!
//! Environment variables take precedence over config file values.
//!
//! The configuration is a pure path resolver: it computes where the store
//! lives on disk but performs no I/O itself. Writers create directories
//! lazily on first write.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "SIDENOTE";

/// Default base directory name under the user's home directory
const DEFAULT_HOME_DIR: &str = ".sidenote";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory for all persisted state (entries, pointer, views)
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
        }
    }
}

impl Config {
    /// Create a configuration rooted at a specific directory
    ///
    /// Used by tests and by callers that manage their own storage location.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (SIDENOTE_HOME)
    /// 2. Config file (~/.config/sidenote/config.toml or SIDENOTE_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// A blank `SIDENOTE_HOME` is ignored, falling through to the
    /// configured or default base directory.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_HOME", ENV_PREFIX)) {
            if !val.trim().is_empty() {
                self.base_dir = PathBuf::from(val);
            }
        }
    }

    /// Get the config file path
    ///
    /// Can be overridden with SIDENOTE_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sidenote")
            .join("config.toml")
    }

    /// Directory holding one JSON file per entry record
    pub fn entries_dir(&self) -> PathBuf {
        self.base_dir.join("entries")
    }

    /// Path of the active-entry pointer file
    pub fn active_file(&self) -> PathBuf {
        self.base_dir.join("active.json")
    }

    /// Directory holding generated Markdown views
    pub fn views_dir(&self) -> PathBuf {
        self.base_dir.join("views")
    }

    /// Path of the regenerated active-entry Markdown view
    pub fn active_view_path(&self) -> PathBuf {
        self.views_dir().join("active-entry.md")
    }
}

/// Get the default base directory
fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HOME_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &["SIDENOTE_HOME", "SIDENOTE_CONFIG"];

    #[test]
    fn test_default_config() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::default();
        assert!(config.base_dir.ends_with(".sidenote"));
    }

    #[test]
    fn test_sub_paths() {
        let config = Config::new("/data/sidenote");

        assert_eq!(config.entries_dir(), PathBuf::from("/data/sidenote/entries"));
        assert_eq!(
            config.active_file(),
            PathBuf::from("/data/sidenote/active.json")
        );
        assert_eq!(config.views_dir(), PathBuf::from("/data/sidenote/views"));
        assert_eq!(
            config.active_view_path(),
            PathBuf::from("/data/sidenote/views/active-entry.md")
        );
    }

    #[test]
    fn test_env_override_home() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("SIDENOTE_HOME", "/tmp/sidenote-test");
        config.apply_env_overrides();

        assert_eq!(config.base_dir, PathBuf::from("/tmp/sidenote-test"));
    }

    #[test]
    fn test_blank_env_override_ignored() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::new("/configured/dir");

        env::set_var("SIDENOTE_HOME", "   ");
        config.apply_env_overrides();

        assert_eq!(config.base_dir, PathBuf::from("/configured/dir"));
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            base_dir = "/custom/data"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/custom/data"));
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert!(config.base_dir.ends_with(".sidenote"));
    }

    #[test]
    fn test_serialization() {
        let config = Config::new("/data/sidenote");

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("base_dir"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.base_dir, config.base_dir);
    }
}
