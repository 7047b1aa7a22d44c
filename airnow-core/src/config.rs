use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const API_KEY_VAR: &str = "AIRNOW_API_KEY";
pub const DEFAULT_ZIP_VAR: &str = "AIRNOW_DEFAULT_ZIP";
pub const BASE_URL_VAR: &str = "AIRNOW_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://www.airnowapi.org/";

/// Settings the lookup pipeline needs at request time.
///
/// Nothing here is validated on load: a missing key only becomes an error
/// when a command actually needs it.
///
/// Example TOML:
/// ```toml
/// api_key = "ABCDEF01-23456789-ABCDEF01-23456789"
/// default_zip = "37206"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub default_zip: Option<String>,

    /// Override for the upstream API root, mostly useful for pointing at a mock server.
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "airnow", "airnow-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay environment-style values on top of whatever was loaded from disk.
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`. Empty values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_VAR) {
            self.api_key = Some(key);
        }
        if let Some(zip) = get(DEFAULT_ZIP_VAR) {
            self.default_zip = Some(zip);
        }
        if let Some(url) = get(BASE_URL_VAR) {
            self.base_url = Some(url);
        }
        self
    }

    /// API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    /// Default ZIP code, if one is configured and non-blank.
    pub fn default_zip(&self) -> Option<&str> {
        non_blank(self.default_zip.as_deref())
    }

    pub fn base_url(&self) -> &str {
        non_blank(self.base_url.as_deref()).unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn set_default_zip(&mut self, zip: String) {
        let zip = zip.trim().to_string();
        self.default_zip = if zip.is_empty() { None } else { Some(zip) };
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_config_has_nothing_configured() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.default_zip(), None);
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn env_overrides_file_values() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            default_zip: Some("10001".into()),
            base_url: None,
        }
        .with_env_overrides(env(&[(API_KEY_VAR, "ENV_KEY"), (BASE_URL_VAR, "http://127.0.0.1:9/")]));

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
        assert_eq!(cfg.default_zip(), Some("10001"));
        assert_eq!(cfg.base_url(), "http://127.0.0.1:9/");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Default::default()
        }
        .with_env_overrides(env(&[(API_KEY_VAR, "  "), (DEFAULT_ZIP_VAR, "")]));

        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
        assert_eq!(cfg.default_zip(), None);
    }

    #[test]
    fn blank_file_values_count_as_missing() {
        let cfg = Config::from_toml("api_key = \"\"\ndefault_zip = \" \"\n").expect("valid toml");

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.default_zip(), None);
    }

    #[test]
    fn toml_roundtrip_keeps_values() {
        let mut cfg = Config::default();
        cfg.set_api_key(" KEY ".into());
        cfg.set_default_zip("37206".into());

        let text = toml::to_string_pretty(&cfg).expect("serializable");
        let parsed = Config::from_toml(&text).expect("parsable");

        assert_eq!(parsed, cfg);
        assert_eq!(parsed.api_key(), Some("KEY"));
    }

    #[test]
    fn clearing_default_zip() {
        let mut cfg = Config::default();
        cfg.set_default_zip("37206".into());
        cfg.set_default_zip("   ".into());

        assert_eq!(cfg.default_zip, None);
    }
}
