//! Site configuration.
//!
//! Loaded from TOML (`academy.toml` by default), every section optional.
//! Backend credentials can be overridden through `ACADEMY_BACKEND_URL` and
//! `ACADEMY_BACKEND_KEY` so secrets stay out of the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding `backend.url`.
pub const ENV_BACKEND_URL: &str = "ACADEMY_BACKEND_URL";
/// Environment variable overriding `backend.anon_key`.
pub const ENV_BACKEND_KEY: &str = "ACADEMY_BACKEND_KEY";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub backend: BackendConfig,
    /// Hero slider rotation
    pub hero: CarouselSettings,
    /// Featured lectures strip (manual navigation unless configured otherwise)
    pub lectures: CarouselSettings,
    pub leads: LeadSettings,
    pub contact: ContactSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            hero: CarouselSettings::default(),
            lectures: CarouselSettings {
                autoplay: false,
                ..CarouselSettings::default()
            },
            leads: LeadSettings::default(),
            contact: ContactSettings::default(),
        }
    }
}

/// Hosted row store the site talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    /// Public (anon) API key
    pub anon_key: Option<String>,
}

impl BackendConfig {
    /// Both URL and key are present and non-blank.
    pub fn is_configured(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        present(&self.url) && present(&self.anon_key)
    }
}

/// Carousel timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub interval_ms: u64,
    pub autoplay: bool,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            autoplay: true,
        }
    }
}

impl CarouselSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Lead capture behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeadSettings {
    /// `source_page` recorded when the host does not supply one
    pub default_source_page: String,
    /// How long the success message stays up before the form resets
    pub success_display_ms: u64,
}

impl Default for LeadSettings {
    fn default() -> Self {
        Self {
            default_source_page: "homepage".to_string(),
            success_display_ms: 3000,
        }
    }
}

impl LeadSettings {
    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}

/// Contact bar details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub phone: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            phone: "1800-212-7688".to_string(),
        }
    }
}

impl ContactSettings {
    /// `tel:` link target, digits only.
    pub fn tel_href(&self) -> String {
        let digits: String = self.phone.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("tel:{digits}")
    }
}

impl SiteConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load config from a specific path.
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply backend overrides from a variable lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        if let Some(url) = non_blank(lookup(ENV_BACKEND_URL)) {
            self.backend.url = Some(url);
        }
        if let Some(key) = non_blank(lookup(ENV_BACKEND_KEY)) {
            self.backend.anon_key = Some(key);
        }
        self
    }

    /// Apply backend overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert!(!config.backend.is_configured());
        assert_eq!(config.hero.interval(), Duration::from_secs(5));
        assert!(config.hero.autoplay);
        assert!(!config.lectures.autoplay);
        assert_eq!(config.leads.default_source_page, "homepage");
        assert_eq!(config.leads.success_display(), Duration::from_secs(3));
        assert_eq!(config.contact.tel_href(), "tel:18002127688");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
[backend]
url = "https://demo.supabase.co"
anon_key = "public-anon"

[hero]
interval_ms = 7000
"#,
        )
        .expect("parse");
        assert!(config.backend.is_configured());
        assert_eq!(config.hero.interval_ms, 7000);
        assert!(config.hero.autoplay);
        assert_eq!(config.lectures, SiteConfig::default().lectures);
        assert_eq!(config.contact, ContactSettings::default());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = SiteConfig::load_from_path(&temp.path().join("academy.toml")).expect("load");
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_load_invalid_file_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("academy.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(file, "[hero]\ninterval_ms = \"soon\"").expect("write config");

        let err = SiteConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides_replace_backend_only_when_set() {
        let config = SiteConfig::default().with_overrides(|name| match name {
            ENV_BACKEND_URL => Some("https://override.supabase.co".to_string()),
            ENV_BACKEND_KEY => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.backend.url.as_deref(), Some("https://override.supabase.co"));
        assert_eq!(config.backend.anon_key, None);
    }
}
