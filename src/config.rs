//! Persisted archive configuration.
//!
//! Connection settings live in a single TOML file written by `cloudphoto init`
//! and read by every other command.
//!
//! ## Config File Location
//!
//! ```text
//! ~/.config/cloudphoto/cloudphotorc
//! ```
//!
//! Any other path can be passed with the global `--config` flag.
//!
//! ## Configuration Options
//!
//! ```toml
//! bucket = "my-photos"                          # required
//! aws_access_key_id = "YCAJ..."                 # required
//! aws_secret_access_key = "YCM..."              # required
//! region = "ru-central1"
//! endpoint_url = "https://storage.yandexcloud.net"
//! website_domain = "yandexcloud.net"            # public site: https://<bucket>.website.<domain>/
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config not found at {0}; run `cloudphoto init` first")]
    Missing(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// File name of the config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "cloudphotorc";

/// Connection settings for the photo archive bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Bucket holding the archive and the generated site.
    pub bucket: String,
    /// Static access key id.
    pub aws_access_key_id: String,
    /// Static secret access key.
    pub aws_secret_access_key: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 API endpoint.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    /// Domain of the provider's website hosting, used to build public URLs.
    #[serde(default = "default_website_domain")]
    pub website_domain: String,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`.
    ///
    /// Needed for local servers (`localhost`, MinIO) where bucket subdomains
    /// do not resolve.
    #[serde(default)]
    pub force_path_style: bool,
}

fn default_region() -> String {
    "ru-central1".to_string()
}

fn default_endpoint_url() -> String {
    "https://storage.yandexcloud.net".to_string()
}

fn default_website_domain() -> String {
    "yandexcloud.net".to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            aws_access_key_id: String::new(),
            aws_secret_access_key: String::new(),
            region: default_region(),
            endpoint_url: default_endpoint_url(),
            website_domain: default_website_domain(),
            force_path_style: false,
        }
    }
}

impl ArchiveConfig {
    /// Config with the given credentials and bucket, provider defaults elsewhere.
    pub fn new(bucket: &str, access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            aws_access_key_id: access_key_id.to_string(),
            aws_secret_access_key: secret_access_key.to_string(),
            ..Self::default()
        }
    }

    /// Reject configs that cannot possibly connect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("bucket", &self.bucket),
            ("aws_access_key_id", &self.aws_access_key_id),
            ("aws_secret_access_key", &self.aws_secret_access_key),
            ("endpoint_url", &self.endpoint_url),
            ("website_domain", &self.website_domain),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Default config location: `~/.config/cloudphoto/cloudphotorc`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("cannot determine the home directory".to_string())
    })?;
    Ok(home.join(".config").join("cloudphoto").join(CONFIG_FILE_NAME))
}

/// Load and validate the config at `path`.
pub fn load_config(path: &Path) -> Result<ArchiveConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let config: ArchiveConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Validate and write `config` to `path`, creating the parent directory.
pub fn save_config(path: &Path, config: &ArchiveConfig) -> Result<(), ConfigError> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_yandex() {
        let config = ArchiveConfig::default();
        assert_eq!(config.region, "ru-central1");
        assert_eq!(config.endpoint_url, "https://storage.yandexcloud.net");
        assert_eq!(config.website_domain, "yandexcloud.net");
    }

    #[test]
    fn parse_minimal_config_fills_defaults() {
        let toml = r#"
bucket = "photos"
aws_access_key_id = "id"
aws_secret_access_key = "secret"
"#;
        let config: ArchiveConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bucket, "photos");
        assert_eq!(config.region, "ru-central1");
        assert_eq!(config.endpoint_url, "https://storage.yandexcloud.net");
        assert!(!config.force_path_style);
    }

    #[test]
    fn parse_local_endpoint_with_path_style() {
        let toml = r#"
bucket = "photos"
aws_access_key_id = "id"
aws_secret_access_key = "secret"
endpoint_url = "http://localhost:4566"
force_path_style = true
"#;
        let config: ArchiveConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.endpoint_url, "http://localhost:4566");
        assert!(config.force_path_style);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let toml = r#"
bucket = "photos"
aws_access_key_id = "id"
aws_secret_access_key = "secret"
bukcet = "typo"
"#;
        assert!(toml::from_str::<ArchiveConfig>(toml).is_err());
    }

    #[test]
    fn validate_rejects_empty_bucket() {
        let config = ArchiveConfig::new("  ", "id", "secret");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bucket"));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir").join(CONFIG_FILE_NAME);
        let mut config = ArchiveConfig::new("photos", "id", "secret");
        config.endpoint_url = "http://localhost:9000".to_string();
        config.force_path_style = true;

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn load_missing_file_is_missing_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        assert!(matches!(load_config(&path), Err(ConfigError::Missing(p)) if p == path));
    }

    #[test]
    fn load_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn save_refuses_invalid_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        let config = ArchiveConfig::new("photos", "", "secret");
        assert!(matches!(
            save_config(&path, &config),
            Err(ConfigError::Validation(_))
        ));
        assert!(!path.exists());
    }
}
