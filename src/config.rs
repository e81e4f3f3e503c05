//! Configuration handling for the contact form

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default EmailJS API origin
pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com";

const ENV_SERVICE_ID: &str = "CONTACT_EMAILJS_SERVICE_ID";
const ENV_TEMPLATE_ID: &str = "CONTACT_EMAILJS_TEMPLATE_ID";
const ENV_PUBLIC_KEY: &str = "CONTACT_EMAILJS_PUBLIC_KEY";
const ENV_ACCESS_TOKEN: &str = "CONTACT_EMAILJS_ACCESS_TOKEN";
const ENV_ENDPOINT: &str = "CONTACT_EMAILJS_ENDPOINT";

/// User configuration, as stored in `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactConfig {
    /// EmailJS service id
    pub service_id: Option<String>,
    /// EmailJS template id
    pub template_id: Option<String>,
    /// EmailJS public key (sent as `user_id`)
    pub public_key: Option<String>,
    /// EmailJS private key, only needed when strict mode is on
    pub access_token: Option<String>,
    /// API origin override
    pub endpoint: Option<String>,
}

/// Everything the mailer needs, fully resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<String>,
    pub endpoint: String,
}

impl ContactConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "portfolio", "contact-tui")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from the default location, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Replace values with non-empty ones from `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_SERVICE_ID) {
            self.service_id = Some(v);
        }
        if let Some(v) = get(ENV_TEMPLATE_ID) {
            self.template_id = Some(v);
        }
        if let Some(v) = get(ENV_PUBLIC_KEY) {
            self.public_key = Some(v);
        }
        if let Some(v) = get(ENV_ACCESS_TOKEN) {
            self.access_token = Some(v);
        }
        if let Some(v) = get(ENV_ENDPOINT) {
            self.endpoint = Some(v);
        }
    }

    /// Resolve into mailer settings, failing on the first missing value
    pub fn mail_settings(&self) -> Result<MailSettings> {
        fn required(value: &Option<String>, name: &str, env: &str) -> Result<String> {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => bail!("missing `{name}` (set it in config.json or {env})"),
            }
        }

        Ok(MailSettings {
            service_id: required(&self.service_id, "service_id", ENV_SERVICE_ID)?,
            template_id: required(&self.template_id, "template_id", ENV_TEMPLATE_ID)?,
            public_key: required(&self.public_key, "public_key", ENV_PUBLIC_KEY)?,
            access_token: self.access_token.clone(),
            endpoint: self
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn complete() -> ContactConfig {
        ContactConfig {
            service_id: Some("service_x".to_string()),
            template_id: Some("template_y".to_string()),
            public_key: Some("pk".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ContactConfig::default();
        assert!(config.service_id.is_none());
        assert!(config.template_id.is_none());
        assert!(config.public_key.is_none());
        assert!(config.access_token.is_none());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: ContactConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.service_id.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"service_id": "service_x", "unknown_field": "value"}"#;
        let parsed: ContactConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.service_id, Some("service_x".to_string()));
    }

    #[test]
    fn test_mail_settings_uses_default_endpoint() {
        let settings = complete().mail_settings().unwrap();
        assert_eq!(
            settings,
            MailSettings {
                service_id: "service_x".to_string(),
                template_id: "template_y".to_string(),
                public_key: "pk".to_string(),
                access_token: None,
                endpoint: DEFAULT_ENDPOINT.to_string(),
            }
        );
    }

    #[test]
    fn test_mail_settings_names_missing_key() {
        let config = ContactConfig {
            template_id: None,
            ..complete()
        };
        let err = config.mail_settings().unwrap_err().to_string();
        assert!(err.contains("template_id"), "{err}");
        assert!(err.contains(ENV_TEMPLATE_ID), "{err}");
    }

    #[test]
    fn test_mail_settings_rejects_blank_values() {
        let config = ContactConfig {
            public_key: Some("   ".to_string()),
            ..complete()
        };
        assert!(config.mail_settings().is_err());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_SERVICE_ID, "service_env"),
            (ENV_ENDPOINT, "http://localhost:3000"),
            (ENV_TEMPLATE_ID, ""),
        ]);
        let mut config = complete();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.service_id, Some("service_env".to_string()));
        assert_eq!(config.endpoint, Some("http://localhost:3000".to_string()));
        // Empty overrides are ignored
        assert_eq!(config.template_id, Some("template_y".to_string()));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("contact-tui-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(
            &path,
            r#"{"service_id": "s", "template_id": "t", "public_key": "p", "access_token": "a"}"#,
        )
        .unwrap();

        let config = ContactConfig::load_from(&path).unwrap();
        let settings = config.mail_settings().unwrap();
        assert_eq!(settings.access_token, Some("a".to_string()));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_from_reports_bad_json() {
        let dir = std::env::temp_dir().join(format!("contact-tui-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ContactConfig::load_from(&path).unwrap_err().to_string();
        assert!(err.contains("failed to parse"), "{err}");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_path_points_at_config_json() {
        if let Some(path) = ContactConfig::config_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.json"));
            assert!(path.to_string_lossy().contains("contact-tui"));
        }
    }
}
