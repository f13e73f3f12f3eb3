use std::fs;
use std::path::Path;

use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{OutreachError, Result};

pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_FREQUENCY_HOURS: u64 = 24;
pub const DEFAULT_MAX_POSTS_PER_DAY: u32 = 3;

/// Top-level config (config.json + OUTREACH_* env overrides).
///
/// Loaded once at process start and passed by reference into the engine and
/// channel adapters; nothing mutates it during a cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_business_name")]
    pub business_name: String,
    #[serde(default = "default_target_message")]
    pub target_message: String,
    #[serde(default = "default_contact_info")]
    pub contact_info: String,
    #[serde(default)]
    pub platforms: PlatformsConfig,
    #[serde(default)]
    pub posting_schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformsConfig {
    #[serde(default)]
    pub facebook: StubPlatformConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub community_sites: StubPlatformConfig,
}

/// Placeholder platform (Facebook groups, community sites): only the
/// enablement flag is read; posting itself is a stub.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StubPlatformConfig {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Mailing list entries, either `"Name <addr>"` or a bare address.
    /// Order is preserved; duplicates are not rejected here.
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: String::new(),
            smtp_port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: String::new(),
            recipients: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_frequency_hours")]
    pub frequency_hours: u64,
    #[serde(default = "default_max_posts_per_day")]
    pub max_posts_per_day: u32,
    /// When false, the time-of-day gate is bypassed and every cycle posts.
    #[serde(default = "bool_true")]
    pub respect_quiet_hours: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            frequency_hours: DEFAULT_FREQUENCY_HOURS,
            max_posts_per_day: DEFAULT_MAX_POSTS_PER_DAY,
            respect_quiet_hours: true,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            business_name: default_business_name(),
            target_message: default_target_message(),
            contact_info: default_contact_info(),
            platforms: PlatformsConfig::default(),
            posting_schedule: ScheduleConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load config from a JSON file with OUTREACH_* env var overrides
    /// (double-underscore nesting, e.g. `OUTREACH_PLATFORMS__EMAIL__PASSWORD`).
    ///
    /// A missing file is not an error: the default config is written to the
    /// path verbatim and returned, so a first run leaves behind a template
    /// the operator can fill in.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);

        if !Path::new(path).exists() {
            let config = Self::default();
            config.save(path)?;
            info!(path = %path, "no config file found, default configuration written");
            return Ok(config);
        }

        let config: BotConfig = Figment::new()
            .merge(Json::file(path))
            .merge(Env::prefixed("OUTREACH_").split("__"))
            .extract()
            .map_err(|e| OutreachError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Persist the config as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reject configs that enable email without usable credentials.
    pub fn validate(&self) -> Result<()> {
        let email = &self.platforms.email;
        if email.enabled {
            if email.smtp_server.is_empty() {
                return Err(OutreachError::Config(
                    "email is enabled but smtp_server is empty".into(),
                ));
            }
            if email.username.is_empty() {
                return Err(OutreachError::Config(
                    "email is enabled but username is empty".into(),
                ));
            }
            if email.password.is_empty() {
                return Err(OutreachError::Config(
                    "email is enabled but password is empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Append a recipient to the mailing list.
    ///
    /// The entry is stored in the wire encoding (`"Name <addr>"` when a name
    /// is given, otherwise the bare address). An exact-duplicate entry is not
    /// appended again; returns whether the list changed.
    pub fn add_recipient(&mut self, address: &str, name: Option<&str>) -> bool {
        let entry = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => format!("{name} <{address}>"),
            None => address.to_string(),
        };

        let recipients = &mut self.platforms.email.recipients;
        if recipients.contains(&entry) {
            info!(recipient = %entry, "recipient already on the list");
            return false;
        }
        info!(recipient = %entry, "recipient added");
        recipients.push(entry);
        true
    }
}

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

fn default_business_name() -> String {
    "Your Business".to_string()
}
fn default_target_message() -> String {
    "Helping seniors with technology and services".to_string()
}
fn default_contact_info() -> String {
    "Contact us at: your-email@example.com".to_string()
}
fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}
fn default_frequency_hours() -> u64 {
    DEFAULT_FREQUENCY_HOURS
}
fn default_max_posts_per_day() -> u32 {
    DEFAULT_MAX_POSTS_PER_DAY
}
fn bool_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_materializes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let path_str = path.to_str().unwrap();

        let config = BotConfig::load(Some(path_str)).unwrap();
        assert_eq!(config.business_name, "Your Business");
        assert!(path.exists());

        // The persisted file must parse back to the same defaults.
        let reloaded = BotConfig::load(Some(path_str)).unwrap();
        assert_eq!(reloaded.posting_schedule.frequency_hours, 24);
        assert!(!reloaded.platforms.email.enabled);
        assert_eq!(reloaded.platforms.email.smtp_port, 587);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"business_name": "Sunrise Tech Help",
                "platforms": {"email": {"enabled": false, "recipients": ["a@b.org"]}}}"#,
        )
        .unwrap();

        let config = BotConfig::load(path.to_str()).unwrap();
        assert_eq!(config.business_name, "Sunrise Tech Help");
        assert_eq!(config.platforms.email.recipients, vec!["a@b.org"]);
        assert_eq!(config.platforms.email.smtp_port, 587);
        assert!(config.posting_schedule.respect_quiet_hours);
    }

    #[test]
    fn validate_rejects_enabled_email_without_credentials() {
        let mut config = BotConfig::default();
        config.platforms.email.enabled = true;
        config.platforms.email.smtp_server = "smtp.example.com".into();
        config.platforms.email.username = "bot@example.com".into();
        // password still empty
        assert!(config.validate().is_err());

        config.platforms.email.password = "app-password".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_ignores_credentials_when_disabled() {
        let config = BotConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn add_recipient_formats_and_dedupes() {
        let mut config = BotConfig::default();
        assert!(config.add_recipient("mary@example.com", Some("Mary Johnson")));
        assert!(config.add_recipient("center@community.org", None));
        assert!(!config.add_recipient("mary@example.com", Some("Mary Johnson")));

        assert_eq!(
            config.platforms.email.recipients,
            vec!["Mary Johnson <mary@example.com>", "center@community.org"]
        );
    }
}
