// src/config.rs
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            workers: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub schema_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "cleaning.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub login: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            login: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

/// Leave `bot_token` empty to only log new leads.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: "https://api.telegram.org".to_string(),
            timeout_secs: 10,
        }
    }
}

impl TelegramConfig {
    pub fn is_enabled(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// Loads `<file>.toml` (optional) and `CLEANING__SECTION__KEY` environment
/// overrides on top of the built-in defaults.
pub fn load_config(file: &str) -> Result<AppConfig, ConfigError> {
    let settings = ::config::Config::builder()
        .add_source(::config::File::with_name(file).required(false))
        .add_source(::config::Environment::with_prefix("CLEANING").separator("__"))
        .build()?;

    let cfg: AppConfig = settings.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

fn validate_config(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.server.workers == 0 {
        return Err(ConfigError::Invalid("server.workers must be at least 1".into()));
    }
    if cfg.admin.login.trim().is_empty() || cfg.admin.password.is_empty() {
        return Err(ConfigError::Invalid("admin login and password must be set".into()));
    }
    if cfg.telegram.bot_token.trim().is_empty() != cfg.telegram.chat_id.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "telegram.bot_token and telegram.chat_id must be set together".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load_config("definitely-not-here").unwrap();
        assert_eq!(cfg.server.addr, "127.0.0.1:3000");
        assert_eq!(cfg.database.schema_path, "sql/schema.sql");
        assert!(!cfg.telegram.is_enabled());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[server]
workers = 2

[telegram]
bot_token = "123:abc"
chat_id = "-100500"
"#
        )
        .unwrap();

        let cfg = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.workers, 2);
        assert_eq!(cfg.server.addr, "127.0.0.1:3000");
        assert!(cfg.telegram.is_enabled());
        assert_eq!(cfg.telegram.timeout_secs, 10);
    }

    #[test]
    fn half_configured_telegram_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.telegram.bot_token = "123:abc".into();
        assert!(matches!(validate_config(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let mut cfg = AppConfig::default();
        cfg.telegram.bot_token = "123:very-secret".into();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("very-secret"));
        assert!(!dbg.contains("admin123"));
    }
}
