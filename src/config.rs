//! Configuration loader and credential checks for the review watcher.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("Missing credential: {0} must be set and non-empty")]
    MissingCredential(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub app: App,
}

/// App-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct App {
    pub endpoint: String,
    pub poll_interval_secs: u64,
    /// Fixed starting cursor. `0` reports the full submission history;
    /// unset starts from the current time.
    #[serde(default)]
    pub from_date: Option<i64>,
}

pub const ENV_API_TOKEN: &str = "REVIEW_API_TOKEN";
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the watcher cannot start without.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: i64,
}

impl Credentials {
    /// Read credentials from the process environment. Any missing or empty
    /// variable is a startup-fatal error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_token = require(&get, ENV_API_TOKEN)?;
        let bot_token = require(&get, ENV_BOT_TOKEN)?;
        let chat_id = require(&get, ENV_CHAT_ID)?
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("TELEGRAM_CHAT_ID must be an integer"))?;
        Ok(Self {
            api_token,
            bot_token,
            chat_id,
        })
    }
}

fn require(get: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match get(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingCredential(name)),
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.app.endpoint.trim().is_empty() {
        return Err(ConfigError::Invalid("app.endpoint must be non-empty"));
    }
    if cfg.app.poll_interval_secs == 0 {
        return Err(ConfigError::Invalid("app.poll_interval_secs must be > 0"));
    }
    if matches!(cfg.app.from_date, Some(ts) if ts < 0) {
        return Err(ConfigError::Invalid("app.from_date must not be negative"));
    }
    Ok(())
}

/// Example configuration, also used as the test fixture.
pub fn example() -> &'static str {
    r#"app:
  endpoint: "https://practicum.yandex.ru/api/user_api/homework_statuses/"
  poll_interval_secs: 600
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_example_ok() {
        let cfg: Config = serde_yaml::from_str(example()).unwrap();
        validate(&cfg).unwrap();
        assert_eq!(cfg.app.poll_interval_secs, 600);
        assert_eq!(cfg.app.from_date, None);
    }

    #[test]
    fn invalid_endpoint() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.app.endpoint = "".into();
        let err = validate(&cfg).unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("app.endpoint")),
            _ => panic!("wrong error"),
        }
    }

    #[test]
    fn invalid_poll_interval() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.app.poll_interval_secs = 0;
        let err = validate(&cfg).unwrap_err();
        match err {
            ConfigError::Invalid(msg) => assert!(msg.contains("poll_interval_secs")),
            _ => panic!("wrong error"),
        }
    }

    #[test]
    fn invalid_from_date() {
        let mut cfg: Config = serde_yaml::from_str(example()).unwrap();
        cfg.app.from_date = Some(-1);
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));

        cfg.app.from_date = Some(0);
        validate(&cfg).unwrap();
    }

    #[test]
    fn load_from_file_ok() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.yaml");
        fs::write(&p, example()).unwrap();
        let cfg = load(Some(&p)).unwrap();
        assert_eq!(
            cfg.app.endpoint,
            "https://practicum.yandex.ru/api/user_api/homework_statuses/"
        );
    }

    fn env<'a>(values: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            values
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn credentials_ok() {
        let creds = Credentials::from_lookup(env(&[
            (ENV_API_TOKEN, "api-token"),
            (ENV_BOT_TOKEN, "bot-token"),
            (ENV_CHAT_ID, "123456789"),
        ]))
        .unwrap();
        assert_eq!(creds.api_token, "api-token");
        assert_eq!(creds.bot_token, "bot-token");
        assert_eq!(creds.chat_id, 123456789);
    }

    #[test]
    fn credentials_missing_any_token_fails() {
        let err = Credentials::from_lookup(env(&[
            (ENV_BOT_TOKEN, "bot-token"),
            (ENV_CHAT_ID, "123456789"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::MissingCredential(name) => assert_eq!(name, ENV_API_TOKEN),
            _ => panic!("wrong error"),
        }

        let err = Credentials::from_lookup(env(&[
            (ENV_API_TOKEN, "api-token"),
            (ENV_BOT_TOKEN, "   "),
            (ENV_CHAT_ID, "123456789"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(ENV_BOT_TOKEN)));
    }

    #[test]
    fn credentials_chat_id_must_be_integer() {
        let err = Credentials::from_lookup(env(&[
            (ENV_API_TOKEN, "api-token"),
            (ENV_BOT_TOKEN, "bot-token"),
            (ENV_CHAT_ID, "not-a-number"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
