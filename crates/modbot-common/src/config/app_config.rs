//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use modbot_core::Snowflake;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageConfig,
    pub conversation: ConversationConfig,
    pub moderation: ModerationConfig,
    pub console: ConsoleConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// Ledger file locations
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub report_ledger_path: PathBuf,
    pub credibility_ledger_path: PathBuf,
}

/// Keywords that open a conversation
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    pub intake_keyword: String,
    pub review_keyword: String,
}

/// Moderation policy knobs
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// Users allowed to open a review session; empty means everyone
    pub moderator_ids: Vec<Snowflake>,
    /// Reports against one user before a ban-or-suspend decision is forced
    pub repeat_offender_threshold: usize,
    /// Confirmed-false reports before a reporter is suspended
    pub false_report_threshold: u32,
}

impl ModerationConfig {
    #[must_use]
    pub fn is_moderator(&self, user_id: Snowflake) -> bool {
        self.moderator_ids.is_empty() || self.moderator_ids.contains(&user_id)
    }
}

/// Console gateway settings
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub directory_path: PathBuf,
}

// Default value functions
fn default_app_name() -> String {
    "modbot".to_string()
}

fn default_report_ledger_path() -> PathBuf {
    PathBuf::from("saved_report_history.json")
}

fn default_credibility_ledger_path() -> PathBuf {
    PathBuf::from("saved_false_reports.json")
}

fn default_directory_path() -> PathBuf {
    PathBuf::from("platform_directory.json")
}

fn default_intake_keyword() -> String {
    "report".to_string()
}

fn default_review_keyword() -> String {
    "review".to_string()
}

fn default_repeat_offender_threshold() -> usize {
    3
}

fn default_false_report_threshold() -> u32 {
    3
}

/// Words every conversation state reserves for itself
const RESERVED_KEYWORDS: [&str; 2] = ["cancel", "help"];

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            intake_keyword: default_intake_keyword(),
            review_keyword: default_review_keyword(),
        }
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            moderator_ids: Vec::new(),
            repeat_offender_threshold: default_repeat_offender_threshold(),
            false_report_threshold: default_false_report_threshold(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::default(),
            },
            storage: StorageConfig {
                report_ledger_path: default_report_ledger_path(),
                credibility_ledger_path: default_credibility_ledger_path(),
            },
            conversation: ConversationConfig::default(),
            moderation: ModerationConfig::default(),
            console: ConsoleConfig {
                directory_path: default_directory_path(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be used
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_or(&lookup, "APP_ENV", Environment::default)?,
            },
            storage: StorageConfig {
                report_ledger_path: lookup("REPORT_LEDGER_PATH")
                    .map_or_else(default_report_ledger_path, PathBuf::from),
                credibility_ledger_path: lookup("CREDIBILITY_LEDGER_PATH")
                    .map_or_else(default_credibility_ledger_path, PathBuf::from),
            },
            conversation: ConversationConfig {
                intake_keyword: lookup("INTAKE_KEYWORD")
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(default_intake_keyword),
                review_keyword: lookup("REVIEW_KEYWORD")
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(default_review_keyword),
            },
            moderation: ModerationConfig {
                moderator_ids: parse_moderator_ids(lookup("MODERATOR_IDS"))?,
                repeat_offender_threshold: parse_or(
                    &lookup,
                    "REPEAT_OFFENDER_THRESHOLD",
                    default_repeat_offender_threshold,
                )?,
                false_report_threshold: parse_or(
                    &lookup,
                    "FALSE_REPORT_THRESHOLD",
                    default_false_report_threshold,
                )?,
            },
            console: ConsoleConfig {
                directory_path: lookup("DIRECTORY_PATH")
                    .map_or_else(default_directory_path, PathBuf::from),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let conversation = &self.conversation;
        for (var, keyword) in [
            ("INTAKE_KEYWORD", &conversation.intake_keyword),
            ("REVIEW_KEYWORD", &conversation.review_keyword),
        ] {
            if keyword.is_empty() || RESERVED_KEYWORDS.contains(&keyword.as_str()) {
                return Err(ConfigError::InvalidValue(var, keyword.clone()));
            }
        }
        if conversation.intake_keyword == conversation.review_keyword {
            return Err(ConfigError::InvalidValue(
                "REVIEW_KEYWORD",
                "must differ from INTAKE_KEYWORD".to_string(),
            ));
        }
        if self.moderation.repeat_offender_threshold == 0 {
            return Err(ConfigError::InvalidValue(
                "REPEAT_OFFENDER_THRESHOLD",
                "0".to_string(),
            ));
        }
        if self.moderation.false_report_threshold == 0 {
            return Err(ConfigError::InvalidValue(
                "FALSE_REPORT_THRESHOLD",
                "0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

fn parse_moderator_ids(raw: Option<String>) -> Result<Vec<Snowflake>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Snowflake::parse(s).map_err(|_| ConfigError::InvalidValue("MODERATOR_IDS", s.to_string()))
        })
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
