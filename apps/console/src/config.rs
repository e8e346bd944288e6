use std::env;
use std::time::Duration;

use taskdeck_core::{AccessToken, AppError, AppResult};
use taskdeck_infrastructure::ApiClientConfig;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:4000/api";

/// Runtime settings for the console.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api: ApiClientConfig,
    pub access_token: Option<AccessToken>,
    pub health_poll_interval: Duration,
    pub activity_log_limit: usize,
    pub offline_roles: bool,
}

impl ConsoleConfig {
    /// Reads the process environment.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("TASKDECK_API_BASE_URL")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let access_token = lookup("TASKDECK_API_TOKEN")
            .filter(|value| !value.trim().is_empty())
            .map(AccessToken::new)
            .transpose()?;
        let timeout_secs = parse_u64(&lookup, "TASKDECK_HTTP_TIMEOUT_SECS", 15)?;
        let poll_interval_ms = parse_u64(&lookup, "TASKDECK_HEALTH_POLL_INTERVAL_MS", 30_000)?;
        let activity_log_limit = parse_usize(&lookup, "TASKDECK_ACTIVITY_LOG_LIMIT", 50)?;
        let offline_roles = parse_bool(&lookup, "TASKDECK_OFFLINE", false)?;

        if timeout_secs == 0 {
            return Err(AppError::Validation(
                "TASKDECK_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        if poll_interval_ms == 0 {
            return Err(AppError::Validation(
                "TASKDECK_HEALTH_POLL_INTERVAL_MS must be greater than zero".to_owned(),
            ));
        }

        if activity_log_limit == 0 {
            return Err(AppError::Validation(
                "TASKDECK_ACTIVITY_LOG_LIMIT must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api: ApiClientConfig::new(api_base_url.as_str(), Duration::from_secs(timeout_secs))?,
            access_token,
            health_poll_interval: Duration::from_millis(poll_interval_ms),
            activity_log_limit,
            offline_roles,
        })
    }
}

fn parse_u64<F>(lookup: &F, name: &str, default: u64) -> AppResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value.trim().parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

fn parse_usize<F>(lookup: &F, name: &str, default: usize) -> AppResult<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value.trim().parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, name: &str, default: bool) -> AppResult<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).map(|value| value.trim().to_ascii_lowercase()) {
        Some(value) => match value.as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            _ => Err(AppError::Validation(format!(
                "invalid {name} value '{value}': expected true or false"
            ))),
        },
        None => Ok(default),
    }
}
