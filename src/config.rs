use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub api_prefix: String,
    pub app_env: String,
    pub cors_origin: String,

    // Pool
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,

    /// Requests per minute per client IP; 0 turns the limiter off.
    pub rate_limit_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => mysql_url_from_parts(&lookup)?,
        };

        Ok(Self {
            server_addr: or("SERVER_ADDR", "0.0.0.0:5000"),
            database_url,
            api_prefix: or("API_PREFIX", "/api"),
            app_env: or("APP_ENV", "development"),
            cors_origin: or("CORS_ORIGIN", "http://localhost:3000"),
            db_max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            db_acquire_timeout: Duration::from_secs(parse(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 30)?),
            rate_limit_per_min: parse(&lookup, "RATE_LIMIT_PER_MIN", 100)?,
            log_dir: or("LOG_DIR", "logs"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|key| match key {
            "DATABASE_URL" => Some("mysql://test@localhost/attendance".to_string()),
            "RATE_LIMIT_PER_MIN" => Some("0".to_string()),
            _ => None,
        })
        .unwrap()
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}

/// Hosted MySQL providers (Railway and friends) hand out separate variables
/// instead of a URL.
fn mysql_url_from_parts(lookup: &impl Fn(&str) -> Option<String>) -> Result<String> {
    let host = lookup("MYSQLHOST")
        .ok_or_else(|| anyhow!("DATABASE_URL or MYSQLHOST must be set"))?;
    let port = lookup("MYSQLPORT").unwrap_or_else(|| "3306".to_string());
    let user = lookup("MYSQLUSER").context("MYSQLUSER must be set when DATABASE_URL is not")?;
    let password = lookup("MYSQLPASSWORD").unwrap_or_default();
    let database =
        lookup("MYSQLDATABASE").context("MYSQLDATABASE must be set when DATABASE_URL is not")?;

    let credentials = if password.is_empty() {
        user
    } else {
        format!("{user}:{password}")
    };
    Ok(format!("mysql://{credentials}@{host}:{port}/{database}"))
}
