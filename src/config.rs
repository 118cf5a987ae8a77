use anyhow::{Context, Result};
use chrono::FixedOffset;

/// Runtime settings read from the environment (and `.env` in development).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Offset applied to date-times that arrive without one.
    pub utc_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set")?;
        let host = std::env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("Invalid PORT")?;
        let utc_offset = parse_utc_offset(
            &std::env::var("UTC_OFFSET_HOURS").unwrap_or_else(|_| "0".to_string()),
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            utc_offset,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_utc_offset(hours: &str) -> Result<FixedOffset> {
    let hours = hours
        .trim()
        .parse::<i32>()
        .context("Invalid UTC_OFFSET_HOURS")?;
    FixedOffset::east_opt(hours * 3600)
        .with_context(|| format!("UTC_OFFSET_HOURS out of range: {}", hours))
}
