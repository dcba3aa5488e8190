use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Base URL of the frontend, used in password-reset links.
    pub app_url: String,
    pub openai_api_key: String,
    /// SMTP settings. When absent, outbound mail is logged instead of sent.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub sender: String,
    pub password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            smtp: SmtpConfig::from_env()?,
        })
    }
}

impl SmtpConfig {
    /// SMTP settings are optional as a group: configured only when both the
    /// sender address and its credential are present.
    fn from_env() -> Result<Option<Self>> {
        let sender = env::var("EMAIL_SENDER").ok();
        let password = env::var("EMAIL_PASSWORD").ok();

        let (Some(sender), Some(password)) = (sender, password) else {
            return Ok(None);
        };

        Ok(Some(Self {
            host: env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .context("SMTP_PORT must be a valid number")?,
            sender,
            password,
        }))
    }
}
