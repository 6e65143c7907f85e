//! Application settings loaded via OrthoConfig.
//!
//! Every value is optional; accessors apply the defaults so an empty
//! environment yields a working development server on the in-memory store.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    CommentModeration, DEFAULT_BANNED_WORDS, DEFAULT_WARNING, NEWS_COUNT_ON_HOME_PAGE,
    NewsSettings,
};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("news_count_on_home_page must be positive")]
    ZeroHomePageSize,
}

/// Server and application configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTICEBOARD")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Number of news items shown on the home page.
    pub news_count_on_home_page: Option<usize>,
    /// Comma-separated words rejected in comments.
    pub banned_words: Option<String>,
    /// Message shown when a comment is rejected.
    pub comment_warning: Option<String>,
}

impl AppSettings {
    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url().map(|url| {
            PoolConfig::new(url).with_max_size(
                self.db_max_connections
                    .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            )
        })
    }

    /// News listing and comment moderation settings.
    pub fn news_settings(&self) -> Result<NewsSettings, SettingsError> {
        let home_page_size = self
            .news_count_on_home_page
            .unwrap_or(NEWS_COUNT_ON_HOME_PAGE);
        if home_page_size == 0 {
            return Err(SettingsError::ZeroHomePageSize);
        }
        let warning = self.comment_warning.as_deref().unwrap_or(DEFAULT_WARNING);
        let moderation = match self.banned_words.as_deref() {
            Some(words) => CommentModeration::new(words.split(','), warning),
            None => CommentModeration::new(DEFAULT_BANNED_WORDS, warning),
        };
        Ok(NewsSettings {
            home_page_size,
            moderation,
        })
    }
}
