//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use noticeboard::domain::NewsSettings;
use noticeboard::inbound::http::session_config::SessionSettings;
use noticeboard::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) news: NewsSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration on the in-memory store.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, news: NewsSettings) -> Self {
        Self {
            session,
            bind_addr,
            news,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, every repository port is served by its Diesel
    /// adapter instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
