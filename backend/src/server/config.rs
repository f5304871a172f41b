//! HTTP server configuration object.

use std::net::SocketAddr;

use param_echo::settings::{ServerSettings, SettingsError};

/// Values needed to bind and build the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) json_limit: usize,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, json_limit: usize) -> Self {
        Self {
            bind_addr,
            json_limit,
        }
    }

    /// Derive the server configuration from loaded settings.
    ///
    /// # Errors
    /// Propagates [`SettingsError`] when the configured host is invalid.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?, settings.json_limit()))
    }
}
