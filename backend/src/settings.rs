//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, an optional configuration file,
//! `PARAM_ECHO_*` environment variables, and command-line flags.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Default upper bound for JSON request bodies, in bytes.
pub const DEFAULT_JSON_LIMIT: usize = 262_144;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid host address `{host}`: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Settings controlling the HTTP listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PARAM_ECHO")]
pub struct ServerSettings {
    /// IP address to listen on.
    #[ortho_config(default = "0.0.0.0".to_owned())]
    pub host: String,
    /// TCP port to listen on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Maximum accepted JSON body size in bytes.
    #[ortho_config(default = DEFAULT_JSON_LIMIT)]
    pub json_limit: usize,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn json_limit(&self) -> usize {
        self.json_limit
    }

    /// Combine host and port into a socket address.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|source| SettingsError::InvalidHost {
            host: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }
}
