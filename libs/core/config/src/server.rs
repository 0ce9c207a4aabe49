use crate::{env_parse, ConfigError, FromEnv};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Where the HTTP listener binds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// `HOST` (default 0.0.0.0) must be an IP literal; `PORT` defaults to 8080.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_parse("HOST", "0.0.0.0")?,
            port: env_parse("PORT", "8080")?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bind_all_interfaces() {
        temp_env::with_vars_unset(["HOST", "PORT"], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config, ServerConfig::default());
            assert_eq!(config.address().to_string(), "0.0.0.0:8080");
        });
    }

    #[test]
    fn test_custom_host_and_port() {
        temp_env::with_vars([("HOST", Some("127.0.0.1")), ("PORT", Some("3000"))], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.address(), SocketAddr::from(([127, 0, 0, 1], 3000)));
        });
    }

    #[test]
    fn test_ipv6_host() {
        temp_env::with_vars([("HOST", Some("::1")), ("PORT", None)], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.address().to_string(), "[::1]:8080");
        });
    }

    #[test]
    fn test_hostname_is_rejected() {
        temp_env::with_var("HOST", Some("localhost"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("HOST"));
        });
    }

    #[test]
    fn test_port_out_of_range() {
        temp_env::with_vars([("HOST", None), ("PORT", Some("99999"))], || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }
}
