use crate::{ConfigError, FromEnv, env_or_default, env_parse};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Listener configuration for gRPC servers
#[derive(Clone, Debug)]
pub struct GrpcServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a single request; tonic cancels the handler past it.
    pub request_timeout: Duration,
}

impl GrpcServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.address().parse().map_err(|e| ConfigError::ParseError {
            key: "GRPC_HOST".to_string(),
            details: format!("{e}"),
        })
    }
}

impl FromEnv for GrpcServerConfig {
    /// - GRPC_HOST: defaults to 0.0.0.0
    /// - GRPC_PORT: defaults to 50051
    /// - GRPC_REQUEST_TIMEOUT_SECS: defaults to 30
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("GRPC_HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse("GRPC_PORT", 50051u16)?;
        let timeout_secs = env_parse("GRPC_REQUEST_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            host,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for GrpcServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 50051,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 3] = ["GRPC_HOST", "GRPC_PORT", "GRPC_REQUEST_TIMEOUT_SECS"];

    #[test]
    fn test_grpc_config_from_env_with_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = GrpcServerConfig::from_env().unwrap();
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 50051);
            assert_eq!(config.request_timeout, Duration::from_secs(30));
            assert_eq!(config.address(), "0.0.0.0:50051");
        });
    }

    #[test]
    fn test_grpc_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("GRPC_HOST", Some("127.0.0.1")),
                ("GRPC_PORT", Some("6000")),
                ("GRPC_REQUEST_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = GrpcServerConfig::from_env().unwrap();
                assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:6000");
                assert_eq!(config.request_timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_grpc_config_port_out_of_range() {
        temp_env::with_var("GRPC_PORT", Some("99999"), || {
            let err = GrpcServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("GRPC_PORT"));
        });
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let config = GrpcServerConfig::new("not a host", 50051);
        assert!(config.socket_addr().is_err());
    }
}
