// Configuration for the registry client

use std::time::Duration;

use serde::Deserialize;

use crate::constants::{DEFAULT_PROTOCOL, DEFAULT_TIMEOUT, REGISTRY_TYPE_KEEPER};

/// Registry connection settings plus the caller's own service identity.
///
/// The `service_*` and `check_*` fields are only needed when the caller
/// registers itself; a config without them can still be used for lookups.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry protocol (default: "http")
    pub protocol: String,
    /// Registry host
    pub host: String,
    /// Registry port
    pub port: u16,
    /// Registry implementation (default: "keeper")
    pub registry_type: String,
    /// Unique key the caller registers under
    pub service_key: String,
    /// Host other services use to reach the caller
    pub service_host: String,
    /// Port other services use to reach the caller
    pub service_port: u16,
    /// Health-check route the registry polls, e.g. "/api/v3/ping"
    pub check_route: String,
    /// Health-check interval, e.g. "10s"
    pub check_interval: String,
    /// Timeout of each HTTP call in milliseconds (default: 10000)
    pub timeout_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            host: "localhost".to_string(),
            port: 59890,
            registry_type: REGISTRY_TYPE_KEEPER.to_string(),
            service_key: String::new(),
            service_host: String::new(),
            service_port: 0,
            check_route: String::new(),
            check_interval: String::new(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl RegistryConfig {
    /// Create a lookup-only config for the registry at `host:port`
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            ..Default::default()
        }
    }

    /// Set the caller's service identity
    pub fn with_service(mut self, service_key: &str, service_host: &str, service_port: u16) -> Self {
        self.service_key = service_key.to_string();
        self.service_host = service_host.to_string();
        self.service_port = service_port;
        self
    }

    /// Set the health-check route and interval
    pub fn with_check(mut self, route: &str, interval: &str) -> Self {
        self.check_route = route.to_string();
        self.check_interval = interval.to_string();
        self
    }

    /// Set the registry protocol
    pub fn with_protocol(mut self, protocol: &str) -> Self {
        self.protocol = protocol.to_string();
        self
    }

    /// Set the per-call HTTP timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn registry_protocol(&self) -> &str {
        if self.protocol.is_empty() {
            DEFAULT_PROTOCOL
        } else {
            &self.protocol
        }
    }

    /// Base URL of the registry, e.g. "http://localhost:59890"
    pub fn registry_url(&self) -> String {
        format!("{}://{}:{}", self.registry_protocol(), self.host, self.port)
    }
}
