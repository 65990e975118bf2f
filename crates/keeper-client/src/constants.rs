// Keeper registry API constants

use std::time::Duration;

/// API version tag embedded in every outbound mutating request
pub const API_VERSION: &str = "v3";

/// Default timeout of every HTTP call made by the client
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe type advertised in the health-check descriptor
pub const HEALTH_CHECK_TYPE_HTTP: &str = "http";

/// Registry-reported status of a healthy service (compared case-insensitively)
pub const STATUS_UP: &str = "up";

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

pub const DEFAULT_PROTOCOL: &str = "http";
pub const REGISTRY_TYPE_KEEPER: &str = "keeper";

pub mod api_path {
    pub const PING: &str = "/api/v3/ping";

    // Registration
    pub const REGISTRATION: &str = "/api/v3/registration";
    pub const REGISTRATION_ALL: &str = "/api/v3/registration/all";
}
