//! Wire types for the keeper registry API
//!
//! Field names follow the registry's JSON schema (camelCase).

use serde::{Deserialize, Serialize};

use crate::constants::{API_VERSION, HEALTH_CHECK_TYPE_HTTP};

/// API version tag carried by requests and responses
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versionable {
    #[serde(default)]
    pub api_version: String,
}

impl Versionable {
    pub fn current() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
        }
    }
}

/// Common fields of every outbound request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub request_id: String,
    #[serde(flatten)]
    pub versionable: Versionable,
}

/// Envelope shared by every response; error responses decode into this
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    #[serde(flatten)]
    pub versionable: Versionable,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default)]
    pub status_code: u16,
}

/// Health-check descriptor the registry uses to poll a service
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub interval: String,
    pub path: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

impl HealthCheck {
    /// HTTP check against `path` every `interval`
    pub fn http(path: &str, interval: &str) -> Self {
        Self {
            interval: interval.to_string(),
            path: path.to_string(),
            r#type: HEALTH_CHECK_TYPE_HTTP.to_string(),
        }
    }
}

/// Registration record of one service instance.
///
/// `status` and `last_connected` are populated by the registry and are left
/// empty by the client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub service_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub health_check: HealthCheck,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_connected: i64,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Body of `POST`/`PUT /registration`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRegistrationRequest {
    #[serde(flatten)]
    pub base: BaseRequest,
    pub registration: Registration,
}

impl AddRegistrationRequest {
    pub fn new(registration: Registration) -> Self {
        Self {
            base: BaseRequest {
                request_id: String::new(),
                versionable: Versionable::current(),
            },
            registration,
        }
    }
}

/// Body of `GET /registration/{serviceId}`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    pub registration: Registration,
}

/// Body of `GET /registration/all`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiRegistrationsResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

/// Resolved address of a registered service
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub service_id: String,
    pub host: String,
    pub port: u16,
}

impl From<Registration> for ServiceEndpoint {
    fn from(registration: Registration) -> Self {
        Self {
            service_id: registration.service_id,
            host: registration.host,
            port: registration.port,
        }
    }
}
