// KeeperClient - registry client over the keeper REST API

use std::sync::Arc;

use bytes::Bytes;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    auth::{AuthenticationInjector, NullAuthenticationInjector},
    config::RegistryConfig,
    constants::{CONTENT_TYPE, CONTENT_TYPE_JSON, STATUS_UP, api_path},
    error::{RegistryError, Result},
    model::{
        AddRegistrationRequest, BaseResponse, HealthCheck, MultiRegistrationsResponse,
        Registration, RegistrationResponse, ServiceEndpoint,
    },
};

/// Client for the keeper service registry.
///
/// Holds only immutable configuration and a shared HTTP client, so one
/// instance can serve concurrent callers through an `Arc`.
pub struct KeeperClient {
    http_client: Client,
    injector: Arc<dyn AuthenticationInjector>,
    registry_url: String,
    service_key: String,
    service_host: String,
    service_port: u16,
    health_check_route: String,
    health_check_interval: String,
}

impl KeeperClient {
    /// Create a client that sends requests without authentication
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Self::with_injector(config, Arc::new(NullAuthenticationInjector))
    }

    /// Create a client whose requests go through `injector`
    pub fn with_injector(
        config: RegistryConfig,
        injector: Arc<dyn AuthenticationInjector>,
    ) -> Result<Self> {
        let builder = Client::builder().timeout(config.timeout());
        let http_client = injector.decorate_transport(builder).build()?;

        let mut client = Self {
            http_client,
            injector,
            registry_url: config.registry_url(),
            service_key: config.service_key,
            service_host: String::new(),
            service_port: 0,
            health_check_route: String::new(),
            health_check_interval: String::new(),
        };

        // Service host is empty when the caller only performs lookups
        if !config.service_host.is_empty() {
            client.service_host = config.service_host;
            client.service_port = config.service_port;
            client.health_check_route = config.check_route;
            client.health_check_interval = config.check_interval;
        }

        Ok(client)
    }

    /// Base URL of the registry this client talks to
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.registry_url, path)
    }

    /// URL of one registration, with the key encoded as a single path segment
    fn registration_url(&self, service_key: &str) -> Result<String> {
        let mut url = Url::parse(&self.build_url(api_path::REGISTRATION))
            .map_err(|e| RegistryError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| RegistryError::InvalidUrl(self.registry_url.clone()))?
            .push(service_key);
        Ok(url.into())
    }

    fn has_service_info(&self) -> bool {
        !self.service_key.is_empty()
            && !self.service_host.is_empty()
            && self.service_port != 0
            && !self.health_check_route.is_empty()
            && !self.health_check_interval.is_empty()
    }

    /// Register the caller's service, creating or updating its record.
    ///
    /// The registry has no upsert, so the existing record is looked up first:
    /// PUT when it exists, POST otherwise. The record may change between the
    /// two calls.
    pub async fn register(&self) -> Result<()> {
        if !self.has_service_info() {
            return Err(RegistryError::MissingServiceInfo);
        }

        let request = AddRegistrationRequest::new(Registration {
            service_id: self.service_key.clone(),
            host: self.service_host.clone(),
            port: self.service_port,
            health_check: HealthCheck::http(&self.health_check_route, &self.health_check_interval),
            ..Default::default()
        });
        let body = serde_json::to_vec(&request).map_err(RegistryError::Encode)?;

        let (existing_status, _) = self
            .send(Method::GET, &self.registration_url(&self.service_key)?, None)
            .await
            .map_err(|e| RegistryError::RegistrationCheck {
                service_key: self.service_key.clone(),
                source: Box::new(e),
            })?;
        let method = if existing_status == StatusCode::OK {
            Method::PUT
        } else {
            Method::POST
        };
        debug!(service_key = %self.service_key, %method, "registering service");

        let (status, body) = self
            .send(method, &self.build_url(api_path::REGISTRATION), Some(body))
            .await?;

        if status != StatusCode::CREATED && status != StatusCode::NO_CONTENT {
            return Err(registry_error(
                format!("failed to register {}", self.service_key),
                &body,
            ));
        }

        Ok(())
    }

    /// Remove the caller's registration
    pub async fn unregister(&self) -> Result<()> {
        let (status, body) = self
            .send(Method::DELETE, &self.registration_url(&self.service_key)?, None)
            .await?;

        if status != StatusCode::NO_CONTENT {
            return Err(registry_error(
                format!("failed to unregister {}", self.service_key),
                &body,
            ));
        }

        Ok(())
    }

    /// Keeper declares the health check as part of `register`, so there is
    /// nothing to do here.
    pub async fn register_check(
        &self,
        _id: &str,
        _name: &str,
        _notes: &str,
        _url: &str,
        _interval: &str,
    ) -> Result<()> {
        Ok(())
    }

    /// Ping the registry; any failure counts as not alive
    pub async fn is_alive(&self) -> bool {
        match self
            .send(Method::GET, &self.build_url(api_path::PING), None)
            .await
        {
            Ok((status, _)) => status.is_success(),
            Err(e) => {
                debug!("registry ping failed: {}", e);
                false
            }
        }
    }

    /// Resolve the endpoint of the service registered under `service_key`
    pub async fn get_service_endpoint(&self, service_key: &str) -> Result<ServiceEndpoint> {
        let (status, body) = self
            .send(Method::GET, &self.registration_url(service_key)?, None)
            .await?;

        if status != StatusCode::OK {
            return Err(registry_error(
                "failed to get service endpoint".to_string(),
                &body,
            ));
        }

        let response: RegistrationResponse = decode(&body)?;
        Ok(ServiceEndpoint {
            service_id: service_key.to_string(),
            host: response.registration.host,
            port: response.registration.port,
        })
    }

    /// Resolve every registered service, in the order the registry lists them
    pub async fn get_all_service_endpoints(&self) -> Result<Vec<ServiceEndpoint>> {
        let (status, body) = self
            .send(Method::GET, &self.build_url(api_path::REGISTRATION_ALL), None)
            .await?;

        if status != StatusCode::OK {
            return Err(registry_error(
                "failed to get all service endpoints".to_string(),
                &body,
            ));
        }

        let response: MultiRegistrationsResponse = decode(&body)?;
        Ok(response
            .registrations
            .into_iter()
            .map(ServiceEndpoint::from)
            .collect())
    }

    /// Check that `service_key` is registered and reported up.
    ///
    /// Returns `Ok(true)` only for a record whose status is "up" (any case);
    /// every other outcome is an error.
    pub async fn is_service_available(&self, service_key: &str) -> Result<bool> {
        let (status, body) = self
            .send(Method::GET, &self.registration_url(service_key)?, None)
            .await?;

        match status {
            StatusCode::OK => {
                let response: RegistrationResponse = decode(&body)?;
                if !response.registration.status.eq_ignore_ascii_case(STATUS_UP) {
                    return Err(RegistryError::NotHealthy(service_key.to_string()));
                }
                Ok(true)
            }
            StatusCode::NOT_FOUND => Err(RegistryError::NotRegistered(service_key.to_string())),
            _ => Err(registry_error(
                "failed to check service availability".to_string(),
                &body,
            )),
        }
    }

    /// Send one request and read the whole response body
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<(StatusCode, Bytes)> {
        let mut builder = self.http_client.request(method.clone(), url);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, CONTENT_TYPE_JSON).body(body);
        }

        let mut request = builder.build()?;
        self.injector.add_authentication_data(&mut request).await?;

        debug!(%method, url, "sending registry request");
        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(RegistryError::ReadBody)?;
        debug!(%method, url, %status, "registry responded");

        Ok((status, body))
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(RegistryError::Decode)
}

/// Build the error for an unexpected status from the response envelope
fn registry_error(context: String, body: &[u8]) -> RegistryError {
    match decode::<BaseResponse>(body) {
        Ok(response) => RegistryError::Registry {
            context,
            message: response.message,
        },
        Err(e) => e,
    }
}
