// Registry client abstraction and factory

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    auth::AuthenticationInjector,
    client::KeeperClient,
    config::RegistryConfig,
    constants::REGISTRY_TYPE_KEEPER,
    error::{RegistryError, Result},
    model::ServiceEndpoint,
};

/// Operations a service uses to take part in a registry
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Register the caller's own service
    async fn register(&self) -> Result<()>;

    /// Remove the caller's own registration
    async fn unregister(&self) -> Result<()>;

    /// Declare a health check separately from registration
    async fn register_check(
        &self,
        id: &str,
        name: &str,
        notes: &str,
        url: &str,
        interval: &str,
    ) -> Result<()>;

    /// Whether the registry itself is reachable
    async fn is_alive(&self) -> bool;

    async fn get_service_endpoint(&self, service_key: &str) -> Result<ServiceEndpoint>;

    async fn get_all_service_endpoints(&self) -> Result<Vec<ServiceEndpoint>>;

    async fn is_service_available(&self, service_key: &str) -> Result<bool>;
}

#[async_trait]
impl RegistryClient for KeeperClient {
    async fn register(&self) -> Result<()> {
        KeeperClient::register(self).await
    }

    async fn unregister(&self) -> Result<()> {
        KeeperClient::unregister(self).await
    }

    async fn register_check(
        &self,
        id: &str,
        name: &str,
        notes: &str,
        url: &str,
        interval: &str,
    ) -> Result<()> {
        KeeperClient::register_check(self, id, name, notes, url, interval).await
    }

    async fn is_alive(&self) -> bool {
        KeeperClient::is_alive(self).await
    }

    async fn get_service_endpoint(&self, service_key: &str) -> Result<ServiceEndpoint> {
        KeeperClient::get_service_endpoint(self, service_key).await
    }

    async fn get_all_service_endpoints(&self) -> Result<Vec<ServiceEndpoint>> {
        KeeperClient::get_all_service_endpoints(self).await
    }

    async fn is_service_available(&self, service_key: &str) -> Result<bool> {
        KeeperClient::is_service_available(self, service_key).await
    }
}

/// Create the client matching `config.registry_type`
pub fn new_registry_client(
    config: RegistryConfig,
    injector: Arc<dyn AuthenticationInjector>,
) -> Result<Box<dyn RegistryClient>> {
    if config.registry_type.eq_ignore_ascii_case(REGISTRY_TYPE_KEEPER) {
        return Ok(Box::new(KeeperClient::with_injector(config, injector)?));
    }

    Err(RegistryError::UnsupportedRegistryType(config.registry_type))
}
