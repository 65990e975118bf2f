//! Authentication injection for outbound registry requests

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{ClientBuilder, Request};

use crate::error::{RegistryError, Result};

/// Attaches credentials to requests sent to the registry.
///
/// `decorate_transport` is applied once, when the client builds its HTTP
/// transport; `add_authentication_data` runs for every request.
#[async_trait]
pub trait AuthenticationInjector: Send + Sync {
    async fn add_authentication_data(&self, request: &mut Request) -> Result<()>;

    fn decorate_transport(&self, builder: ClientBuilder) -> ClientBuilder {
        builder
    }
}

/// Injector that leaves requests untouched, for registries without auth
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAuthenticationInjector;

impl NullAuthenticationInjector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthenticationInjector for NullAuthenticationInjector {
    async fn add_authentication_data(&self, _request: &mut Request) -> Result<()> {
        Ok(())
    }
}

/// Injector that sends a static bearer token
#[derive(Clone)]
pub struct BearerTokenInjector {
    token: String,
}

impl BearerTokenInjector {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for BearerTokenInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenInjector")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl AuthenticationInjector for BearerTokenInjector {
    async fn add_authentication_data(&self, request: &mut Request) -> Result<()> {
        if self.token.is_empty() {
            return Err(RegistryError::Auth("bearer token is empty".to_string()));
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|e| RegistryError::Auth(e.to_string()))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Client, Method};

    fn request() -> Request {
        Client::new()
            .request(Method::GET, "http://localhost:59890/api/v3/ping")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_null_injector_leaves_request_untouched() {
        let mut req = request();
        NullAuthenticationInjector::new()
            .add_authentication_data(&mut req)
            .await
            .unwrap();
        assert!(req.headers().is_empty());
    }

    #[tokio::test]
    async fn test_bearer_injector_sets_header() {
        let mut req = request();
        BearerTokenInjector::new("secret")
            .add_authentication_data(&mut req)
            .await
            .unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer secret");
    }

    #[tokio::test]
    async fn test_bearer_injector_rejects_empty_token() {
        let mut req = request();
        let err = BearerTokenInjector::new("")
            .add_authentication_data(&mut req)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Auth(_)));
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_bearer_injector_rejects_invalid_header() {
        let mut req = request();
        let err = BearerTokenInjector::new("bad\ntoken")
            .add_authentication_data(&mut req)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Auth(_)));
    }

    #[test]
    fn test_bearer_debug_redacts_token() {
        let debug = format!("{:?}", BearerTokenInjector::new("secret"));
        assert!(!debug.contains("secret"));
    }
}
