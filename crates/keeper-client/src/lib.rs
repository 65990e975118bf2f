//! Keeper Client - Rust SDK for the keeper service registry
//!
//! This crate provides:
//! - Self-registration and deregistration of the calling service
//! - Endpoint lookup of other registered services by key
//! - Liveness and availability checks
//! - Pluggable authentication of outbound requests

pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod registry;

pub use auth::{AuthenticationInjector, BearerTokenInjector, NullAuthenticationInjector};
pub use client::KeeperClient;
pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use model::ServiceEndpoint;
pub use registry::{RegistryClient, new_registry_client};
