// Command-line interface for the keeper registry

use std::sync::Arc;

use clap::{Parser, Subcommand};
use keeper_client::{
    AuthenticationInjector, BearerTokenInjector, NullAuthenticationInjector, RegistryConfig,
    new_registry_client,
};
use serde_json::json;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "keeper", version, about = "Register with and query the keeper service registry")]
pub struct Cli {
    /// Configuration file (TOML); missing files are ignored
    #[arg(short, long, default_value = "keeper.toml")]
    pub config: String,

    /// Registry host
    #[arg(long)]
    pub host: Option<String>,

    /// Registry port
    #[arg(long)]
    pub port: Option<u16>,

    /// Registry protocol
    #[arg(long)]
    pub protocol: Option<String>,

    /// Key of the service to register or unregister
    #[arg(long)]
    pub service_key: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "KEEPER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the registry answers its ping route
    Ping,
    /// Register the configured service (create or update)
    Register,
    /// Remove the configured service's registration
    Unregister,
    /// Resolve one service's endpoint
    Endpoint { service_key: String },
    /// List every registered endpoint
    Endpoints,
    /// Check that a service is registered and up
    Available { service_key: String },
}

/// Load the registry config: file, then `KEEPER_*` environment, then flags
pub fn load_config(cli: &Cli) -> anyhow::Result<RegistryConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(&cli.config).required(false))
        .add_source(config::Environment::with_prefix("KEEPER").try_parsing(true))
        .build()?;

    let mut config: RegistryConfig = settings.try_deserialize()?;

    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(protocol) = &cli.protocol {
        config.protocol = protocol.clone();
    }
    if let Some(service_key) = &cli.service_key {
        config.service_key = service_key.clone();
    }

    Ok(config)
}

fn injector(token: Option<&str>) -> Arc<dyn AuthenticationInjector> {
    match token {
        Some(token) => Arc::new(BearerTokenInjector::new(token)),
        None => Arc::new(NullAuthenticationInjector),
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let registry_url = config.registry_url();
    let service_key = config.service_key.clone();
    let client = new_registry_client(config, injector(cli.token.as_deref()))?;

    let output = match cli.command {
        Command::Ping => {
            if !client.is_alive().await {
                anyhow::bail!("registry at {} is not reachable", registry_url);
            }
            json!({ "registry": registry_url, "alive": true })
        }
        Command::Register => {
            client.register().await?;
            info!("registered {} with {}", service_key, registry_url);
            json!({ "serviceKey": service_key, "registered": true })
        }
        Command::Unregister => {
            client.unregister().await?;
            info!("unregistered {} from {}", service_key, registry_url);
            json!({ "serviceKey": service_key, "registered": false })
        }
        Command::Endpoint { service_key } => {
            serde_json::to_value(client.get_service_endpoint(&service_key).await?)?
        }
        Command::Endpoints => serde_json::to_value(client.get_all_service_endpoints().await?)?,
        Command::Available { service_key } => {
            let available = client.is_service_available(&service_key).await?;
            json!({ "serviceKey": service_key, "available": available })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["keeper", "endpoint", "core-data"]).unwrap();
        assert!(matches!(cli.command, Command::Endpoint { ref service_key } if service_key == "core-data"));
        assert_eq!(cli.config, "keeper.toml");

        let cli = Cli::try_parse_from(["keeper", "--port", "8080", "-v", "ping"]).unwrap();
        assert_eq!(cli.port, Some(8080));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Ping));

        assert!(Cli::try_parse_from(["keeper", "available"]).is_err());
    }

    #[test]
    fn test_load_config_file_and_flags() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
host = "registry.local"
port = 59890
service_key = "core-data"
service_host = "10.0.0.5"
service_port = 59880
check_route = "/api/v3/ping"
check_interval = "10s"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::try_parse_from([
            "keeper",
            "--config",
            path.as_str(),
            "--port",
            "6000",
            "register",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.registry_url(), "http://registry.local:6000");
        assert_eq!(config.service_key, "core-data");
        assert_eq!(config.service_port, 59880);
        assert_eq!(config.check_interval, "10s");
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let cli = Cli::try_parse_from([
            "keeper",
            "--config",
            "/nonexistent/keeper.toml",
            "--host",
            "10.1.1.1",
            "endpoints",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.host, "10.1.1.1");
        assert_eq!(config.registry_type, "keeper");
    }
}
