//! compteweb main entry point

use anyhow::Context;
use clap::Parser;
use compteweb_api::start_server;
use compteweb_config::{Config, ConfigError, FetchPolicy, WireDateFormat};
use compteweb_core::{DataClient, GraphqlGateway};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "compteweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web front-end for a GraphQL bank-account service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = Config::default_path())]
    config: PathBuf,

    /// GraphQL endpoint, overrides the configuration file
    #[arg(long)]
    endpoint: Option<String>,

    /// Listening port, overrides the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Wire date layout (iso or slash), overrides the configuration file
    #[arg(long)]
    date_format: Option<WireDateFormat>,

    /// Read policy (cache_first or network_only), overrides the configuration file
    #[arg(long)]
    fetch_policy: Option<FetchPolicy>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(args: &Args) -> anyhow::Result<(Config, bool)> {
    let (mut config, found) = match Config::load(&args.config) {
        Ok(config) => (config, true),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), false),
        Err(e) => {
            let hint = e.suggestion().map(|s| format!(" ({})", s)).unwrap_or_default();
            anyhow::bail!("[{}] {}{}", e.code(), e, hint);
        }
    };

    if let Some(endpoint) = &args.endpoint {
        config.graphql.endpoint = endpoint.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(date_format) = args.date_format {
        config.graphql.date_format = date_format;
    }
    if let Some(fetch_policy) = args.fetch_policy {
        config.client.fetch_policy = fetch_policy;
    }
    config.validate().context("Invalid command line override")?;

    Ok((config, found))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, found) = load_config(&args)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file not found: {}, using defaults", args.config.display());
    }
    let gateway = GraphqlGateway::new(&config.graphql).context("Failed to create GraphQL gateway")?;
    log::info!(
        "GraphQL endpoint: {} (timeout {}s)",
        gateway.endpoint(),
        config.graphql.timeout_secs
    );

    let client = Arc::new(DataClient::new(
        Arc::new(gateway),
        config.client.fetch_policy,
        config.graphql.date_format,
    ));
    log::info!(
        "Data client ready: fetch policy {}, wire dates {}",
        client.fetch_policy(),
        client.date_format()
    );

    let rt = Runtime::new()?;
    rt.block_on(start_server(&config, client))
}
