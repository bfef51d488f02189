mod roles;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use fleet_client::{ClientConfig, ReqwestTransport, RolesService};
use roles::RolesCommand;

/// Fleet administration client
#[derive(Parser)]
#[command(name = "fleet-admin", about = "Command-line client for the fleet admin API")]
struct Cli {
    /// Path to a YAML client configuration file
    #[arg(short, long, env = "FLEET_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the fleet API, overrides the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Bearer token, overrides the config file
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage roles and permissions
    #[command(subcommand)]
    Roles(RolesCommand),

    /// Show which dashboard page a URL path opens
    Route {
        /// Absolute path, e.g. /contracts/42/edit
        path: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Logs go to stderr, command output to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet_admin=info,fleet_client=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Roles(command) => {
            let config = load_config(cli.config, cli.api_url, cli.token)?;
            tracing::debug!("Using fleet API at {}", config.api_url);

            let transport = ReqwestTransport::from_config(&config, reqwest::Client::new());
            let service = RolesService::with_base_path(Arc::new(transport), &config.roles_path);

            roles::run(&service, command).await
        }
        Command::Route { path } => {
            let tables = fleet_ui::feature_routes();
            let found = fleet_ui::routes::resolve(&tables, &path)
                .ok_or_else(|| anyhow::anyhow!("No page is mapped to '{}'", path))?;

            print_json(&serde_json::json!({
                "page": format!("{:?}", found.route.page),
                "title": found.route.title,
                "params": found.params,
            }))
        }
    }
}

fn load_config(
    path: Option<PathBuf>,
    api_url: Option<String>,
    token: Option<String>,
) -> anyhow::Result<ClientConfig> {
    let mut config = match path {
        Some(ref path) => ClientConfig::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {:?}: {}", path, e))?,
        None => ClientConfig::from_env(),
    };

    if let Some(api_url) = api_url {
        config.api_url = api_url;
    }
    if token.is_some() {
        config.token = token;
    }

    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
