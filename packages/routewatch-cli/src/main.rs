//! Routewatch CLI - Status report agent for network controllers
//!
//! This binary can:
//! - Authenticate to a controller's management API
//! - Fetch the running configuration and asset inventory
//! - Poll per-asset adjacency and derive link up/down status
//! - Render a fixed-width report and persist config/stats files
//!
//! Quick start:
//!   1. Point at a controller:  routewatch --controller-url https://192.168.0.1 report
//!   2. Inventory only:         routewatch assets
//!   3. Show configuration:     routewatch config

mod credentials;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use credentials::CliCredentialSource;
use routewatch_core::auth::CredentialSource;
use routewatch_core::{config, render, report, ControllerClient, Report};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "routewatch")]
#[command(author = "Routewatch Team")]
#[command(version)]
#[command(about = "Status report agent for network controllers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Controller base URL (e.g., https://192.168.0.1)
    #[arg(short, long, global = true)]
    pub controller_url: Option<String>,

    /// Login username (password comes from ROUTEWATCH_PASSWORD or a prompt)
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Skip TLS certificate validation (self-signed controller certificates)
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: config, inventory, adjacency, report files
    Report {
        /// Directory for the config/stats output files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Print the report without writing any files
        #[arg(long)]
        no_save: bool,
    },

    /// Fetch and print the asset inventory only
    Assets,

    /// Show configuration paths and settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("routewatch={log_level},routewatch_core={log_level}").into()
            }),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Report {
            ref output_dir,
            no_save,
        } => cmd_report(&cli, output_dir.clone(), no_save).await,
        Commands::Assets => cmd_assets(&cli).await,
        Commands::Config => cmd_config(&cli),
    }
}

/// Resolve the controller endpoint: `--controller-url` outranks the
/// environment variable, which outranks the config file.
fn resolve_client(cli: &Cli) -> Result<ControllerClient> {
    let endpoint = config::load_controller_config();
    let url = cli
        .controller_url
        .clone()
        .or(endpoint.url)
        .context("No controller URL configured; pass --controller-url or set ROUTEWATCH_CONTROLLER_URL")?;
    let verify_tls = !cli.insecure && endpoint.verify_tls;
    Ok(ControllerClient::new(&url, verify_tls)?)
}

fn login_source(cli: &Cli) -> CliCredentialSource {
    CliCredentialSource {
        username_flag: cli.username.clone(),
    }
}

async fn cmd_report(cli: &Cli, output_dir: PathBuf, no_save: bool) -> Result<()> {
    let client = resolve_client(cli)?;
    let creds = login_source(cli).credentials()?;
    let session = client.login(&creds).await?;
    tracing::debug!("Authenticated; fetching running configuration");

    // Config is fetched and persisted before the inventory fan-out: a fatal
    // failure later leaves the already-written config file on disk.
    let running_config = client.running_config(&session).await?;
    let stamp = render::file_timestamp();
    if !no_save {
        let path = render::save_config(&running_config, &output_dir, &stamp)?;
        if matches!(cli.format, OutputFormat::Text) {
            println!("Configuration saved to {}", path.display());
        }
    }

    let assets = client.assets(&session).await?;
    let rows = report::fan_out_adjacency(&client, &session, &assets).await;
    let report = Report::new(running_config, assets, rows);

    match cli.format {
        OutputFormat::Text => println!("{}", render::render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if !no_save {
        let path = render::save_stats(&report, &output_dir, &stamp)?;
        if matches!(cli.format, OutputFormat::Text) {
            println!("Asset and adjacency information saved to {}", path.display());
        }
    }

    Ok(())
}

async fn cmd_assets(cli: &Cli) -> Result<()> {
    let client = resolve_client(cli)?;
    let creds = login_source(cli).credentials()?;
    let session = client.login(&creds).await?;
    let assets = client.assets(&session).await?;

    match cli.format {
        OutputFormat::Text => print!("{}", render::asset_table(&assets)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assets)?),
    }

    Ok(())
}

fn cmd_config(cli: &Cli) -> Result<()> {
    let endpoint = config::load_controller_config();
    let config_path = config::get_config_file_path_string();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration");
            println!("=============");
            println!();
            println!("Config file:     {}", config_path);
            println!(
                "Controller URL:  {} (from {})",
                endpoint.url.as_deref().unwrap_or("<unset>"),
                endpoint.source
            );
            println!("Verify TLS:      {}", endpoint.verify_tls);
            println!();
            println!("Environment variables:");
            println!("  ROUTEWATCH_CONTROLLER_URL - Controller base URL");
            println!("  ROUTEWATCH_USERNAME       - Login username");
            println!("  ROUTEWATCH_PASSWORD       - Login password");
            println!();
            println!("Example config.toml:");
            println!();
            println!("{}", config::generate_example_config());
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": config_path,
                    "controller_url": endpoint.url,
                    "url_source": format!("{}", endpoint.source),
                    "verify_tls": endpoint.verify_tls,
                })
            );
        }
    }

    Ok(())
}
