use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_core::config::ServerConfig;

#[derive(Parser)]
#[command(
    name = "storefront",
    about = "In-memory list resources (categories, products) over HTTP"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server. Every resource starts empty.
    Serve {
        /// Path to storefront.yaml. Defaults to ./storefront.yaml, then the
        /// user config directory, then built-in defaults.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Host address to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the effective configuration
    Config {
        /// Path to storefront.yaml
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Serve { config, port, host } => {
            let mut config = ServerConfig::resolve(config.as_deref())?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            run_serve(&config).await?;
        }
        Commands::Config { config, json } => {
            let config = ServerConfig::resolve(config.as_deref())?;
            run_print_config(&config, json)?;
        }
    }

    Ok(())
}

async fn run_serve(config: &ServerConfig) -> anyhow::Result<()> {
    if config.resources.is_empty() {
        anyhow::bail!("No resources configured. Add at least one entry under `resources:`.");
    }
    storefront_core::server::run_server(config).await?;
    Ok(())
}

fn run_print_config(config: &ServerConfig, json: bool) -> anyhow::Result<()> {
    config.validate()?;
    let rendered = if json {
        serde_json::to_string_pretty(config)?
    } else {
        serde_yml::to_string(config)?
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
