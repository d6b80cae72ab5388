mod analyze_cmd;
mod config_cmd;
mod runtime;
mod terminal_output;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use legalens_config::{config_dir, config_file_path, load_and_prepare, LegalensConfig};
use legalens_gateway::{start_server, GatewayState};
use legalens_logging::init_logger;
use tracing::info;

#[derive(Parser)]
#[command(name = "legalens")]
#[command(about = "legalens: legal document analysis and assistant chat")]
#[command(version)]
struct Cli {
    /// Config file (default: $LEGALENS_CONFIG_DIR/config.yaml or ~/.legalens/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze a local document
    Analyze {
        /// Text (.txt, .md) or image (.png, .jpg) file
        file: PathBuf,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the config file
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let (config, report) = load_and_prepare(&path).await?;

    match cli.command {
        Commands::Serve { port } => {
            init_logger(&runtime::log_settings(&config));
            if !report.is_valid() {
                anyhow::bail!("Refusing to start with an invalid config; run `legalens check-config`");
            }
            serve(config, port).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Analyze { file, json } => {
            // Keep the terminal for progress and results.
            let mut settings = runtime::log_settings(&config);
            settings.level = "warn".to_string();
            init_logger(&settings);

            let pipeline = runtime::build_pipeline(&config)?;
            analyze_cmd::run(&pipeline, &file, json).await
        }
        Commands::CheckConfig => config_cmd::run(&path, &config, &report),
    }
}

async fn serve(config: LegalensConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port());
    let addr: SocketAddr = format!("{}:{}", config.bind(), port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind(), port))?;

    let state = GatewayState::new(
        runtime::build_pipeline(&config)?,
        runtime::upload_policy(&config),
        runtime::build_chat(&config),
    );

    info!(
        addr = %addr,
        timeout_secs = config.extraction_timeout().as_secs(),
        max_upload_bytes = config.max_upload_bytes(),
        "Starting legalens gateway"
    );
    start_server(addr, state, config.cors_allow_origin()).await
}
