use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use service_template::config::{resolve_config, CliOverrides};
use service_template::lifecycle;
use service_template::observability::logging;

#[derive(Parser)]
#[command(name = "service-template")]
#[command(about = "HTTP service template with request timing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (listens on port 8080 by default)
    Serve {
        /// Optional TOML config file; environment variables override it
        #[arg(short, long, default_value = "service.toml")]
        config: PathBuf,

        /// Override the listener bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => {
            let config_path = config;
            let overrides = CliOverrides { bind_address: bind };
            let config = match resolve_config(&config_path, &overrides) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Unable to load configuration: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            if let Err(e) = logging::init_logging(&config.observability) {
                eprintln!("Unable to initialize logger: {}", e);
                return ExitCode::FAILURE;
            }

            if !config_path.exists() {
                tracing::info!(path = %config_path.display(), "Config file not found, using defaults");
            }

            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                app_name = %config.app_name,
                environment = %config.environment,
                bind_address = %config.listener.bind_address,
                timing_mode = ?config.metrics.mode,
                "Configuration loaded"
            );

            if let Err(e) = lifecycle::start(config).await {
                tracing::error!(error = %e, "Server exited with error");
                return ExitCode::FAILURE;
            }

            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
    }
}
