// src/main.rs

mod bridge;
mod cli;
mod settings;
mod sheets;

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use settings::io::{load_env_file, SearchRoots};
use settings::AppConfig;
use sheets::{OrderService, ServiceAccountConnector};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let args = Cli::parse();

    let roots = SearchRoots::detect();
    let env_file = load_env_file(&roots);
    let config = Arc::new(AppConfig::from_env(roots, env_file));

    let connector = ServiceAccountConnector::new(config.roots.clone(), config.scope());
    let service = OrderService::new(config.clone(), connector);

    let result = match args.command.unwrap_or(Commands::Bridge) {
        Commands::Bridge => {
            info!("Bridge ready on stdin/stdout");
            bridge::serve(&service, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await
                .map(|()| true)
        }
        Commands::ListOrders => cli::list_orders::run(&service).await.map(|r| r.ok),
        Commands::UpdateStatus {
            row_number,
            status_code,
            sheet_title,
        } => cli::update_status::run(&service, row_number, status_code, sheet_title)
            .await
            .map(|r| r.ok),
        Commands::DiagnoseConfig => {
            cli::diagnose_config::run(&config);
            Ok(true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("Bridge I/O failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries bridge responses only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,btmonitor=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
