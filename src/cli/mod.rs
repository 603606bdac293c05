// src/cli/mod.rs
// Command surface of the data process

pub mod diagnose_config;
pub mod list_orders;
pub mod update_status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "btmonitor")]
#[command(about = "BTMonitor - order board backed by a Google spreadsheet", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve line-delimited JSON bridge requests on stdin/stdout (default)
    Bridge,

    /// Print every order of the configured tab as a bridge envelope
    ListOrders,

    /// Overwrite the status code of one order row
    UpdateStatus {
        /// 1-based sheet row of the order
        row_number: u32,
        /// New status code (1 = in preparation, 2 = out for delivery, 3 = ready)
        status_code: String,
        /// Tab to write to instead of the configured one
        #[arg(long)]
        sheet_title: Option<String>,
    },

    /// Show where configuration and credentials are looked up and which were found
    DiagnoseConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_status() {
        let cli = Cli::try_parse_from(["btmonitor", "update-status", "7", "2", "--sheet-title", "Pedidos"]).unwrap();
        match cli.command {
            Some(Commands::UpdateStatus { row_number, status_code, sheet_title }) => {
                assert_eq!(row_number, 7);
                assert_eq!(status_code, "2");
                assert_eq!(sheet_title.as_deref(), Some("Pedidos"));
            }
            _ => panic!("expected update-status"),
        }
    }

    #[test]
    fn test_no_subcommand_means_bridge() {
        let cli = Cli::try_parse_from(["btmonitor"]).unwrap();
        assert!(cli.command.is_none());
    }
}
