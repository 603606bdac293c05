// src/cli/diagnose_config.rs
// Diagnostic tool to see which configuration and credential files are picked up

use crate::settings::io::{CREDENTIAL_FILE, ENV_FILE};
use crate::settings::AppConfig;

pub fn run(config: &AppConfig) {
    println!("=== BTMonitor Configuration Diagnostic ===\n");

    for file_name in [ENV_FILE, CREDENTIAL_FILE] {
        println!("--- {} ---", file_name);
        let found = config.roots.find(file_name);
        for candidate in config.roots.candidates(file_name) {
            let marker = if found.as_ref() == Some(&candidate) {
                "=>"
            } else if candidate.exists() {
                " +"
            } else {
                "  "
            };
            println!("{} {}", marker, candidate.display());
        }
        if found.is_none() {
            println!("   (not found)");
        }
        println!();
    }

    println!("--- Effective settings ---");
    println!(
        "{:<24} {}",
        "Env file loaded",
        config
            .env_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "{:<24} {}",
        "GOOGLE_SHEET_ID",
        config.spreadsheet_id.as_deref().unwrap_or("MISSING")
    );
    println!("{:<24} {}", "GOOGLE_SHEET_RANGE", config.range);
    println!(
        "{:<24} {}",
        "GOOGLE_SHEET_GID",
        config
            .sheet_gid
            .map(|gid| gid.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "{:<24} {} ({})",
        "Timezone fix (minutes)",
        config.tz_fix_minutes,
        if config.tz_fix_enabled { "enabled" } else { "disabled" }
    );
    println!("{:<24} {}", "Display zone", config.display_zone);
    println!("{:<24} {}", "OAuth scope", config.scope().as_str());
}
