//! Config validation CLI tool
//!
//! Validates a gemstock configuration file and reports any errors.

use gemstock_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a gemstock configuration file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match gemstock_config::load_config(&config_path) {
        Ok(settings) => {
            let data_dir_status = settings.data_dir_status();

            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", gemstock_config::CURRENT_CONFIG_VERSION);
            println!(
                "  Data directory: {} ({})",
                settings.data_dir.display(),
                data_dir_status
            );
            println!(
                "  Inventory file: {}",
                gemstock_util::inventory_path(&settings.data_dir).display()
            );
            println!("  Seed demo data: {}", settings.seed_demo_data);
            println!(
                "  Currency symbol: {} (e.g. {})",
                settings.currency_symbol,
                settings.format_amount(1234.5)
            );

            if data_dir_status.is_usable() {
                ExitCode::SUCCESS
            } else {
                eprintln!();
                eprintln!(
                    "✗ Data directory {} is {}",
                    settings.data_dir.display(),
                    data_dir_status
                );
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                gemstock_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                gemstock_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                gemstock_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                gemstock_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        gemstock_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
