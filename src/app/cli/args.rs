//! Command-line arguments
//!
//! Range enforcement for the scanner delay lives here, at the host boundary;
//! the scan buffer itself applies whatever delay it is handed.

use crate::scan::buffer::{MAX_DELAY_MS, MIN_DELAY_MS};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "packtrack")]
#[command(about = "Lottery dispenser slot tracking for keyboard-wedge barcode scanners")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Scanner quiet delay in milliseconds before a complete scan is submitted
    #[arg(short = 'd', long = "scanner-delay", value_name = "MS", value_parser = parse_scanner_delay)]
    pub scanner_delay: Option<u64>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "json"])]
    pub log_format: Option<String>,

    /// Force colored output
    #[arg(long = "color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,
}

/// Parse and range-check a scanner delay value
pub fn parse_scanner_delay(value: &str) -> Result<u64, String> {
    match value.parse::<u64>() {
        Ok(ms) if (MIN_DELAY_MS..=MAX_DELAY_MS).contains(&ms) => Ok(ms),
        Ok(ms) => Err(format!(
            "scanner delay {}ms is outside the supported range {}-{}ms",
            ms, MIN_DELAY_MS, MAX_DELAY_MS
        )),
        Err(_) => Err(format!("'{}' is not a valid number of milliseconds", value)),
    }
}
