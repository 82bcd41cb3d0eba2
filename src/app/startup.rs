//! Application startup
//!
//! Staged: parse flags, load the config file, merge (flags win), configure
//! logging, then hand everything to the event controller. Stdin reading and
//! timer firings are forwarded onto the controller's single event channel so
//! all state changes stay serialized.

use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use crate::app::cli::args::Args;
use crate::app::cli::config;
use crate::app::event_controller::{AppEvent, EventController};
use crate::common::logging::{init_logging, reconfigure_logging};
use crate::core::error_handling::log_error_with_context;
use crate::core::time::SystemClock;
use crate::inventory::{GameCatalog, InventoryStore};
use crate::scan::buffer::DEFAULT_DELAY_MS;
use crate::scan::{ScanBuffer, TokioFlushScheduler};

/// Initialize application startup
pub async fn startup() {
    let args = Args::parse();

    let use_color = !args.no_color && (args.color || std::io::stdout().is_terminal());

    // Logging first so config loading can report problems
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        args.log_file.as_deref().and_then(|p| p.to_str()),
        use_color,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }
    colored::control::set_override(use_color);

    let file_config = match config::load(args.config_file.clone()).await {
        Ok(config) => config,
        Err(e) => {
            log_error_with_context(&e, "Configuration loading");
            std::process::exit(1);
        }
    };

    // Flags win over config values
    let log_level = args
        .log_level
        .clone()
        .or_else(|| file_config.log_level.clone());
    let log_format = args
        .log_format
        .clone()
        .or_else(|| file_config.log_format.clone());
    let log_file = args
        .log_file
        .as_ref()
        .and_then(|p| p.to_str().map(str::to_string))
        .or_else(|| file_config.log_file.clone());
    let use_color = match (args.color, args.no_color, file_config.color) {
        (false, false, Some(from_config)) => from_config,
        _ => use_color,
    };
    if let Err(e) = reconfigure_logging(
        log_level.as_deref(),
        log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Failed to reconfigure logging: {}", e);
        std::process::exit(1);
    }
    colored::control::set_override(use_color);

    let delay_ms = args
        .scanner_delay
        .or(file_config.scanner_delay_ms)
        .unwrap_or(DEFAULT_DELAY_MS);

    log::info!(
        "packtrack {} ({}, built {}) starting, scanner delay {}ms",
        env!("CARGO_PKG_VERSION"),
        crate::GIT_HASH,
        crate::BUILD_TIME,
        delay_ms
    );

    let catalog = GameCatalog::builtin().with_overrides(file_config.games);
    let store = InventoryStore::new(Arc::new(SystemClock), catalog);

    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Timer firings join the same queue as input lines
    let (flush_tx, mut flush_rx) = mpsc::unbounded_channel();
    let flush_forwarder = event_tx.clone();
    tokio::spawn(async move {
        while let Some(generation) = flush_rx.recv().await {
            if flush_forwarder.send(AppEvent::FlushDue(generation)).is_err() {
                break;
            }
        }
    });

    let mut buffer = ScanBuffer::new(TokioFlushScheduler::new(flush_tx));
    buffer.set_delay(Duration::from_millis(delay_ms));

    // Wedge scanner input arrives as stdin lines
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if event_tx.send(AppEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    log::error!("stdin read failed: {}", e);
                    break;
                }
            }
        }
        let _ = event_tx.send(AppEvent::Shutdown);
    });

    EventController::new(store, buffer, event_rx).run().await;
}
