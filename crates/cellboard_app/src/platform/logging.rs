//! Platform logging initialization for cellboard.
//!
//! The TUI owns the terminal, so logs always go to a file.

use std::fs::File;
use std::io;
use std::path::Path;

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

/// Initialize the global logger, writing to `path` (truncated on start).
pub fn initialize(path: &Path) {
    match file_logger(path) {
        Ok(logger) => {
            let _ = CombinedLogger::init(vec![logger]);
        }
        Err(err) => eprintln!("Warning: Could not create log file at {:?}: {}", path, err),
    }
}

fn file_logger(path: &Path) -> io::Result<Box<dyn SharedLogger>> {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let file = File::create(path)?;
    Ok(WriteLogger::new(level, build_config(), file))
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
