//! File-backed logger.
//!
//! The terminal is in raw mode on the alternate screen while playing, so log
//! records go to `~/.flappy/flappy.log` instead of stderr. Filtering follows
//! `RUST_LOG` and defaults to `info`.

use crate::constants::LOG_FILE;
use crate::persistence;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;

pub fn init() -> io::Result<()> {
    let path = persistence::save_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    log::info!("logging to {}", path.display());
    Ok(())
}

/// Stderr logger for headless tools, where the terminal is not taken over.
pub fn init_stderr(default_level: &str) {
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}
