// Tracing subscriber setup
//
// The TUI owns stdout, so log output goes to a file. Filter priority:
// FACDASH_LOG, then RUST_LOG, then the verbose flag, then the config level.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub fn build_env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var("FACDASH_LOG") {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if verbose {
        return EnvFilter::new("facdash=debug,info");
    }

    EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `path`.
///
/// Returns an error if the log file can't be opened; a second call after a
/// successful init is ignored.
pub fn init(config: &LoggingConfig, path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(config, verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("facdash.log");

        init(&LoggingConfig::default(), &path, false).unwrap();
        tracing::info!("log file smoke test");

        assert!(path.exists());
    }
}
