//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - Bulk-lookup concurrency limit
//! - Zone/server table (built-in, optionally merged with a user file)

mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::whois::ServerTable;

// Re-export public API
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// A count of zero is raised to one so that a bulk run always makes progress.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}

/// Builds the zone/server table for a configuration.
///
/// Starts from the built-in table and merges `config.servers_file` over it
/// when set.
///
/// # Errors
///
/// Returns `InitializationError::ServerTableError` if the override file cannot
/// be read or parsed.
pub fn init_server_table(config: &Config) -> Result<Arc<ServerTable>, InitializationError> {
    let mut table = ServerTable::builtin().clone();
    if let Some(path) = &config.servers_file {
        let overrides = ServerTable::from_path(path)
            .map_err(|e| InitializationError::ServerTableError(format!("{e:#}")))?;
        log::info!(
            "Loaded {} zone server(s) from {} (version {})",
            overrides.len(),
            path.display(),
            overrides.version()
        );
        table.merge(overrides);
    }
    Ok(Arc::new(table))
}
