//! Error handling and lookup statistics.
//!
//! This module provides:
//! - The `WhoisError` taxonomy raised by transport, resolution and lookup
//! - `ErrorType`, a flat, iterable classification of those errors
//! - Initialization errors for logger and server-table setup
//! - Thread-safe statistics over a batch of lookup outcomes

mod stats;
mod types;

// Re-export public API
pub use stats::LookupStats;
pub use types::{ErrorType, InitializationError, WhoisError};
