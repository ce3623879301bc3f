//! End-of-run statistics logging.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, LookupStats};

/// Logs a one-line summary of the run.
pub fn print_simple_summary(stats: &LookupStats, elapsed_seconds: f64) {
    let total = stats.total();
    info!(
        "✅ Looked up {} domain{} ({} succeeded, {} failed) in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        stats.succeeded(),
        stats.failed(),
        elapsed_seconds
    );
}

/// Logs failure counts per error type, if any failures occurred.
pub fn print_lookup_statistics(stats: &LookupStats) {
    let failed = stats.failed();
    if failed == 0 {
        return;
    }

    info!("Error Counts ({} total):", failed);
    for error_type in ErrorType::iter() {
        let count = stats.get_error_count(error_type);
        if count > 0 {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }
}
