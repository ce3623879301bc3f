//! Lookup statistics tracking.
//!
//! Thread-safe counters of successful and failed lookups, broken down by
//! `ErrorType`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe lookup statistics tracker.
///
/// All error types are initialized to zero on creation, so the tracker can be
/// shared across tasks with `Arc` without further setup.
#[derive(Debug)]
pub struct LookupStats {
    succeeded: AtomicUsize,
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl LookupStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        LookupStats {
            succeeded: AtomicUsize::new(0),
            errors,
        }
    }

    /// Records one successful lookup.
    pub fn increment_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one failed lookup of the given type.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                error
            );
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    pub fn total(&self) -> usize {
        self.succeeded() + self.failed()
    }

    /// Non-zero error counts, in `ErrorType` declaration order.
    pub fn error_breakdown(&self) -> Vec<(ErrorType, usize)> {
        ErrorType::iter()
            .map(|e| (e, self.get_error_count(e)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_error_breakdown_skips_zero_counts() {
        let stats = LookupStats::new();
        stats.increment_error(ErrorType::Transport);
        stats.increment_error(ErrorType::ServerNotFound);
        stats.increment_error(ErrorType::Transport);

        assert_eq!(
            stats.error_breakdown(),
            vec![(ErrorType::ServerNotFound, 1), (ErrorType::Transport, 2)]
        );
    }

    #[tokio::test]
    async fn test_concurrent_increments() {
        let stats = Arc::new(LookupStats::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let stats = Arc::clone(&stats);
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    stats.increment_success();
                } else {
                    stats.increment_error(ErrorType::QueryTimeout);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(stats.succeeded(), 10);
        assert_eq!(stats.get_error_count(ErrorType::QueryTimeout), 10);
        assert_eq!(stats.total(), 20);
    }
}
