//! Command-line application helpers.
//!
//! This module provides domain-list reading and end-of-run statistics used by
//! the binary.

pub mod input;
pub mod statistics;

// Re-export public API
pub use input::{collect_domains, parse_domain_line, read_domains};
pub use statistics::{print_lookup_statistics, print_simple_summary};
