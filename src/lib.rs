//! whois_recurse library: recursive WHOIS lookups
//!
//! This library resolves a domain's registry WHOIS server, follows the
//! registrar referral found in the registry's reply, and extracts registration
//! data (registrar, dates, nameservers, status, contact emails) from the final
//! free-text response.
//!
//! # Example
//!
//! ```no_run
//! use whois_recurse::{Config, WhoisClient, WhoisData};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WhoisClient::new(&Config::default())?;
//!
//! if let WhoisData::Parsed(record) = client.lookup("example.com", false).await? {
//!     println!("{:?} via {}", record.registrar, record.thin_server);
//! }
//!
//! let domains = vec!["example.com".to_string(), "example.org".to_string()];
//! for outcome in client.bulk_lookup(&domains, 5, false).await {
//!     println!("{}", serde_json::to_string(&outcome)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod initialization;
pub mod whois;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use domain::{extract_zone, normalize_domain};
pub use error_handling::{ErrorType, InitializationError, LookupStats, WhoisError};
pub use run::{run_lookups, LookupReport};
pub use whois::{
    LookupOutcome, ParsedRecord, RawResponse, TcpTransport, Transport, WhoisClient, WhoisData,
    ZoneResolver,
};

// Internal run module (drives a CLI invocation end to end)
mod run {
    use std::io::Write;

    use anyhow::{Context, Result};

    use crate::app::{print_lookup_statistics, print_simple_summary};
    use crate::config::Config;
    use crate::error_handling::LookupStats;
    use crate::whois::{LookupOutcome, WhoisClient};

    /// Summary of a finished run.
    #[derive(Debug, Clone)]
    pub struct LookupReport {
        /// Domains looked up (one outcome each)
        pub total: usize,
        /// Outcomes that produced a record or raw text
        pub succeeded: usize,
        /// Outcomes that failed
        pub failed: usize,
        /// Wall-clock time of the run
        pub elapsed_seconds: f64,
    }

    /// Looks up `domains` and writes one JSON object per line to `out`.
    ///
    /// A single domain goes through `lookup`, several through `bulk_lookup`
    /// bounded by `config.max_concurrency`. Per-domain failures are written as
    /// `{domain, kind, error}` lines and counted; they never fail the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built (bad servers file) or
    /// writing to `out` fails.
    pub async fn run_lookups<W: Write>(
        config: &Config,
        domains: &[String],
        out: &mut W,
    ) -> Result<LookupReport> {
        let client = WhoisClient::new(config).context("Failed to initialize WHOIS client")?;
        let start_time = std::time::Instant::now();

        let outcomes = match domains {
            [domain] => {
                let result = client.lookup(domain, config.raw).await;
                if let Err(e) = &result {
                    log::warn!("WHOIS lookup failed for {domain}: {e}");
                }
                vec![LookupOutcome::from_result(domain, result)]
            }
            _ => {
                log::info!(
                    "Looking up {} domains ({} concurrent)",
                    domains.len(),
                    config.max_concurrency
                );
                client
                    .bulk_lookup(domains, config.max_concurrency, config.raw)
                    .await
            }
        };

        let stats = LookupStats::new();
        for outcome in &outcomes {
            match outcome {
                LookupOutcome::Failed { kind, .. } => stats.increment_error(*kind),
                _ => stats.increment_success(),
            }
            serde_json::to_writer(&mut *out, outcome).context("Failed to serialize outcome")?;
            writeln!(out).context("Failed to write output")?;
        }
        out.flush().context("Failed to flush output")?;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_lookup_statistics(&stats);
        print_simple_summary(&stats, elapsed_seconds);

        Ok(LookupReport {
            total: stats.total(),
            succeeded: stats.succeeded(),
            failed: stats.failed(),
            elapsed_seconds,
        })
    }
}
