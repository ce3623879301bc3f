//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECS, WHOIS_PORT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by [`crate::WhoisClient`]. It can
/// be constructed programmatically without going through the CLI.
///
/// # Examples
///
/// ```no_run
/// use whois_recurse::Config;
///
/// let config = Config {
///     timeout_seconds: 5,
///     follow_referrals: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-query timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum lookups in flight during a bulk run
    pub max_concurrency: usize,

    /// TCP port queried on every WHOIS server
    pub port: u16,

    /// Query the registrar server announced by the registry, when present
    pub follow_referrals: bool,

    /// Return unparsed response text instead of a parsed record
    pub raw: bool,

    /// JSON file merged over the built-in zone/server table
    pub servers_file: Option<PathBuf>,
}

impl Config {
    /// Per-query timeout as a `Duration`.
    ///
    /// A zero `timeout_seconds` is raised to one second; a zero timeout would
    /// fail every query before it is sent.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            port: WHOIS_PORT,
            follow_referrals: true,
            raw: false,
            servers_file: None,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Single lookup
/// whois_recurse example.com
///
/// # Bulk lookup from a file, ten at a time
/// whois_recurse --file domains.txt --max-concurrency 10
///
/// # Raw registry text only, no referral
/// whois_recurse example.com --raw --no-follow-referrals
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "whois_recurse",
    about = "Looks up domain registration data, following registry referrals to registrar WHOIS servers."
)]
pub struct Opt {
    /// Domains to look up
    #[arg(value_parser)]
    pub domains: Vec<String>,

    /// File with one domain per line (`-` reads stdin)
    #[arg(long, value_parser)]
    pub file: Option<PathBuf>,

    /// Print unparsed response text instead of parsed records
    #[arg(long)]
    pub raw: bool,

    /// Stop after the registry server, never query the registrar server
    #[arg(long)]
    pub no_follow_referrals: bool,

    /// Per-query timeout in seconds (at least 1)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_seconds: u64,

    /// Maximum concurrent lookups
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// WHOIS TCP port
    #[arg(long, default_value_t = WHOIS_PORT)]
    pub port: u16,

    /// JSON zone/server table merged over the built-in one
    #[arg(long, value_parser)]
    pub servers_file: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Config {
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
            timeout_seconds: opt.timeout_seconds,
            max_concurrency: opt.max_concurrency,
            port: opt.port,
            follow_referrals: !opt.no_follow_referrals,
            raw: opt.raw,
            servers_file: opt.servers_file.clone(),
        }
    }
}
