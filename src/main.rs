//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `whois_recurse` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Collecting domains from arguments, a file, or stdin
//!
//! Results are printed to stdout as JSON lines; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use whois_recurse::app::collect_domains;
use whois_recurse::initialization::init_logger_with;
use whois_recurse::{run_lookups, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let config = Config::from(&opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let domains = match collect_domains(&opt.domains, opt.file.as_deref()).await {
        Ok(domains) => domains,
        Err(e) => {
            eprintln!("whois_recurse error: {:#}", e);
            process::exit(1);
        }
    };
    if domains.is_empty() {
        eprintln!("whois_recurse error: no domains given (pass domains or --file)");
        process::exit(1);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run_lookups(&config, &domains, &mut out).await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("whois_recurse error: {:#}", e);
            process::exit(1);
        }
    }
}
