//! Domain list input.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Returns the domain on an input line, or `None` for blanks and `#` comments.
pub fn parse_domain_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

/// Reads one domain per line from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened. Unreadable lines are logged
/// and skipped.
pub async fn read_domains(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        log::info!("Reading domains from stdin");
        return Ok(read_lines(BufReader::new(tokio::io::stdin())).await);
    }

    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    let domains = read_lines(BufReader::new(file)).await;
    log::info!("Read {} domain(s) from {}", domains.len(), path.display());
    Ok(domains)
}

async fn read_lines<R: AsyncBufRead + Unpin>(reader: R) -> Vec<String> {
    let mut lines = reader.lines();
    let mut domains = Vec::new();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(domain) = parse_domain_line(&line) {
                    domains.push(domain.to_string());
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("Failed to read line from input: {e}");
                // Invalid UTF-8 skips the line; anything else ends the input
                if e.kind() != std::io::ErrorKind::InvalidData {
                    break;
                }
            }
        }
    }
    domains
}

/// Positional domains followed by those read from `file`, if any.
///
/// # Errors
///
/// Propagates [`read_domains`] failures.
pub async fn collect_domains(positional: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut domains: Vec<String> = positional
        .iter()
        .filter_map(|d| parse_domain_line(d))
        .map(str::to_string)
        .collect();
    if let Some(path) = file {
        domains.extend(read_domains(path).await?);
    }
    Ok(domains)
}
