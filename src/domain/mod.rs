//! Domain normalization and zone derivation.
//!
//! Key functions:
//! - `normalize_domain()` - Lowercases, trims and validates a domain name
//! - `extract_zone()` - Derives the registration zone used to pick a WHOIS server

use crate::config::MAX_DOMAIN_LENGTH;
use crate::error_handling::WhoisError;

/// Second-to-last labels treated as generic registration subdivisions.
///
/// This list is a heuristic, not a source of truth: there is no authoritative
/// registry of which ccTLDs register below `co.`/`org.`/`com.`. When the
/// second-to-last label is one of these (and the name has more than two
/// labels), the zone is the last two labels.
pub const SECOND_LEVEL_REGISTRATION_LABELS: &[&str] = &["co", "org", "com"];

/// Normalizes a domain name for querying.
///
/// Trims surrounding whitespace, lowercases, and strips one trailing root dot.
///
/// # Errors
///
/// Returns `WhoisError::InvalidDomain` if the result is empty, longer than
/// 253 characters, contains whitespace, or has an empty label (`a..b`).
pub fn normalize_domain(domain: &str) -> Result<String, WhoisError> {
    let trimmed = domain.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let normalized = trimmed.to_lowercase();

    if normalized.is_empty() {
        return Err(WhoisError::InvalidDomain("empty domain name".to_string()));
    }
    if normalized.len() > MAX_DOMAIN_LENGTH {
        return Err(WhoisError::InvalidDomain(format!(
            "domain exceeds {} characters",
            MAX_DOMAIN_LENGTH
        )));
    }
    if normalized.chars().any(char::is_whitespace) {
        return Err(WhoisError::InvalidDomain(format!(
            "domain contains whitespace: {normalized}"
        )));
    }
    if normalized.split('.').any(str::is_empty) {
        return Err(WhoisError::InvalidDomain(format!(
            "domain has an empty label: {normalized}"
        )));
    }

    Ok(normalized)
}

/// Derives the registration zone of a normalized domain.
///
/// Normally the last label (`example.com` -> `com`). When the name has more
/// than two labels and the second-to-last is listed in
/// [`SECOND_LEVEL_REGISTRATION_LABELS`], the last two labels are used
/// (`example.co.uk` -> `co.uk`). See that constant for the caveats.
pub fn extract_zone(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').collect();
    let n = labels.len();
    if n > 2 && SECOND_LEVEL_REGISTRATION_LABELS.contains(&labels[n - 2]) {
        return labels[n - 2..].join(".");
    }
    labels[n - 1].to_string()
}
