//! Configuration constants.
//!
//! This module defines the constants used throughout the client: the protocol
//! port, well-known servers, timeouts and parser limits.

/// Well-known TCP port of the WHOIS protocol (RFC 3912).
pub const WHOIS_PORT: u16 = 43;

/// Root coordination server consulted for zones missing from the server table.
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org";

/// Per-query timeout in seconds.
///
/// Bounds connect, write and the full read-until-EOF of a single query.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Number of lookups allowed in flight during a bulk run.
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Size of each read from the server socket.
pub const READ_CHUNK_SIZE: usize = 4096;

/// Line terminator required after every query.
pub const QUERY_TERMINATOR: &str = "\r\n";

/// Lowercase substrings that mark a throttled response.
///
/// Checked against every chunk as it arrives; a hit aborts the query. A bare
/// "limited" is deliberately absent: it matches company names
/// ("... Registry Limited") in ordinary responses.
pub const RATE_LIMIT_MARKERS: &[&str] = &[
    "rate limit",
    "limit exceeded",
    "query limit",
    "too many queries",
    "try again",
];

/// Maximum length of a contact email address (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a domain name in presentation format.
pub const MAX_DOMAIN_LENGTH: usize = 253;
