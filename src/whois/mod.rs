//! Recursive WHOIS lookups.
//!
//! A lookup resolves the domain's zone to a registry ("thin") server, queries
//! it, follows any registrar ("thick") referral, and scrapes the final
//! free-text response into a [`ParsedRecord`].

mod client;
mod parse;
mod patterns;
mod referral;
mod resolver;
mod servers;
#[cfg(test)]
mod test_support;
mod transport;
mod types;

pub use client::WhoisClient;
pub use parse::{
    extract_all_emails, is_plausible_email, is_privacy_protected, parse_record, parse_whois_date,
};
pub use referral::extract_referral;
pub use resolver::{default_server, parse_root_referral, ZoneResolver};
pub use servers::ServerTable;
pub use transport::{is_rate_limited, TcpTransport, Transport};
pub use types::{
    ContactRole, LookupOutcome, ParsedRecord, RawPayload, RawResponse, RecordField, WhoisData,
};
