//! Label pattern tables.
//!
//! WHOIS has no schema, so each field is a list of label variants seen across
//! registries. Order is precedence: the first label that matches anywhere in
//! the text wins, regardless of where it appears. New registry formats are
//! supported by appending labels here.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{ContactRole, RecordField};

/// Field labels, in precedence order per field.
pub const FIELD_LABELS: &[(RecordField, &[&str])] = &[
    (
        RecordField::Registrar,
        &["Registrar:", "Registrar Name:", "Sponsoring Registrar:"],
    ),
    (
        RecordField::CreationDate,
        &[
            "Creation Date:",
            "Created Date:",
            "Created on:",
            "Domain Created:",
            "Registered on:",
            "created:",
        ],
    ),
    (
        RecordField::ExpiryDate,
        &[
            "Registry Expiry Date:",
            "Expiry Date:",
            "Expires:",
            "Expiration Date:",
            "paid-till:",
        ],
    ),
    (
        RecordField::UpdatedDate,
        &["Updated Date:", "Last Updated:", "Last Update:", "changed:"],
    ),
    (
        RecordField::Nameservers,
        &["Name Server:", "Nameserver:", "nserver:"],
    ),
    (RecordField::Status, &["Domain Status:", "Status:", "state:"]),
];

/// Labels announcing a registrar ("thick") WHOIS server, in precedence order.
///
/// `Registrar WHOIS Server:` beats a bare `WHOIS Server:` even when the bare
/// label appears first in the text.
pub const REFERRAL_LABELS: &[&str] = &[
    "Registrar WHOIS Server:",
    "Registrar Whois:",
    "WHOIS Server:",
    "Whois Server:",
];

/// Email label spellings appended to a role synonym (`Admin Email:`).
pub const CONTACT_EMAIL_SUFFIXES: &[&str] = &["Email:", "E-mail:", "EMAIL:"];

/// Lowercase substrings marking operational or placeholder addresses.
///
/// `example` only applies to the domain part so that real registrant domains
/// containing the word are kept.
pub const EMAIL_DENYLIST: &[&str] = &[
    "abuse",
    "whois",
    "@example.",
    "hostmaster",
    "noc@",
    "admin@",
    "postmaster",
    "spam",
];

/// Lowercase markers of privacy-proxy services.
pub const PRIVACY_MARKERS: &[&str] = &[
    "identity-protection",
    "domainsbyproxy",
    "whoisguard",
    "withheldforprivacy",
    "contactprivacy",
];

/// A compiled label: case-insensitive, captures the rest of the line.
#[derive(Debug)]
pub struct LabelPattern {
    pub label: String,
    pub regex: Regex,
}

/// Compiles `label` into a case-insensitive single-line capture.
///
/// Labels are literal text, so escaping makes compilation infallible in
/// practice; a failure is logged and the label skipped.
pub fn compile_label(label: &str) -> Option<LabelPattern> {
    let pattern = format!(r"(?i){}[ \t]*([^\r\n]+)", regex::escape(label));
    match Regex::new(&pattern) {
        Ok(regex) => Some(LabelPattern {
            label: label.to_string(),
            regex,
        }),
        Err(e) => {
            log::error!("Failed to compile WHOIS label {label:?}: {e}");
            None
        }
    }
}

fn compile_all(labels: &[&str]) -> Vec<LabelPattern> {
    labels.iter().filter_map(|l| compile_label(l)).collect()
}

pub static FIELD_PATTERNS: LazyLock<Vec<(RecordField, Vec<LabelPattern>)>> =
    LazyLock::new(|| {
        FIELD_LABELS
            .iter()
            .map(|(field, labels)| (*field, compile_all(labels)))
            .collect()
    });

pub static REFERRAL_PATTERNS: LazyLock<Vec<LabelPattern>> =
    LazyLock::new(|| compile_all(REFERRAL_LABELS));

/// Per role: synonym-major, then suffix.
pub static CONTACT_PATTERNS: LazyLock<Vec<(ContactRole, Vec<Vec<LabelPattern>>)>> =
    LazyLock::new(|| {
        ContactRole::ALL
            .iter()
            .map(|role| {
                let per_synonym = role
                    .synonyms()
                    .iter()
                    .map(|synonym| {
                        CONTACT_EMAIL_SUFFIXES
                            .iter()
                            .filter_map(|suffix| compile_label(&format!("{synonym} {suffix}")))
                            .collect()
                    })
                    .collect();
                (*role, per_synonym)
            })
            .collect()
    });

/// Generic email-shaped token.
pub static EMAIL_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").ok());

/// Root server line naming a zone's WHOIS server: `whois:   whois.nic.io`.
pub static IANA_WHOIS_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*whois:[ \t]*([^\s]+)").ok());
