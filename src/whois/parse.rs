//! WHOIS response parsing.
//!
//! Best-effort extraction of registration fields, contact emails and a
//! privacy flag from free text. Nothing here fails: text without a recognized
//! label simply yields an absent field.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::config::MAX_EMAIL_LENGTH;

use super::patterns::{
    LabelPattern, CONTACT_PATTERNS, EMAIL_DENYLIST, EMAIL_REGEX, FIELD_PATTERNS, PRIVACY_MARKERS,
};
use super::referral::extract_referral;
use super::types::ParsedRecord;

/// Parses a WHOIS response into a `ParsedRecord`.
///
/// `thin_server` is the registry server the lookup started from. The record's
/// `registrar_server` is recomputed from `text` itself.
pub fn parse_record(domain: &str, text: &str, thin_server: &str) -> ParsedRecord {
    let mut record = ParsedRecord {
        domain: domain.to_string(),
        thin_server: thin_server.to_string(),
        registrar_server: extract_referral(text),
        query_time: Utc::now(),
        raw_length: text.chars().count(),
        registrar: None,
        creation_date: None,
        expiry_date: None,
        updated_date: None,
        nameservers: Vec::new(),
        status: Vec::new(),
        registrant_email: None,
        admin_email: None,
        tech_email: None,
        billing_email: None,
        all_emails: extract_all_emails(text),
        privacy_protected: is_privacy_protected(text),
    };

    for (field, patterns) in FIELD_PATTERNS.iter() {
        if field.is_multi_valued() {
            if let Some(slot) = record.list_slot(*field) {
                *slot = extract_field_values(text, patterns);
            }
        } else if let Some(slot) = record.text_slot(*field) {
            *slot = extract_field(text, patterns);
        }
    }

    for (role, per_synonym) in CONTACT_PATTERNS.iter() {
        let email = per_synonym
            .iter()
            .filter_map(|patterns| extract_field(text, patterns))
            .find(|candidate| is_plausible_email(candidate));
        if let Some(email) = email {
            record.set_contact_email(*role, email);
        }
    }

    log::trace!(
        "Parsed {} chars for {}: registrar={:?}, {} email(s)",
        record.raw_length,
        domain,
        record.registrar,
        record.all_emails.len()
    );

    record
}

/// First non-empty value of the first label that matches anywhere in `text`.
///
/// Label order decides, not line order.
pub(crate) fn extract_field(text: &str, patterns: &[LabelPattern]) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .find(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// Every value of the first label that matches at all, deduplicated in text order.
fn extract_field_values(text: &str, patterns: &[LabelPattern]) -> Vec<String> {
    for pattern in patterns {
        let mut values: Vec<String> = Vec::new();
        for caps in pattern.regex.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            let value = m.as_str().trim();
            if !value.is_empty() && !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

/// Syntactic plausibility check for a contact email.
///
/// Exactly one `@`, a `.` somewhere after it, at most 254 characters.
pub fn is_plausible_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(domain), None) => domain.contains('.'),
        _ => false,
    }
}

/// Every email-shaped token in `text`, minus operational and placeholder
/// addresses.
pub fn extract_all_emails(text: &str) -> BTreeSet<String> {
    let Some(regex) = EMAIL_REGEX.as_ref() else {
        return BTreeSet::new();
    };
    regex
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|email| {
            let lower = email.to_lowercase();
            !lower.starts_with('@') && !EMAIL_DENYLIST.iter().any(|deny| lower.contains(deny))
        })
        .map(str::to_string)
        .collect()
}

/// Whether `text` mentions a known privacy-proxy service.
pub fn is_privacy_protected(text: &str) -> bool {
    let lower = text.to_lowercase();
    PRIVACY_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Attempts to parse a registry date string in various formats.
///
/// Values without an offset are taken as UTC.
pub fn parse_whois_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S UTC",
        "%d-%b-%Y %H:%M:%S",
    ];
    for format in &datetime_formats {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y.%m.%d", "%d-%b-%Y", "%d/%m/%Y"];
    for format in &date_formats {
        if let Ok(naive_date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
