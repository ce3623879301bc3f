//! WHOIS data structures.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::ser::{Error as _, SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use strum_macros::EnumIter;

use crate::error_handling::{ErrorType, WhoisError};

use super::parse::parse_whois_date;

/// Text returned by one query, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Server that answered
    pub server: String,
    /// Query line sent (without terminator)
    pub query: String,
    /// Full response, decoded leniently
    pub text: String,
}

/// Scalar and list fields extracted through the pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum RecordField {
    Registrar,
    CreationDate,
    ExpiryDate,
    UpdatedDate,
    Nameservers,
    Status,
}

impl RecordField {
    /// Whether every matching line contributes a value.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, RecordField::Nameservers | RecordField::Status)
    }
}

/// Contact roles that may carry their own email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactRole {
    Registrant,
    Admin,
    Tech,
    Billing,
}

impl ContactRole {
    pub const ALL: [ContactRole; 4] = [
        ContactRole::Registrant,
        ContactRole::Admin,
        ContactRole::Tech,
        ContactRole::Billing,
    ];

    /// Labels registries use for this role, in precedence order.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            ContactRole::Registrant => &["Registrant", "Owner"],
            ContactRole::Admin => &["Admin", "Administrative"],
            ContactRole::Tech => &["Tech", "Technical"],
            ContactRole::Billing => &["Billing"],
        }
    }
}

/// Structured registration data extracted from a WHOIS response.
///
/// Fields absent from the source text are `None` (or empty) and are omitted
/// when serialized; nothing is defaulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRecord {
    pub domain: String,
    /// Registry server the lookup started from
    pub thin_server: String,
    /// Referral found in the parsed text (recomputed from that text, so it may
    /// differ from the referral that chose which server to query)
    pub registrar_server: Option<String>,
    pub query_time: DateTime<Utc>,
    /// Length of the parsed text in characters
    pub raw_length: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_email: Option<String>,

    pub all_emails: BTreeSet<String>,
    pub privacy_protected: bool,
}

impl ParsedRecord {
    pub fn contact_email(&self, role: ContactRole) -> Option<&str> {
        match role {
            ContactRole::Registrant => self.registrant_email.as_deref(),
            ContactRole::Admin => self.admin_email.as_deref(),
            ContactRole::Tech => self.tech_email.as_deref(),
            ContactRole::Billing => self.billing_email.as_deref(),
        }
    }

    /// Storage for a single-valued field; `None` for list fields.
    pub(crate) fn text_slot(&mut self, field: RecordField) -> Option<&mut Option<String>> {
        match field {
            RecordField::Registrar => Some(&mut self.registrar),
            RecordField::CreationDate => Some(&mut self.creation_date),
            RecordField::ExpiryDate => Some(&mut self.expiry_date),
            RecordField::UpdatedDate => Some(&mut self.updated_date),
            RecordField::Nameservers | RecordField::Status => None,
        }
    }

    /// Storage for a list field; `None` for single-valued fields.
    pub(crate) fn list_slot(&mut self, field: RecordField) -> Option<&mut Vec<String>> {
        match field {
            RecordField::Nameservers => Some(&mut self.nameservers),
            RecordField::Status => Some(&mut self.status),
            _ => None,
        }
    }

    pub(crate) fn set_contact_email(&mut self, role: ContactRole, email: String) {
        let slot = match role {
            ContactRole::Registrant => &mut self.registrant_email,
            ContactRole::Admin => &mut self.admin_email,
            ContactRole::Tech => &mut self.tech_email,
            ContactRole::Billing => &mut self.billing_email,
        };
        *slot = Some(email);
    }

    /// Creation date, if present and in a recognized format.
    pub fn creation_datetime(&self) -> Option<DateTime<Utc>> {
        self.creation_date.as_deref().and_then(parse_whois_date)
    }

    /// Expiry date, if present and in a recognized format.
    pub fn expiry_datetime(&self) -> Option<DateTime<Utc>> {
        self.expiry_date.as_deref().and_then(parse_whois_date)
    }

    /// Last-updated date, if present and in a recognized format.
    pub fn updated_datetime(&self) -> Option<DateTime<Utc>> {
        self.updated_date.as_deref().and_then(parse_whois_date)
    }
}

/// Unparsed response text, serialized as `{"raw": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawPayload {
    pub raw: String,
}

/// Successful result of a single lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WhoisData {
    Parsed(ParsedRecord),
    Raw(RawPayload),
}

/// Result of one domain in a bulk run, always tagged with its input domain.
///
/// A parsed record serializes as the record's own fields with `domain` set to
/// the input and the record's normalized name under `normalized_domain`.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Record {
        domain: String,
        record: ParsedRecord,
    },
    Raw {
        domain: String,
        raw: String,
    },
    Failed {
        domain: String,
        kind: ErrorType,
        error: String,
    },
}

impl LookupOutcome {
    /// Wraps the result of `lookup(domain)`.
    pub fn from_result(domain: &str, result: Result<WhoisData, WhoisError>) -> Self {
        match result {
            Ok(WhoisData::Parsed(record)) => LookupOutcome::Record {
                domain: domain.to_string(),
                record,
            },
            Ok(WhoisData::Raw(payload)) => LookupOutcome::Raw {
                domain: domain.to_string(),
                raw: payload.raw,
            },
            Err(e) => LookupOutcome::Failed {
                domain: domain.to_string(),
                kind: e.error_type(),
                error: e.to_string(),
            },
        }
    }

    /// The domain exactly as it was given to the lookup.
    pub fn domain(&self) -> &str {
        match self {
            LookupOutcome::Record { domain, .. }
            | LookupOutcome::Raw { domain, .. }
            | LookupOutcome::Failed { domain, .. } => domain,
        }
    }

    pub fn record(&self) -> Option<&ParsedRecord> {
        match self {
            LookupOutcome::Record { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LookupOutcome::Failed { .. })
    }
}

impl Serialize for LookupOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LookupOutcome::Record { domain, record } => {
                let fields = match serde_json::to_value(record).map_err(S::Error::custom)? {
                    serde_json::Value::Object(fields) => fields,
                    _ => return Err(S::Error::custom("record did not serialize to an object")),
                };
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry("domain", domain)?;
                map.serialize_entry("normalized_domain", &record.domain)?;
                for (key, value) in fields.iter().filter(|(key, _)| key.as_str() != "domain") {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            LookupOutcome::Raw { domain, raw } => {
                let mut state = serializer.serialize_struct("LookupOutcome", 2)?;
                state.serialize_field("domain", domain)?;
                state.serialize_field("raw", raw)?;
                state.end()
            }
            LookupOutcome::Failed {
                domain,
                kind,
                error,
            } => {
                let mut state = serializer.serialize_struct("LookupOutcome", 3)?;
                state.serialize_field("domain", domain)?;
                state.serialize_field("kind", kind)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}
