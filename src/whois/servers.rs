//! Zone -> WHOIS server table.
//!
//! The table is data, not logic: it ships as `data/whois_servers.json`,
//! embedded at compile time, and can be extended at runtime from a file of the
//! same shape. It is never mutated once a client holds it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use serde::Deserialize;

const BUILTIN_TABLE_JSON: &str = include_str!("../../data/whois_servers.json");

static BUILTIN_TABLE: LazyLock<ServerTable> = LazyLock::new(|| {
    ServerTable::from_json(BUILTIN_TABLE_JSON).unwrap_or_else(|e| {
        log::error!("Built-in WHOIS server table is invalid: {e:#}");
        ServerTable::default()
    })
});

/// Versioned mapping from zone (`com`, `co.uk`) to WHOIS server hostname.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerTable {
    #[serde(default)]
    version: String,
    servers: HashMap<String, String>,
}

impl ServerTable {
    /// The table compiled into the crate.
    pub fn builtin() -> &'static ServerTable {
        &BUILTIN_TABLE
    }

    /// Parses a table from JSON: `{"version": "...", "servers": {"zone": "host"}}`.
    ///
    /// Zones are lowercased; entries with a blank zone or server are dropped.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: ServerTable =
            serde_json::from_str(json).context("Failed to parse WHOIS server table")?;
        let servers = raw
            .servers
            .into_iter()
            .map(|(zone, server)| (zone.trim().to_lowercase(), server.trim().to_string()))
            .filter(|(zone, server)| !zone.is_empty() && !server.is_empty())
            .collect();
        Ok(ServerTable {
            version: raw.version,
            servers,
        })
    }

    /// Reads and parses a table file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read server table {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid server table {}", path.display()))
    }

    /// Exact-match lookup of a zone.
    pub fn get(&self, zone: &str) -> Option<&str> {
        self.servers.get(zone).map(String::as_str)
    }

    /// Adds every entry of `other`, replacing existing zones.
    pub fn merge(&mut self, other: ServerTable) {
        self.servers.extend(other.servers);
        if !other.version.is_empty() {
            self.version = format!("{}+{}", self.version, other.version);
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl FromIterator<(String, String)> for ServerTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        ServerTable {
            version: String::new(),
            servers: iter.into_iter().collect(),
        }
    }
}
