//! Zone -> authoritative WHOIS server resolution.

use std::sync::Arc;

use crate::config::IANA_WHOIS_SERVER;

use super::patterns::IANA_WHOIS_REGEX;
use super::servers::ServerTable;
use super::transport::Transport;

/// Picks the registry ("thin") WHOIS server for a zone.
///
/// Order: exact match in the server table, then a query to the root server
/// (`whois.iana.org`), then the synthesized `whois.nic.<zone>`.
#[derive(Debug, Clone)]
pub struct ZoneResolver {
    table: Arc<ServerTable>,
    root_server: String,
}

impl ZoneResolver {
    pub fn new(table: Arc<ServerTable>) -> Self {
        Self {
            table,
            root_server: IANA_WHOIS_SERVER.to_string(),
        }
    }

    /// Uses a different root server for unmapped zones.
    pub fn with_root_server(mut self, root_server: impl Into<String>) -> Self {
        self.root_server = root_server.into();
        self
    }

    pub fn table(&self) -> &ServerTable {
        &self.table
    }

    /// Resolves `zone` to a server hostname. Never fails.
    ///
    /// Any failure of the root-server query (unreachable, timeout, throttled,
    /// no `whois:` line) is swallowed and the synthesized default returned
    /// unvalidated: availability is preferred over correctness here, and a
    /// bad address only surfaces when the caller fails to connect to it.
    pub async fn resolve<T: Transport>(&self, zone: &str, transport: &T) -> String {
        if let Some(server) = self.table.get(zone) {
            log::trace!("Zone {zone} mapped to {server}");
            return server.to_string();
        }

        match transport.query(&self.root_server, zone).await {
            Ok(response) => {
                if let Some(server) = parse_root_referral(&response.text) {
                    log::debug!("Root server {} named {server} for {zone}", self.root_server);
                    return server;
                }
                log::debug!("Root server {} has no WHOIS server for {zone}", self.root_server);
            }
            Err(e) => {
                log::debug!("Root server lookup for {zone} failed: {e}");
            }
        }

        default_server(zone)
    }
}

/// Server named on a `whois:` line of a root server response.
pub fn parse_root_referral(text: &str) -> Option<String> {
    let regex = IANA_WHOIS_REGEX.as_ref()?;
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Conventional registry hostname for a zone: `whois.nic.<zone>`.
pub fn default_server(zone: &str) -> String {
    format!("whois.nic.{zone}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::WhoisError;
    use crate::whois::test_support::MockTransport;

    const IANA_IO: &str = "% IANA WHOIS server\n\
% for more information on IANA, visit http://www.iana.org\n\
\n\
domain:       IO\n\
\n\
organisation: Internet Computer Bureau Limited\n\
\n\
whois:        whois.nic.io\n\
\n\
status:       ACTIVE\n";

    fn resolver() -> ZoneResolver {
        ZoneResolver::new(Arc::new(
            [("com".to_string(), "whois.verisign-grs.com".to_string())]
                .into_iter()
                .collect(),
        ))
    }

    #[tokio::test]
    async fn test_table_hit_makes_no_network_call() {
        let transport = MockTransport::new();
        let server = resolver().resolve("com", &transport).await;
        assert_eq!(server, "whois.verisign-grs.com");
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unmapped_zone_queries_root_server() {
        let transport = MockTransport::new().respond("whois.iana.org", "io", IANA_IO);
        let server = resolver().resolve("io", &transport).await;
        assert_eq!(server, "whois.nic.io");
        assert_eq!(
            transport.calls(),
            vec![("whois.iana.org".to_string(), "io".to_string())]
        );
    }

    #[tokio::test]
    async fn test_root_failure_falls_back_to_default() {
        let transport = MockTransport::new().fail("whois.iana.org", "xyz", || {
            WhoisError::QueryTimeout {
                server: "whois.iana.org".into(),
                timeout: std::time::Duration::from_secs(1),
            }
        });
        let server = resolver().resolve("xyz", &transport).await;
        assert_eq!(server, "whois.nic.xyz");
    }

    #[tokio::test]
    async fn test_root_without_whois_line_falls_back_to_default() {
        let transport = MockTransport::new().respond(
            "whois.iana.org",
            "zz",
            "domain: ZZ\nwhois:\nstatus: ACTIVE\n",
        );
        let server = resolver().resolve("zz", &transport).await;
        assert_eq!(server, "whois.nic.zz");
    }

    #[tokio::test]
    async fn test_custom_root_server() {
        let transport =
            MockTransport::new().respond("root.test", "io", "whois: whois.alt.io\n");
        let server = resolver()
            .with_root_server("root.test")
            .resolve("io", &transport)
            .await;
        assert_eq!(server, "whois.alt.io");
    }

    #[test]
    fn test_parse_root_referral_case_insensitive() {
        assert_eq!(
            parse_root_referral("WHOIS: whois.nic.ai\r\n").as_deref(),
            Some("whois.nic.ai")
        );
        assert_eq!(parse_root_referral("refer: whois.nic.ai\n"), None);
    }

    #[test]
    fn test_default_server() {
        assert_eq!(default_server("co.uk"), "whois.nic.co.uk");
    }
}
