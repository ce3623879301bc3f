//! Lookup orchestration.
//!
//! A single lookup runs `normalize -> resolve zone -> query thin server ->
//! (follow referral -> query thick server) -> parse`, stopping at the first
//! failing step. Bulk lookups fan single lookups out over a bounded set of
//! tasks and fan the outcomes back in.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;

use crate::config::Config;
use crate::domain::{extract_zone, normalize_domain};
use crate::error_handling::{InitializationError, WhoisError};
use crate::initialization::{init_semaphore, init_server_table};

use super::parse::parse_record;
use super::referral::extract_referral;
use super::resolver::ZoneResolver;
use super::transport::{TcpTransport, Transport};
use super::types::{LookupOutcome, RawPayload, RawResponse, WhoisData};

/// Recursive WHOIS client.
///
/// Cheap to clone: the transport and resolver are shared.
#[derive(Debug)]
pub struct WhoisClient<T = TcpTransport> {
    transport: Arc<T>,
    resolver: Arc<ZoneResolver>,
    follow_referrals: bool,
}

impl<T> Clone for WhoisClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            resolver: Arc::clone(&self.resolver),
            follow_referrals: self.follow_referrals,
        }
    }
}

impl WhoisClient<TcpTransport> {
    /// Builds a TCP client from configuration.
    ///
    /// # Errors
    ///
    /// Fails only if `config.servers_file` is set and cannot be loaded.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let table = init_server_table(config)?;
        Ok(Self::with_transport(
            TcpTransport::new(config.port, config.timeout()),
            ZoneResolver::new(table),
            config.follow_referrals,
        ))
    }
}

impl<T: Transport + 'static> WhoisClient<T> {
    pub fn with_transport(transport: T, resolver: ZoneResolver, follow_referrals: bool) -> Self {
        Self {
            transport: Arc::new(transport),
            resolver: Arc::new(resolver),
            follow_referrals,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Looks up one domain.
    ///
    /// With `raw`, returns the text of the last successful query (thick if a
    /// referral was followed, else thin) without parsing it.
    ///
    /// # Errors
    ///
    /// `InvalidDomain` before any I/O, otherwise whatever the thin or thick
    /// query failed with. Zone resolution itself never fails.
    pub async fn lookup(&self, domain: &str, raw: bool) -> Result<WhoisData, WhoisError> {
        let domain = normalize_domain(domain)?;
        let zone = extract_zone(&domain);
        let thin_server = self.resolver.resolve(&zone, &*self.transport).await;

        log::info!("Looking up {domain} (zone {zone}) via {thin_server}");
        let thin = self.transport.query(&thin_server, &domain).await?;
        let response = self.follow_referral(&domain, &thin_server, thin).await?;

        if raw {
            return Ok(WhoisData::Raw(RawPayload { raw: response.text }));
        }

        Ok(WhoisData::Parsed(parse_record(
            &domain,
            &response.text,
            &thin_server,
        )))
    }

    async fn follow_referral(
        &self,
        domain: &str,
        thin_server: &str,
        thin: RawResponse,
    ) -> Result<RawResponse, WhoisError> {
        if !self.follow_referrals {
            return Ok(thin);
        }

        match extract_referral(&thin.text) {
            Some(referral) if referral.eq_ignore_ascii_case(thin_server) => {
                log::debug!("{thin_server} refers {domain} to itself");
                Ok(thin)
            }
            Some(referral) => {
                log::debug!("{thin_server} refers {domain} to {referral}");
                self.transport.query(&referral, domain).await
            }
            None => {
                log::debug!("No referral for {domain} from {thin_server}");
                Ok(thin)
            }
        }
    }

    /// Looks up many domains with at most `concurrency` in flight.
    ///
    /// Returns exactly one outcome per input domain, in completion order.
    /// Failures, including a panicking lookup, become `LookupOutcome::Failed`
    /// tagged with the input domain and never affect sibling lookups.
    pub async fn bulk_lookup(
        &self,
        domains: &[String],
        concurrency: usize,
        raw: bool,
    ) -> Vec<LookupOutcome> {
        let semaphore = init_semaphore(concurrency);
        let mut tasks = FuturesUnordered::new();
        let mut outcomes = Vec::with_capacity(domains.len());

        for domain in domains {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    let error = WhoisError::TaskFailed(e.to_string());
                    outcomes.push(LookupOutcome::from_result(domain, Err(error)));
                    continue;
                }
            };

            let client = self.clone();
            let task_domain = domain.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit; // Hold permit until the lookup completes
                client.lookup(&task_domain, raw).await
            });

            let domain = domain.clone();
            tasks.push(async move { (domain, handle.await) });
        }

        while let Some((domain, joined)) = tasks.next().await {
            let result = joined.unwrap_or_else(|e| Err(WhoisError::TaskFailed(e.to_string())));
            if let Err(e) = &result {
                log::warn!("WHOIS lookup failed for {domain}: {e}");
            }
            outcomes.push(LookupOutcome::from_result(&domain, result));
        }

        outcomes
    }
}
