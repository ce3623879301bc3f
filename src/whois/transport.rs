//! WHOIS wire transport.
//!
//! One short-lived TCP connection per query: write the query line, read until
//! the peer closes. The protocol has no framing and no status code, so EOF is
//! the only end-of-response signal.

use std::future::Future;
use std::io::ErrorKind;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};

use crate::config::{QUERY_TERMINATOR, RATE_LIMIT_MARKERS, READ_CHUNK_SIZE};
use crate::error_handling::WhoisError;

use super::types::RawResponse;

/// Sends one query line to a WHOIS server and returns the full response.
///
/// Implementations must bound the time spent per query and must not hold a
/// connection open after returning.
pub trait Transport: Send + Sync {
    fn query(
        &self,
        server: &str,
        query: &str,
    ) -> impl Future<Output = Result<RawResponse, WhoisError>> + Send;
}

/// Plain TCP transport on a fixed port with a hard per-query timeout.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    port: u16,
    timeout: Duration,
}

impl TcpTransport {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(&self, server: &str, query: &str) -> Result<String, WhoisError> {
        let addrs: Vec<_> = lookup_host((server, self.port))
            .await
            .map_err(|e| WhoisError::ServerNotFound {
                server: server.to_string(),
                reason: e.to_string(),
            })?
            .collect();
        if addrs.is_empty() {
            return Err(WhoisError::ServerNotFound {
                server: server.to_string(),
                reason: "no addresses".to_string(),
            });
        }

        let mut stream = TcpStream::connect(&addrs[..])
            .await
            .map_err(|e| connect_error(server, e))?;

        stream
            .write_all(format!("{query}{QUERY_TERMINATOR}").as_bytes())
            .await
            .map_err(|e| io_error(server, e))?;

        let mut response = Vec::new();
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];
        loop {
            let n = stream
                .read(&mut chunk)
                .await
                .map_err(|e| io_error(server, e))?;
            if n == 0 {
                break;
            }
            if append_chunk(&mut response, &chunk[..n]) {
                log::warn!("Rate limited by {server} while querying {query}");
                return Err(WhoisError::RateLimited {
                    server: server.to_string(),
                });
            }
        }

        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

impl Transport for TcpTransport {
    async fn query(&self, server: &str, query: &str) -> Result<RawResponse, WhoisError> {
        log::debug!("Querying {}:{} for {}", server, self.port, query);
        let started = std::time::Instant::now();

        // The stream lives inside `exchange`, so it is closed on every exit,
        // including when the timeout drops the future.
        let text = tokio::time::timeout(self.timeout, self.exchange(server, query))
            .await
            .map_err(|_| WhoisError::QueryTimeout {
                server: server.to_string(),
                timeout: self.timeout,
            })??;

        log::debug!(
            "Received {} bytes from {} in {}ms",
            text.len(),
            server,
            started.elapsed().as_millis()
        );

        Ok(RawResponse {
            server: server.to_string(),
            query: query.to_string(),
            text,
        })
    }
}

/// Whether a chunk contains a throttling marker (case-insensitive).
pub fn is_rate_limited(chunk: &[u8]) -> bool {
    let lower = String::from_utf8_lossy(chunk).to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Appends `chunk` to `response` and reports whether a throttling marker is
/// now visible.
///
/// Only the new bytes plus a marker-length overlap are scanned, so a marker
/// split across two reads is still found.
fn append_chunk(response: &mut Vec<u8>, chunk: &[u8]) -> bool {
    let overlap = RATE_LIMIT_MARKERS
        .iter()
        .map(|marker| marker.len())
        .max()
        .unwrap_or(0)
        .saturating_sub(1);
    let scan_from = response.len().saturating_sub(overlap);
    response.extend_from_slice(chunk);
    is_rate_limited(&response[scan_from..])
}

fn connect_error(server: &str, e: std::io::Error) -> WhoisError {
    match e.kind() {
        ErrorKind::ConnectionRefused => WhoisError::ServerNotFound {
            server: server.to_string(),
            reason: e.to_string(),
        },
        _ => io_error(server, e),
    }
}

fn io_error(server: &str, source: std::io::Error) -> WhoisError {
    WhoisError::Io {
        server: server.to_string(),
        source,
    }
}
