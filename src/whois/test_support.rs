//! In-process transport double for lookup tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error_handling::WhoisError;

use super::transport::Transport;
use super::types::RawResponse;

type ErrorFactory = Arc<dyn Fn() -> WhoisError + Send + Sync>;

enum Scripted {
    Text(String),
    Error(ErrorFactory),
    Panic,
}

/// Answers `(server, query)` pairs from a script and records every call.
///
/// Unscripted pairs fail with `ServerNotFound`.
#[derive(Default)]
pub(crate) struct MockTransport {
    script: HashMap<(String, String), Scripted>,
    calls: Mutex<Vec<(String, String)>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, server: &str, query: &str, text: &str) -> Self {
        self.script.insert(
            (server.to_string(), query.to_string()),
            Scripted::Text(text.to_string()),
        );
        self
    }

    pub(crate) fn fail<F>(mut self, server: &str, query: &str, error: F) -> Self
    where
        F: Fn() -> WhoisError + Send + Sync + 'static,
    {
        self.script.insert(
            (server.to_string(), query.to_string()),
            Scripted::Error(Arc::new(error)),
        );
        self
    }

    pub(crate) fn panic_on(mut self, server: &str, query: &str) -> Self {
        self.script
            .insert((server.to_string(), query.to_string()), Scripted::Panic);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    async fn query(&self, server: &str, query: &str) -> Result<RawResponse, WhoisError> {
        self.calls
            .lock()
            .unwrap()
            .push((server.to_string(), query.to_string()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.script.get(&(server.to_string(), query.to_string())) {
            Some(Scripted::Text(text)) => Ok(RawResponse {
                server: server.to_string(),
                query: query.to_string(),
                text: text.clone(),
            }),
            Some(Scripted::Error(make)) => Err(make()),
            Some(Scripted::Panic) => panic!("scripted panic for {server} {query}"),
            None => Err(WhoisError::ServerNotFound {
                server: server.to_string(),
                reason: "not scripted".to_string(),
            }),
        }
    }
}
