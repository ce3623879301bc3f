// Shared test helpers: scripted loopback WHOIS servers and configuration.
//
// Servers listen on 0.0.0.0 so that a single port answers on several loopback
// addresses (127.0.0.1, 127.0.0.2, ...). Responses are keyed by the local
// address the client dialed, which lets one port stand in for both a registry
// and a registrar server.

use std::collections::HashMap;
use std::io::Write;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use whois_recurse::Config;

/// Address-agnostic script key.
#[allow(dead_code)] // Used by other test files
pub const ANY_ADDR: &str = "*";

#[allow(dead_code)] // Used by other test files
pub const NO_MATCH: &str = "No match for domain.\r\n";

type Script = HashMap<(String, String), Vec<u8>>;

/// A running scripted server.
#[allow(dead_code)] // Used by other test files
pub struct ScriptedServer {
    pub port: u16,
    queries: Arc<Mutex<Vec<(IpAddr, String)>>>,
}

#[allow(dead_code)] // Used by other test files
impl ScriptedServer {
    /// Query lines received so far, with the local address they arrived on.
    pub fn queries(&self) -> Vec<(IpAddr, String)> {
        self.queries.lock().unwrap().clone()
    }
}

/// Spawns a server answering `(local address, query)` pairs from `script`.
///
/// An address of [`ANY_ADDR`] matches every address. Unscripted queries are
/// answered with [`NO_MATCH`]. Each response is written in full and the
/// connection closed.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_scripted_server(script: Vec<(&str, &str, Vec<u8>)>) -> ScriptedServer {
    let listener = TcpListener::bind("0.0.0.0:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener.local_addr().unwrap().port();

    let script: Arc<Script> = Arc::new(
        script
            .into_iter()
            .map(|(addr, query, response)| ((addr.to_string(), query.to_string()), response))
            .collect(),
    );
    let queries = Arc::new(Mutex::new(Vec::new()));
    let queries_for_server = Arc::clone(&queries);

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let script = Arc::clone(&script);
            let queries = Arc::clone(&queries_for_server);
            tokio::spawn(async move {
                let local_ip = match stream.local_addr() {
                    Ok(addr) => addr.ip(),
                    Err(_) => return,
                };

                let mut line = String::new();
                {
                    let mut reader = BufReader::new(&mut stream);
                    if reader.read_line(&mut line).await.is_err() {
                        return;
                    }
                }
                let query = line.trim_end_matches(['\r', '\n']).to_string();
                queries.lock().unwrap().push((local_ip, query.clone()));

                let response = script
                    .get(&(local_ip.to_string(), query.clone()))
                    .or_else(|| script.get(&(ANY_ADDR.to_string(), query)))
                    .cloned()
                    .unwrap_or_else(|| NO_MATCH.as_bytes().to_vec());

                let _ = stream.write_all(&response).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    ScriptedServer { port, queries }
}

/// Spawns a server that accepts connections and never answers.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_silent_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _held = stream;
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
    });

    port
}

/// A loopback port with nothing listening on it.
#[allow(dead_code)] // Used by other test files
pub fn refused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Writes a zone/server table file.
#[allow(dead_code)] // Used by other test files
pub fn servers_file(entries: &[(&str, &str)]) -> NamedTempFile {
    let servers: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(zone, server)| (zone.to_string(), serde_json::Value::from(*server)))
        .collect();
    let json = serde_json::json!({ "version": "test", "servers": servers });

    let mut file = NamedTempFile::new().expect("Failed to create servers file");
    write!(file, "{json}").expect("Failed to write servers file");
    file
}

/// Configuration pointing every query at `port` with a short timeout.
#[allow(dead_code)] // Used by other test files
pub fn test_config(port: u16, servers: &NamedTempFile) -> Config {
    Config {
        port,
        timeout_seconds: 2,
        servers_file: Some(servers.path().to_path_buf()),
        ..Default::default()
    }
}

/// Spawns a server that answers every query with `chunks`, flushing each one
/// and pausing before the next so they arrive as separate reads.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_chunked_server(chunks: Vec<Vec<u8>>, pause: Duration) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener.local_addr().unwrap().port();
    let chunks = Arc::new(chunks);

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let chunks = Arc::clone(&chunks);
            tokio::spawn(async move {
                let mut line = String::new();
                {
                    let mut reader = BufReader::new(&mut stream);
                    if reader.read_line(&mut line).await.is_err() {
                        return;
                    }
                }
                for chunk in chunks.iter() {
                    if stream.write_all(chunk).await.is_err() || stream.flush().await.is_err() {
                        return;
                    }
                    tokio::time::sleep(pause).await;
                }
                let _ = stream.shutdown().await;
            });
        }
    });

    port
}
