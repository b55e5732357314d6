//! Shared test helpers: a one-shot local HTTP server and assertion macros

#![allow(dead_code, clippy::panic)]

use std::time::Duration;

use site_deletion_remote::{ClientOptions, RestDeleteClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TEST_TOKEN: &str = "test-bearer-token-12345";

/// Assert a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// What the canned server should do with the single request it accepts.
#[derive(Debug, Clone)]
pub enum CannedReply {
    /// Answer with this status code and JSON body.
    Json { status: u16, body: String },
    /// Read the request, then never answer.
    Hang,
}

impl CannedReply {
    pub fn json(status: u16, body: &str) -> Self {
        Self::Json {
            status,
            body: body.to_string(),
        }
    }
}

/// A local server that accepts one connection, records the raw request head and
/// answers with a canned reply.
pub struct CannedServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    pub async fn start(reply: CannedReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|e| panic!("failed to bind test listener: {e}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|e| panic!("no local addr: {e}"));

        let handle = tokio::spawn(async move {
            let Ok((mut socket, _)) = listener.accept().await else {
                return String::new();
            };

            let mut buf = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let request = String::from_utf8_lossy(&buf).to_string();

            match reply {
                CannedReply::Json { status, body } => {
                    let response = format!(
                        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                CannedReply::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
            }

            request
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// Raw request head the server received.
    pub async fn received_request(self) -> String {
        self.handle.await.unwrap_or_default()
    }
}

/// Client pointed at `base_url` with a short timeout.
pub fn client_for(base_url: &str, timeout: Duration) -> RestDeleteClient {
    let options = ClientOptions::new(base_url, TEST_TOKEN).with_request_timeout(timeout);
    RestDeleteClient::new(options).unwrap_or_else(|e| panic!("client should build: {e}"))
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("failed to bind test listener: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("no local addr: {e}"));
    drop(listener);
    format!("http://{addr}")
}
