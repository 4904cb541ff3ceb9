//! reqwest transport tests against a loopback server.
//!
//! Checks what actually goes over the wire: the `User-Agent` header and the
//! per-request timeout.

use std::time::{Duration, Instant};
use subtis::config::default_user_agent;
use subtis::net::{HttpClient, Transport};
use subtis::ErrorKind;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[cfg(test)]
mod http_client_tests {
    use super::*;

    /// Answers one request with a bodiless 404 and hands back the raw request head.
    async fn not_found_server() -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await
                .unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}/v1/subtitle/link/42", addr), handle)
    }

    /// Accepts one connection and never answers.
    async fn silent_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        format!("http://{}/v1/subtitle/file/alternative/x.mkv", addr)
    }

    #[tokio::test]
    async fn test_requests_carry_addon_user_agent() {
        let (url, server) = not_found_server().await;
        let client = HttpClient::new(&default_user_agent()).unwrap();

        let response = client.get(&url, Duration::from_secs(5)).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_ok());

        let request = server.await.unwrap().to_lowercase();
        let expected = format!("user-agent: {}", default_user_agent().to_lowercase());
        assert!(request.contains(&expected), "request was:\n{}", request);
        assert!(request.starts_with("get /v1/subtitle/link/42 "));
    }

    #[tokio::test]
    async fn test_unanswered_request_times_out_as_transport_error() {
        let url = silent_server().await;
        let client = HttpClient::new(&default_user_agent()).unwrap();

        let started = Instant::now();
        let err = client
            .get(&url, Duration::from_millis(300))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status_code(), 0);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
