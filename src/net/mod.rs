//! Network plumbing for the subtitle API.
//!
//! - **[`Transport`]**: the seam every client talks through, so tests can
//!   script responses without a server
//! - **[`HttpClient`]**: the reqwest-backed transport used in production
//! - **[`json`]**: path extraction helpers for API responses
//!
//! A transport reports whatever status the server sent; deciding what counts
//! as success is left to the caller through [`HttpResponse::error_for_status`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use subtis::net::{HttpClient, Transport};
//! use std::time::Duration;
//!
//! # async fn example() -> subtis::Result<()> {
//! let client = HttpClient::new("Kodi Subtis Addon/0.1.0")?;
//! let response = client
//!     .get("https://api.subt.is/v1/subtitle/link/42", Duration::from_secs(10))
//!     .await?;
//! println!("HTTP {}", response.status);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};

pub mod json;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Passes the response through when the status is 200, a
    /// [`Error::Status`] otherwise.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(Error::status(self.url, self.status))
        }
    }

    /// Decodes the body as UTF-8.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| Error::parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Deserializes the body as JSON.
    pub fn json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }
}

/// Issues GET requests on behalf of the clients.
///
/// Implementations must bound each request by `timeout` and report a timeout
/// as [`Error::Network`] or any other `Err`; non-200 statuses are returned as
/// `Ok` responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse>;
}

/// reqwest-backed [`Transport`] that stamps every request with the addon's
/// `User-Agent`.
///
/// There is no retry logic: a failed request is reported once and the caller
/// falls back or gives up.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client identifying itself with `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(url, status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status() {
        let ok = HttpResponse::new("u", 200, "body");
        assert_eq!(ok.error_for_status().unwrap().body, Bytes::from("body"));

        let missing = HttpResponse::new("u", 404, "");
        let err = missing.error_for_status().unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_text_rejects_invalid_utf8() {
        let response = HttpResponse::new("u", 200, vec![0xff, 0xfe, 0x00]);
        assert!(response.text().is_err());
        assert_eq!(HttpResponse::new("u", 200, "¿qué?").text().unwrap(), "¿qué?");
    }

    #[test]
    fn test_json_body() {
        let response = HttpResponse::new("u", 200, r#"{"subtitle": {"id": 3}}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["subtitle"]["id"], 3);
        assert!(HttpResponse::new("u", 200, "{oops").json::<serde_json::Value>().is_err());
    }
}
