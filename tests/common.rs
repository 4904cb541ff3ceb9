//! Common test utilities and fixtures
//!
//! Shared functionality used across all test modules.
// Common test utilities - all must be public

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use subtis::net::{HttpResponse, Transport};
use subtis::{Config, Error, Result};

#[allow(dead_code)]
pub const API_BASE: &str = "http://api.test/v1";
#[allow(dead_code)]
pub const MOVIE_FILE: &str = "Movie.2020.1080p.mkv";
#[allow(dead_code)]
pub const MOVIE_SIZE: u64 = 1_500_000_000;
#[allow(dead_code)]
pub const EXACT_URL: &str = "http://api.test/v1/subtitle/file/name/1500000000/Movie.2020.1080p.mkv";
#[allow(dead_code)]
pub const ALTERNATIVE_URL: &str = "http://api.test/v1/subtitle/file/alternative/Movie.2020.1080p.mkv";
#[allow(dead_code)]
pub const SUBTITLE_LINK: &str = "https://x/y.srt";
#[allow(dead_code)]
pub const SUBTITLE_BODY: &str = "1\n00:00:01,000 --> 00:00:02,000\nHola, ¿qué tal?\n";

enum Scripted {
    Respond(u16, Vec<u8>),
    Fail(String),
}

/// Transport that answers from a script and records every request.
///
/// URLs without a scripted answer get a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, Scripted>>,
    requests: Mutex<Vec<(String, Duration)>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.routes
            .lock()
            .insert(url.to_string(), Scripted::Respond(status, body.into()));
        self
    }

    pub fn respond_json(&self, url: &str, body: &Value) -> &Self {
        self.respond(url, 200, body.to_string())
    }

    pub fn fail(&self, url: &str, message: &str) -> &Self {
        self.routes
            .lock()
            .insert(url.to_string(), Scripted::Fail(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<(String, Duration)> {
        self.requests.lock().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|(url, _)| url).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse> {
        self.requests.lock().push((url.to_string(), timeout));

        match self.routes.lock().get(url) {
            Some(Scripted::Respond(status, body)) => {
                Ok(HttpResponse::new(url, *status, body.clone()))
            }
            Some(Scripted::Fail(message)) => Err(Error::transport(message.clone())),
            None => Ok(HttpResponse::new(url, 404, Vec::new())),
        }
    }
}

/// Config pointing at the mock API and writing into `temp_dir`.
#[allow(dead_code)]
pub fn test_config(temp_dir: &std::path::Path) -> Config {
    Config {
        api_base: API_BASE.to_string(),
        ..Config::default()
    }
    .with_temp_dir(temp_dir)
}

/// A complete lookup response using a direct link.
#[allow(dead_code)]
pub fn link_response() -> Value {
    json!({
        "subtitle": {
            "subtitle_link": SUBTITLE_LINK,
            "subtitle_file_name": "y.srt",
            "language": "es"
        },
        "title": {
            "title_name": "Movie",
            "year": "2020"
        }
    })
}

/// A complete lookup response using an opaque id.
#[allow(dead_code)]
pub fn id_response(id: u64) -> Value {
    json!({
        "subtitle": {
            "id": id,
            "subtitle_file_name": "y.srt"
        },
        "title": {
            "title_name": "Movie",
            "year": 2020
        }
    })
}
