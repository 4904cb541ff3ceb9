//! Subtitle search against the exact and alternative lookup endpoints.
//!
//! A search tries the exact lookup (file size and name) first and falls back
//! to the alternative lookup (name only). The API is trusted to return its
//! single best match; nothing is ranked client-side.
//!
//! | Lookup      | Endpoint                                   | `is_synced` |
//! |-------------|--------------------------------------------|-------------|
//! | exact       | `/subtitle/file/name/{size}/{name}`        | `true`      |
//! | alternative | `/subtitle/file/alternative/{name}`        | `false`     |
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use subtis::prelude::*;
//!
//! # async fn example() -> subtis::Result<()> {
//! let config = Config::default();
//! let transport = Arc::new(HttpClient::new(&config.user_agent)?);
//! let client = SearchClient::new(config, transport);
//!
//! let item = MediaItem::new("Movie.2020.1080p.mkv", 1_500_000_000);
//! if let Some(result) = client.search(&item).await? {
//!     println!("{} (synced: {})", result.display_label(), result.is_synced);
//! }
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    api::Endpoints,
    config::Config,
    error::{Error, Result},
    language,
    net::{Transport, json},
    types::{ApiVariant, MediaItem, SubtitleReference, SubtitleResult},
};

/// Client for the search half of the request flow.
#[derive(Clone)]
pub struct SearchClient {
    config: Config,
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
}

impl SearchClient {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoints: Endpoints::new(&config.api_base),
            config,
            transport,
        }
    }

    /// Finds the best subtitle for `item`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(result))` - A match, synced when it came from the exact lookup
    /// * `Ok(None)` - Neither lookup matched; transport and protocol failures
    ///   land here after being logged
    ///
    /// # Errors
    ///
    /// * [`Error::MissingContext`] - `item.file_name` is empty. No request is issued.
    pub async fn search(&self, item: &MediaItem) -> Result<Option<SubtitleResult>> {
        if item.file_name.is_empty() {
            error!("File name missing, search skipped");
            return Err(Error::missing_context("file name"));
        }

        if item.has_size() {
            match self.exact(&item.file_name, item.file_size).await {
                Ok(result) => return Ok(Some(result)),
                Err(e) => warn!(status = e.status_code(), "Exact search: no match: {}", e),
            }
        }

        match self.alternative(&item.file_name).await {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                warn!(status = e.status_code(), "Alternative search: no match: {}", e);
                Ok(None)
            }
        }
    }

    /// Exact lookup by size and name. Results are marked synced.
    pub async fn exact(&self, file_name: &str, file_size: u64) -> Result<SubtitleResult> {
        let url = self.endpoints.file_name(file_size, file_name);
        self.lookup(&url, true).await
    }

    /// Fuzzy lookup by name only. Results are marked unsynced.
    pub async fn alternative(&self, file_name: &str) -> Result<SubtitleResult> {
        let url = self.endpoints.alternative(file_name);
        self.lookup(&url, false).await
    }

    async fn lookup(&self, url: &str, is_synced: bool) -> Result<SubtitleResult> {
        let response = match self.transport.get(url, self.config.search_timeout).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url, status = 0, "Request failed: {}", e);
                return Err(e);
            }
        };
        info!(url, status = response.status, "Search request");

        let value: Value = response.error_for_status()?.json()?;

        parse_subtitle_result(
            &value,
            is_synced,
            self.config.api_variant,
            &self.config.language,
        )
    }
}

/// Converts a lookup response into a [`SubtitleResult`].
///
/// The configured variant decides which reference field is preferred
/// (`subtitle.subtitle_link` or `subtitle.id`); the other is accepted as a
/// fallback. A response lacking both, or lacking
/// `subtitle.subtitle_file_name`, is a [`Error::Parse`], never a partial
/// result.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use subtis::search::parse_subtitle_result;
/// use subtis::types::ApiVariant;
///
/// let body = json!({
///     "subtitle": { "subtitle_link": "https://x/y.srt", "subtitle_file_name": "y.srt" },
///     "title": { "title_name": "Movie", "year": "2020" }
/// });
///
/// let result = parse_subtitle_result(&body, true, ApiVariant::Link, "es").unwrap();
/// assert_eq!(result.display_label(), "Movie (2020)");
///
/// let incomplete = json!({ "subtitle": { "subtitle_link": "https://x/y.srt" } });
/// assert!(parse_subtitle_result(&incomplete, true, ApiVariant::Link, "es").is_err());
/// ```
pub fn parse_subtitle_result(
    value: &Value,
    is_synced: bool,
    variant: ApiVariant,
    default_language: &str,
) -> Result<SubtitleResult> {
    let link = json::extract_string(value, "subtitle.subtitle_link");
    let id = json::extract_string(value, "subtitle.id");
    let file_name = json::extract_string(value, "subtitle.subtitle_file_name")
        .ok_or_else(|| Error::parse("Missing subtitle_file_name in response"))?;

    let link_reference = |link: String| SubtitleReference::Link {
        link,
        file_name: file_name.clone(),
    };
    let reference = match (variant, link, id) {
        (ApiVariant::Id, _, Some(id)) => SubtitleReference::Id(id),
        (_, Some(link), _) => link_reference(link),
        (ApiVariant::Link, None, Some(id)) => SubtitleReference::Id(id),
        (_, None, None) => return Err(Error::parse("Missing subtitle_link or id in response")),
    };

    let language_code = json::extract_string(value, "subtitle.language")
        .map(|raw| language::normalize(&raw).to_string())
        .unwrap_or_else(|| default_language.to_string());

    Ok(SubtitleResult {
        reference,
        display_title: json::extract_string(value, "title.title_name")
            .unwrap_or_else(|| "Unknown".to_string()),
        display_year: json::extract_string(value, "title.year"),
        suggested_file_name: file_name,
        is_synced,
        language_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_name_is_no_match() {
        let body = json!({"subtitle": {"subtitle_link": "https://x/y.srt"}});
        assert!(parse_subtitle_result(&body, true, ApiVariant::Link, "es").is_err());
    }

    #[test]
    fn test_missing_reference_is_no_match() {
        let body = json!({"subtitle": {"subtitle_file_name": "y.srt"}});
        assert!(parse_subtitle_result(&body, true, ApiVariant::Link, "es").is_err());
        assert!(parse_subtitle_result(&body, true, ApiVariant::Id, "es").is_err());
    }

    #[test]
    fn test_variant_preference() {
        let body = json!({
            "subtitle": {"subtitle_link": "https://x/y.srt", "id": 9, "subtitle_file_name": "y.srt"}
        });

        let by_link = parse_subtitle_result(&body, true, ApiVariant::Link, "es").unwrap();
        assert!(matches!(by_link.reference, SubtitleReference::Link { .. }));

        let by_id = parse_subtitle_result(&body, true, ApiVariant::Id, "es").unwrap();
        assert_eq!(by_id.reference, SubtitleReference::Id("9".to_string()));
    }

    #[test]
    fn test_id_only_response_under_link_variant() {
        let body = json!({"subtitle": {"id": "abc", "subtitle_file_name": "y.srt"}});
        let result = parse_subtitle_result(&body, false, ApiVariant::Link, "es").unwrap();
        assert_eq!(result.reference, SubtitleReference::Id("abc".to_string()));
    }

    #[test]
    fn test_defaults_for_title_and_language() {
        let body = json!({"subtitle": {"subtitle_link": "l", "subtitle_file_name": "y.srt"}});
        let result = parse_subtitle_result(&body, false, ApiVariant::Link, "es").unwrap();
        assert_eq!(result.display_title, "Unknown");
        assert_eq!(result.display_year, None);
        assert_eq!(result.language_code, "es");
        assert_eq!(result.display_label(), "Unknown");
    }

    #[test]
    fn test_language_is_normalized() {
        let body = json!({
            "subtitle": {"subtitle_link": "l", "subtitle_file_name": "y.srt", "language": "English"}
        });
        let result = parse_subtitle_result(&body, true, ApiVariant::Link, "es").unwrap();
        assert_eq!(result.language_code, "en");
    }
}
