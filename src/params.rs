//! Plugin invocation parameters.
//!
//! The host calls the addon with a query string such as
//! `?action=download&link=https%3A%2F%2Fx%2Fy.srt&filename=y.srt` and lists
//! search hits under `plugin://{addon_id}/?action=download&...` URLs that
//! lead back to the same entry point.
//!
//! # Examples
//!
//! ```rust
//! use subtis::params::{Action, PluginParams};
//!
//! let params = PluginParams::parse("?action=download&id=42");
//! assert_eq!(params.action(), Action::Download);
//! assert_eq!(params.get("id"), Some("42"));
//! ```

use std::collections::HashMap;
use url::form_urlencoded;

use crate::types::SubtitleReference;

/// What the host asked the addon to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
    ManualSearch,
    Download,
    /// No action or one the addon does not know.
    Unknown,
}

impl Action {
    fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("search") => Action::Search,
            Some("manualsearch") => Action::ManualSearch,
            Some("download") => Action::Download,
            _ => Action::Unknown,
        }
    }
}

/// Decoded query-string parameters of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginParams {
    values: HashMap<String, String>,
}

impl PluginParams {
    /// Parses a query string, with or without its leading `?`.
    ///
    /// Values are percent-decoded; when a key repeats, the last value wins.
    pub fn parse(query: &str) -> Self {
        let values = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn action(&self) -> Action {
        Action::from_param(self.get("action"))
    }

    /// The download reference carried by a `download` invocation.
    ///
    /// `link` and `filename` take precedence over `id`. Returns `None` when
    /// neither form is complete.
    pub fn reference(&self) -> Option<SubtitleReference> {
        match (self.get("link"), self.get("filename"), self.get("id")) {
            (Some(link), Some(file_name), _) => Some(SubtitleReference::Link {
                link: link.to_string(),
                file_name: file_name.to_string(),
            }),
            (_, _, Some(id)) => Some(SubtitleReference::Id(id.to_string())),
            _ => None,
        }
    }
}

/// Builds the listing URL that triggers a download of `reference`.
///
/// # Examples
///
/// ```rust
/// use subtis::params::download_url;
/// use subtis::types::SubtitleReference;
///
/// let url = download_url(
///     "service.subtitles.subtis",
///     &SubtitleReference::Link {
///         link: "https://x/y.srt".into(),
///         file_name: "y.srt".into(),
///     },
/// );
/// assert_eq!(
///     url,
///     "plugin://service.subtitles.subtis/?action=download&link=https%3A%2F%2Fx%2Fy.srt&filename=y.srt"
/// );
/// ```
pub fn download_url(addon_id: &str, reference: &SubtitleReference) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("action", "download");

    match reference {
        SubtitleReference::Link { link, file_name } => {
            query.append_pair("link", link);
            query.append_pair("filename", file_name);
        }
        SubtitleReference::Id(id) => {
            query.append_pair("id", id);
        }
    }

    format!("plugin://{}/?{}", addon_id, query.finish())
}
