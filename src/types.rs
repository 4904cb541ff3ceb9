//! Core data types for media items, subtitle results and listing entries.
//!
//! - [`MediaItem`] - What is playing, as reported by the player
//! - [`SubtitleReference`] - How to fetch a subtitle (direct link or API id)
//! - [`SubtitleResult`] - One match returned by a search
//! - [`DownloadedSubtitle`] - A subtitle written to local storage
//! - [`ListItem`] - An entry reported to the host's directory listing
//!
//! # Examples
//!
//! ```rust
//! use subtis::types::MediaItem;
//!
//! let item = MediaItem::new("Movie.2020.1080p.mkv", 1_500_000_000);
//! assert!(item.has_size());
//! ```

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The item currently playing, built fresh for each search.
///
/// A `file_size` of zero means the size is unknown; the exact-match lookup
/// is skipped for such items.
///
/// # Builder Usage
///
/// ```rust
/// use subtis::types::MediaItemBuilder;
///
/// let item = MediaItemBuilder::default()
///     .file_name("Movie.2020.1080p.mkv")
///     .file_size(1_500_000_000u64)
///     .imdb_id(Some("tt0000001".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(item.imdb_id.as_deref(), Some("tt0000001"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct MediaItem {
    /// Base name of the playing file
    pub file_name: String,

    /// Size of the playing file in bytes, zero when unknown
    #[builder(default)]
    #[serde(default)]
    pub file_size: u64,

    /// IMDB id if the player already knows it
    #[builder(default)]
    #[serde(default)]
    pub imdb_id: Option<String>,

    /// Preferred language codes, most preferred first
    #[builder(default)]
    #[serde(default)]
    pub languages: Vec<String>,
}

impl MediaItem {
    /// Creates an item from a file name and size.
    pub fn new(file_name: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
            ..Default::default()
        }
    }

    /// Whether the byte size is known, enabling the exact-match lookup.
    pub fn has_size(&self) -> bool {
        self.file_size > 0
    }
}

/// Where a subtitle's content can be fetched from.
///
/// The API comes in two variants: one hands out direct links together with
/// a file name, the other hands out opaque ids that are resolved to a link
/// at download time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtitleReference {
    /// Direct content link plus the file name to save it under.
    Link { link: String, file_name: String },
    /// Opaque API id, resolved through `/subtitle/link/{id}`.
    Id(String),
}

impl SubtitleReference {
    /// The link or id as a plain string.
    pub fn as_str(&self) -> &str {
        match self {
            SubtitleReference::Link { link, .. } => link,
            SubtitleReference::Id(id) => id,
        }
    }
}

/// Which shape of download reference the backend expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiVariant {
    /// Download items carry `link` and `filename` parameters.
    #[default]
    Link,
    /// Download items carry an `id` parameter.
    Id,
}

/// A single subtitle match.
///
/// Only constructed when the API response carries both a link/id and a
/// subtitle file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleResult {
    /// How to fetch the subtitle content
    pub reference: SubtitleReference,

    /// File name suggested by the API
    pub suggested_file_name: String,

    /// Movie title, `"Unknown"` when the API omits it
    pub display_title: String,

    /// Release year if known
    pub display_year: Option<String>,

    /// True for exact (name and size) matches
    pub is_synced: bool,

    /// Two-letter language code
    pub language_code: String,
}

impl SubtitleResult {
    /// Label shown next to the language, `"Title (Year)"` or `"Title"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use subtis::types::{SubtitleReference, SubtitleResult};
    ///
    /// let result = SubtitleResult {
    ///     reference: SubtitleReference::Id("42".into()),
    ///     suggested_file_name: "y.srt".into(),
    ///     display_title: "Movie".into(),
    ///     display_year: Some("2020".into()),
    ///     is_synced: true,
    ///     language_code: "es".into(),
    /// };
    /// assert_eq!(result.display_label(), "Movie (2020)");
    /// ```
    pub fn display_label(&self) -> String {
        match self.display_year.as_deref() {
            Some(year) if !year.is_empty() => format!("{} ({})", self.display_title, year),
            _ => self.display_title.clone(),
        }
    }

    /// Builds the listing entry the host shows for this result.
    pub fn to_list_item(&self) -> ListItem {
        let mut properties = BTreeMap::new();
        properties.insert("sync".to_string(), self.is_synced.to_string());
        properties.insert("hearing_imp".to_string(), "false".to_string());

        ListItem {
            label: self.language_code.clone(),
            label2: self.display_label(),
            // Rating slot on the host's 1-5 scale
            icon: Some("5".to_string()),
            thumb: Some(self.language_code.clone()),
            properties,
        }
    }
}

/// A subtitle written to the temp directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedSubtitle {
    pub local_path: PathBuf,
}

/// An entry reported to the host's directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub label: String,
    pub label2: String,
    pub icon: Option<String>,
    pub thumb: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl ListItem {
    /// Creates an entry with only a primary label.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
}
