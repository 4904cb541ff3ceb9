//! # Subtis - Spanish subtitle search and download client
//!
//! Subtis finds Spanish subtitles for the movie a media player is playing by
//! asking the [subt.is](https://subt.is) API. It downloads the chosen subtitle
//! into a local temp directory. The player host (playback state,
//! notifications, filesystem, directory listing) is reached only through
//! traits, so the whole request flow runs without a live player.
//!
//! ## Features
//!
//! - **Exact then fuzzy search**: looks up by file size and name first, then
//!   by name only
//! - **Two download variants**: direct links with a file name, or opaque ids
//!   resolved through the API
//! - **Safe writes**: files are written only after a full read and never
//!   overwrite earlier downloads
//! - **Soft failures**: network and protocol errors degrade to "no subtitle"
//!   and are logged through `tracing`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use subtis::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> subtis::Result<()> {
//!     let config = Config::default();
//!     let transport = Arc::new(HttpClient::new(&config.user_agent)?);
//!
//!     let search = SearchClient::new(config.clone(), transport.clone());
//!     let item = MediaItem::new("Movie.2020.1080p.mkv", 1_500_000_000);
//!
//!     if let Some(result) = search.search(&item).await? {
//!         let download = DownloadClient::new(config, transport, Arc::new(LocalFileStore));
//!         if let Some(subtitle) = download.download(&result.reference).await? {
//!             println!("Saved to {}", subtitle.local_path.display());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`addon`]: Entry point dispatching host actions
//! - [`search`]: Exact and alternative subtitle lookups
//! - [`download`]: Link resolution, content fetch and storage
//! - [`host`]: Player, notification, filesystem and listing capabilities
//! - [`net`]: HTTP transport and JSON helpers
//! - [`config`], [`types`], [`language`], [`params`], [`api`], [`error`]

pub mod addon;
pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod host;
pub mod language;
pub mod net;
pub mod params;
pub mod search;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```rust
/// use subtis::prelude::*;
///
/// // Now you have access to:
/// // - Addon, SearchClient, DownloadClient
/// // - Config, MediaItem, SubtitleResult, SubtitleReference
/// // - HttpClient, Transport and the host capability traits
/// ```
pub mod prelude {
    pub use crate::{
        addon::Addon,
        config::{Config, ConfigBuilder},
        download::DownloadClient,
        host::{
            FileStore, Listing, LocalFileStore, LocalPlayer, MemoryListing, MemoryNotifier,
            Notification, Notifier, PlayerContext,
        },
        net::{HttpClient, HttpResponse, Transport},
        params::{Action, PluginParams},
        search::SearchClient,
        types::{
            ApiVariant, DownloadedSubtitle, ListItem, MediaItem, NotificationLevel,
            SubtitleReference, SubtitleResult,
        },
    };
}

// Re-export main types at crate root for direct access
pub use addon::Addon;
pub use config::Config;
pub use download::DownloadClient;
pub use error::{Error, ErrorKind, Result};
pub use search::SearchClient;
pub use types::{DownloadedSubtitle, MediaItem, SubtitleReference, SubtitleResult};
