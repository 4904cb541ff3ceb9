//! Entry point the host invokes for every user gesture.
//!
//! [`Addon::run`] dispatches on the `action` parameter, reports zero or one
//! item to the listing and always ends the listing. Failures never escape:
//! they are logged, and the user sees a neutral notification at most.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use subtis::prelude::*;
//!
//! # async fn example() -> subtis::Result<()> {
//! let config = Config::default();
//! let listing = Arc::new(MemoryListing::new());
//!
//! let addon = Addon::builder(config)
//!     .player(Arc::new(LocalPlayer::new(Some(PathBuf::from("Movie.2020.1080p.mkv")))))
//!     .listing(listing.clone())
//!     .build()?;
//!
//! addon.run(&PluginParams::parse("?action=search")).await;
//! for entry in listing.items() {
//!     println!("{} -> {}", entry.item.label2, entry.url);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    config::Config,
    download::DownloadClient,
    error::{ErrorKind, Result},
    host::{
        FileStore, Listing, LocalFileStore, LocalPlayer, MemoryListing, MemoryNotifier, Notifier,
        PlayerContext,
    },
    net::{HttpClient, Transport},
    params::{Action, PluginParams, download_url},
    search::SearchClient,
    types::{ListItem, MediaItem, NotificationLevel},
};

pub const MSG_NOT_PLAYING: &str = "No hay reproducción activa.";
pub const MSG_SERIES_UNSUPPORTED: &str = "Soporte para series proximamente";
pub const MSG_NOT_FOUND: &str = "Película no encontrada. Estamos trabajando para agregarla pronto.";

/// The addon with its clients and host capabilities wired together.
pub struct Addon {
    config: Config,
    search: SearchClient,
    download: DownloadClient,
    player: Arc<dyn PlayerContext>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn FileStore>,
    listing: Arc<dyn Listing>,
}

impl Addon {
    /// Starts building an addon; unset capabilities get local defaults.
    pub fn builder(config: Config) -> AddonBuilder {
        AddonBuilder::new(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handles one invocation and ends the listing.
    pub async fn run(&self, params: &PluginParams) {
        let action = params.action();
        info!(?action, "Addon invoked");

        match action {
            Action::Search => self.handle_search().await,
            Action::Download => self.handle_download(params).await,
            Action::ManualSearch | Action::Unknown => {}
        }

        self.listing.end_of_directory();
    }

    async fn handle_search(&self) {
        if !self.player.is_playing() {
            info!("Search requested but no media is playing");
            self.notify(MSG_NOT_PLAYING, NotificationLevel::Info);
            return;
        }

        if let Some(media_type) = self.player.media_type()
            && self.config.is_unsupported_media_type(&media_type)
        {
            info!(media_type = %media_type, "Content type is not supported");
            self.notify(MSG_SERIES_UNSUPPORTED, NotificationLevel::Warning);
            return;
        }

        let item = self.current_item().await;

        match self.search.search(&item).await {
            Ok(Some(result)) => {
                let url = download_url(&self.config.addon_id, &result.reference);
                self.listing.add_item(&url, result.to_list_item(), false);
            }
            Ok(None) => {
                info!(file_name = %item.file_name, "Movie not found");
                self.notify(MSG_NOT_FOUND, NotificationLevel::Info);
            }
            Err(e) => {
                error!("Search aborted: {}", e);
                if e.kind() == ErrorKind::MissingContext {
                    self.notify(MSG_NOT_FOUND, NotificationLevel::Info);
                }
            }
        }
    }

    async fn handle_download(&self, params: &PluginParams) {
        let Some(reference) = params.reference() else {
            error!("Missing link/filename or id in download params");
            return;
        };

        match self.download.download(&reference).await {
            Ok(Some(subtitle)) => {
                let path = subtitle.local_path.to_string_lossy().into_owned();
                self.listing
                    .add_item(&path, ListItem::with_label(path.clone()), false);
            }
            Ok(None) => {}
            Err(e) => error!("Download aborted: {}", e),
        }
    }

    fn notify(&self, message: &str, level: NotificationLevel) {
        self.notifier
            .notify(message, level, self.config.notification_duration);
    }

    /// Builds the media item for the playing file.
    ///
    /// The size is zero when the store cannot report it.
    async fn current_item(&self) -> MediaItem {
        let playing_file = self.player.playing_file().unwrap_or_default();
        let file_name = base_name(&playing_file);

        let path = Path::new(&playing_file);
        let file_size = if !playing_file.is_empty() && self.store.exists(path).await {
            match self.store.size(path).await {
                Ok(size) => size,
                Err(e) => {
                    warn!("Could not get file size: {}", e);
                    0
                }
            }
        } else {
            0
        };

        MediaItem::new(file_name, file_size)
    }
}

/// Last path segment of a local path or URL, query string excluded.
///
/// # Examples
///
/// ```rust
/// use subtis::addon::base_name;
///
/// assert_eq!(base_name("/movies/Movie.2020.mkv"), "Movie.2020.mkv");
/// assert_eq!(base_name("smb://nas/films/Movie.mkv?x=1"), "Movie.mkv");
/// assert_eq!(base_name(""), "");
/// ```
pub fn base_name(path: &str) -> String {
    let without_query = if path.contains("://") {
        path.split(['?', '#']).next().unwrap_or(path)
    } else {
        path
    };

    without_query
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Wires an [`Addon`] together.
pub struct AddonBuilder {
    config: Config,
    transport: Option<Arc<dyn Transport>>,
    player: Option<Arc<dyn PlayerContext>>,
    notifier: Option<Arc<dyn Notifier>>,
    store: Option<Arc<dyn FileStore>>,
    listing: Option<Arc<dyn Listing>>,
}

impl AddonBuilder {
    fn new(config: Config) -> Self {
        Self {
            config,
            transport: None,
            player: None,
            notifier: None,
            store: None,
            listing: None,
        }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn player(mut self, player: Arc<dyn PlayerContext>) -> Self {
        self.player = Some(player);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn store(mut self, store: Arc<dyn FileStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn listing(mut self, listing: Arc<dyn Listing>) -> Self {
        self.listing = Some(listing);
        self
    }

    /// Builds the addon.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`](crate::Error::Network) - If no transport was given
    ///   and the HTTP client cannot be built
    pub fn build(self) -> Result<Addon> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpClient::new(&self.config.user_agent)?),
        };
        let store: Arc<dyn FileStore> = self.store.unwrap_or_else(|| Arc::new(LocalFileStore));

        Ok(Addon {
            search: SearchClient::new(self.config.clone(), transport.clone()),
            download: DownloadClient::new(self.config.clone(), transport, store.clone()),
            player: self
                .player
                .unwrap_or_else(|| Arc::new(LocalPlayer::default())),
            notifier: self
                .notifier
                .unwrap_or_else(|| Arc::new(MemoryNotifier::new())),
            listing: self
                .listing
                .unwrap_or_else(|| Arc::new(MemoryListing::new())),
            store,
            config: self.config,
        })
    }
}
