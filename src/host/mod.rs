//! Capabilities the media-player host provides.
//!
//! The request flow never talks to the player directly. It is handed these
//! traits instead:
//!
//! - [`PlayerContext`] - what is playing
//! - [`Notifier`] - short on-screen messages
//! - [`FileStore`] - the (possibly virtual) filesystem
//! - [`Listing`] - the directory listing results are reported to
//!
//! [`local`] backs them with the real filesystem and a fixed playing file;
//! [`memory`] records everything for inspection.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::types::{ListItem, NotificationLevel};

pub mod local;
pub mod memory;

pub use local::{LocalFileStore, LocalPlayer};
pub use memory::{MemoryListing, MemoryNotifier, Notification};

/// Player state as reported by the host.
pub trait PlayerContext: Send + Sync {
    fn is_playing(&self) -> bool;

    /// Media type of the playing item, e.g. `"movie"` or `"episode"`.
    fn media_type(&self) -> Option<String>;

    /// Full path or URL of the playing file.
    fn playing_file(&self) -> Option<String>;
}

/// On-screen notifications.
pub trait Notifier: Send + Sync {
    /// Shows `message` for `duration`.
    fn notify(&self, message: &str, level: NotificationLevel, duration: Duration);
}

/// Filesystem operations the addon needs.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;

    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Size in bytes of the file at `path`.
    async fn size(&self, path: &Path) -> Result<u64>;

    /// Writes `contents` to a file that must not exist yet.
    ///
    /// On failure no file is left at `path`.
    async fn write_new(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// The host's directory listing for the current invocation.
pub trait Listing: Send + Sync {
    fn add_item(&self, url: &str, item: ListItem, is_folder: bool);

    fn end_of_directory(&self);
}
