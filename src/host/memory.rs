//! Recording host capabilities.
//!
//! Used by the command line front end to print what the addon reported, and
//! by tests to assert on it.

use parking_lot::Mutex;
use std::time::Duration;

use crate::host::{Listing, Notifier};
use crate::types::{ListItem, NotificationLevel};

/// A listing entry as reported by the addon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    pub url: String,
    pub item: ListItem,
    pub is_folder: bool,
}

/// [`Listing`] that keeps every reported item.
#[derive(Debug, Default)]
pub struct MemoryListing {
    items: Mutex<Vec<ListedItem>>,
    ended: Mutex<u32>,
}

impl MemoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<ListedItem> {
        self.items.lock().clone()
    }

    /// How many times the listing was ended.
    pub fn end_count(&self) -> u32 {
        *self.ended.lock()
    }
}

impl Listing for MemoryListing {
    fn add_item(&self, url: &str, item: ListItem, is_folder: bool) {
        self.items.lock().push(ListedItem {
            url: url.to_string(),
            item,
            is_folder,
        });
    }

    fn end_of_directory(&self) {
        *self.ended.lock() += 1;
    }
}

/// A notification as shown by the addon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration: Duration,
}

/// [`Notifier`] that keeps every notification.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    /// Message and level of every notification, without durations.
    pub fn messages(&self) -> Vec<(String, NotificationLevel)> {
        self.notifications
            .lock()
            .iter()
            .map(|n| (n.message.clone(), n.level))
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str, level: NotificationLevel, duration: Duration) {
        self.notifications.lock().push(Notification {
            message: message.to_string(),
            level,
            duration,
        });
    }
}
