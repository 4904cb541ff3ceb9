//! Subtitle downloads into the per-install temp directory.
//!
//! A download takes a [`SubtitleReference`]. Links are fetched as-is. Ids are
//! first resolved to a link through the API. The body must decode as UTF-8
//! and is written only after it has been read in full. Existing files are
//! never replaced: a second download of the same subtitle lands next to the
//! first as `name (1).srt`.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    api::Endpoints,
    config::Config,
    error::{Error, Result},
    host::FileStore,
    net::{Transport, json},
    types::{DownloadedSubtitle, SubtitleReference},
};

/// Upper bound on `name (n).ext` candidates tried before giving up.
const MAX_NAME_SUFFIX: u32 = 1000;

/// Client for the download half of the request flow.
#[derive(Clone)]
pub struct DownloadClient {
    config: Config,
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
    store: Arc<dyn FileStore>,
}

impl DownloadClient {
    pub fn new(config: Config, transport: Arc<dyn Transport>, store: Arc<dyn FileStore>) -> Self {
        Self {
            endpoints: Endpoints::new(&config.api_base),
            config,
            transport,
            store,
        }
    }

    /// Downloads the referenced subtitle.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(subtitle))` - The file written to the temp directory
    /// * `Ok(None)` - Resolution, fetch, decoding or writing failed; the
    ///   failure is logged and no file is left behind
    ///
    /// # Errors
    ///
    /// * [`Error::MissingContext`] - The link, file name or id is empty
    pub async fn download(&self, reference: &SubtitleReference) -> Result<Option<DownloadedSubtitle>> {
        match reference {
            SubtitleReference::Link { link, file_name } if link.is_empty() || file_name.is_empty() => {
                error!("Missing link or filename for download");
                return Err(Error::missing_context("link or filename"));
            }
            SubtitleReference::Id(id) if id.is_empty() => {
                error!("Missing id for download");
                return Err(Error::missing_context("id"));
            }
            _ => {}
        }

        match self.fetch_to_disk(reference).await {
            Ok(local_path) => {
                info!(path = %local_path.display(), "Subtitle downloaded");
                Ok(Some(DownloadedSubtitle { local_path }))
            }
            Err(e) => {
                error!(reference = reference.as_str(), "Download failed: {}", e);
                Ok(None)
            }
        }
    }

    /// Resolves an opaque id to the link serving its content.
    ///
    /// The response may be JSON carrying `subtitle_link`,
    /// `subtitle.subtitle_link` or `link`, or a bare URL in plain text.
    pub async fn resolve_link(&self, id: &str) -> Result<String> {
        let url = self.endpoints.link(id);
        let response = self.transport.get(&url, self.config.search_timeout).await?;
        info!(url = %url, status = response.status, "Link resolution request");

        let text = response.error_for_status()?.text()?;

        if let Ok(value) = serde_json::from_str::<Value>(&text) {
            if let Some(link) = json::extract_first(
                &value,
                &["subtitle_link", "subtitle.subtitle_link", "link"],
            ) {
                return Ok(link);
            }
            if let Value::String(link) = value
                && link.starts_with("http")
            {
                return Ok(link);
            }
        }

        let trimmed = text.trim();
        if trimmed.starts_with("http") {
            return Ok(trimmed.to_string());
        }

        Err(Error::parse(format!("No link in resolution response for id {}", id)))
    }

    async fn fetch_to_disk(&self, reference: &SubtitleReference) -> Result<PathBuf> {
        let temp_dir = &self.config.temp_dir;
        if !self.store.exists(temp_dir).await {
            self.store.create_dir_all(temp_dir).await?;
        }

        let (link, file_name) = match reference {
            SubtitleReference::Link { link, file_name } => (link.clone(), file_name.clone()),
            SubtitleReference::Id(id) => (self.resolve_link(id).await?, id_file_name(id)),
        };

        let content = self.fetch_content(&link).await?;

        let target = unique_target(self.store.as_ref(), temp_dir, &sanitize_filename(&file_name)).await?;
        self.store.write_new(&target, content.as_bytes()).await?;

        Ok(target)
    }

    async fn fetch_content(&self, link: &str) -> Result<String> {
        let response = match self.transport.get(link, self.config.download_timeout).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = link, status = 0, "Request failed: {}", e);
                return Err(e);
            }
        };
        info!(url = link, status = response.status, "Download request");

        response.error_for_status()?.text()
    }
}

/// File name used when only an id is known.
///
/// # Examples
///
/// ```rust
/// use subtis::download::id_file_name;
///
/// assert_eq!(id_file_name("42"), "subtis_42.srt");
/// ```
pub fn id_file_name(id: &str) -> String {
    format!("subtis_{}.srt", id)
}

/// Picks `dir/name`, or the first free `dir/stem (n).ext`.
pub async fn unique_target(store: &dyn FileStore, dir: &Path, file_name: &str) -> Result<PathBuf> {
    let candidate = dir.join(file_name);
    if !store.exists(&candidate).await {
        return Ok(candidate);
    }

    let (stem, extension) = match file_name.rfind('.') {
        Some(dot) if dot > 0 => (&file_name[..dot], &file_name[dot..]),
        _ => (file_name, ""),
    };

    for n in 1..=MAX_NAME_SUFFIX {
        let candidate = dir.join(format!("{} ({}){}", stem, n, extension));
        if !store.exists(&candidate).await {
            return Ok(candidate);
        }
    }

    Err(Error::Io(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("No free file name for {} in {}", file_name, dir.display()),
    )))
}

/// Sanitizes a filename by replacing invalid characters.
///
/// Path separators and characters rejected by common filesystems become
/// `_`, and leading dots are stripped so the result can neither escape the
/// temp directory nor hide in it.
///
/// # Examples
///
/// ```rust
/// use subtis::download::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Movie: Part 1.srt"), "Movie_ Part 1.srt");
/// assert_eq!(sanitize_filename("../../etc/passwd"), "_.._etc_passwd");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    let mut sanitized: String = name
        .chars()
        .map(|c| if invalid_chars.contains(&c) || c.is_control() { '_' } else { c })
        .collect();

    sanitized = sanitized.trim().trim_start_matches('.').to_string();
    if sanitized.len() > 200 {
        let mut cut = 200;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
    }

    if sanitized.is_empty() {
        sanitized = "subtitle.srt".to_string();
    }

    sanitized
}
