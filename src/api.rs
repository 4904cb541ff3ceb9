//! Endpoint URLs of the subtitle API.
//!
//! File names are percent-encoded as a single path segment, so spaces,
//! slashes and non-ASCII characters all survive the round trip.

use urlencoding::encode;

/// URL builder bound to an API base such as `https://api.subt.is/v1`.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(api_base: &str) -> Self {
        Self {
            base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Exact lookup keyed by byte size and file name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use subtis::api::Endpoints;
    ///
    /// let endpoints = Endpoints::new("https://api.subt.is/v1");
    /// assert_eq!(
    ///     endpoints.file_name(1500000000, "Movie 2020.mkv"),
    ///     "https://api.subt.is/v1/subtitle/file/name/1500000000/Movie%202020.mkv"
    /// );
    /// ```
    pub fn file_name(&self, file_size: u64, file_name: &str) -> String {
        format!(
            "{}/subtitle/file/name/{}/{}",
            self.base,
            file_size,
            encode(file_name)
        )
    }

    /// Fuzzy lookup keyed by file name only.
    pub fn alternative(&self, file_name: &str) -> String {
        format!(
            "{}/subtitle/file/alternative/{}",
            self.base,
            encode(file_name)
        )
    }

    /// Resolves an opaque subtitle id to a content link.
    pub fn link(&self, id: &str) -> String {
        format!("{}/subtitle/link/{}", self.base, encode(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let endpoints = Endpoints::new("http://localhost/v1/");
        assert_eq!(
            endpoints.alternative("a.mkv"),
            "http://localhost/v1/subtitle/file/alternative/a.mkv"
        );
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let endpoints = Endpoints::new("http://localhost/v1");
        assert_eq!(
            endpoints.alternative("dir/Película [2020].mkv"),
            "http://localhost/v1/subtitle/file/alternative/dir%2FPel%C3%ADcula%20%5B2020%5D.mkv"
        );
        assert_eq!(endpoints.link("42"), "http://localhost/v1/subtitle/link/42");
    }
}
