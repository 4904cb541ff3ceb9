//! JSON extraction helpers for API responses.
//!
//! The subtitle API nests everything one level deep (`subtitle.*`,
//! `title.*`) and is loose about types: ids and years show up as either
//! numbers or strings. These helpers walk dot-separated paths and flatten
//! scalars to strings.
//!
//! # Examples
//!
//! ```rust
//! use subtis::net::json;
//! use serde_json::json;
//!
//! let data = json!({
//!     "subtitle": { "id": 42, "subtitle_file_name": "y.srt" },
//!     "title": { "title_name": "Movie", "year": 2020 }
//! });
//!
//! assert_eq!(json::extract_string(&data, "subtitle.id").as_deref(), Some("42"));
//! assert_eq!(json::extract_string(&data, "title.year").as_deref(), Some("2020"));
//! assert_eq!(json::extract_string(&data, "subtitle.language"), None);
//! ```

use serde_json::Value;

/// Borrows the value at a dot-separated path.
///
/// # Examples
///
/// ```rust
/// use subtis::net::json;
/// use serde_json::json;
///
/// let data = json!({"subtitle": {"subtitle_link": "https://x/y.srt"}});
///
/// let link = json::extract_path(&data, "subtitle.subtitle_link");
/// assert_eq!(link.and_then(|v| v.as_str()), Some("https://x/y.srt"));
/// assert!(json::extract_path(&data, "title.title_name").is_none());
/// ```
pub fn extract_path<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = json;

    for key in path.split('.') {
        current = current.get(key)?;
    }

    Some(current)
}

/// Extracts a scalar as a non-empty string.
///
/// Strings are returned as-is, numbers and booleans are formatted. Empty
/// strings, nulls, objects and arrays yield `None`.
pub fn extract_string(json: &Value, path: &str) -> Option<String> {
    let value = match extract_path(json, path)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    (!value.is_empty()).then_some(value)
}

/// Returns the first of several paths that yields a non-empty string.
///
/// # Examples
///
/// ```rust
/// use subtis::net::json;
/// use serde_json::json;
///
/// let data = json!({"link": "https://x/y.srt"});
/// let link = json::extract_first(&data, &["subtitle_link", "subtitle.subtitle_link", "link"]);
/// assert_eq!(link.as_deref(), Some("https://x/y.srt"));
/// ```
pub fn extract_first(json: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| extract_string(json, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_string_skips_empty_and_composite() {
        let data = json!({
            "a": "",
            "b": "  ",
            "c": null,
            "d": {"x": 1},
            "e": [1, 2],
            "f": " value ",
        });

        for path in ["a", "b", "c", "d", "e", "missing"] {
            assert_eq!(extract_string(&data, path), None, "{}", path);
        }
        assert_eq!(extract_string(&data, "f").as_deref(), Some("value"));
    }
}
