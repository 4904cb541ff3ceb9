//! Language name normalization.
//!
//! Maps the handful of spellings the API and players use onto two-letter
//! codes. Unrecognized input falls back to Spanish, the only language the
//! service carries, and is logged so drift in the API shows up.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

/// Code returned for anything not in the table.
pub const FALLBACK_CODE: &str = "es";

static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("spanish", "es"),
        ("español", "es"),
        ("espanol", "es"),
        ("spa", "es"),
        ("es", "es"),
        ("english", "en"),
        ("eng", "en"),
        ("en", "en"),
    ])
});

/// Strict lookup, `None` for unknown spellings.
///
/// # Examples
///
/// ```rust
/// use subtis::language::lookup;
///
/// assert_eq!(lookup(" Spanish "), Some("es"));
/// assert_eq!(lookup("klingon"), None);
/// ```
pub fn lookup(raw: &str) -> Option<&'static str> {
    let key = raw.trim().to_lowercase();
    LANGUAGES.get(key.as_str()).copied()
}

/// Normalizes a language name or code, defaulting to [`FALLBACK_CODE`].
///
/// # Examples
///
/// ```rust
/// use subtis::language::normalize;
///
/// assert_eq!(normalize("Español"), "es");
/// assert_eq!(normalize("ENG"), "en");
/// assert_eq!(normalize("klingon"), "es");
/// ```
pub fn normalize(raw: &str) -> &'static str {
    match lookup(raw) {
        Some(code) => code,
        None => {
            warn!(language = raw, "Unrecognized language, using '{}'", FALLBACK_CODE);
            FALLBACK_CODE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_spellings() {
        for raw in ["spanish", "Español", "ESPAÑOL", "spa", "es"] {
            assert_eq!(normalize(raw), "es", "{}", raw);
        }
        for raw in ["English", "ENG", "en"] {
            assert_eq!(normalize(raw), "en", "{}", raw);
        }
    }

    #[test]
    fn test_unknown_defaults_to_spanish() {
        // The strict form exposes what normalize hides.
        assert_eq!(lookup("klingon"), None);
        assert_eq!(normalize("klingon"), "es");
        assert_eq!(lookup(""), None);
        assert_eq!(normalize(""), "es");
    }
}
