use std::path::Path;
use std::time::Duration;
use subtis::config::ConfigBuilder;
use subtis::download::unique_target;
use subtis::language::{lookup, normalize};
use subtis::params::download_url;
use subtis::prelude::*;
use subtis::types::MediaItemBuilder;
use subtis::{Error, ErrorKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_normalization() {
        assert_eq!(normalize("Español"), "es");
        assert_eq!(normalize("ENG"), "en");
        assert_eq!(normalize("spa"), "es");
        assert_eq!(normalize("english"), "en");
    }

    #[test]
    fn test_unknown_language_falls_back_to_spanish() {
        // normalize hides unknown input; lookup is how callers can tell.
        assert_eq!(normalize("klingon"), "es");
        assert_eq!(lookup("klingon"), None);
        assert_eq!(lookup("fr"), None);
    }

    #[test]
    fn test_media_item_builder() {
        let item = MediaItemBuilder::default()
            .file_name("Movie.2020.1080p.mkv")
            .file_size(1_500_000_000u64)
            .languages(vec!["es".to_string()])
            .build()
            .unwrap();

        assert_eq!(item.file_name, "Movie.2020.1080p.mkv");
        assert!(item.has_size());
        assert_eq!(item.imdb_id, None);
        assert_eq!(item.languages, vec!["es".to_string()]);

        assert!(MediaItemBuilder::default().build().is_err());
        assert!(!MediaItem::new("a.mkv", 0).has_size());
    }

    #[test]
    fn test_config_builder_keeps_defaults() {
        let config = ConfigBuilder::default()
            .api_base("http://localhost:8080/v1")
            .api_variant(ApiVariant::Id)
            .build()
            .unwrap();

        assert_eq!(config.api_base, "http://localhost:8080/v1");
        assert_eq!(config.api_variant, ApiVariant::Id);
        assert_eq!(config.search_timeout, Duration::from_secs(10));
        assert_eq!(config.download_timeout, Duration::from_secs(30));
        assert_eq!(config.language, "es");
    }

    #[test]
    fn test_plugin_params_decode_values() {
        let params = PluginParams::parse(
            "?action=download&link=https%3A%2F%2Fx%2Fy%20z.srt&filename=y%20z.srt",
        );

        assert_eq!(params.action(), Action::Download);
        assert_eq!(
            params.reference(),
            Some(SubtitleReference::Link {
                link: "https://x/y z.srt".to_string(),
                file_name: "y z.srt".to_string(),
            })
        );
    }

    #[test]
    fn test_download_url_for_id() {
        assert_eq!(
            download_url("addon.id", &SubtitleReference::Id("42".to_string())),
            "plugin://addon.id/?action=download&id=42"
        );
    }

    #[test]
    fn test_error_taxonomy() {
        assert_eq!(Error::missing_context("id").kind(), ErrorKind::MissingContext);
        assert_eq!(Error::status("u", 404).kind(), ErrorKind::Protocol);
        assert_eq!(Error::parse("bad json").kind(), ErrorKind::Protocol);
        assert_eq!(Error::config("bad url").kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_exhausted_names_are_a_filesystem_error() {
        struct Crowded;

        #[async_trait::async_trait]
        impl FileStore for Crowded {
            async fn exists(&self, _path: &Path) -> bool {
                true
            }
            async fn create_dir_all(&self, _path: &Path) -> subtis::Result<()> {
                Ok(())
            }
            async fn size(&self, _path: &Path) -> subtis::Result<u64> {
                Ok(0)
            }
            async fn write_new(&self, _path: &Path, _contents: &[u8]) -> subtis::Result<()> {
                Ok(())
            }
        }

        let err = unique_target(&Crowded, Path::new("/tmp"), "y.srt")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[test]
    fn test_subtitle_result_list_item() {
        let result = SubtitleResult {
            reference: SubtitleReference::Link {
                link: "https://x/y.srt".to_string(),
                file_name: "y.srt".to_string(),
            },
            suggested_file_name: "y.srt".to_string(),
            display_title: "Movie".to_string(),
            display_year: Some("2020".to_string()),
            is_synced: true,
            language_code: "es".to_string(),
        };

        let item = result.to_list_item();
        assert_eq!(item.label2, "Movie (2020)");
        assert_eq!(item.thumb.as_deref(), Some("es"));
        assert_eq!(item.property("sync"), Some("true"));
    }
}
