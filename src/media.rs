use crate::models::{MediaFileVariant, MediaRow};

/// Pick the media file to preview.
///
/// The first variant whose MIME type mentions `mp4` or whose URL mentions
/// `.mp4` wins, regardless of bitrate or resolution. If that variant has no
/// URL there is nothing to play.
pub fn select_playable(media_files: &[MediaFileVariant]) -> Option<&str> {
    media_files
        .iter()
        .find(|variant| is_mp4(variant))
        .and_then(|variant| variant.url.as_deref())
        .filter(|url| !url.is_empty())
}

fn is_mp4(variant: &MediaFileVariant) -> bool {
    variant
        .mime_type
        .as_deref()
        .is_some_and(|mime| mime.contains("mp4"))
        || variant
            .url
            .as_deref()
            .is_some_and(|url| url.contains(".mp4"))
}

/// Project media files into technical table rows, one per variant, in order
pub fn to_rows(media_files: &[MediaFileVariant]) -> Vec<MediaRow> {
    media_files.iter().map(MediaRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn variant(mime_type: Option<&str>, url: Option<&str>) -> MediaFileVariant {
        MediaFileVariant {
            mime_type: mime_type.map(str::to_string),
            url: url.map(str::to_string),
            ..MediaFileVariant::default()
        }
    }

    #[test]
    fn first_mp4_wins() {
        let files = vec![
            variant(Some("video/webm"), Some("a.webm")),
            variant(Some("video/mp4"), Some("b.mp4")),
            variant(Some("video/mp4"), Some("c.mp4")),
        ];
        assert_eq!(select_playable(&files), Some("b.mp4"));
    }

    #[test]
    fn no_mp4_means_nothing_to_play() {
        let files = vec![variant(Some("video/webm"), Some("a.webm"))];
        assert_eq!(select_playable(&files), None);
        assert_eq!(select_playable(&[]), None);
    }

    #[test]
    fn url_extension_qualifies_without_mime_type() {
        let files = vec![
            variant(Some("application/javascript"), Some("https://x.example.com/vpaid.js")),
            variant(None, Some("https://x.example.com/clip.mp4?cb=1")),
        ];
        assert_eq!(select_playable(&files), Some("https://x.example.com/clip.mp4?cb=1"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let files = vec![variant(Some("video/MP4"), Some("https://x.example.com/CLIP.MP4"))];
        assert_eq!(select_playable(&files), None);
    }

    #[test]
    fn first_match_without_url_is_not_skipped() {
        let files = vec![
            variant(Some("video/mp4"), None),
            variant(Some("video/mp4"), Some("later.mp4")),
        ];
        assert_eq!(select_playable(&files), None);
    }

    #[test]
    fn rows_preserve_order_and_absent_values() {
        let files = vec![
            MediaFileVariant {
                mime_type: Some("video/mp4".to_string()),
                bitrate: None,
                width: Some("640".to_string()),
                height: Some("360".to_string()),
                url: Some("a.mp4".to_string()),
            },
            variant(Some("video/webm"), Some("b.webm")),
            variant(None, None),
        ];
        let rows = to_rows(&files);

        assert_eq!(rows.len(), files.len());
        assert_eq!(rows[0].cells(), [Some("video/mp4"), None, Some("640"), Some("360"), Some("a.mp4")]);
        assert_eq!(rows[1].url.as_deref(), Some("b.webm"));
        assert_eq!(rows[2].cells(), [None; 5]);
    }

    #[test]
    fn rows_serialize_with_table_headers() {
        let rows = to_rows(&[variant(Some("video/mp4"), Some("a.mp4"))]);
        let json = serde_json::to_value(&rows[0]).unwrap();

        assert_eq!(json["Type"], "video/mp4");
        assert_eq!(json["URL"], "a.mp4");
        assert!(json["Bitrate"].is_null());
    }
}
