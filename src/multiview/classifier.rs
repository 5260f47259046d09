// URL classifier - decides which playback backend serves a slot
//
// Pure and total: no network access, never fails. Anything that is not a
// recognized YouTube URL shape is treated as an adaptive-stream manifest URL.

use lazy_static::lazy_static;
use regex::Regex;

/// Classification result for a user-supplied stream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSource {
    /// Recognized YouTube video/live URL, with the extracted video id.
    EmbeddedVideo(String),
    /// Unrecognized; handed to the adaptive-stream engine as a manifest URL.
    AdaptiveStream,
}

lazy_static! {
    /// Known YouTube URL shapes, in match priority order:
    /// watch, embed, v-path, live, short-link.
    static ref YOUTUBE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([^&]+)").unwrap(),
        Regex::new(r"(?i)(?:https?://)?(?:www\.)?youtube\.com/embed/([^/?]+)").unwrap(),
        Regex::new(r"(?i)(?:https?://)?(?:www\.)?youtube\.com/v/([^/?]+)").unwrap(),
        Regex::new(r"(?i)(?:https?://)?(?:www\.)?youtube\.com/live/([^/?]+)").unwrap(),
        Regex::new(r"(?i)(?:https?://)?youtu\.be/([^/?]+)").unwrap(),
    ];
}

/// Extract the video id from a YouTube URL, if the URL matches a known shape.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    for pattern in YOUTUBE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(url) {
            if let Some(id) = caps.get(1) {
                return Some(id.as_str().to_string());
            }
        }
    }
    None
}

/// Map a raw URL to its playback backend.
pub fn classify(url: &str) -> StreamSource {
    match extract_youtube_id(url) {
        Some(id) => StreamSource::EmbeddedVideo(id),
        None => StreamSource::AdaptiveStream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=abc123&t=42s"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_v_path_url() {
        assert_eq!(
            extract_youtube_id("http://youtube.com/v/abc123?version=3"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_live_url() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/live/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_short_link() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_scheme_and_www_optional() {
        assert_eq!(
            extract_youtube_id("youtube.com/watch?v=abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_youtube_id("youtu.be/abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            extract_youtube_id("HTTPS://WWW.YOUTUBE.COM/watch?v=abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_unrecognized_urls() {
        assert_eq!(extract_youtube_id("http://example.com/stream.m3u8"), None);
        assert_eq!(extract_youtube_id("rtsp://camera.local/live"), None);
        assert_eq!(extract_youtube_id(""), None);
        assert_eq!(extract_youtube_id("https://vimeo.com/12345"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify("https://youtu.be/abc123"),
            StreamSource::EmbeddedVideo("abc123".to_string())
        );
        assert_eq!(
            classify("http://example.com/live/playlist.m3u8"),
            StreamSource::AdaptiveStream
        );
    }
}
