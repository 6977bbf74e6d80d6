//! Scraper for wiki-style event listing and fight card pages.
//!
//! Provides table location and row parsing over loosely formatted markup.

pub mod locate;
pub mod parsers;

/// Resolve an event detail link against the source base URL
pub fn event_detail_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_detail_url_relative() {
        assert_eq!(
            event_detail_url("https://en.wikipedia.org", "/wiki/UFC_300"),
            "https://en.wikipedia.org/wiki/UFC_300"
        );
    }

    #[test]
    fn test_event_detail_url_absolute() {
        assert_eq!(
            event_detail_url("https://en.wikipedia.org", "https://example.com/card"),
            "https://example.com/card"
        );
    }

    #[test]
    fn test_event_detail_url_trailing_slash() {
        assert_eq!(
            event_detail_url("https://en.wikipedia.org/", "/wiki/UFC_300"),
            "https://en.wikipedia.org/wiki/UFC_300"
        );
    }
}
