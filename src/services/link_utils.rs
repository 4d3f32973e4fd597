//! URL helpers used when adding and displaying bookmarks.

use reqwest::Url;

use crate::types::bookmark::Bookmark;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";

/// Host name of `url`, if it parses and has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Suggested title for `url`: its host with a leading `www.` removed.
pub fn title_from_url(url: &str) -> Option<String> {
    let host = host_of(url)?;
    let title = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Third-party favicon URL for `url`'s host.
pub fn favicon_fallback_url(url: &str) -> Option<String> {
    let host = host_of(url)?;
    let mut favicon = Url::parse(FAVICON_SERVICE).ok()?;
    favicon
        .query_pairs_mut()
        .append_pair("domain", &host)
        .append_pair("sz", "32");
    Some(favicon.to_string())
}

/// Favicon to show for a bookmark: the stored one, else the fallback service.
pub fn display_favicon(bookmark: &Bookmark) -> Option<String> {
    bookmark
        .favicon
        .clone()
        .filter(|f| !f.trim().is_empty())
        .or_else(|| favicon_fallback_url(&bookmark.url))
}
