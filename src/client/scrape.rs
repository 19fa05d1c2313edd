//! Series id extraction from the HTML site search
//!
//! The site search is not part of the XML API. Result pages link each hit as
//! `<a href="/?tab=series&amp;id=<id>&amp;lid=<lang>">`, and ids are pulled
//! out of the raw markup with a regular expression. Any change to the
//! site's markup breaks this, so results are best effort only.

use once_cell::sync::Lazy;
use regex::Regex;

static SERIES_LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href="/\?tab=series&amp;id=(\d+)&amp;lid=\d*">"#)
        .expect("series link regex should compile")
});

/// Extracts the linked series ids from a search result page, in page order
pub(crate) fn extract_series_ids(html: &str) -> Vec<u64> {
    SERIES_LINK_PATTERN
        .captures_iter(html)
        .filter_map(|captures| captures.get(1)?.as_str().parse().ok())
        .collect()
}
