//! Request URL construction
//!
//! Two endpoint families exist: dynamic PHP scripts taking query parameters
//! (`/api/<Script>.php?...`) and static documents addressed by path below
//! the API key (`/api/<key>/<path>.xml`). The HTML site search lives at the
//! site root.

use crate::config::ClientConfig;
use url::{ParseError, Url};

/// Appends path segments to the base URL, replacing a trailing empty segment
fn with_segments<I, S>(base: &Url, segments: I) -> Result<Url, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// URL of a dynamic endpoint such as `GetSeries.php`
pub(crate) fn dynamic_url(
    config: &ClientConfig,
    script: &str,
    query: &[(&str, &str)],
) -> Result<Url, ParseError> {
    let mut url = with_segments(config.base_url(), ["api", script])?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// URL of a static document below `/api/<key>/`
///
/// The last segment is the document name including its `.xml` extension.
pub(crate) fn static_url<I, S>(config: &ClientConfig, path: I) -> Result<Url, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = with_segments(config.base_url(), ["api", config.api_key()])?;
    url.path_segments_mut()
        .map_err(|()| ParseError::RelativeUrlWithCannotBeABaseBase)?
        .extend(path);
    Ok(url)
}

/// URL of the HTML search form on the site root
pub(crate) fn site_search_url(config: &ClientConfig, name: &str) -> Result<Url, ParseError> {
    let mut url = config.base_url().clone();
    url.query_pairs_mut().extend_pairs([
        ("string", name),
        ("searchseriesid", ""),
        ("tab", "listseries"),
        ("function", "Search"),
    ]);
    Ok(url)
}

/// Document name for a language-specific record, e.g. `en.xml`
pub(crate) fn language_document(language: &str) -> String {
    format!("{}.xml", language)
}
