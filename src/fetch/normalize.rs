use url::Url;

use crate::fetch::{PageFetcher, FAILURE_MARKER};

/// True when `query` is an absolute URL with both a scheme and a host.
///
/// The authority must be written out as `scheme://`; WHATWG parsing would
/// otherwise accept "http:example.com" and invent a host for it.
pub fn is_absolute_url(query: &str) -> bool {
    let query = query.trim_start();
    match Url::parse(query) {
        Ok(url) => {
            url.has_host()
                && query
                    .get(url.scheme().len() + 1..)
                    .is_some_and(|rest| rest.starts_with("//"))
        }
        Err(_) => false,
    }
}

/// Replace a URL query with the text of the page it points to.
///
/// Anything that is not a URL passes through untouched and the fetcher is
/// not called. A failed or empty fetch also passes the URL through, so the
/// request still gets ranked.
pub fn normalize(query: &str, fetcher: &dyn PageFetcher) -> String {
    if !is_absolute_url(query) {
        return query.to_string();
    }

    let text = fetcher.fetch_text(query);
    if text.is_empty() || text.starts_with(FAILURE_MARKER) {
        tracing::warn!(url = query, "could not fetch job posting, ranking the URL text itself");
        return query.to_string();
    }

    tracing::debug!(url = query, chars = text.len(), "replaced URL query with page text");
    text
}
