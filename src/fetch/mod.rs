pub mod http;
pub mod normalize;

pub use http::HttpPageFetcher;
pub use normalize::{is_absolute_url, normalize};

/// Prefix that marks a failed fetch in [`PageFetcher::fetch_text`] output.
pub const FAILURE_MARKER: &str = "Failed";

/// Turns a URL into plain page text.
///
/// Failures are reported in-band: the returned text starts with
/// [`FAILURE_MARKER`].
pub trait PageFetcher: Send + Sync {
    fn fetch_text(&self, url: &str) -> String;
}

impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    fn fetch_text(&self, url: &str) -> String {
        (**self).fetch_text(url)
    }
}

impl<F: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<F> {
    fn fetch_text(&self, url: &str) -> String {
        (**self).fetch_text(url)
    }
}
