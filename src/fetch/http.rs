use std::time::Duration;

use crate::fetch::{PageFetcher, FAILURE_MARKER};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const RENDER_WIDTH: usize = 200;

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("could not convert HTML: {0}")]
    Html(#[from] html2text::Error),
}

/// Fetches a page over HTTP and flattens its HTML to text.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::blocking::Client,
    user_agent: String,
}

impl HttpPageFetcher {
    pub fn new(timeout_secs: u64, user_agent: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }

    fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()?
            .error_for_status()?
            .bytes()?;
        let text = html2text::from_read(bytes.as_ref(), RENDER_WIDTH)?;
        Ok(clean_text(&text))
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_text(&self, url: &str) -> String {
        match self.try_fetch(url) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(url, error = %err, "page fetch failed");
                format!("{FAILURE_MARKER} to fetch content from URL: {err}")
            }
        }
    }
}

/// Trim every line, split runs of double spaces into separate lines and drop
/// blank lines.
pub(crate) fn clean_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
