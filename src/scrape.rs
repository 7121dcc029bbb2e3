use std::sync::LazyLock;

use reqwest::Client;
use scraper::{Html, Node, Selector};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};

/// Content blocks on a product page.
pub const RICH_TEXT_SELECTOR: &str = ".rich-text";

static RICH_TEXT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(RICH_TEXT_SELECTOR).expect("static selector parses"));

const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// Parse operator input into a fetchable URL.
pub fn parse_source_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::UnsupportedScheme(other.to_string())),
    }
}

/// Fetches a page and pulls the text out of its rich-text blocks.
pub struct Extractor {
    client: Client,
}

impl Extractor {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Extractor { client }
    }

    /// One GET, no retries. Transport errors and non-2xx statuses are both failures.
    pub async fn extract(&self, url: &Url) -> Result<String> {
        info!(%url, "Fetching source page");
        let fetch_err = |source| Error::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(fetch_err)?;
        let text = extract_rich_text(&body);
        info!(chars = text.len(), "Extracted page text");
        Ok(text)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible text of every `.rich-text` element, trimmed per element and joined
/// by one space in document order. No matches yields an empty string.
pub fn extract_rich_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let fragments: Vec<String> = document
        .select(&RICH_TEXT)
        .map(|el| {
            el.descendants()
                .filter_map(|node| match node.value() {
                    Node::Text(t) if !node.ancestors().any(|a| is_invisible(a.value())) => {
                        Some(&**t)
                    }
                    _ => None,
                })
                .collect::<String>()
                .trim()
                .to_string()
        })
        .filter(|f| !f.is_empty())
        .collect();

    debug!(matched = fragments.len(), "Rich-text fragments");
    fragments.join(" ")
}

fn is_invisible(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|e| INVISIBLE.contains(&e.name()))
}
