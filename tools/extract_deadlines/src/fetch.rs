use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use scraper::{Html, Node};
use tracing::info;
use url::{Host, Url};

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; ConferenceTracker/1.0)";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Characters of page text handed to the model (small context window)
pub const MAX_TEXT_CHARS: usize = 3000;

/// Host prefixes refused outright, on top of the IP range checks
const BLOCKED_HOST_PREFIXES: &[&str] = &["localhost", "127.", "0.0.0.0", "169.254", "192.168", "10.", "172.16"];

/// Elements whose text is page chrome rather than content
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Parse `raw` and refuse anything that is not a public http(s) address
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid URL: {}", raw))?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!("URL must start with http:// or https://");
    }

    let host = url.host_str().map(str::to_lowercase).unwrap_or_default();
    if host.is_empty() {
        bail!("URL has no host: {}", raw);
    }

    let internal = match url.host() {
        Some(Host::Ipv4(ip)) => is_internal_v4(ip),
        Some(Host::Ipv6(ip)) => is_internal_v6(ip),
        _ => host.ends_with(".localhost"),
    };

    if internal || BLOCKED_HOST_PREFIXES.iter().any(|prefix| host.starts_with(prefix)) {
        bail!("Cannot fetch from local/internal addresses ({})", host);
    }

    Ok(url)
}

fn is_internal_v4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
}

fn is_internal_v6(ip: Ipv6Addr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() {
        return true;
    }
    // ::ffff:a.b.c.d
    match ip.to_ipv4_mapped() {
        Some(v4) => is_internal_v4(v4),
        None => false,
    }
}

/// Download a page and return its readable text, truncated for the prompt
pub async fn fetch_page_text(url: &Url) -> Result<String> {
    info!("Fetching webpage: {}", url);

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .context("Failed to fetch URL")?
        .error_for_status()
        .context("Server returned an error status")?;

    let html = response.text().await.context("Failed to read response body")?;

    Ok(truncate_chars(&page_text(&html), MAX_TEXT_CHARS))
}

/// Visible text of an HTML document with chrome elements removed and
/// whitespace collapsed to single spaces
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SKIPPED_ELEMENTS.contains(&element.name()))
        });
        if !skipped {
            raw.push_str(text);
        }
    }

    collapse_whitespace(&raw)
}

fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
