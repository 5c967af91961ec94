//! internet/fetch: fetch a URL and extract readable text

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use eskai_application::{ToolAction, ToolError};
use eskai_domain::core::string::truncate_bytes;
use scraper::{ElementRef, Html, Node, Selector};
use serde_json::{Value, json};
use tracing::debug;

/// Default max output text size (50 KB)
pub const DEFAULT_MAX_BYTES: usize = 50 * 1024;

const USER_AGENT: &str = concat!("eskai/", env!("CARGO_PKG_VERSION"));

/// Tags whose entire subtree is ignored
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("static selector"));

pub struct WebFetchTool {
    client: reqwest::Client,
    max_bytes: usize,
}

impl WebFetchTool {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ToolError::ExecutionFailed(format!("HTTP client: {e}")))?;
        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl ToolAction for WebFetchTool {
    fn description(&self) -> &str {
        "Fetch a web page and return its readable text"
    }

    async fn invoke(&self, args: &Value) -> Result<Value, ToolError> {
        let url = args
            .get("url")
            .and_then(Value::as_str)
            .filter(|u| u.starts_with("http://") || u.starts_with("https://"))
            .ok_or_else(|| ToolError::InvalidArgument("'url' must be an http(s) URL".into()))?;

        debug!(url, "Fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to fetch URL: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::ExecutionFailed(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/html") || ct.contains("application/xhtml"));

        let body = response
            .text()
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to read body: {e}")))?;

        let text = if is_html { html_to_text(&body) } else { body };
        let content = truncate_bytes(&text, self.max_bytes);

        Ok(json!({
            "url": url,
            "status": status.as_u16(),
            "content": content,
            "truncated": content.len() < text.len(),
        }))
    }
}

/// Extract readable text from HTML, stripping tags, scripts and styles
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut parts = Vec::new();
    collect_element_text(root, &mut parts);
    clean_whitespace(&parts.join(" "))
}

fn collect_element_text(element: ElementRef, parts: &mut Vec<String>) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_element_text(child_el, parts);
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of spaces; keep at most one blank line
fn clean_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_whitespace = false;
    let mut newlines = 0;

    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                result.push('\n');
            }
            prev_was_whitespace = true;
        } else if ch.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
            }
            prev_was_whitespace = true;
            newlines = 0;
        } else {
            result.push(ch);
            prev_was_whitespace = false;
            newlines = 0;
        }
    }

    result.trim().to_string()
}
