// ABOUTME: Raw HTML passthrough for the markdown-to-presentation application
// ABOUTME: Extracts rawhtml fenced blocks into placeholders and reinserts them post-render

use crate::errors::{MtpError, Result};
use uuid::Uuid;

/// A fenced `rawhtml` block lifted out of a slide before rendering. The
/// content is kept verbatim and substituted back, unescaped, after the
/// renderer has run.
#[derive(Debug, Clone)]
pub struct RawHtmlBlock {
    pub token: String,
    pub content: String,
}

/// A slide fragment with its raw HTML blocks extracted. Pairing the markdown
/// with its substitution table in one value means reinsertion can never see a
/// placeholder it has no content for.
#[derive(Debug)]
pub struct ExtractedSlide {
    pub markdown: String,
    pub blocks: Vec<RawHtmlBlock>,
}

/// Replace every fenced block whose info string is exactly `rawhtml` with a
/// unique single-line placeholder token. An unterminated fence is ordinary
/// content.
pub fn extract_raw_html(fragment: &str) -> ExtractedSlide {
    let lines: Vec<&str> = fragment.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut blocks = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        if let Some(fence_len) = opening_fence(lines[i]) {
            if let Some(close) = (i + 1..lines.len()).find(|&j| closing_fence(lines[j], fence_len))
            {
                let mut content = lines[i + 1..close].join("\n");
                if !content.is_empty() {
                    content.push('\n');
                }
                let token = format!("rawhtml-{}", Uuid::new_v4());
                out.push(token.clone());
                blocks.push(RawHtmlBlock { token, content });
                i = close + 1;
                continue;
            }
        }
        out.push(lines[i].to_string());
        i += 1;
    }

    ExtractedSlide {
        markdown: out.join("\n"),
        blocks,
    }
}

/// Substitute each placeholder token in the rendered HTML exactly once with
/// its recorded content. The renderer wraps a bare token line in a paragraph,
/// so the wrapped form is replaced when present.
pub fn reinsert_raw_html(mut html: String, blocks: &[RawHtmlBlock]) -> Result<String> {
    for block in blocks {
        let wrapped = format!("<p>{}</p>", block.token);
        if let Some(pos) = html.find(&wrapped) {
            html.replace_range(pos..pos + wrapped.len(), &block.content);
        } else if let Some(pos) = html.find(&block.token) {
            html.replace_range(pos..pos + block.token.len(), &block.content);
        } else {
            return Err(MtpError::InternalError(format!(
                "raw html placeholder {} missing from rendered output",
                block.token
            )));
        }
    }
    Ok(html)
}

/// Returns the fence length for a line opening a rawhtml block: three or more
/// backticks whose info string is exactly `rawhtml`.
fn opening_fence(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    let fence_len = trimmed.chars().take_while(|&c| c == '`').count();
    if fence_len >= 3 && trimmed[fence_len..].trim() == "rawhtml" {
        Some(fence_len)
    } else {
        None
    }
}

/// A closing fence is a run of backticks at least as long as the opener.
fn closing_fence(line: &str, fence_len: usize) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '`') && trimmed.len() >= fence_len
}
