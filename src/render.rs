// ABOUTME: Markdown rendering seam for the markdown-to-presentation application
// ABOUTME: Converts one slide fragment of markdown into an HTML fragment

use comrak::{markdown_to_html, ComrakOptions};

/// Render one markdown fragment to HTML.
///
/// Options stay at comrak's safe defaults: raw inline HTML is not passed
/// through here, `rawhtml` fenced blocks are the sanctioned escape hatch.
/// `---` and `___` render as literal horizontal rules.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    markdown_to_html(markdown, &options)
}
