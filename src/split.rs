// ABOUTME: Slide splitter for the markdown-to-presentation application
// ABOUTME: Splits a markdown document into ordered slide fragments

/// A slide boundary is exactly three contiguous lines: a blank line, a line
/// consisting solely of `***` (surrounding whitespace allowed), and another
/// blank line. `---` and `___` are never boundaries; the renderer turns them
/// into literal rules. A `***` without both surrounding blank lines is
/// ordinary content.
pub fn split_slides(markdown: &str) -> Vec<String> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim().is_empty()
            && i + 2 < lines.len()
            && lines[i + 1].trim() == "***"
            && lines[i + 2].trim().is_empty()
        {
            flush_slide(&mut slides, &mut current);
            i += 3;
        } else {
            current.push(lines[i]);
            i += 1;
        }
    }
    flush_slide(&mut slides, &mut current);

    // A document with no boundary still yields one slide.
    if slides.is_empty() {
        slides.push(String::new());
    }
    slides
}

/// Trims surrounding blank lines from the accumulated fragment and appends it
/// if anything remains. Blank runs around the document or the delimiter never
/// become empty slides.
fn flush_slide(slides: &mut Vec<String>, current: &mut Vec<&str>) {
    let start = current
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(current.len());
    let end = current
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map(|idx| idx + 1)
        .unwrap_or(start);

    if start < end {
        slides.push(current[start..end].join("\n"));
    }
    current.clear();
}
