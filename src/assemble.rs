// ABOUTME: Presentation assembler for the markdown-to-presentation application
// ABOUTME: Wraps rendered slide fragments in the reveal.js scaffold markup

/// Wrap each rendered fragment in a reveal.js `<section>` element, in
/// splitter order, inside the full page scaffold. Pure string composition,
/// no markdown processing: identical inputs always produce identical bytes.
///
/// The stylesheet and framework script are referenced relative to the page,
/// which lives at the build directory root alongside them.
pub fn assemble(slides: &[String]) -> String {
    let sections: String = slides
        .iter()
        .map(|slide| format!("<section>{}</section>", slide))
        .collect();

    format!(
        "\
<!doctype html>
<html>
    <head>
        <meta charset=\"utf-8\">
        <link rel=\"stylesheet\" href=\"presentation.css\">
    </head>
    <body>
        <div class=\"reveal\">
            <div class=\"slides\">{}</div>
        </div>
        <script src=\"presentation.js\"></script>
        <script>
            Reveal.initialize({{
                transition: 'linear',
                keyboard: {{39: 'next', 37: 'prev'}}
            }});
        </script>
    </body>
</html>
",
        sections
    )
}
