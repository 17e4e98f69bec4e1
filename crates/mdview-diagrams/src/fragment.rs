//! HTML fragments for the diagram block lifecycle.

use mdview_renderer::escape_html;

/// Empty container holding a block's position while its render is in
/// flight.
#[must_use]
pub fn placeholder_fragment(index: usize) -> String {
    format!(r#"<div class="diagram" id="diagram-{index}"></div>"#)
}

/// Terminal fragment for a successfully rendered block.
#[must_use]
pub fn figure_fragment(index: usize, svg: &str) -> String {
    format!(r#"<figure class="diagram" id="diagram-{index}">{svg}</figure>"#)
}

/// Terminal fragment for a failed block: a visible error banner
/// followed by the source, pre-rendered as a highlighted code block so
/// the author's text is not lost.
#[must_use]
pub fn fallback_fragment(index: usize, error_message: &str, code_html: &str) -> String {
    format!(
        r#"<div class="diagram diagram-error" id="diagram-{index}"><div class="diagram-error-banner">Error rendering diagram: {}</div>{code_html}</div>"#,
        escape_html(error_message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholder() {
        assert_eq!(
            placeholder_fragment(3),
            r#"<div class="diagram" id="diagram-3"></div>"#
        );
    }

    #[test]
    fn test_figure_embeds_svg_verbatim() {
        assert_eq!(
            figure_fragment(0, "<svg><g/></svg>"),
            r#"<figure class="diagram" id="diagram-0"><svg><g/></svg></figure>"#
        );
    }

    #[test]
    fn test_fallback_escapes_error_message() {
        let html = fallback_fragment(1, "bad <input>", "<pre><code>x</code></pre>");
        assert!(html.contains("Error rendering diagram: bad &lt;input&gt;"));
        assert!(html.ends_with("<pre><code>x</code></pre></div>"));
        assert!(html.contains(r#"id="diagram-1""#));
    }
}
