//! Orchestration of the render sequence.

use std::panic::{AssertUnwindSafe, catch_unwind};

use mdview_diagrams::{DiagramEngine, extract_blocks, fallback_fragment, figure_fragment};
use mdview_frontmatter::{extract, front_matter_table};
use mdview_renderer::DocumentParser;
use mdview_sanitize::sanitize;

use crate::mount::MountRegistry;
use crate::source::DocumentSource;

const RENDER_ERROR_HTML: &str = "<p>Error rendering markdown content</p>";
const LOAD_ERROR_HTML: &str = "<p>Error loading document</p>";

/// The full document pipeline plus its mount targets.
///
/// Entry points never raise: a whole-render failure replaces the
/// mount content with a generic message, and per-unit failures (one
/// math expression, one diagram block) degrade locally during
/// parsing and the diagram pass.
pub struct RenderPipeline {
    parser: DocumentParser,
    engine: Box<dyn DiagramEngine>,
    mounts: MountRegistry,
}

impl RenderPipeline {
    #[must_use]
    pub fn new(engine: Box<dyn DiagramEngine>) -> Self {
        Self {
            parser: DocumentParser::new(),
            engine,
            mounts: MountRegistry::new(),
        }
    }

    #[must_use]
    pub fn mounts(&self) -> &MountRegistry {
        &self.mounts
    }

    /// Render raw document text into the named mount target.
    ///
    /// Sequence: extract front matter, parse the body, sanitize,
    /// prepend the metadata table, assign to the mount, then run the
    /// diagram pass against that assignment's generation. An unknown
    /// mount id is a logged no-op.
    pub fn render(&self, raw_text: &str, mount_id: &str) {
        if !self.mounts.exists(mount_id) {
            tracing::warn!(mount_id, "mount target not found, skipping render");
            return;
        }

        let html = match catch_unwind(AssertUnwindSafe(|| self.render_document(raw_text))) {
            Ok(html) => html,
            Err(_) => {
                tracing::error!(mount_id, "document render failed");
                self.mounts.assign(mount_id, RENDER_ERROR_HTML.to_owned());
                return;
            }
        };

        let Some(generation) = self.mounts.assign(mount_id, html) else {
            return;
        };
        self.render_diagrams(mount_id, generation);
    }

    /// Fetch a document by name and render it.
    ///
    /// Fetch and decode failures surface as a generic loading error
    /// inside the mount target instead of propagating.
    pub fn load_and_render(&self, source: &dyn DocumentSource, name: &str, mount_id: &str) {
        match source.fetch(name) {
            Ok(text) => self.render(&text, mount_id),
            Err(err) => {
                tracing::warn!(name, error = %err, "failed to load document");
                if self.mounts.exists(mount_id) {
                    self.mounts.assign(mount_id, LOAD_ERROR_HTML.to_owned());
                }
            }
        }
    }

    /// Parse and sanitize, then prepend the front-matter table.
    ///
    /// The table is built from already-escaped cells and is prepended
    /// after sanitization, mirroring its position outside the body
    /// parse.
    fn render_document(&self, raw_text: &str) -> String {
        let document = extract(raw_text);
        let mut html = sanitize(&self.parser.parse(&document.body));
        if let Some(front_matter) = &document.front_matter {
            html = front_matter_table(front_matter) + &html;
        }
        html
    }

    /// The post-mount diagram pass.
    ///
    /// All diagram blocks are lifted into placeholders in one pass, so
    /// fallback output re-rendered as a diagram-language code block is
    /// never discovered again. Blocks are then rendered strictly in
    /// document order and spliced in at their recorded placeholder
    /// spans; every mutation re-checks the render generation and a
    /// stale result is discarded.
    fn render_diagrams(&self, mount_id: &str, generation: u64) {
        let Some(html) = self.mounts.html(mount_id) else {
            return;
        };
        let (with_placeholders, blocks) = extract_blocks(&html);
        if blocks.is_empty() {
            return;
        }
        if !self.mounts.update_if_current(mount_id, generation, |html| {
            *html = with_placeholders;
        }) {
            tracing::debug!(mount_id, "render superseded before diagram pass");
            return;
        }

        // Spans index into the text assigned above; earlier splices
        // shift the later spans by the size difference.
        let mut grown = 0;
        let mut shrunk = 0;
        for block in blocks {
            let fragment = match self.engine.render(block.language, &block.source) {
                Ok(svg) => figure_fragment(block.index, &svg),
                Err(err) => {
                    tracing::warn!(
                        mount_id,
                        index = block.index,
                        error = %err,
                        "diagram render failed, falling back to source"
                    );
                    let fence = fence_source(block.language.fence_tag(), &block.source);
                    let code_html = self.parser.parse(&fence);
                    fallback_fragment(block.index, &err.to_string(), &code_html)
                }
            };

            let start = block.span.start + grown - shrunk;
            let end = block.span.end + grown - shrunk;
            let applied = self.mounts.update_if_current(mount_id, generation, |html| {
                html.replace_range(start..end, &fragment);
            });
            if !applied {
                tracing::debug!(mount_id, index = block.index, "stale diagram result discarded");
                return;
            }
            grown += fragment.len();
            shrunk += block.span.end - block.span.start;
        }
    }
}

/// Wrap recovered diagram source back into a fenced code block.
fn fence_source(tag: &str, source: &str) -> String {
    let newline = if source.ends_with('\n') { "" } else { "\n" };
    format!("```{tag}\n{source}{newline}```")
}
