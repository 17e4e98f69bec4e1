//! The sanitization boundary.
//!
//! Every rendered document passes through [`sanitize`] exactly once,
//! after grammar parsing and before the result is handed to a mount
//! target. The policy strips active content (scripts, event handlers,
//! dangerous URL schemes) while keeping the structural markup later
//! stages depend on: `class` for highlighting spans and diagram
//! discovery, `id` for footnote anchors, MathML for typeset math, and
//! checkbox inputs for task lists.

use std::sync::LazyLock;

use ammonia::Builder;

/// MathML elements produced by the math typesetting stage.
const MATHML_TAGS: &[&str] = &[
    "math",
    "semantics",
    "annotation",
    "mrow",
    "mi",
    "mo",
    "mn",
    "ms",
    "mtext",
    "mspace",
    "msub",
    "msup",
    "msubsup",
    "mfrac",
    "msqrt",
    "mroot",
    "munder",
    "mover",
    "munderover",
    "mmultiscripts",
    "mprescripts",
    "mtable",
    "mtr",
    "mtd",
    "mstyle",
    "mpadded",
    "mphantom",
    "menclose",
    "merror",
];

static POLICY: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::default();
    builder
        .add_tags(MATHML_TAGS.iter().copied())
        .add_tags(["input"])
        .add_generic_attributes(["class", "id"])
        .add_tag_attributes("math", ["display", "xmlns"])
        .add_tag_attributes("annotation", ["encoding"])
        .add_tag_attributes("input", ["type", "checked", "disabled"])
        .add_tag_attributes("table", ["style"])
        .add_tag_attributes("th", ["style"])
        .add_tag_attributes("td", ["style"]);
    builder
});

/// Clean rendered markup of active content.
///
/// Idempotent: sanitizing already-sanitized markup returns it
/// unchanged.
#[must_use]
pub fn sanitize(html: &str) -> String {
    POLICY.clean(html).to_string()
}
