//! Math typesetting via `latex2mathml`.
//!
//! Thin wrapper so callers deal with one mode enum and one error type.

use latex2mathml::{DisplayStyle, latex_to_mathml};

/// Rendering mode for a math expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathMode {
    /// In-flow, text-sized.
    Inline,
    /// Block-level, display-sized.
    Display,
}

/// Typesetting failure for a single expression.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MathError(String);

/// Typeset a LaTeX expression to MathML.
pub fn typeset(expression: &str, mode: MathMode) -> Result<String, MathError> {
    let style = match mode {
        MathMode::Inline => DisplayStyle::Inline,
        MathMode::Display => DisplayStyle::Block,
    };
    latex_to_mathml(expression, style).map_err(|err| MathError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typeset_inline() {
        let mathml = typeset("E = mc^2", MathMode::Inline).unwrap();
        assert!(mathml.starts_with("<math"));
        assert!(mathml.contains("msup"));
    }

    #[test]
    fn test_typeset_display_mode() {
        let mathml = typeset("x", MathMode::Display).unwrap();
        assert!(mathml.contains("block"));
    }

    #[test]
    fn test_typeset_invalid_expression_errors() {
        assert!(typeset(r"\frac{", MathMode::Inline).is_err());
    }
}
