//! Supported diagram languages.

/// A diagram language recognized on fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramLanguage {
    Mermaid,
    PlantUml,
    GraphViz,
}

impl DiagramLanguage {
    /// Parse a language from a code fence tag.
    ///
    /// Returns `None` for anything that is not a diagram language, so
    /// ordinary code blocks pass through untouched.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mermaid" => Some(Self::Mermaid),
            "plantuml" => Some(Self::PlantUml),
            "graphviz" | "dot" => Some(Self::GraphViz),
            _ => None,
        }
    }

    /// Kroki endpoint name for this language.
    #[must_use]
    pub fn kroki_endpoint(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
            Self::PlantUml => "plantuml",
            Self::GraphViz => "graphviz",
        }
    }

    /// The fence tag used when re-rendering failed source as code.
    #[must_use]
    pub fn fence_tag(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
            Self::PlantUml => "plantuml",
            Self::GraphViz => "graphviz",
        }
    }
}
