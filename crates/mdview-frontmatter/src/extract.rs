//! Splitting the front-matter block from the markdown body.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\n(.*?)\n---[ \t]*\n(.*)\z").expect("valid regex")
});

/// A document split into decoded front matter and markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub front_matter: Option<Value>,
    pub body: String,
}

/// Split a leading `---` delimited YAML block from the document.
///
/// Without a delimited block at byte offset zero the input passes
/// through unchanged. A block that decodes cleanly yields its value
/// and the text after the closing delimiter as body. A block that
/// fails to decode yields no front matter and the entire original
/// text, delimiters included, as body — the body is never lost to a
/// metadata syntax error.
#[must_use]
pub fn extract(text: &str) -> Document {
    let Some(caps) = FRONT_MATTER_RE.captures(text) else {
        return Document {
            front_matter: None,
            body: text.to_owned(),
        };
    };

    match serde_yaml::from_str::<Value>(&caps[1]) {
        Ok(value) => Document {
            front_matter: Some(value),
            body: caps[2].to_owned(),
        },
        Err(err) => {
            tracing::error!(error = %err, "front matter decode failed, keeping full text as body");
            Document {
                front_matter: None,
                body: text.to_owned(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_delimiter_is_identity() {
        let doc = extract("# Title\n\nbody text");
        assert_eq!(doc.front_matter, None);
        assert_eq!(doc.body, "# Title\n\nbody text");
    }

    #[test]
    fn test_delimiter_not_at_start_is_identity() {
        let src = "intro\n---\ntitle: X\n---\nbody";
        let doc = extract(src);
        assert_eq!(doc.front_matter, None);
        assert_eq!(doc.body, src);
    }

    #[test]
    fn test_basic_extraction() {
        let doc = extract("---\ntitle: X\n---\nbody");
        let fm = doc.front_matter.unwrap();
        assert_eq!(fm["title"], Value::from("X"));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_unclosed_block_is_identity() {
        let src = "---\ntitle: X\nno closing delimiter";
        let doc = extract(src);
        assert_eq!(doc.front_matter, None);
        assert_eq!(doc.body, src);
    }

    #[test]
    fn test_decode_failure_keeps_entire_original_text() {
        let src = "---\ntitle: [unclosed\n---\nbody";
        let doc = extract(src);
        assert_eq!(doc.front_matter, None);
        assert_eq!(doc.body, src, "delimiters must stay in the body");
    }

    #[test]
    fn test_empty_body() {
        let doc = extract("---\ntitle: X\n---\n");
        assert!(doc.front_matter.is_some());
        assert_eq!(doc.body, "");
    }

    #[test]
    fn test_trailing_spaces_on_delimiter_lines() {
        let doc = extract("---  \ntitle: X\n--- \nbody");
        assert!(doc.front_matter.is_some());
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_nested_values_decode() {
        let doc = extract("---\nauthors:\n  - name: Ada\n  - name: Grace\ntags: [a, b]\n---\nx");
        let fm = doc.front_matter.unwrap();
        assert!(fm["authors"].is_sequence());
        assert_eq!(fm["tags"][1], Value::from("b"));
    }
}
