//! Fetching document text by name.

use serde::Deserialize;
use ureq::Agent;

/// Failure fetching or decoding a named document.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("document endpoint returned {0}")]
    Status(u16),
    #[error("invalid document payload: {0}")]
    Decode(String),
}

/// Resolves a document name to its raw text.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, name: &str) -> Result<String, SourceError>;
}

#[derive(Deserialize)]
struct DocumentPayload {
    content: String,
}

/// [`DocumentSource`] backed by the host's document endpoint:
/// `GET {base}/api/markdown/{name}` returning `{"content": "..."}`.
pub struct HttpDocumentSource {
    base_url: String,
    agent: Agent,
}

impl HttpDocumentSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            base_url: base_url.into(),
            agent,
        }
    }
}

impl DocumentSource for HttpDocumentSource {
    fn fetch(&self, name: &str) -> Result<String, SourceError> {
        let url = format!(
            "{}/api/markdown/{name}",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(SourceError::Status(status));
        }

        let payload: DocumentPayload = response
            .into_body()
            .read_json()
            .map_err(|e| SourceError::Decode(e.to_string()))?;
        Ok(payload.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(SourceError::Status(404).to_string(), "document endpoint returned 404");
    }
}
