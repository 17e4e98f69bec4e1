//! The diagram rendering engine boundary.

use std::time::Duration;

use ureq::Agent;

use crate::language::DiagramLanguage;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure rendering a single diagram block.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("diagram service returned {status}: {message}")]
    Service { status: u16, message: String },
}

/// Renders one diagram source to embeddable SVG markup.
///
/// Errors surface per invocation; an engine failure for one block must
/// not carry state over to the next call.
pub trait DiagramEngine: Send + Sync {
    fn render(&self, language: DiagramLanguage, source: &str) -> Result<String, DiagramError>;
}

/// [`DiagramEngine`] backed by a Kroki server.
///
/// One agent is reused across render calls for connection pooling.
pub struct KrokiEngine {
    server_url: String,
    agent: Agent,
}

impl KrokiEngine {
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_timeout(server_url, DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(server_url: impl Into<String>, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            server_url: server_url.into(),
            agent,
        }
    }
}

impl DiagramEngine for KrokiEngine {
    fn render(&self, language: DiagramLanguage, source: &str) -> Result<String, DiagramError> {
        let url = format!(
            "{}/{}/svg",
            self.server_url.trim_end_matches('/'),
            language.kroki_endpoint()
        );

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "text/plain")
            .send(source.as_bytes())
            .map_err(|e| DiagramError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let message = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(DiagramError::Service { status, message });
        }

        body.read_to_string()
            .map_err(|e| DiagramError::Http(e.to_string()))
    }
}
