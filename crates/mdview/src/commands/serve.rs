//! `mdview serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdview_server::{ServerConfig, run_server};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Directory holding the markdown documents.
    #[arg(short, long, default_value = "docs")]
    docs_dir: PathBuf,

    /// Host to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Kroki server URL for diagram rendering.
    #[arg(long, env = "MDVIEW_KROKI_URL", default_value = "https://kroki.io")]
    kroki_url: String,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the docs directory is missing or the
    /// server fails to start.
    pub async fn execute(self, output: &Output) -> Result<(), CliError> {
        if !self.docs_dir.is_dir() {
            return Err(CliError::Server(format!(
                "docs directory not found: {}",
                self.docs_dir.display()
            )));
        }

        output.info(&format!(
            "Serving {} on http://{}:{}",
            self.docs_dir.display(),
            self.host,
            self.port
        ));

        let config = ServerConfig {
            host: self.host,
            port: self.port,
            docs_dir: self.docs_dir,
            kroki_url: self.kroki_url,
        };
        run_server(config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }
}
