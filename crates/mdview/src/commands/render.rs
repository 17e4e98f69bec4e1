//! `mdview render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mdview_diagrams::KrokiEngine;
use mdview_pipeline::RenderPipeline;

use crate::error::CliError;
use crate::output::Output;

const MOUNT_ID: &str = "cli";

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Markdown file to render.
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Kroki server URL for diagram rendering.
    #[arg(long, env = "MDVIEW_KROKI_URL", default_value = "https://kroki.io")]
    kroki_url: String,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the output
    /// cannot be written.
    pub fn execute(self, output: &Output) -> Result<(), CliError> {
        let text = std::fs::read_to_string(&self.input)?;

        let pipeline = RenderPipeline::new(Box::new(KrokiEngine::new(self.kroki_url)));
        pipeline.mounts().create(MOUNT_ID);
        pipeline.render(&text, MOUNT_ID);
        let html = pipeline.mounts().html(MOUNT_ID).unwrap_or_default();

        match &self.output_file {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{html}")?;
            }
        }
        Ok(())
    }
}
