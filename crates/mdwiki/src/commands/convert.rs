//! `convert` command implementation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use mdwiki_config::{CliSettings, Config, OutputConfig, ParserConfig};
use mdwiki_markdown::{ParseOptions, parse};
use mdwiki_renderer::WikiRenderer;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (`-` reads standard input).
    input: PathBuf,

    /// Write the markup to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdwiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strip leading and trailing whitespace from the markup.
    #[arg(long)]
    trim: bool,

    /// Do not end the markup with a newline.
    #[arg(long)]
    no_trailing_newline: bool,

    /// Enable verbose output (show debug logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, reading the input, or
    /// writing the markup fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            trim: self.trim.then_some(true),
            trailing_newline: self.no_trailing_newline.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let markdown = read_input(&self.input)?;
        let parsed = parse(&markdown, &parse_options(&config.parser));
        let rendered =
            WikiRenderer::new().render_to_string(parsed.source(), parsed.document().root())?;
        let markup = finish_output(rendered, &config.output);

        match &self.output {
            Some(path) => {
                std::fs::write(path, markup)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(markup.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Read markdown from a file, or from standard input for `-`.
fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        return Ok(io::read_to_string(io::stdin().lock())?);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn parse_options(config: &ParserConfig) -> ParseOptions {
    ParseOptions {
        tables: config.tables,
        strikethrough: config.strikethrough,
        tasklists: config.tasklists,
        footnotes: config.footnotes,
        definition_lists: config.definition_lists,
        autolinks: config.autolinks,
    }
}

/// Apply the output settings to rendered markup.
fn finish_output(rendered: String, config: &OutputConfig) -> String {
    let mut markup = if config.trim {
        rendered.trim().to_owned()
    } else {
        rendered
    };
    if config.trailing_newline && !markup.is_empty() && !markup.ends_with('\n') {
        markup.push('\n');
    }
    markup
}
