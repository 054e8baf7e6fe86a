use std::io::Write;

use anyhow::{Context, Result};

use notebook_toc::config::Config;
use notebook_toc::core::Severity;
use notebook_toc::rewriter::NotebookRewriter;

fn main() -> Result<()> {
    // Parse configuration from command line and config files
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    for path in &config.config_files {
        log::debug!("Applied config {}", path.display());
    }
    if config.has_project_config() {
        log::debug!("Using project config from the current directory");
    }

    let rewriter = NotebookRewriter::new(config.options.clone());
    let outcome = rewriter
        .rewrite_file(&config.input)
        .with_context(|| format!("Failed to rewrite {}", config.input.display()))?;

    for diagnostic in &outcome.report.diagnostics {
        if diagnostic.severity == Severity::Warning {
            match diagnostic.cell {
                Some(cell) => eprintln!("warning: cell {}: {}", cell, diagnostic.message),
                None => eprintln!("warning: {}", diagnostic.message),
            }
        }
    }

    if config.print {
        let text = outcome.notebook.to_json_pretty()?;
        std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("writing to stdout")?;
    }

    if let Some(path) = &outcome.output_path {
        eprintln!("Saved as {}", path.display());
    }

    Ok(())
}
