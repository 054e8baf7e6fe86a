//! Configuration management for notebook-toc.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project (`.notebook-toc.toml`) and user config files
//!
//! Priority: CLI > project file > user file > built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;

use crate::rewriter::RewriteOptions;

/// Project config file looked up in the current directory
pub const PROJECT_CONFIG_FILE: &str = ".notebook-toc.toml";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "notebook-toc")]
#[command(about = "Color notebook headings and add a linked table of contents")]
#[command(version)]
pub struct Args {
    /// Notebook to rewrite
    pub input: PathBuf,

    /// Heading colors, first for level 1 (repeatable)
    #[arg(long = "color", value_name = "COLOR")]
    pub colors: Vec<String>,

    #[arg(long, help = "Color used when no palette is given")]
    pub default_color: Option<String>,

    #[arg(long, help = "Do not write the output file")]
    pub no_save: bool,

    #[arg(long, help = "Print the rewritten notebook to stdout")]
    pub stdout: bool,

    #[arg(long = "max-level", help = "Deepest heading level to recognise (1-6)")]
    pub max_heading_level: Option<u8>,

    #[arg(long, help = "Prefix for generated anchors")]
    pub anchor_prefix: Option<String>,

    #[arg(long = "suffix", help = "Output file suffix (default: chulo)")]
    pub output_suffix: Option<String>,

    #[arg(long, help = "Heading of the table of contents cell")]
    pub toc_title: Option<String>,

    #[arg(long, help = "Explicit config file (skips project/user lookup)")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Settings that may come from a TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub colors: Option<Vec<String>>,
    pub default_color: Option<String>,
    pub save: Option<bool>,
    pub max_heading_level: Option<u8>,
    pub anchor_prefix: Option<String>,
    pub output_suffix: Option<String>,
    pub toc_title: Option<String>,
    pub toc_position: Option<usize>,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid notebook-toc config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Lay `self` over `options`
    fn apply(self, options: &mut RewriteOptions) {
        if let Some(colors) = self.colors {
            options.colors = colors;
        }
        if let Some(color) = self.default_color {
            options.default_color = color;
        }
        if let Some(save) = self.save {
            options.save = save;
        }
        if let Some(level) = self.max_heading_level {
            options.max_heading_level = level;
        }
        if let Some(prefix) = self.anchor_prefix {
            options.anchor_prefix = prefix;
        }
        if let Some(suffix) = self.output_suffix {
            options.output_suffix = suffix;
        }
        if let Some(title) = self.toc_title {
            options.toc_title = title;
        }
        if let Some(position) = self.toc_position {
            options.toc_position = position;
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub options: RewriteOptions,
    /// Print the result instead of (or besides) saving it
    pub print: bool,
    /// Config files that were applied, lowest priority first
    pub config_files: Vec<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_files = match &args.config {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                vec![path.clone()]
            }
            None => Self::default_config_files(),
        };

        let mut options = RewriteOptions::default();
        for path in &config_files {
            FileConfig::load(path)?.apply(&mut options);
        }

        if !args.colors.is_empty() {
            options.colors = args.colors;
        }
        if let Some(color) = args.default_color {
            options.default_color = color;
        }
        if args.no_save {
            options.save = false;
        }
        if let Some(level) = args.max_heading_level {
            options.max_heading_level = level;
        }
        if let Some(prefix) = args.anchor_prefix {
            options.anchor_prefix = prefix;
        }
        if let Some(suffix) = args.output_suffix {
            options.output_suffix = suffix;
        }
        if let Some(title) = args.toc_title {
            options.toc_title = title;
        }

        validate(&options)?;

        Ok(Config {
            input: args.input,
            options,
            print: args.stdout,
            config_files,
            log_level: args.log_level,
        })
    }

    /// Existing config files: user-global first, then project
    fn default_config_files() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // ~/.config/notebook-toc/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("notebook-toc").join("config.toml"));
        }

        // ./.notebook-toc.toml
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(PROJECT_CONFIG_FILE));
        }

        candidates.into_iter().filter(|p| p.is_file()).collect()
    }

    pub fn has_project_config(&self) -> bool {
        self.config_files
            .iter()
            .any(|p| p.file_name().is_some_and(|n| n == PROJECT_CONFIG_FILE))
    }
}

fn validate(options: &RewriteOptions) -> Result<()> {
    if options.output_suffix.is_empty() {
        bail!("output suffix must not be empty");
    }
    if !(1..=crate::parser::MAX_HEADING_LEVEL).contains(&options.max_heading_level) {
        bail!(
            "max heading level must be between 1 and {}, got {}",
            crate::parser::MAX_HEADING_LEVEL,
            options.max_heading_level
        );
    }
    Ok(())
}
