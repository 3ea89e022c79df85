use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cpasa-convert")]
#[command(about = "Convert Checkpoint NAT rules to Cisco ASA format")]
pub struct Cli {
    /// Checkpoint NAT rules JSON file.
    pub rules_file: PathBuf,
    /// Checkpoint objects JSON file.
    pub objects_file: PathBuf,
    /// Where to write the converted ASA rules.
    pub output_file: PathBuf,
    /// Optional TOML settings file (interface names, masks, section labels).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the translation log to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log per-rule progress (info level) unless RUST_LOG is set.
    #[arg(short, long)]
    pub verbose: bool,
    /// Statistics output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Exit non-zero when any rule fails to translate.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
