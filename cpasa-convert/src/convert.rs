//! The conversion command.
//!
//! Load settings and the object catalog, translate the policy, write the
//! ASA file, then print statistics. Unreadable or malformed inputs and an
//! unwritable output are fatal. Rules that fail individually only show up
//! in the statistics and the log.

use anyhow::{bail, Context, Result};
use cpasa_convert::catalog::ObjectCatalog;
use cpasa_convert::config::{default_config, load_config};
use cpasa_convert::pipeline::Translator;
use cpasa_convert::report::{render_stats_text, TranslateReport};
use json_record_core::parse_file;
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::path_guard::ensure_output_distinct;

pub fn run_convert(args: Cli) -> Result<()> {
    ensure_output_distinct(&args.output_file, &args.rules_file, &args.objects_file)?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };

    info!(
        rules = %args.rules_file.display(),
        objects = %args.objects_file.display(),
        output = %args.output_file.display(),
        "starting NAT rule conversion"
    );

    let catalog = ObjectCatalog::load_file(&args.objects_file)
        .with_context(|| format!("failed to load objects from {}", args.objects_file.display()))?;
    info!(objects = catalog.len(), "object catalog ready");

    let policy = parse_file(&args.rules_file)
        .with_context(|| format!("failed to parse {}", args.rules_file.display()))?;

    let translator = Translator::new(catalog, config);
    let translation = translator
        .translate(&policy)
        .with_context(|| format!("invalid input {}", args.rules_file.display()))?;

    translation
        .save(&args.output_file)
        .with_context(|| format!("failed to write ASA rules {}", args.output_file.display()))?;

    match args.format {
        OutputFormat::Text => println!("{}", render_stats_text(&translation.stats)),
        OutputFormat::Json => {
            let report = TranslateReport {
                output: args.output_file.display().to_string(),
                policy: translation.policy,
                stats: translation.stats,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if args.strict && translation.stats.failed > 0 {
        bail!(
            "strict mode failed: {} of {} rules did not translate",
            translation.stats.failed,
            translation.stats.total
        );
    }
    Ok(())
}
