use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use sitegen_core::build_site;
use std::path::Path;

use crate::config::load_build_config;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("source")
                .value_name("CONTENT_DIR")
                .help("Directory containing markdown files, toc, vars and templates")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT_DIR")
                .help("Output directory for generated site")
                .required(true),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = load_build_config(args)?;
    let build_config = config.build_config();

    let source_dir = Path::new(&build_config.source);
    let output_dir = Path::new(&build_config.output);
    tracing::info!("Content dir: {}", source_dir.display());

    let report = build_site(config.site_options(), source_dir, output_dir)
        .with_context(|| format!("Build of {} failed", source_dir.display()))?;

    let warnings = report.warnings().count();
    println!(
        "Built {} pages{} with {} link warnings in {}",
        report.pages.len(),
        if report.index.is_some() { " and index" } else { "" },
        warnings,
        output_dir.display()
    );
    if report.asset_failures > 0 {
        println!("{} assets could not be copied", report.asset_failures);
    }

    Ok(())
}
