use crate::cli::Cli;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use sbml2sbol::{engine::progress::ProgressReporter, workflows};
use tracing::{info, warn};

pub fn run(args: &Cli) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = config::build_config(args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Converting {} input path(s) (RBS modeling {})...",
        app_config.inputs.len(),
        if app_config.core_config.rbs_enabled() {
            "on"
        } else {
            "off"
        }
    );
    info!("Invoking the core conversion workflow...");

    let result = workflows::convert::run(
        &app_config.inputs,
        &app_config.output,
        &app_config.core_config,
        &reporter,
    )?;
    let summary = result.summary;

    if summary.genes_assembled == 0 {
        warn!("No enzyme candidates were found; the written document holds no genes.");
        println!("Warning: no enzyme candidates found in the pathway reactions.");
    }
    if summary.enzymes_dropped > 0 {
        println!(
            "  {} enzyme candidate(s) beyond the limit of {} per reaction were skipped.",
            summary.enzymes_dropped, app_config.core_config.max_prot_per_react
        );
    }

    println!(
        "✓ {} gene variant(s) for {} reaction(s) ({} parts) written to: {}",
        summary.genes_assembled,
        summary.reactions,
        summary.unique_parts,
        result.output.display()
    );

    Ok(())
}
