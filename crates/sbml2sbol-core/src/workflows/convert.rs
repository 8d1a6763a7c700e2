use crate::core::models::document::SbolDocument;
use crate::engine::assembly::{self, BuildSummary};
use crate::engine::config::ConversionConfig;
use crate::engine::error::ConversionError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scanner::{self, ReactionEnzymes};
use crate::engine::writer;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub output: PathBuf,
    pub summary: BuildSummary,
}

/// Converts the rpSBML models reachable from `inputs` into one SBOL document at `output`.
///
/// Inputs may be model files or directories of model files. An input set without any
/// pathway reactions still produces a valid, empty document.
#[instrument(skip_all, name = "convert_workflow")]
pub fn run(
    inputs: &[PathBuf],
    output: &Path,
    config: &ConversionConfig,
    reporter: &ProgressReporter,
) -> Result<ConversionResult, ConversionError> {
    // === Phase 1: Scan models ===
    let mapping = scan_phase(inputs, config, reporter)?;

    // === Phase 2: Build assemblies ===
    let (document, summary) = build_phase(&mapping, config, reporter)?;

    // === Phase 3: Write document ===
    reporter.report(Progress::PhaseStart { name: "Writing" });
    writer::write_document(&document, output)?;
    reporter.report(Progress::PhaseFinish);

    info!(
        "Conversion complete: {} reaction(s), {} gene variant(s), {} part(s).",
        summary.reactions, summary.genes_assembled, summary.unique_parts
    );
    Ok(ConversionResult {
        output: output.to_path_buf(),
        summary,
    })
}

/// Runs the scanning and building phases without writing anything.
#[instrument(skip_all, name = "convert_in_memory")]
pub fn build(
    inputs: &[PathBuf],
    config: &ConversionConfig,
    reporter: &ProgressReporter,
) -> Result<(SbolDocument, BuildSummary), ConversionError> {
    let mapping = scan_phase(inputs, config, reporter)?;
    build_phase(&mapping, config, reporter)
}

fn scan_phase(
    inputs: &[PathBuf],
    config: &ConversionConfig,
    reporter: &ProgressReporter,
) -> Result<ReactionEnzymes, ConversionError> {
    reporter.report(Progress::PhaseStart { name: "Scanning" });
    let mapping = scanner::scan(inputs, &config.pathway_id, reporter)?;
    reporter.report(Progress::PhaseFinish);
    Ok(mapping)
}

fn build_phase(
    mapping: &ReactionEnzymes,
    config: &ConversionConfig,
    reporter: &ProgressReporter,
) -> Result<(SbolDocument, BuildSummary), ConversionError> {
    reporter.report(Progress::PhaseStart { name: "Building" });
    let built = assembly::build_document(mapping, config)?;
    if built.1.enzymes_dropped > 0 {
        reporter.report(Progress::Message(format!(
            "{} enzyme candidate(s) dropped by the per-reaction limit of {}",
            built.1.enzymes_dropped, config.max_prot_per_react
        )));
    }
    reporter.report(Progress::PhaseFinish);
    Ok(built)
}
