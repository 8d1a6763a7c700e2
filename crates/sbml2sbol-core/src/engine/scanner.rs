use super::error::ConversionError;
use super::progress::{Progress, ProgressReporter};
use crate::core::io::sbml::{SbmlDocument, SbmlError, SbmlModel};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Group member excluded from enzyme extraction.
pub const TARGET_SINK: &str = "targetSink";
/// Path from a reaction's `<annotation>` to the vendor block holding enzyme candidates.
pub const VENDOR_ANNOTATION_PATH: [&str; 3] = ["RDF", "BRSynth", "brsynth"];
/// Name of the vendor sub-block whose children name candidate enzymes.
pub const ENZYME_CANDIDATES_BLOCK: &str = "selenzyme";
/// Extensions recognized when enumerating a model directory.
pub const MODEL_FILE_EXTENSIONS: [&str; 2] = ["xml", "sbml"];

/// Ordered mapping from reaction id to candidate enzyme ids.
///
/// Reaction keys keep their first-insertion order; enzyme lists keep document order and
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionEnzymes {
    entries: IndexMap<String, Vec<String>>,
}

impl ReactionEnzymes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reaction_id: &str, enzyme_id: &str) {
        self.entries
            .entry(reaction_id.to_string())
            .or_default()
            .push(enzyme_id.to_string());
    }

    pub fn get(&self, reaction_id: &str) -> Option<&[String]> {
        self.entries.get(reaction_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(reaction, enzymes)| (reaction.as_str(), enzymes.as_slice()))
    }

    pub fn reaction_count(&self) -> usize {
        self.entries.len()
    }

    pub fn enzyme_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expands input paths into the list of model files to scan.
///
/// Directories contribute their model files (non-recursive, sorted by name); plain files are
/// taken as given.
pub fn collect_model_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ConversionError> {
    let mut files = Vec::new();
    for input in inputs {
        let metadata = fs::metadata(input).map_err(|source| ConversionError::Input {
            path: input.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            files.push(input.clone());
            continue;
        }

        let entries = fs::read_dir(input).map_err(|source| ConversionError::Input {
            path: input.clone(),
            source,
        })?;
        let mut found = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| ConversionError::Input {
                    path: input.clone(),
                    source,
                })?
                .path();
            if path.is_file() && has_model_extension(&path) {
                found.push(path);
            }
        }
        found.sort();
        if found.is_empty() {
            warn!("No model files found in directory {:?}", input);
        }
        debug!("Found {} model file(s) in {:?}", found.len(), input);
        files.extend(found);
    }
    Ok(files)
}

fn has_model_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MODEL_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Scans every model reachable from `inputs` into a single mapping.
///
/// # Errors
///
/// Stops at the first unreadable input, unparsable model, or model lacking the pathway group.
pub fn scan(
    inputs: &[PathBuf],
    pathway_id: &str,
    reporter: &ProgressReporter,
) -> Result<ReactionEnzymes, ConversionError> {
    let files = collect_model_files(inputs)?;
    info!(
        "Scanning {} model file(s) for pathway group '{}'.",
        files.len(),
        pathway_id
    );
    reporter.report(Progress::ScanStart {
        total_files: files.len() as u64,
    });

    let mut mapping = ReactionEnzymes::new();
    for path in &files {
        let added = scan_model_file(path, pathway_id, &mut mapping)?;
        reporter.report(Progress::ModelScanned {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            enzymes: added,
        });
    }

    reporter.report(Progress::ScanFinish);
    info!(
        "Collected {} enzyme candidate(s) across {} reaction(s).",
        mapping.enzyme_count(),
        mapping.reaction_count()
    );
    Ok(mapping)
}

/// Reads one model file and appends its enzyme candidates to `mapping`.
///
/// # Return
///
/// The number of enzyme entries the file contributed.
pub fn scan_model_file(
    path: &Path,
    pathway_id: &str,
    mapping: &mut ReactionEnzymes,
) -> Result<usize, ConversionError> {
    debug!("Reading model file {:?}", path);
    let document = SbmlDocument::read_from_path(path)
        .map_err(|e| ConversionError::from_model_error(path.to_path_buf(), e))?;
    let added = document
        .model()
        .and_then(|model| extract_enzymes(&model, pathway_id, mapping))
        .map_err(|e| ConversionError::from_model_error(path.to_path_buf(), e))?;
    debug!("{:?} contributed {} enzyme candidate(s).", path, added);
    Ok(added)
}

/// Appends the enzyme candidates of every pathway member of `model` to `mapping`.
///
/// Members referring to the target sink are skipped. Reactions without a candidate block
/// contribute nothing.
///
/// # Errors
///
/// Fails if the pathway group is missing or a member refers to an unknown reaction.
pub fn extract_enzymes(
    model: &SbmlModel<'_>,
    pathway_id: &str,
    mapping: &mut ReactionEnzymes,
) -> Result<usize, SbmlError> {
    let group = model.group(pathway_id)?;
    let mut added = 0;
    let mut members = 0;

    for reaction_id in group.member_refs() {
        members += 1;
        if reaction_id == TARGET_SINK {
            continue;
        }
        let reaction = model
            .reaction(reaction_id)
            .ok_or_else(|| SbmlError::UnknownReaction {
                group_id: pathway_id.to_string(),
                reaction_id: reaction_id.to_string(),
            })?;

        let Some(vendor_block) = reaction
            .annotation()
            .and_then(|annotation| annotation.path(&VENDOR_ANNOTATION_PATH))
        else {
            debug!("Reaction '{}' has no vendor annotation block.", reaction_id);
            continue;
        };

        for block in vendor_block.children_named(ENZYME_CANDIDATES_BLOCK) {
            for candidate in &block.children {
                mapping.push(reaction_id, &candidate.name);
                added += 1;
            }
        }
    }

    if members == 0 {
        warn!("Pathway group '{}' has no members.", pathway_id);
    }
    Ok(added)
}
