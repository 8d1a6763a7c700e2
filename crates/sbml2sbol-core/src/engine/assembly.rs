use super::config::ConversionConfig;
use super::scanner::ReactionEnzymes;
use crate::core::models::document::{DocumentError, SbolDocument};
use crate::core::models::ids::PartId;
use crate::core::models::part::{Part, PartRole};
use tracing::{debug, info};

/// Counts describing a populated document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub reactions: usize,
    /// Gene variants assembled, including variants that reused an existing gene part.
    pub genes_assembled: usize,
    /// Enzyme candidates dropped by the per-reaction cap.
    pub enzymes_dropped: usize,
    /// Distinct parts in the document.
    pub unique_parts: usize,
}

/// The boundary pair shared by every gene variant of one reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyRegion {
    pub five_prime: PartId,
    pub three_prime: PartId,
}

/// Builds a fresh document for `mapping` according to `config`.
pub fn build_document(
    mapping: &ReactionEnzymes,
    config: &ConversionConfig,
) -> Result<(SbolDocument, BuildSummary), DocumentError> {
    let mut document = SbolDocument::new(config.sbol.clone());
    let summary = populate_document(&mut document, mapping, config)?;
    Ok((document, summary))
}

/// Adds the parts and assemblies of every reaction in `mapping` to `document`.
///
/// Reactions are processed in mapping order. Each keeps at most
/// `config.max_prot_per_react` enzymes, and each enzyme yields one gene variant per
/// configured strength, or a single variant without RBS when strengths are disabled.
pub fn populate_document(
    document: &mut SbolDocument,
    mapping: &ReactionEnzymes,
    config: &ConversionConfig,
) -> Result<BuildSummary, DocumentError> {
    let mut summary = BuildSummary::default();

    for (reaction_id, enzymes) in mapping.iter() {
        let region = add_assembly_region(document, reaction_id);
        summary.reactions += 1;

        let retained = enzymes.len().min(config.max_prot_per_react);
        summary.enzymes_dropped += enzymes.len() - retained;
        if retained < enzymes.len() {
            debug!(
                "Reaction '{}': keeping {} of {} enzyme candidates.",
                reaction_id,
                retained,
                enzymes.len()
            );
        }

        for uniprot_id in &enzymes[..retained] {
            match &config.strengths {
                Some(strengths) => {
                    for &strength in strengths {
                        add_gene_variant(document, uniprot_id, Some(strength), region)?;
                        summary.genes_assembled += 1;
                    }
                }
                None => {
                    add_gene_variant(document, uniprot_id, None, region)?;
                    summary.genes_assembled += 1;
                }
            }
        }
    }

    summary.unique_parts = document.len();
    info!(
        "Assembled {} gene variant(s) for {} reaction(s) using {} unique part(s).",
        summary.genes_assembled, summary.reactions, summary.unique_parts
    );
    Ok(summary)
}

/// Registers the 5' and 3' assembly-region placeholders of a reaction.
pub fn add_assembly_region(document: &mut SbolDocument, reaction_id: &str) -> AssemblyRegion {
    AssemblyRegion {
        five_prime: document.get_or_insert(Part::boundary(reaction_id, PartRole::FivePrimeBoundary)),
        three_prime: document
            .get_or_insert(Part::boundary(reaction_id, PartRole::ThreePrimeBoundary)),
    }
}

/// Builds one gene variant: `[5', RBS?, CDS, 3']`, with the RBS present iff `strength` is set.
///
/// Parts whose identity already exists in the document are reused.
///
/// # Return
///
/// The id of the (possibly pre-existing) gene part.
pub fn add_gene_variant(
    document: &mut SbolDocument,
    uniprot_id: &str,
    strength: Option<f64>,
    region: AssemblyRegion,
) -> Result<PartId, DocumentError> {
    let rbs = strength.map(|value| document.get_or_insert(Part::rbs(uniprot_id, value)));
    let cds = document.get_or_insert(Part::cds(uniprot_id, strength));
    let gene = document.get_or_insert(Part::gene(uniprot_id, strength));

    let mut members = Vec::with_capacity(4);
    members.push(region.five_prime);
    members.extend(rbs);
    members.push(cds);
    members.push(region.three_prime);

    document.assemble_primary_structure(gene, &members)?;
    Ok(gene)
}
