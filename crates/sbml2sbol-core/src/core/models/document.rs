use super::ids::PartId;
use super::part::{Part, PartRole, is_valid_display_id};
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::trace;

pub const DEFAULT_HOMESPACE: &str = "http://liverpool.ac.uk";
pub const DEFAULT_VERSION: &str = "1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Part id {0:?} does not belong to this document")]
    UnknownPart(PartId),

    #[error("Part '{display_id}' has role {role} and cannot carry an assembly")]
    NotAGene { display_id: String, role: PartRole },

    #[error("Gene '{gene}' cannot contain another gene ('{member}')")]
    NestedGene { gene: String, member: String },

    #[error("Gene '{gene}' lists part '{member}' more than once")]
    DuplicateMember { gene: String, member: String },

    #[error("Gene '{0}' cannot be assembled from an empty part list")]
    EmptyAssembly(String),

    #[error("Invalid display id '{0}': must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidDisplayId(String),

    #[error("Invalid homespace '{0}': expected an absolute URI")]
    InvalidHomespace(String),
}

/// Namespace and validation settings of a document.
///
/// Every document carries its own configuration, so independent conversions never share
/// process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbolConfig {
    /// URI prefix of every top-level identity.
    pub homespace: String,
    /// Version appended to compliant identities; empty disables versioned identities.
    pub version: String,
    /// Whether documents are checked before they are written.
    pub validate: bool,
}

impl Default for SbolConfig {
    fn default() -> Self {
        Self {
            homespace: DEFAULT_HOMESPACE.to_string(),
            version: DEFAULT_VERSION.to_string(),
            validate: false,
        }
    }
}

impl SbolConfig {
    pub fn persistent_identity(&self, display_id: &str) -> String {
        format!("{}/{}", self.homespace.trim_end_matches('/'), display_id)
    }

    /// Builds the compliant identity URI `{homespace}/{display_id}/{version}`.
    pub fn identity(&self, display_id: &str) -> String {
        self.versioned(&self.persistent_identity(display_id))
    }

    /// Appends the configured version to a persistent identity.
    pub fn versioned(&self, persistent_identity: &str) -> String {
        if self.version.is_empty() {
            persistent_identity.to_string()
        } else {
            format!("{}/{}", persistent_identity, self.version)
        }
    }
}

/// The output document: every part produced by a conversion, deduplicated by identity.
///
/// Parts are never removed, so iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct SbolDocument {
    config: SbolConfig,
    parts: SlotMap<PartId, Part>,
    identity_map: HashMap<String, PartId>,
}

impl SbolDocument {
    pub fn new(config: SbolConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &SbolConfig {
        &self.config
    }

    pub fn identity_of(&self, part: &Part) -> String {
        self.config.identity(part.display_id())
    }

    /// Adds a part unless a part with the same identity already exists.
    ///
    /// # Arguments
    ///
    /// * `part` - The candidate part. It is dropped if its identity is already registered.
    ///
    /// # Return
    ///
    /// The id of the registered part, either the freshly inserted one or the existing one.
    pub fn get_or_insert(&mut self, part: Part) -> PartId {
        let identity = self.identity_of(&part);
        if let Some(&existing) = self.identity_map.get(&identity) {
            trace!("Reusing existing part {}", identity);
            return existing;
        }
        let id = self.parts.insert(part);
        self.identity_map.insert(identity, id);
        id
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id)
    }

    pub fn part_id_by_identity(&self, identity: &str) -> Option<PartId> {
        self.identity_map.get(identity).copied()
    }

    pub fn part_by_identity(&self, identity: &str) -> Option<&Part> {
        self.part_id_by_identity(identity)
            .and_then(|id| self.parts.get(id))
    }

    pub fn contains_identity(&self, identity: &str) -> bool {
        self.identity_map.contains_key(identity)
    }

    pub fn parts_iter(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.parts.iter()
    }

    pub fn genes_iter(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.parts
            .iter()
            .filter(|(_, part)| part.role() == PartRole::Gene)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Sets the primary structure of a gene, replacing any previous one.
    ///
    /// # Arguments
    ///
    /// * `gene_id` - The gene part to assemble.
    /// * `members` - Ordered parts, 5' to 3'.
    ///
    /// # Errors
    ///
    /// Fails if any id is foreign to this document, if `gene_id` is not a gene, if a member is
    /// itself a gene, or if a member is listed twice.
    pub fn assemble_primary_structure(
        &mut self,
        gene_id: PartId,
        members: &[PartId],
    ) -> Result<(), DocumentError> {
        let gene = self
            .parts
            .get(gene_id)
            .ok_or(DocumentError::UnknownPart(gene_id))?;
        if gene.role() != PartRole::Gene {
            return Err(DocumentError::NotAGene {
                display_id: gene.display_id().to_string(),
                role: gene.role(),
            });
        }
        if members.is_empty() {
            return Err(DocumentError::EmptyAssembly(gene.display_id().to_string()));
        }

        let mut seen = HashSet::with_capacity(members.len());
        for &member_id in members {
            let member = self
                .parts
                .get(member_id)
                .ok_or(DocumentError::UnknownPart(member_id))?;
            if member.role() == PartRole::Gene {
                return Err(DocumentError::NestedGene {
                    gene: gene.display_id().to_string(),
                    member: member.display_id().to_string(),
                });
            }
            if !seen.insert(member_id) {
                return Err(DocumentError::DuplicateMember {
                    gene: gene.display_id().to_string(),
                    member: member.display_id().to_string(),
                });
            }
        }

        if let Some(gene) = self.parts.get_mut(gene_id) {
            gene.assembly = members.to_vec();
        }
        Ok(())
    }

    /// Resolves a gene's assembly into part references.
    pub fn assembly_parts(&self, gene_id: PartId) -> Vec<&Part> {
        self.parts
            .get(gene_id)
            .map(|gene| {
                gene.assembly()
                    .iter()
                    .filter_map(|id| self.parts.get(*id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checks the rules enforced before writing when validation is enabled.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.config.homespace.contains("://") {
            return Err(DocumentError::InvalidHomespace(
                self.config.homespace.clone(),
            ));
        }
        for (_, part) in self.parts.iter() {
            if !is_valid_display_id(part.display_id()) {
                return Err(DocumentError::InvalidDisplayId(
                    part.display_id().to_string(),
                ));
            }
            if !part.assembly().is_empty() && part.role() != PartRole::Gene {
                return Err(DocumentError::NotAGene {
                    display_id: part.display_id().to_string(),
                    role: part.role(),
                });
            }
            for &member in part.assembly() {
                if !self.parts.contains_key(member) {
                    return Err(DocumentError::UnknownPart(member));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> SbolDocument {
        SbolDocument::new(SbolConfig::default())
    }

    #[test]
    fn identity_uses_homespace_display_id_and_version() {
        let doc = document();
        let part = Part::cds("P0A1", None);
        assert_eq!(
            doc.identity_of(&part),
            "http://liverpool.ac.uk/P0A1_None_cds/1"
        );
    }

    #[test]
    fn identity_without_version_is_the_persistent_identity() {
        let config = SbolConfig {
            homespace: "http://example.org/".to_string(),
            version: String::new(),
            validate: false,
        };
        assert_eq!(config.identity("abc"), "http://example.org/abc");
    }

    #[test]
    fn get_or_insert_returns_existing_part_for_same_identity() {
        let mut doc = document();
        let first = doc.get_or_insert(Part::cds("P0A1", Some(10000.0)));
        let second = doc.get_or_insert(Part::cds("P0A1", Some(10000.0)));

        assert_eq!(first, second);
        assert_eq!(doc.len(), 1);
        assert!(doc.contains_identity("http://liverpool.ac.uk/P0A1_10000_cds/1"));
    }

    #[test]
    fn lookup_by_identity_finds_registered_part() {
        let mut doc = document();
        let id = doc.get_or_insert(Part::rbs("P0A1", 10000.0));
        let identity = "http://liverpool.ac.uk/P0A1_10000_rbs/1";

        assert_eq!(doc.part_id_by_identity(identity), Some(id));
        assert_eq!(doc.part_by_identity(identity).unwrap().role(), PartRole::Rbs);
        assert!(doc.part_by_identity("http://liverpool.ac.uk/missing/1").is_none());
    }

    #[test]
    fn parts_iterate_in_insertion_order() {
        let mut doc = document();
        doc.get_or_insert(Part::boundary("R1", PartRole::FivePrimeBoundary));
        doc.get_or_insert(Part::boundary("R1", PartRole::ThreePrimeBoundary));
        doc.get_or_insert(Part::gene("P0A1", None));

        let names: Vec<_> = doc.parts_iter().map(|(_, p)| p.display_id()).collect();
        assert_eq!(
            names,
            vec!["R1_5_prime_assembly", "R1_3_prime_assembly", "P0A1_None_gene"]
        );
    }

    #[test]
    fn assembling_a_gene_records_member_order() {
        let mut doc = document();
        let five = doc.get_or_insert(Part::boundary("R1", PartRole::FivePrimeBoundary));
        let three = doc.get_or_insert(Part::boundary("R1", PartRole::ThreePrimeBoundary));
        let cds = doc.get_or_insert(Part::cds("P0A1", None));
        let gene = doc.get_or_insert(Part::gene("P0A1", None));

        doc.assemble_primary_structure(gene, &[five, cds, three])
            .unwrap();

        let roles: Vec<_> = doc.assembly_parts(gene).iter().map(|p| p.role()).collect();
        assert_eq!(
            roles,
            vec![
                PartRole::FivePrimeBoundary,
                PartRole::Cds,
                PartRole::ThreePrimeBoundary
            ]
        );
        assert_eq!(doc.genes_iter().count(), 1);
    }

    #[test]
    fn reassembling_replaces_previous_structure() {
        let mut doc = document();
        let a = doc.get_or_insert(Part::boundary("R1", PartRole::FivePrimeBoundary));
        let b = doc.get_or_insert(Part::boundary("R2", PartRole::FivePrimeBoundary));
        let cds = doc.get_or_insert(Part::cds("P0A1", None));
        let gene = doc.get_or_insert(Part::gene("P0A1", None));

        doc.assemble_primary_structure(gene, &[a, cds]).unwrap();
        doc.assemble_primary_structure(gene, &[b, cds]).unwrap();

        assert_eq!(doc.part(gene).unwrap().assembly(), &[b, cds]);
    }

    #[test]
    fn assembling_rejects_invalid_structures() {
        let mut doc = document();
        let cds = doc.get_or_insert(Part::cds("P0A1", None));
        let gene = doc.get_or_insert(Part::gene("P0A1", None));
        let other_gene = doc.get_or_insert(Part::gene("P0A2", None));

        assert!(matches!(
            doc.assemble_primary_structure(cds, &[gene]),
            Err(DocumentError::NotAGene { .. })
        ));
        assert!(matches!(
            doc.assemble_primary_structure(gene, &[other_gene]),
            Err(DocumentError::NestedGene { .. })
        ));
        assert!(matches!(
            doc.assemble_primary_structure(gene, &[cds, cds]),
            Err(DocumentError::DuplicateMember { .. })
        ));
        assert!(matches!(
            doc.assemble_primary_structure(gene, &[]),
            Err(DocumentError::EmptyAssembly(_))
        ));
    }

    #[test]
    fn foreign_part_ids_are_rejected() {
        let mut other = document();
        other.get_or_insert(Part::cds("X1", None));
        let foreign = other.get_or_insert(Part::cds("X2", None));

        let mut doc = document();
        let gene = doc.get_or_insert(Part::gene("P0A1", None));
        let err = doc.assemble_primary_structure(gene, &[foreign]);
        assert!(matches!(err, Err(DocumentError::UnknownPart(_))));
    }

    #[test]
    fn validate_rejects_bad_display_ids_and_homespaces() {
        let mut doc = document();
        doc.get_or_insert(Part::new("1bad", PartRole::Cds));
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::InvalidDisplayId(_))
        ));

        let doc = SbolDocument::new(SbolConfig {
            homespace: "liverpool".to_string(),
            ..SbolConfig::default()
        });
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::InvalidHomespace(_))
        ));
    }

    #[test]
    fn empty_document_is_valid() {
        let doc = document();
        assert!(doc.is_empty());
        assert!(doc.validate().is_ok());
    }
}
