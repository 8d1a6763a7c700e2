use super::ids::PartId;
use std::fmt;

/// Sequence Ontology term for an assembly component (used for both assembly boundaries).
pub const SO_ASSEMBLY_COMPONENT: &str = "http://identifiers.org/so/SO:0000143";
/// Sequence Ontology term for a ribosome entry site.
pub const SO_RBS: &str = "http://identifiers.org/so/SO:0000139";
/// Sequence Ontology term for a coding sequence.
pub const SO_CDS: &str = "http://identifiers.org/so/SO:0000316";
/// Sequence Ontology term for a gene.
pub const SO_GENE: &str = "http://identifiers.org/so/SO:0000704";

/// BioPAX type shared by every part produced by the converter.
pub const BIOPAX_DNA_REGION: &str = "http://www.biopax.org/release/biopax-level3.owl#DnaRegion";

/// Strength token used in display ids when no expression strength is in effect.
pub const NO_STRENGTH_TOKEN: &str = "None";

/// The role a part plays within a gene assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartRole {
    FivePrimeBoundary,
    ThreePrimeBoundary,
    Rbs,
    Cds,
    Gene,
}

impl PartRole {
    /// Returns the Sequence Ontology URI written as the part's `sbol:role`.
    pub fn sequence_ontology_term(self) -> &'static str {
        match self {
            PartRole::FivePrimeBoundary | PartRole::ThreePrimeBoundary => SO_ASSEMBLY_COMPONENT,
            PartRole::Rbs => SO_RBS,
            PartRole::Cds => SO_CDS,
            PartRole::Gene => SO_GENE,
        }
    }

    /// Suffix appended to the display id of parts with this role.
    pub fn display_suffix(self) -> &'static str {
        match self {
            PartRole::FivePrimeBoundary => "5_prime_assembly",
            PartRole::ThreePrimeBoundary => "3_prime_assembly",
            PartRole::Rbs => "rbs",
            PartRole::Cds => "cds",
            PartRole::Gene => "gene",
        }
    }

    pub fn is_boundary(self) -> bool {
        matches!(
            self,
            PartRole::FivePrimeBoundary | PartRole::ThreePrimeBoundary
        )
    }

    /// Recovers a role from a serialized Sequence Ontology term.
    ///
    /// Both boundaries share the assembly-component term, so the display id suffix decides
    /// which side a boundary sits on.
    ///
    /// # Arguments
    ///
    /// * `term` - The `sbol:role` URI.
    /// * `display_id` - The display id of the part carrying the role.
    ///
    /// # Return
    ///
    /// Returns `None` for terms the converter never writes.
    pub fn from_term(term: &str, display_id: &str) -> Option<Self> {
        match term {
            SO_ASSEMBLY_COMPONENT => {
                if display_id.ends_with(PartRole::ThreePrimeBoundary.display_suffix()) {
                    Some(PartRole::ThreePrimeBoundary)
                } else {
                    Some(PartRole::FivePrimeBoundary)
                }
            }
            SO_RBS => Some(PartRole::Rbs),
            SO_CDS => Some(PartRole::Cds),
            SO_GENE => Some(PartRole::Gene),
            _ => None,
        }
    }
}

impl fmt::Display for PartRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PartRole::FivePrimeBoundary => "5' assembly region",
            PartRole::ThreePrimeBoundary => "3' assembly region",
            PartRole::Rbs => "RBS",
            PartRole::Cds => "CDS",
            PartRole::Gene => "gene",
        };
        f.write_str(label)
    }
}

/// A placeholder component definition.
///
/// Gene parts additionally own their primary structure: the ordered list of parts they are
/// assembled from. The list is only populated through
/// [`SbolDocument::assemble_primary_structure`](super::document::SbolDocument::assemble_primary_structure)
/// so that every referenced id belongs to the same document.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    display_id: String,
    role: PartRole,
    uniprot_id: Option<String>,
    target_strength: Option<f64>,
    pub(crate) assembly: Vec<PartId>,
}

impl Part {
    /// Creates a part with an explicit display id, stored as given.
    ///
    /// The role-specific constructors build their display ids with [`escape_display_token`];
    /// this one is meant for ids that are already in that form, such as ids read back from a
    /// written document.
    pub fn new(display_id: &str, role: PartRole) -> Self {
        Self {
            display_id: display_id.to_string(),
            role,
            uniprot_id: None,
            target_strength: None,
            assembly: Vec::new(),
        }
    }

    /// Creates the 5' or 3' assembly-region placeholder shared by all genes of a reaction.
    pub fn boundary(reaction_id: &str, role: PartRole) -> Self {
        debug_assert!(role.is_boundary());
        Self::new(
            &format!(
                "{}_{}",
                escape_display_token(reaction_id),
                role.display_suffix()
            ),
            role,
        )
    }

    /// Creates the top-level gene placeholder for one enzyme/strength variant.
    pub fn gene(uniprot_id: &str, strength: Option<f64>) -> Self {
        Self::new(
            &variant_display_id(uniprot_id, strength, PartRole::Gene),
            PartRole::Gene,
        )
        .with_uniprot_id(uniprot_id)
    }

    /// Creates the RBS placeholder for one enzyme at the given target strength.
    pub fn rbs(uniprot_id: &str, strength: f64) -> Self {
        Self::new(
            &variant_display_id(uniprot_id, Some(strength), PartRole::Rbs),
            PartRole::Rbs,
        )
        .with_target_strength(strength)
    }

    /// Creates the CDS placeholder for one enzyme/strength variant.
    pub fn cds(uniprot_id: &str, strength: Option<f64>) -> Self {
        Self::new(
            &variant_display_id(uniprot_id, strength, PartRole::Cds),
            PartRole::Cds,
        )
        .with_uniprot_id(uniprot_id)
    }

    pub fn with_uniprot_id(mut self, uniprot_id: &str) -> Self {
        self.uniprot_id = Some(uniprot_id.to_string());
        self
    }

    pub fn with_target_strength(mut self, strength: f64) -> Self {
        self.target_strength = Some(strength);
        self
    }

    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    pub fn role(&self) -> PartRole {
        self.role
    }

    pub fn uniprot_id(&self) -> Option<&str> {
        self.uniprot_id.as_deref()
    }

    pub fn target_strength(&self) -> Option<f64> {
        self.target_strength
    }

    /// The ordered parts this gene is assembled from; empty for every other role.
    pub fn assembly(&self) -> &[PartId] {
        &self.assembly
    }
}

/// Formats an expression strength as its shortest decimal form, or the `None` token.
pub fn strength_token(strength: Option<f64>) -> String {
    match strength {
        Some(value) => format!("{}", value),
        None => NO_STRENGTH_TOKEN.to_string(),
    }
}

fn variant_display_id(uniprot_id: &str, strength: Option<f64>, role: PartRole) -> String {
    format!(
        "{}_{}_{}",
        escape_display_token(uniprot_id),
        escape_display_token(&strength_token(strength)),
        role.display_suffix()
    )
}

/// Escapes one component of a display id into `[A-Za-z0-9_]`.
///
/// ASCII letters and digits are kept. A literal `_` becomes `__`, any other ASCII character
/// becomes `_xHH_` and anything beyond ASCII becomes `_uHHHHHH_` (upper-case hex). Escapes have
/// a fixed width, and the single `_` that joins components is never followed by `_`, `x` or
/// `u` (strength tokens start with a digit or `N`, role suffixes with a digit or `r`, `c`, `g`),
/// so distinct inputs always give distinct display ids.
pub fn escape_display_token(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            c if c.is_ascii_alphanumeric() => escaped.push(c),
            '_' => escaped.push_str("__"),
            c if c.is_ascii() => escaped.push_str(&format!("_x{:02X}_", c as u32)),
            c => escaped.push_str(&format!("_u{:06X}_", c as u32)),
        }
    }
    escaped
}

/// Checks the SBOL display id grammar: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_display_id(display_id: &str) -> bool {
    let mut chars = display_id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_parts_are_named_after_the_reaction() {
        let five = Part::boundary("RP1", PartRole::FivePrimeBoundary);
        let three = Part::boundary("RP1", PartRole::ThreePrimeBoundary);

        assert_eq!(five.display_id(), "RP1_5_prime_assembly");
        assert_eq!(three.display_id(), "RP1_3_prime_assembly");
        assert_eq!(five.role().sequence_ontology_term(), SO_ASSEMBLY_COMPONENT);
        assert_eq!(three.role().sequence_ontology_term(), SO_ASSEMBLY_COMPONENT);
    }

    #[test]
    fn variant_parts_encode_enzyme_and_strength() {
        assert_eq!(Part::gene("P0A1", Some(10000.0)).display_id(), "P0A1_10000_gene");
        assert_eq!(Part::rbs("P0A1", 20000.0).display_id(), "P0A1_20000_rbs");
        assert_eq!(Part::cds("P0A1", Some(30000.0)).display_id(), "P0A1_30000_cds");
    }

    #[test]
    fn absent_strength_uses_the_none_token() {
        assert_eq!(Part::gene("P0A1", None).display_id(), "P0A1_None_gene");
        assert_eq!(Part::cds("P0A1", None).display_id(), "P0A1_None_cds");
    }

    #[test]
    fn fractional_strengths_are_escaped() {
        let rbs = Part::rbs("Q9XYZ1", 1.5);
        assert_eq!(rbs.display_id(), "Q9XYZ1_1_x2E_5_rbs");
        assert_eq!(rbs.target_strength(), Some(1.5));
        assert!(is_valid_display_id(rbs.display_id()));
    }

    #[test]
    fn distinct_enzyme_ids_never_share_a_display_id() {
        let dotted = Part::cds("A.1", None);
        let underscored = Part::cds("A_1", None);
        assert_eq!(dotted.display_id(), "A_x2E_1_None_cds");
        assert_eq!(underscored.display_id(), "A__1_None_cds");
        assert_ne!(dotted.display_id(), underscored.display_id());

        let fractional = Part::rbs("A", 1.5);
        let underscored = Part::rbs("A_1", 5.0);
        assert_ne!(fractional.display_id(), underscored.display_id());

        let trailing = Part::gene("A_", Some(5.0));
        let plain = Part::gene("A", Some(5.0));
        assert_ne!(trailing.display_id(), plain.display_id());

        for part in [dotted, underscored, fractional, trailing, plain] {
            assert!(is_valid_display_id(part.display_id()));
        }
    }

    #[test]
    fn escaping_keeps_alphanumerics_and_encodes_everything_else() {
        assert_eq!(escape_display_token("P0A1"), "P0A1");
        assert_eq!(escape_display_token("rxn_1"), "rxn__1");
        assert_eq!(escape_display_token("a-b"), "a_x2D_b");
        assert_eq!(escape_display_token("µ"), "_u0000B5_");
        assert_eq!(
            Part::boundary("rxn.1", PartRole::ThreePrimeBoundary).display_id(),
            "rxn_x2E_1_3_prime_assembly"
        );
    }

    #[test]
    fn annotations_are_attached_per_role() {
        assert_eq!(Part::gene("P0A1", None).uniprot_id(), Some("P0A1"));
        assert_eq!(Part::cds("P0A1", None).uniprot_id(), Some("P0A1"));
        assert_eq!(Part::rbs("P0A1", 10000.0).uniprot_id(), None);
    }

    #[test]
    fn role_round_trips_through_its_term() {
        for (part, role) in [
            (Part::boundary("R1", PartRole::FivePrimeBoundary), PartRole::FivePrimeBoundary),
            (Part::boundary("R1", PartRole::ThreePrimeBoundary), PartRole::ThreePrimeBoundary),
            (Part::rbs("P1", 1.0), PartRole::Rbs),
            (Part::cds("P1", None), PartRole::Cds),
            (Part::gene("P1", None), PartRole::Gene),
        ] {
            assert_eq!(
                PartRole::from_term(role.sequence_ontology_term(), part.display_id()),
                Some(role)
            );
        }
        assert_eq!(PartRole::from_term("http://example.org/unknown", "x"), None);
    }

    #[test]
    fn display_id_grammar() {
        assert!(is_valid_display_id("_R1"));
        assert!(is_valid_display_id("P0A1_None_gene"));
        assert!(!is_valid_display_id(""));
        assert!(!is_valid_display_id("1abc"));
        assert!(!is_valid_display_id("a-b"));
    }
}
