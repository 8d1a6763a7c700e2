//! SBOL data model: parts, their sequence-ontology roles, and the document that owns them.
//!
//! Parts are stored in a [`document::SbolDocument`] keyed by [`ids::PartId`]; the document keeps
//! an identity index so that a part with a given compliant URI exists at most once.

pub mod document;
pub mod ids;
pub mod part;
