//! # Core Module
//!
//! Foundational data structures and file-format handling for the converter.
//!
//! - **Parts and Documents** ([`models`]) - SBOL component definitions, their roles, gene
//!   assemblies, and the identity-indexed document that owns them.
//! - **File I/O** ([`io`]) - XML element trees, the SBML model view used by the scanner, and
//!   SBOL 2 RDF/XML serialization.

pub mod io;
pub mod models;
