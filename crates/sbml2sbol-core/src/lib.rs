//! # sbml2sbol Core Library
//!
//! Converts annotated metabolic-pathway models (rpSBML) into SBOL gene-assembly descriptions.
//! Each reaction of the heterologous pathway carries candidate enzyme (UniProt) annotations;
//! every candidate becomes one or more placeholder genes assembled from a 5' assembly region,
//! an optional ribosome-binding site, a coding sequence and a 3' assembly region.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer split:
//!
//! - **[`core`]: The Foundation.** Stateless data models for SBOL parts and documents, and the
//!   I/O layer (a namespace-agnostic XML tree, a read-only SBML view, an SBOL RDF/XML reader and
//!   writer).
//!
//! - **[`engine`]: The Logic Core.** Configuration, the model scanner that extracts
//!   reaction → enzyme mappings, the assembly builder that populates a document, and the
//!   document writer.
//!
//! - **[`workflows`]: The Public API.** Ties scanning, building and writing together into a
//!   single conversion call.

pub mod core;
pub mod engine;
pub mod workflows;
