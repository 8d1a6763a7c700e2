//! # Workflows Module
//!
//! High-level entry points that run a complete conversion from rpSBML model files to a
//! written SBOL document.
//!
//! ## Architecture
//!
//! - **Conversion Workflow** ([`convert`]) - Scans the inputs, builds the gene assemblies and
//!   writes the document, reporting each phase through a
//!   [`ProgressReporter`](crate::engine::progress::ProgressReporter).

pub mod convert;
