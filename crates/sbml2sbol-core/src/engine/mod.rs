//! # Engine Module
//!
//! The conversion engine: everything between reading model files and holding a finished SBOL
//! document in memory.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Pathway group id, enzyme cap, expression strengths and
//!   document settings, assembled through a builder
//! - **Model Scanner** ([`scanner`]) - Extracts the ordered reaction → candidate enzyme mapping
//!   from one or more rpSBML files
//! - **Assembly Builder** ([`assembly`]) - Turns the mapping into boundary, RBS, CDS and gene
//!   parts with their primary structures
//! - **Writer** ([`writer`]) - Validates (optionally) and serializes the document
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Conversion errors carrying file context

pub mod assembly;
pub mod config;
pub mod error;
pub mod progress;
pub mod scanner;
pub mod writer;
