//! Provides input/output functionality for the model and parts file formats.
//!
//! SBML models are only ever read, through the small element tree in [`xml`]. SBOL documents are
//! written with `quick-xml`'s writer and read back for verification through `quick_xml::de`.

pub mod sbml;
pub mod sbol;
pub mod traits;
pub mod xml;
