//! Library for handling cancer genomics data.
//!
//! The crate bundles the data model and core algorithms shared by our cancer
//! genomics pipelines: mutation records with fuzzy overlap queries, matching
//! of structural variants against known events, reconstruction of transcript
//! models from the Ensembl BioMart exon feed, and the record stores and file
//! formats around them.

pub mod annos;
pub mod common;
pub mod io;
pub mod mutations;
pub mod store;
