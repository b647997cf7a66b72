//! Reference genome annotations: genes, transcripts, exons, and proteins.
//!
//! The derived record types in this module are what the record stores
//! persist; they reference each other through surrogate ids and are unique
//! on their Ensembl accession.  `input` holds the raw BioMart feed records,
//! `txs` the exon/transcript reconstruction, and `load` the orchestration of
//! a full reference-data load.

use serde::{Deserialize, Serialize};

use crate::common::Strand;
use crate::store::{NaturalKey, RecordId};

pub mod input;
pub mod load;
pub mod txs;

/// A gene annotation.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Gene {
    /// Ensembl gene accession (natural key).
    pub gene_ensembl_id: String,
    /// HGNC gene symbol.
    pub gene_symbol: String,
    /// Gene biotype, e.g. `protein_coding`.
    pub biotype: String,
    /// Chromosome name.
    pub chrom: String,
    /// 1-based start position.
    pub start_pos: i64,
    /// 1-based end position.
    pub end_pos: i64,
    /// Length of the gene locus.
    pub length: i64,
}

impl NaturalKey for Gene {
    type Key = String;

    fn natural_key(&self) -> Self::Key {
        self.gene_ensembl_id.clone()
    }
}

/// A transcript annotation.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Transcript {
    /// Ensembl transcript accession (natural key).
    pub transcript_ensembl_id: String,
    /// Surrogate id of the gene the transcript belongs to.
    pub gene: RecordId,
    /// Start of the coding sequence in transcript coordinates.
    pub cds_start_pos: i64,
    /// End of the coding sequence in transcript coordinates.
    pub cds_end_pos: i64,
    /// Total length of the transcript's exons.
    pub length: i64,
}

impl NaturalKey for Transcript {
    type Key = String;

    fn natural_key(&self) -> Self::Key {
        self.transcript_ensembl_id.clone()
    }
}

/// An exon annotation.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Exon {
    /// Ensembl exon accession (natural key).
    pub exon_ensembl_id: String,
    /// Surrogate id of the gene the exon belongs to.
    pub gene: RecordId,
    /// Surrogate id of the transcript the exon belongs to.
    pub transcript: RecordId,
    /// Start position in transcript coordinates.
    pub transcript_start_pos: i64,
    /// End position in transcript coordinates.
    pub transcript_end_pos: i64,
    /// 1-based genomic start position.
    pub genome_start_pos: i64,
    /// 1-based genomic end position.
    pub genome_end_pos: i64,
    /// Length of the exon.
    pub length: i64,
    /// Strand the exon is transcribed from.
    pub strand: Strand,
    /// Reading-frame offset at the exon's 5' boundary (`-1` if non-coding).
    pub phase: i8,
    /// Reading-frame offset at the exon's 3' boundary (`-1` if non-coding).
    pub end_phase: i8,
}

impl NaturalKey for Exon {
    type Key = String;

    fn natural_key(&self) -> Self::Key {
        self.exon_ensembl_id.clone()
    }
}

/// A protein annotation.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Protein {
    /// Ensembl peptide accession (natural key).
    pub protein_ensembl_id: String,
    /// Surrogate id of the gene the protein belongs to.
    pub gene: RecordId,
    /// Surrogate id of the transcript the protein is translated from.
    pub transcript: RecordId,
    /// Length of the coding sequence.
    pub cds_length: i64,
}

impl NaturalKey for Protein {
    type Key = String;

    fn natural_key(&self) -> Self::Key {
        self.protein_ensembl_id.clone()
    }
}
