//! Reconstruction of transcript models from the flat BioMart exon feed.
//!
//! The feed carries one row per exon and transcript, with the 5' UTR, CDS,
//! and 3' UTR bounds present or absent depending on where the exon sits in
//! the transcript.  Reconstruction runs in two passes: the rows are
//! classified and grouped by transcript, then each transcript is finalized
//! by aggregating its retained exons.  Exons without a usable position in
//! transcript coordinates (pure UTR exons, exons outside the annotated
//! model) are dropped, and so are transcripts that end up with no retained
//! exons; both are expected outcomes of the feed, not errors.

use indexmap::IndexMap;

use super::input::ExonRecord;
use crate::common::Strand;

/// Error type for transcript reconstruction.
#[derive(thiserror::Error, Debug, Clone)]
pub enum TxError {
    /// One bound of an optional column pair is present without the other.
    #[error("exon {exon_id}: {column} start/end must be present together")]
    UnpairedBounds {
        /// Accession of the offending exon.
        exon_id: String,
        /// Name of the half-present column pair.
        column: &'static str,
    },
    /// The strand column carries a value other than `1`/`-1`.
    #[error("exon {exon_id}: invalid strand value {value}")]
    InvalidStrand {
        /// Accession of the offending exon.
        exon_id: String,
        /// The unexpected value.
        value: i8,
    },
}

/// An exon retained during reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct TxExon {
    /// Ensembl exon accession.
    pub exon_ensembl_id: String,
    /// Strand the exon is transcribed from.
    pub strand: Strand,
    /// Reading-frame offset at the exon's 5' boundary.
    pub phase: i8,
    /// Reading-frame offset at the exon's 3' boundary, `-1` when the exon
    /// ends in a UTR.
    pub end_phase: i8,
    /// Length of the exon.
    pub length: i64,
    /// Start position in transcript coordinates, including a leading UTR.
    pub transcript_start_pos: i64,
    /// End position in transcript coordinates, including a trailing UTR.
    pub transcript_end_pos: i64,
    /// 1-based genomic start position.
    pub genome_start_pos: i64,
    /// 1-based genomic end position.
    pub genome_end_pos: i64,
    /// Start of the coding region in cDNA coordinates; aggregated into the
    /// transcript and not persisted per exon.
    pub cdna_coding_start: i64,
    /// End of the coding region in cDNA coordinates; aggregated into the
    /// transcript and not persisted per exon.
    pub cdna_coding_end: i64,
}

/// A transcript reconstructed from the exon feed.
#[derive(Debug, Clone, PartialEq)]
pub struct TxTranscript {
    /// Ensembl transcript accession.
    pub transcript_ensembl_id: String,
    /// Ensembl accession of the gene the transcript belongs to.
    pub gene_ensembl_id: String,
    /// Start of the coding sequence, minimum over the exons.
    pub cds_start_pos: i64,
    /// End of the coding sequence, maximum over the exons.
    pub cds_end_pos: i64,
    /// Total length of the retained exons.
    pub length: i64,
    /// The retained exons, in order of discovery.
    pub exons: Vec<TxExon>,
}

/// Accumulating per-transcript state of pass one.
#[derive(Debug, Default)]
struct TxBuilder {
    gene_ensembl_id: String,
    exons: Vec<TxExon>,
}

/// Extract an optional column pair, rejecting half-present bounds.
fn column_pair(
    exon_id: &str,
    column: &'static str,
    start: Option<i64>,
    end: Option<i64>,
) -> Result<Option<(i64, i64)>, TxError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some((start, end))),
        (None, None) => Ok(None),
        _ => Err(TxError::UnpairedBounds {
            exon_id: exon_id.to_owned(),
            column,
        }),
    }
}

/// Classify one exon row, resolving its transcript-coordinate bounds from
/// the UTR/CDS layout.
///
/// Returns `Ok(None)` for the discard outcomes (no coding region in the
/// exon, or no positional information at all).  The classification is a
/// closed match over the presence of the three column pairs; earlier cases
/// win, so an exon carrying all three pairs is treated like a 5' UTR plus
/// coding exon.
pub fn classify_exon(record: &ExonRecord) -> Result<Option<TxExon>, TxError> {
    let exon_id = &record.ensembl_exon_id;
    let exon_length = record.exon_chrom_end - record.exon_chrom_start + 1;
    let utr5 = column_pair(exon_id, "5_utr", record.utr5_start, record.utr5_end)?;
    let cds = column_pair(
        exon_id,
        "cdna_coding",
        record.cdna_coding_start,
        record.cdna_coding_end,
    )?;
    let utr3 = column_pair(exon_id, "3_utr", record.utr3_start, record.utr3_end)?;

    let coding_end_phase = (i64::from(record.phase) + exon_length).rem_euclid(3) as i8;
    let (transcript_start_pos, transcript_end_pos, end_phase, (cds_start, cds_end)) =
        match (utr5, cds, utr3) {
            // 5' UTR ahead of the coding region; a trailing 3' UTR is
            // shadowed by this case.
            (Some((utr_start, utr_end)), Some((cds_start, cds_end)), _) => {
                let utr_length = utr_end - utr_start + 1;
                (
                    cds_start - utr_length,
                    cds_end,
                    coding_end_phase,
                    (cds_start, cds_end),
                )
            }
            // Pure 5' UTR exon (possibly with a 3' UTR): the contribution in
            // transcript coordinates is not determinable.
            (Some(_), None, _) => return Ok(None),
            // Coding region running into a 3' UTR; no downstream frame.
            (None, Some((cds_start, cds_end)), Some((utr_start, utr_end))) => {
                let utr_length = utr_end - utr_start + 1;
                (cds_start, cds_end + utr_length, -1, (cds_start, cds_end))
            }
            // Pure 3' UTR exon.
            (None, None, Some(_)) => return Ok(None),
            // Entirely coding exon.
            (None, Some((cds_start, cds_end)), None) => (
                cds_start,
                cds_end,
                coding_end_phase,
                (cds_start, cds_end),
            ),
            // Neither UTR nor coding region, e.g. an exon outside the
            // annotated transcript model.
            (None, None, None) => return Ok(None),
        };

    let strand = Strand::from_numeric(record.strand).ok_or_else(|| TxError::InvalidStrand {
        exon_id: exon_id.clone(),
        value: record.strand,
    })?;

    Ok(Some(TxExon {
        exon_ensembl_id: exon_id.clone(),
        strand,
        phase: record.phase,
        end_phase,
        length: exon_length,
        transcript_start_pos,
        transcript_end_pos,
        genome_start_pos: record.exon_chrom_start,
        genome_end_pos: record.exon_chrom_end,
        cdna_coding_start: cds_start,
        cdna_coding_end: cds_end,
    }))
}

/// Accumulator for one reconstruction pass over the exon feed.
///
/// One value of this type corresponds to one batch of rows; it holds the
/// transient grouping from transcript accession to retained exons and is
/// consumed by [`TxReconstructor::finish`].
#[derive(Debug, Default)]
pub struct TxReconstructor {
    transcripts: IndexMap<String, TxBuilder>,
}

impl TxReconstructor {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one exon row and group it under its transcript.
    ///
    /// The transcript is registered even if the exon is discarded; a
    /// transcript with no retained exons is dropped at finalization.
    pub fn push(&mut self, record: &ExonRecord) -> Result<(), TxError> {
        let builder = self
            .transcripts
            .entry(record.ensembl_transcript_id.clone())
            .or_default();
        builder.gene_ensembl_id = record.ensembl_gene_id.clone();
        if let Some(exon) = classify_exon(record)? {
            builder.exons.push(exon);
        }
        Ok(())
    }

    /// Finalize all transcripts, aggregating their retained exons.
    pub fn finish(self) -> Vec<TxTranscript> {
        self.transcripts
            .into_iter()
            .filter(|(_, builder)| !builder.exons.is_empty())
            .map(|(transcript_ensembl_id, builder)| {
                let cds_start_pos = builder
                    .exons
                    .iter()
                    .map(|exon| exon.cdna_coding_start)
                    .min()
                    .expect("no exons after filter?");
                let cds_end_pos = builder
                    .exons
                    .iter()
                    .map(|exon| exon.cdna_coding_end)
                    .max()
                    .expect("no exons after filter?");
                let length = builder.exons.iter().map(|exon| exon.length).sum();
                TxTranscript {
                    transcript_ensembl_id,
                    gene_ensembl_id: builder.gene_ensembl_id,
                    cds_start_pos,
                    cds_end_pos,
                    length,
                    exons: builder.exons,
                }
            })
            .collect()
    }
}

/// Reconstruct transcripts from a batch of exon rows.
pub fn reconstruct_transcripts<'a>(
    records: impl IntoIterator<Item = &'a ExonRecord>,
) -> Result<Vec<TxTranscript>, TxError> {
    let mut reconstructor = TxReconstructor::new();
    for record in records {
        reconstructor.push(record)?;
    }
    Ok(reconstructor.finish())
}
