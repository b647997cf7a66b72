//! Raw records of the Ensembl BioMart TSV feeds.
//!
//! The feeds are header-less tab-separated exports of the BioMart mart
//! service; optional columns are empty when the attribute is not defined for
//! a row, and empty lines are skipped.

use serde::Deserialize;

/// Build a CSV reader for a BioMart TSV feed.
fn tsv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .delimiter(b'\t')
        .from_reader(reader)
}

/// Gene attribute row of the BioMart gene feed.
#[derive(Debug, Deserialize)]
pub struct GeneRecord {
    /// Ensembl gene accession.
    pub ensembl_gene_id: String,
    /// HGNC gene symbol (may be empty).
    pub hgnc_symbol: String,
    /// Gene biotype.
    pub gene_biotype: String,
    /// External gene name.
    pub external_gene_name: String,
    /// Chromosome name.
    pub chromosome_name: String,
    /// 1-based start position.
    pub start_position: i64,
    /// 1-based end position.
    pub end_position: i64,
}

/// Exon attribute row of the BioMart transcript/exon feed.
///
/// The optional columns come in pairs; a start without its end (or vice
/// versa) violates the feed contract and is rejected downstream.
#[derive(Debug, Deserialize)]
pub struct ExonRecord {
    /// Ensembl exon accession.
    pub ensembl_exon_id: String,
    /// Ensembl transcript accession.
    pub ensembl_transcript_id: String,
    /// Ensembl gene accession.
    pub ensembl_gene_id: String,
    /// Strand, encoded as `1`/`-1`.
    pub strand: i8,
    /// Reading-frame offset at the exon's 5' boundary (`-1` if non-coding).
    pub phase: i8,
    /// Start of the 5' UTR within the exon, in transcript coordinates.
    pub utr5_start: Option<i64>,
    /// End of the 5' UTR within the exon, in transcript coordinates.
    pub utr5_end: Option<i64>,
    /// Start of the coding region in cDNA coordinates.
    pub cdna_coding_start: Option<i64>,
    /// End of the coding region in cDNA coordinates.
    pub cdna_coding_end: Option<i64>,
    /// Start of the 3' UTR within the exon, in transcript coordinates.
    pub utr3_start: Option<i64>,
    /// End of the 3' UTR within the exon, in transcript coordinates.
    pub utr3_end: Option<i64>,
    /// Start of the coding region in CDS coordinates.
    pub cds_start: Option<i64>,
    /// End of the coding region in CDS coordinates.
    pub cds_end: Option<i64>,
    /// Genomic start position of the coding region.
    pub genomic_coding_start: Option<i64>,
    /// Genomic end position of the coding region.
    pub genomic_coding_end: Option<i64>,
    /// 1-based genomic start position of the exon.
    pub exon_chrom_start: i64,
    /// 1-based genomic end position of the exon.
    pub exon_chrom_end: i64,
}

/// Protein attribute row of the BioMart protein feed.
///
/// Most rows of the feed are transcripts without a peptide; those have an
/// empty accession and no CDS length.
#[derive(Debug, Deserialize)]
pub struct ProteinRecord {
    /// Ensembl peptide accession (may be empty).
    pub ensembl_peptide_id: String,
    /// Ensembl transcript accession.
    pub ensembl_transcript_id: String,
    /// Length of the coding sequence.
    pub cds_length: Option<i64>,
}

/// Read all gene rows from a BioMart gene feed.
pub fn read_gene_records<R: std::io::Read>(reader: R) -> Result<Vec<GeneRecord>, anyhow::Error> {
    let mut result = Vec::new();
    for record in tsv_reader(reader).deserialize() {
        let record: GeneRecord = record?;
        result.push(record);
    }
    Ok(result)
}

/// Read all exon rows from a BioMart transcript/exon feed.
pub fn read_exon_records<R: std::io::Read>(reader: R) -> Result<Vec<ExonRecord>, anyhow::Error> {
    let mut result = Vec::new();
    for record in tsv_reader(reader).deserialize() {
        let record: ExonRecord = record?;
        result.push(record);
    }
    Ok(result)
}

/// Read all protein rows from a BioMart protein feed.
pub fn read_protein_records<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ProteinRecord>, anyhow::Error> {
    let mut result = Vec::new();
    for record in tsv_reader(reader).deserialize() {
        let record: ProteinRecord = record?;
        result.push(record);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn read_gene_records_smoke() -> Result<(), anyhow::Error> {
        let tsv = "ENSG00000012048\tBRCA1\tprotein_coding\tBRCA1\t17\t41196312\t41277500\n";
        let records = read_gene_records(tsv.as_bytes())?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ensembl_gene_id, "ENSG00000012048");
        assert_eq!(records[0].chromosome_name, "17");
        assert_eq!(records[0].start_position, 41196312);
        Ok(())
    }

    #[test]
    fn read_exon_records_optional_columns() -> Result<(), anyhow::Error> {
        let tsv = concat!(
            "ENSE001\tENST001\tENSG001\t1\t0\t1\t20\t21\t120\t\t\t1\t100\t1021\t1120\t1001\t1120\n",
            "ENSE002\tENST001\tENSG001\t1\t1\t\t\t\t\t\t\t\t\t\t\t2001\t2100\n",
        );
        let records = read_exon_records(tsv.as_bytes())?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].utr5_start, Some(1));
        assert_eq!(records[0].cdna_coding_start, Some(21));
        assert_eq!(records[0].utr3_start, None);
        assert_eq!(records[1].utr5_start, None);
        assert_eq!(records[1].cdna_coding_start, None);
        assert_eq!(records[1].exon_chrom_start, 2001);
        assert_eq!(records[1].strand, 1);
        Ok(())
    }

    #[test]
    fn read_exon_records_rejects_non_numeric_positions() {
        let tsv = "ENSE001\tENST001\tENSG001\t1\t0\t\t\t\t\t\t\t\t\t\t\tstart\tend\n";
        assert!(read_exon_records(tsv.as_bytes()).is_err());
    }

    #[test]
    fn read_protein_records_smoke() -> Result<(), anyhow::Error> {
        let tsv = concat!(
            "ENSP001\tENST001\t1863\n",
            "\tENST002\t\n",
        );
        let records = read_protein_records(tsv.as_bytes())?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cds_length, Some(1863));
        assert_eq!(records[1].ensembl_peptide_id, "");
        assert_eq!(records[1].cds_length, None);
        Ok(())
    }
}
