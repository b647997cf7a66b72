//! Loading of Ensembl reference data into the record stores.
//!
//! Mirrors the three BioMart feeds: genes first, then transcripts and exons
//! (reconstructed from the flat exon feed), then proteins.  All records are
//! stored with get-or-create semantics on their Ensembl accession, so
//! re-running a load over the same feed is a no-op.

use super::input::{self, ProteinRecord};
use super::txs::reconstruct_transcripts;
use super::{Exon, Gene, Protein, Transcript};
use crate::store::RecordStore;

/// The record stores populated by a reference-data load.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStores {
    /// Gene records, unique on the gene accession.
    pub genes: RecordStore<Gene>,
    /// Transcript records, unique on the transcript accession.
    pub transcripts: RecordStore<Transcript>,
    /// Exon records, unique on the exon accession.
    pub exons: RecordStore<Exon>,
    /// Protein records, unique on the peptide accession.
    pub proteins: RecordStore<Protein>,
}

impl ReferenceStores {
    /// Create empty stores.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Load the BioMart gene feed into the gene store.
///
/// Returns the number of processed rows.
pub fn load_genes<R: std::io::Read>(
    stores: &mut ReferenceStores,
    reader: R,
) -> Result<usize, anyhow::Error> {
    let mut counter = 0;
    for record in input::read_gene_records(reader)? {
        let length = record.end_position - record.start_position + 1;
        stores.genes.get_or_create(Gene {
            gene_ensembl_id: record.ensembl_gene_id,
            gene_symbol: record.hgnc_symbol,
            biotype: record.gene_biotype,
            chrom: record.chromosome_name,
            start_pos: record.start_position,
            end_pos: record.end_position,
            length,
        });
        counter += 1;
    }
    tracing::info!("loaded {} genes", counter);
    Ok(counter)
}

/// Load the BioMart transcript/exon feed into the transcript and exon
/// stores.
///
/// The flat exon rows are first reconstructed into transcript models; the
/// gene of each transcript must already be loaded, so `load_genes` has to
/// run first.  Returns the number of stored transcripts and exons.
pub fn load_transcripts_and_exons<R: std::io::Read>(
    stores: &mut ReferenceStores,
    reader: R,
) -> Result<(usize, usize), anyhow::Error> {
    let records = input::read_exon_records(reader)?;
    let transcripts = reconstruct_transcripts(&records)?;

    let mut transcript_counter = 0;
    let mut exon_counter = 0;
    for tx in transcripts {
        let gene = stores.genes.id_of(&tx.gene_ensembl_id).ok_or_else(|| {
            anyhow::anyhow!("unknown gene accession: {:?}", &tx.gene_ensembl_id)
        })?;
        let (transcript, _) = stores.transcripts.get_or_create(Transcript {
            transcript_ensembl_id: tx.transcript_ensembl_id,
            gene,
            cds_start_pos: tx.cds_start_pos,
            cds_end_pos: tx.cds_end_pos,
            length: tx.length,
        });
        transcript_counter += 1;

        for exon in tx.exons {
            stores.exons.get_or_create(Exon {
                exon_ensembl_id: exon.exon_ensembl_id,
                gene,
                transcript,
                transcript_start_pos: exon.transcript_start_pos,
                transcript_end_pos: exon.transcript_end_pos,
                genome_start_pos: exon.genome_start_pos,
                genome_end_pos: exon.genome_end_pos,
                length: exon.length,
                strand: exon.strand,
                phase: exon.phase,
                end_phase: exon.end_phase,
            });
            exon_counter += 1;
        }
    }
    tracing::info!(
        "loaded {} transcripts and {} exons",
        transcript_counter,
        exon_counter
    );
    Ok((transcript_counter, exon_counter))
}

/// Load the BioMart protein feed into the protein store.
///
/// Rows without a peptide accession or CDS length are skipped (most rows of
/// the feed are transcripts without a protein).  The transcript of each
/// remaining row must already be loaded.  Returns the number of stored
/// proteins.
pub fn load_proteins<R: std::io::Read>(
    stores: &mut ReferenceStores,
    reader: R,
) -> Result<usize, anyhow::Error> {
    let mut counter = 0;
    for record in input::read_protein_records(reader)? {
        let ProteinRecord {
            ensembl_peptide_id,
            ensembl_transcript_id,
            cds_length,
        } = record;
        let cds_length = match (ensembl_peptide_id.is_empty(), cds_length) {
            (false, Some(cds_length)) => cds_length,
            _ => continue,
        };
        let transcript = stores
            .transcripts
            .id_of(&ensembl_transcript_id)
            .ok_or_else(|| {
                anyhow::anyhow!("unknown transcript accession: {:?}", &ensembl_transcript_id)
            })?;
        let gene = stores
            .transcripts
            .get(transcript)
            .expect("id from id_of must resolve")
            .gene;
        stores.proteins.get_or_create(Protein {
            protein_ensembl_id: ensembl_peptide_id,
            gene,
            transcript,
            cds_length,
        });
        counter += 1;
    }
    tracing::info!("loaded {} proteins", counter);
    Ok(counter)
}

/// Run a full reference-data load over the three feeds.
pub fn load_reference_data<R: std::io::Read>(
    stores: &mut ReferenceStores,
    gene_reader: R,
    exon_reader: R,
    protein_reader: R,
) -> Result<(), anyhow::Error> {
    load_genes(stores, gene_reader)?;
    load_transcripts_and_exons(stores, exon_reader)?;
    load_proteins(stores, protein_reader)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;

    const GENE_TSV: &str =
        "ENSG001\tBRCA1\tprotein_coding\tBRCA1\t17\t41196312\t41277500\n";

    const EXON_TSV: &str = concat!(
        // 5' UTR plus coding exon.
        "ENSE001\tENST001\tENSG001\t1\t0\t1\t20\t21\t120\t\t\t1\t100\t1021\t1120\t1001\t1120\n",
        // Coding exon running into the 3' UTR.
        "ENSE002\tENST001\tENSG001\t1\t1\t\t\t121\t320\t321\t360\t101\t300\t2001\t2200\t2001\t2240\n",
        // Exon without positional information, dropped.
        "ENSE003\tENST001\tENSG001\t1\t-1\t\t\t\t\t\t\t\t\t\t\t3001\t3100\n",
    );

    const PROTEIN_TSV: &str = concat!(
        "ENSP001\tENST001\t300\n",
        // Transcript without a protein, skipped.
        "\tENST001\t\n",
    );

    #[traced_test]
    #[test]
    fn load_reference_data_populates_stores() {
        let mut stores = ReferenceStores::new();
        load_reference_data(
            &mut stores,
            GENE_TSV.as_bytes(),
            EXON_TSV.as_bytes(),
            PROTEIN_TSV.as_bytes(),
        )
        .expect("load should succeed");

        assert_eq!(stores.genes.len(), 1);
        assert_eq!(stores.transcripts.len(), 1);
        assert_eq!(stores.exons.len(), 2);
        assert_eq!(stores.proteins.len(), 1);

        let gene_id = stores.genes.id_of(&"ENSG001".to_owned()).unwrap();
        assert_eq!(stores.genes.get(gene_id).unwrap().length, 81189);

        let tx = stores.transcripts.by_key(&"ENST001".to_owned()).unwrap();
        assert_eq!(tx.gene, gene_id);
        assert_eq!(tx.cds_start_pos, 21);
        assert_eq!(tx.cds_end_pos, 320);
        assert_eq!(tx.length, 120 + 240);

        let exon = stores.exons.by_key(&"ENSE002".to_owned()).unwrap();
        assert_eq!(exon.transcript_start_pos, 121);
        assert_eq!(exon.transcript_end_pos, 360);
        assert_eq!(exon.end_phase, -1);

        let protein = stores.proteins.by_key(&"ENSP001".to_owned()).unwrap();
        assert_eq!(protein.gene, gene_id);
        assert_eq!(protein.cds_length, 300);

        assert!(logs_contain("loaded 1 genes"));
        assert!(logs_contain("loaded 1 transcripts and 2 exons"));
        assert!(logs_contain("loaded 1 proteins"));
    }

    #[test]
    fn load_transcripts_requires_known_gene() {
        let mut stores = ReferenceStores::new();
        let result = load_transcripts_and_exons(&mut stores, EXON_TSV.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn load_proteins_requires_known_transcript() {
        let mut stores = ReferenceStores::new();
        let result = load_proteins(&mut stores, PROTEIN_TSV.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn reloading_the_same_feed_is_idempotent() -> Result<(), anyhow::Error> {
        let mut stores = ReferenceStores::new();
        load_genes(&mut stores, GENE_TSV.as_bytes())?;
        load_genes(&mut stores, GENE_TSV.as_bytes())?;
        assert_eq!(stores.genes.len(), 1);
        Ok(())
    }
}
