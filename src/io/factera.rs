//! Reading of Factera `fusions.txt` files.

use serde::Deserialize;

use crate::common::Strand;
use crate::mutations::{StructuralVariation, SvType};

/// One row of a Factera `fusions.txt` file.
#[derive(Debug, Deserialize)]
pub struct FacteraRecord {
    /// Estimated fusion type (`TRA`, `DEL`, `INV`, ...).
    pub est_type: String,
    /// Gene/region name of the first partner.
    pub region1: String,
    /// Gene/region name of the second partner.
    pub region2: String,
    /// First breakpoint as `chrom:pos`.
    pub break1: String,
    /// Second breakpoint as `chrom:pos`.
    pub break2: String,
    /// Number of reads supporting the first breakpoint.
    pub break_support1: u32,
    /// Number of reads supporting the second breakpoint.
    pub break_support2: u32,
    /// Offset between the breakpoints.
    pub break_offset: i64,
    /// Orientation of the fused partners, e.g. `(+,-)`.
    pub orientation: String,
    /// Order of the first partner in the fusion.
    pub order1: String,
    /// Order of the second partner in the fusion.
    pub order2: String,
    /// Read depth at the breakpoint.
    pub break_depth: u32,
    /// Number of supporting proper pairs.
    pub proper_pair_support: u32,
    /// Number of supporting unmapped reads.
    pub unmapped_support: u32,
    /// Number of supporting improper pairs.
    pub improper_pair_support: u32,
    /// Paired-end read depth.
    pub paired_end_depth: u32,
    /// Total read depth.
    pub total_depth: u32,
    /// Sequence around the fusion.
    pub fusion_seq: String,
    /// Non-templated sequence at the junction.
    pub non_templated_seq: String,
}

/// Parse a `chrom:pos` breakpoint.
fn parse_breakpoint(text: &str) -> Result<(String, i64), anyhow::Error> {
    let (chrom, pos) = text
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("invalid breakpoint: {:?}", text))?;
    let pos = pos
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid breakpoint position {:?}: {}", text, e))?;
    Ok((chrom.to_owned(), pos))
}

/// Extract the strand at a character position of the orientation column.
fn strand_at(orientation: &str, index: usize) -> Option<Strand> {
    match orientation.chars().nth(index) {
        Some('+') => Some(Strand::Forward),
        Some('-') => Some(Strand::Reverse),
        _ => None,
    }
}

/// Map the Factera fusion type to an SV type.
fn sv_type_of(est_type: &str) -> Option<SvType> {
    match est_type {
        "DEL" => Some(SvType::Deletion),
        "INV" => Some(SvType::Inversion),
        "TRA" => Some(SvType::Translocation),
        _ => None,
    }
}

/// Read structural variations from a Factera `fusions.txt` file.
///
/// The header line (starting with `Est_Type`) is skipped, and so are rows
/// whose fusion type has no SV type counterpart.
pub fn read_svs<R: std::io::Read>(
    reader: R,
) -> Result<Vec<StructuralVariation>, anyhow::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_reader(reader);

    let mut result = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record
            .get(0)
            .map(|field| field.starts_with("Est_Type"))
            .unwrap_or(false)
        {
            continue;
        }
        let record: FacteraRecord = record.deserialize(None)?;
        let sv_type = match sv_type_of(&record.est_type) {
            Some(sv_type) => sv_type,
            None => continue,
        };
        let (chrom1, pos1) = parse_breakpoint(&record.break1)?;
        let (chrom2, pos2) = parse_breakpoint(&record.break2)?;
        result.push(StructuralVariation {
            chrom1,
            pos1,
            strand1: strand_at(&record.orientation, 1),
            chrom2,
            pos2,
            strand2: strand_at(&record.orientation, 4),
            sv_type,
        });
    }
    Ok(result)
}
