//! Mutation models: SNVs, indels, structural variations, and CNVs.
//!
//! The different mutation families are represented as one tagged sum type
//! (`Mutation` / `MutationKind`); overlap and effect logic is a match over
//! the discriminant.  Overlap queries delegate to the interval engine in
//! `crate::common` and accept a fuzziness margin in base pairs.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::common::{GenomicInterval, Strand};

pub mod effects;
pub mod matcher;

/// Somatic status of a mutation call.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VariantStatus {
    /// Present in tumor but not in the matched normal.
    Somatic,
    /// Present in the germline.
    Germline,
    /// Known calling artifact.
    Artifact,
    /// Status not (yet) determined.
    #[default]
    Unknown,
}

/// A single nucleotide base.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

/// Type of a structural variation.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SvType {
    Translocation,
    Inversion,
    Insertion,
    Deletion,
    Duplication,
}

/// A single nucleotide variant.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct SingleNucleotideVariant {
    /// Chromosome name.
    pub chrom: String,
    /// 1-based position of the variant.
    pub pos: i64,
    /// Reference allele.
    pub ref_allele: Nucleotide,
    /// Alternate allele.
    pub alt_allele: Nucleotide,
    /// Number of reads supporting the reference allele, if known.
    pub ref_count: Option<u32>,
    /// Number of reads supporting the alternate allele, if known.
    pub alt_count: Option<u32>,
}

impl SingleNucleotideVariant {
    /// Return whether the variant position falls within `region`, allowing
    /// `margin` base pairs of fuzziness.
    pub fn overlaps(&self, region: &GenomicInterval, margin: u32) -> bool {
        GenomicInterval::at(&self.chrom, self.pos).overlaps(region, margin)
    }
}

/// An insertion or deletion of one or more bases.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Indel {
    /// Chromosome name.
    pub chrom: String,
    /// 1-based position of the variant.
    pub pos: i64,
    /// Reference allele sequence.
    pub ref_allele: String,
    /// Alternate allele sequence.
    pub alt_allele: String,
    /// Number of reads supporting the reference allele, if known.
    pub ref_count: Option<u32>,
    /// Number of reads supporting the alternate allele, if known.
    pub alt_count: Option<u32>,
}

impl Indel {
    /// Return whether the variant position falls within `region`, allowing
    /// `margin` base pairs of fuzziness.
    pub fn overlaps(&self, region: &GenomicInterval, margin: u32) -> bool {
        GenomicInterval::at(&self.chrom, self.pos).overlaps(region, margin)
    }
}

/// A structural variation, anchored at two breakpoints.
///
/// No ordering invariant is enforced between the breakpoints; overlap
/// queries normalize the spanned range.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct StructuralVariation {
    /// Chromosome of the first breakpoint.
    pub chrom1: String,
    /// 1-based position of the first breakpoint.
    pub pos1: i64,
    /// Strand of the first breakpoint, if known.
    pub strand1: Option<Strand>,
    /// Chromosome of the second breakpoint.
    pub chrom2: String,
    /// 1-based position of the second breakpoint.
    pub pos2: i64,
    /// Strand of the second breakpoint, if known.
    pub strand2: Option<Strand>,
    /// Type of the structural variation.
    pub sv_type: SvType,
}

impl StructuralVariation {
    /// Return whether both breakpoints are on the same chromosome.
    pub fn is_intrachromosomal(&self) -> bool {
        self.chrom1 == self.chrom2
    }

    /// Return whether the variant overlaps `region` with the given margin.
    ///
    /// An intrachromosomal event is treated as one interval spanning the
    /// normalized breakpoint range.  An interchromosomal event overlaps if
    /// either of its breakpoints does.
    pub fn overlaps(&self, region: &GenomicInterval, margin: u32) -> bool {
        if self.is_intrachromosomal() {
            let lo = std::cmp::min(self.pos1, self.pos2);
            let hi = std::cmp::max(self.pos1, self.pos2);
            GenomicInterval::new(&self.chrom1, lo, hi).overlaps(region, margin)
        } else {
            GenomicInterval::at(&self.chrom1, self.pos1).overlaps(region, margin)
                || GenomicInterval::at(&self.chrom2, self.pos2).overlaps(region, margin)
        }
    }
}

/// A copy number variation over a chromosomal segment.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct CopyNumberVariation {
    /// Chromosome name.
    pub chrom: String,
    /// 1-based start position of the segment.
    pub start_pos: i64,
    /// 1-based end position of the segment.
    pub end_pos: i64,
    /// Size of the segment in base pairs.
    pub size: i64,
    /// Log fold change of the segment, if known.
    pub fold_change: Option<f64>,
    /// Integer copy state of the segment, if known.
    pub copy_state: Option<i32>,
}

impl CopyNumberVariation {
    /// Return whether the segment overlaps `region` with the given margin.
    pub fn overlaps(&self, region: &GenomicInterval, margin: u32) -> bool {
        GenomicInterval::new(&self.chrom, self.start_pos, self.end_pos).overlaps(region, margin)
    }
}

/// Kind-specific payload of a mutation.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(tag = "mutation_type", rename_all = "snake_case")]
pub enum MutationKind {
    Snv(SingleNucleotideVariant),
    Indel(Indel),
    StructuralVariation(StructuralVariation),
    CopyNumberVariation(CopyNumberVariation),
}

/// A mutation call of any kind together with its somatic status.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Mutation {
    /// Somatic status of the call.
    pub status: VariantStatus,
    /// The kind-specific payload.
    #[serde(flatten)]
    pub kind: MutationKind,
}

impl Mutation {
    /// Return whether the mutation overlaps `region` with the given margin.
    pub fn overlaps(&self, region: &GenomicInterval, margin: u32) -> bool {
        match &self.kind {
            MutationKind::Snv(snv) => snv.overlaps(region, margin),
            MutationKind::Indel(indel) => indel.overlaps(region, margin),
            MutationKind::StructuralVariation(sv) => sv.overlaps(region, margin),
            MutationKind::CopyNumberVariation(cnv) => cnv.overlaps(region, margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_test::{assert_tokens, Token};

    use super::*;

    fn interchromosomal_sv() -> StructuralVariation {
        StructuralVariation {
            chrom1: "1".to_owned(),
            pos1: 1000,
            strand1: Some(Strand::Forward),
            chrom2: "2".to_owned(),
            pos2: 2000,
            strand2: Some(Strand::Reverse),
            sv_type: SvType::Translocation,
        }
    }

    fn intrachromosomal_sv() -> StructuralVariation {
        StructuralVariation {
            chrom1: "3".to_owned(),
            pos1: 1000,
            strand1: Some(Strand::Forward),
            chrom2: "3".to_owned(),
            pos2: 2000,
            strand2: Some(Strand::Forward),
            sv_type: SvType::Inversion,
        }
    }

    #[test]
    fn sv_overlaps_interchromosomal_single_position() {
        let sv = interchromosomal_sv();
        assert!(!sv.overlaps(&GenomicInterval::at("1", 995), 0));
        assert!(sv.overlaps(&GenomicInterval::at("1", 1000), 0));
        assert!(sv.overlaps(&GenomicInterval::at("1", 995), 5));
        assert!(sv.overlaps(&GenomicInterval::at("1", 1000), 5));
        // The second breakpoint matches on its own chromosome.
        assert!(sv.overlaps(&GenomicInterval::new("2", 1500, 2500), 0));
        assert!(!sv.overlaps(&GenomicInterval::at("2", 1000), 0));
    }

    #[test]
    fn sv_overlaps_interchromosomal_range() {
        let sv = interchromosomal_sv();
        assert!(!sv.overlaps(&GenomicInterval::new("1", 995, 999), 0));
        assert!(sv.overlaps(&GenomicInterval::new("1", 995, 1001), 0));
        assert!(sv.overlaps(&GenomicInterval::new("1", 995, 999), 5));
        assert!(sv.overlaps(&GenomicInterval::new("1", 995, 1001), 5));
    }

    #[test]
    fn sv_overlaps_intrachromosomal() {
        let sv = intrachromosomal_sv();
        // Positions and ranges in the middle of the event.
        assert!(sv.overlaps(&GenomicInterval::at("3", 1500), 0));
        assert!(sv.overlaps(&GenomicInterval::new("3", 1400, 1600), 0));
        // Ranges overlapping either end of the event.
        assert!(sv.overlaps(&GenomicInterval::new("3", 500, 1500), 0));
        assert!(sv.overlaps(&GenomicInterval::new("3", 1500, 2500), 0));
        // Nearby range with and without margin.
        assert!(!sv.overlaps(&GenomicInterval::new("3", 500, 990), 0));
        assert!(!sv.overlaps(&GenomicInterval::new("3", 500, 990), 9));
        assert!(sv.overlaps(&GenomicInterval::new("3", 500, 990), 10));
    }

    #[test]
    fn sv_overlaps_normalizes_breakpoint_order() {
        let mut sv = intrachromosomal_sv();
        std::mem::swap(&mut sv.pos1, &mut sv.pos2);
        assert!(sv.overlaps(&GenomicInterval::at("3", 1500), 0));
    }

    #[test]
    fn snv_overlaps_delegates_to_position() {
        let snv = SingleNucleotideVariant {
            chrom: "1".to_owned(),
            pos: 1500,
            ref_allele: Nucleotide::A,
            alt_allele: Nucleotide::T,
            ref_count: Some(10),
            alt_count: Some(5),
        };
        assert!(snv.overlaps(&GenomicInterval::new("1", 1000, 2000), 0));
        assert!(!snv.overlaps(&GenomicInterval::new("1", 1501, 2000), 0));
        assert!(snv.overlaps(&GenomicInterval::new("1", 1501, 2000), 1));
        assert!(!snv.overlaps(&GenomicInterval::new("2", 1000, 2000), 0));
    }

    #[test]
    fn cnv_overlaps_spans_segment() {
        let cnv = CopyNumberVariation {
            chrom: "17".to_owned(),
            start_pos: 100,
            end_pos: 200,
            size: 101,
            fold_change: Some(-1.5),
            copy_state: Some(1),
        };
        assert!(cnv.overlaps(&GenomicInterval::at("17", 150), 0));
        assert!(!cnv.overlaps(&GenomicInterval::at("17", 250), 0));
        assert!(cnv.overlaps(&GenomicInterval::at("17", 250), 50));
    }

    #[test]
    fn mutation_overlap_dispatches_over_kind() {
        let mutation = Mutation {
            status: VariantStatus::Somatic,
            kind: MutationKind::StructuralVariation(intrachromosomal_sv()),
        };
        assert!(mutation.overlaps(&GenomicInterval::at("3", 1500), 0));
        let mutation = Mutation {
            status: VariantStatus::Unknown,
            kind: MutationKind::Indel(Indel {
                chrom: "3".to_owned(),
                pos: 42,
                ref_allele: "AT".to_owned(),
                alt_allele: "A".to_owned(),
                ref_count: None,
                alt_count: None,
            }),
        };
        assert!(mutation.overlaps(&GenomicInterval::new("3", 40, 50), 0));
    }

    #[test]
    fn variant_status_serde_smoke() {
        assert_tokens(
            &VariantStatus::Somatic,
            &[Token::UnitVariant {
                name: "VariantStatus",
                variant: "somatic",
            }],
        );
    }

    #[test]
    fn sv_type_serde_smoke() {
        assert_tokens(
            &SvType::Translocation,
            &[Token::UnitVariant {
                name: "SvType",
                variant: "translocation",
            }],
        );
    }

    #[test]
    fn nucleotide_serde_smoke() {
        assert_tokens(
            &Nucleotide::G,
            &[Token::UnitVariant {
                name: "Nucleotide",
                variant: "G",
            }],
        );
    }

    #[test]
    fn sv_type_str_roundtrip() {
        assert_eq!(SvType::Deletion.to_string(), "deletion");
        assert_eq!("duplication".parse::<SvType>().unwrap(), SvType::Duplication);
    }
}
