//! Effects that mutations may have on genes.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::store::RecordId;

/// Consequence of a protein-altering variant.
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProteinConsequence {
    Missense,
    Nonsense,
    Nonstop,
    SpliceSite,
    Frameshift,
}

/// Direction of a copy number change.
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
pub enum CopyNumberChange {
    Gain,
    Loss,
    /// Loss of heterozygosity.
    Loh,
}

/// Kind-specific payload of a gene effect.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(tag = "effect_type", rename_all = "snake_case")]
pub enum GeneEffectKind {
    /// Any consequence that alters the protein sequence, e.g. missense,
    /// nonsense, nonstop and splice-site variants as well as indels.
    Protein {
        /// The protein-level consequence.
        consequence: ProteinConsequence,
    },
    /// Any consequence that alters allele copy number, e.g. amplifications,
    /// deletions and LOH.
    CopyNumber {
        /// The direction of the change.
        change: CopyNumberChange,
        /// The resulting number of copies, if known.
        num_copies: Option<u32>,
    },
    /// Any consequence that alters gene structure, e.g. translocations and
    /// inversions.
    Structural,
}

/// Effect of a mutation on a gene.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct GeneEffect {
    /// Surrogate id of the affected gene.
    pub gene: RecordId,
    /// The kind-specific payload.
    #[serde(flatten)]
    pub kind: GeneEffectKind,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn effect_kind_discriminant_in_wire_format() {
        let effect = GeneEffect {
            gene: 7,
            kind: GeneEffectKind::CopyNumber {
                change: CopyNumberChange::Loss,
                num_copies: Some(1),
            },
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["effect_type"], "copy_number");
        assert_eq!(json["change"], "loss");
        assert_eq!(json["gene"], 7);
    }

    #[test]
    fn protein_consequence_str_roundtrip() {
        assert_eq!(ProteinConsequence::SpliceSite.to_string(), "splice-site");
        assert_eq!(
            "frameshift".parse::<ProteinConsequence>().unwrap(),
            ProteinConsequence::Frameshift
        );
    }
}
