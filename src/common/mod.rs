//! Common functionality: genomic intervals, strands, chromosome names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Definition of canonical chromosome names.
pub const CHROMS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "M",
];

/// Build mapping of chromosome names to chromosome numbers.
pub fn build_chrom_map() -> IndexMap<String, usize> {
    let mut result = IndexMap::new();
    for (i, &chrom_name) in CHROMS.iter().enumerate() {
        result.insert(chrom_name.to_owned(), i);
        result.insert(format!("chr{chrom_name}").to_owned(), i);
    }
    result.insert("x".to_owned(), 22);
    result.insert("y".to_owned(), 23);
    result.insert("chrx".to_owned(), 22);
    result.insert("chry".to_owned(), 23);
    result.insert("mt".to_owned(), 24);
    result.insert("m".to_owned(), 24);
    result.insert("chrmt".to_owned(), 24);
    result.insert("chrm".to_owned(), 24);
    result.insert("MT".to_owned(), 24);
    result.insert("chrMT".to_owned(), 24);
    result
}

/// Strand of a genomic feature or breakpoint.
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
    strum::Display,
    strum::EnumString,
)]
pub enum Strand {
    /// Forward / plus strand.
    #[serde(rename = "+")]
    #[strum(serialize = "+")]
    Forward,
    /// Reverse / minus strand.
    #[serde(rename = "-")]
    #[strum(serialize = "-")]
    Reverse,
}

impl Strand {
    /// Interpret the numeric strand encoding of the BioMart feed (`1`/`-1`).
    pub fn from_numeric(value: i8) -> Option<Self> {
        match value {
            1 => Some(Strand::Forward),
            -1 => Some(Strand::Reverse),
            _ => None,
        }
    }
}

/// A genomic interval with 1-based inclusive coordinates.
///
/// A single position is an interval with `start == end`.  Construction
/// normalizes reversed bounds so `start <= end` always holds.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Debug, Clone)]
pub struct GenomicInterval {
    /// Chromosome name.
    pub chrom: String,
    /// 1-based start position.
    pub start: i64,
    /// 1-based end position (inclusive).
    pub end: i64,
}

impl GenomicInterval {
    /// Construct an interval, swapping `start` and `end` if given reversed.
    pub fn new(chrom: &str, start: i64, end: i64) -> Self {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        GenomicInterval {
            chrom: chrom.to_owned(),
            start,
            end,
        }
    }

    /// Construct a single-position interval.
    pub fn at(chrom: &str, pos: i64) -> Self {
        GenomicInterval {
            chrom: chrom.to_owned(),
            start: pos,
            end: pos,
        }
    }

    /// Number of positions spanned by the interval.
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }

    /// Return whether the interval overlaps `other`, allowing the edges of
    /// both intervals to be extended by `margin` base pairs.
    ///
    /// Intervals on different chromosomes never overlap, margin
    /// notwithstanding.  The check is symmetric: an endpoint of either
    /// interval falling within the (margin-expanded) span of the other
    /// counts, which also covers the case where one interval fully encloses
    /// the other.
    pub fn overlaps(&self, other: &GenomicInterval, margin: u32) -> bool {
        if self.chrom != other.chrom {
            return false;
        }
        self.contains_edge(other, margin) || other.contains_edge(self, margin)
    }

    /// Return whether either endpoint of `other` falls within the
    /// margin-expanded span of `self`.
    fn contains_edge(&self, other: &GenomicInterval, margin: u32) -> bool {
        within(self.start, self.end, other.start, margin)
            || within(self.start, self.end, other.end, margin)
    }
}

/// Return whether `pos` lies within `[start - margin, end + margin]`.
fn within(start: i64, end: i64, pos: i64, margin: u32) -> bool {
    let margin = i64::from(margin);
    start - margin <= pos && pos <= end + margin
}

impl crate::store::NaturalKey for GenomicInterval {
    type Key = (String, i64, i64);

    fn natural_key(&self) -> Self::Key {
        (self.chrom.clone(), self.start, self.end)
    }
}
