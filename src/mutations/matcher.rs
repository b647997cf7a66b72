//! Matching of structural variants against a database of known events.

use bio::data_structures::interval_tree::ArrayBackedIntervalTree;
use indexmap::IndexMap;

use super::StructuralVariation;
use crate::common::{build_chrom_map, GenomicInterval, CHROMS};

/// Alias for the interval tree that we use.
type IntervalTree = ArrayBackedIntervalTree<i64, u32>;

/// Database of known structural variations, indexed for region queries.
///
/// Intrachromosomal events are indexed as their normalized breakpoint span,
/// interchromosomal events as one single-position entry per breakpoint
/// chromosome.  Candidates from the index are confirmed with the exact
/// overlap check, so query results agree with
/// [`StructuralVariation::overlaps`].
#[derive(Debug)]
pub struct KnownSvDb {
    /// The known events.
    records: Vec<StructuralVariation>,
    /// Interval trees, stored by chromosome.
    trees: Vec<IntervalTree>,
    /// Mapping from chromosome name to tree index.
    chrom_map: IndexMap<String, usize>,
}

impl KnownSvDb {
    /// Build the database from a set of known events.
    ///
    /// Fails if an event is anchored on a non-canonical chromosome.
    pub fn new(records: Vec<StructuralVariation>) -> Result<Self, anyhow::Error> {
        let chrom_map = build_chrom_map();
        let mut trees = Vec::new();
        for _ in CHROMS {
            trees.push(IntervalTree::new());
        }

        for (i, sv) in records.iter().enumerate() {
            if sv.is_intrachromosomal() {
                let chrom_idx = *chrom_map
                    .get(&sv.chrom1)
                    .ok_or_else(|| anyhow::anyhow!("unknown chromosome: {:?}", &sv.chrom1))?;
                let lo = std::cmp::min(sv.pos1, sv.pos2);
                let hi = std::cmp::max(sv.pos1, sv.pos2);
                trees[chrom_idx].insert((lo - 1)..hi, i as u32);
            } else {
                for (chrom, pos) in [(&sv.chrom1, sv.pos1), (&sv.chrom2, sv.pos2)] {
                    let chrom_idx = *chrom_map
                        .get(chrom)
                        .ok_or_else(|| anyhow::anyhow!("unknown chromosome: {:?}", chrom))?;
                    trees[chrom_idx].insert((pos - 1)..pos, i as u32);
                }
            }
        }
        trees.iter_mut().for_each(|tree| tree.index());

        tracing::debug!("indexed {} known structural variations", records.len());

        Ok(KnownSvDb {
            records,
            trees,
            chrom_map,
        })
    }

    /// Fetch the known events that overlap `region` with the given margin.
    pub fn fetch(&self, region: &GenomicInterval, margin: u32) -> Vec<&StructuralVariation> {
        let chrom_idx = match self.chrom_map.get(&region.chrom) {
            Some(chrom_idx) => *chrom_idx,
            None => {
                tracing::debug!("query on unknown chromosome: {:?}", &region.chrom);
                return Vec::new();
            }
        };
        let margin_bp = i64::from(margin);
        let range = (region.start - 1 - margin_bp)..(region.end + margin_bp);

        self.trees[chrom_idx]
            .find(range)
            .iter()
            .map(|entry| &self.records[*entry.data() as usize])
            .filter(|sv| sv.overlaps(region, margin))
            .collect()
    }

    /// Count the known events that overlap `region` with the given margin.
    pub fn count_overlaps(&self, region: &GenomicInterval, margin: u32) -> u32 {
        self.fetch(region, margin).len() as u32
    }

    /// Number of known events in the database.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return whether the database is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
