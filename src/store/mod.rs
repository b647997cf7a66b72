//! In-memory record stores with get-or-create semantics on natural keys.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

/// Surrogate identifier assigned by a `RecordStore`.
pub type RecordId = u32;

/// Trait for records that are unique on a natural key.
///
/// The natural key is the set of attributes on which each instance must be
/// unique, e.g. the Ensembl accession of an annotation record or the
/// coordinate triple of a genomic interval.
pub trait NaturalKey {
    /// Type of the natural key.
    type Key: Eq + Hash + Clone + Debug;

    /// Return the natural key of this record.
    fn natural_key(&self) -> Self::Key;
}

/// Store of records unique on their natural key, with dense surrogate ids.
///
/// The store handle is passed explicitly into every operation that persists
/// records; the exclusive borrow serializes the check-then-insert of
/// `get_or_create`, so no two records with the same natural key can ever be
/// stored.
#[derive(Debug, Clone)]
pub struct RecordStore<R: NaturalKey> {
    /// The stored records, indexed by their surrogate id.
    records: Vec<R>,
    /// Mapping from natural key to surrogate id.
    index: IndexMap<R::Key, RecordId>,
}

impl<R: NaturalKey> Default for RecordStore<R> {
    fn default() -> Self {
        RecordStore {
            records: Vec::new(),
            index: IndexMap::new(),
        }
    }
}

impl<R: NaturalKey> RecordStore<R> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of the record with the same natural key as `record`,
    /// inserting `record` if no such record is stored yet.
    ///
    /// The second component is `true` if the record was newly created.  On a
    /// natural key collision the already stored record wins and `record` is
    /// discarded.
    pub fn get_or_create(&mut self, record: R) -> (RecordId, bool) {
        let key = record.natural_key();
        if let Some(&id) = self.index.get(&key) {
            (id, false)
        } else {
            let id = self.records.len() as RecordId;
            self.index.insert(key, id);
            self.records.push(record);
            (id, true)
        }
    }

    /// Return the record with the given surrogate id.
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.get(id as usize)
    }

    /// Return the surrogate id for the given natural key.
    pub fn id_of(&self, key: &R::Key) -> Option<RecordId> {
        self.index.get(key).copied()
    }

    /// Return the record with the given natural key.
    pub fn by_key(&self, key: &R::Key) -> Option<&R> {
        self.id_of(key).and_then(|id| self.get(id))
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over `(id, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &R)> {
        self.records
            .iter()
            .enumerate()
            .map(|(id, record)| (id as RecordId, record))
    }
}
