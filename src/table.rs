use std::mem;

use crate::hashing::{next_prime, probe_index};

/// Lowest size a table is created at, and the floor below which a shrink
/// request is silently ignored. The floor stops a near-empty table from
/// thrashing between tiny capacities on every removal.
const SIZE_FLOOR: usize = 50;

/// Load-factor percentage above which an insert grows the table first.
const GROW_ABOVE_PERCENT: usize = 70;

/// Load-factor percentage below which a removal shrinks the table.
const SHRINK_BELOW_PERCENT: usize = 10;

/// An owned key-value pair. The table owns both strings outright once the
/// pair is stored.
#[derive(Debug, Clone)]
struct Item {
    /// The key the pair is stored under
    key: String,
    /// The value associated with the key
    value: String,
}

/// One cell of the slot array.
///
/// `Tombstone` is distinct from `Empty` so probe chains running through a
/// deleted slot stay intact: lookups treat a tombstone as occupied by a
/// non-matching key and keep walking, while inserts may reclaim it.
#[derive(Debug, Clone, Default)]
enum Slot {
    /// Never held an item since the last rebuild; ends a lookup walk
    #[default]
    Empty,
    /// Held an item that was since removed; transparent to lookup walks
    Tombstone,
    /// Holds a live item
    Occupied(Item),
}

/// Where a probe walk for a key ended up.
enum Location {
    /// Index of the occupied slot holding the key
    Present(usize),
    /// The key is not in the table
    Absent {
        /// Slot an insert should take: the first tombstone passed, or the
        /// empty slot that ended the walk. `None` only when a full probe
        /// cycle saw neither, which means the table has no reusable slot.
        insert_at: Option<usize>,
    },
}

/// A `String → String` hash table using open addressing with double hashing.
///
/// The capacity is always a prime of at least 7, which makes every
/// double-hash step coprime to it, so a key's probe sequence visits each
/// slot exactly once per cycle. Removal leaves tombstones in place to keep
/// other keys' probe chains intact; rebuilding on resize purges them.
///
/// Resizing keeps the load factor inside a 10–70% band: an insert that would
/// push past 70% doubles the capacity first, and a removal that drops below
/// 10% halves it, except that the capacity never shrinks below the 50-slot
/// floor. A resize rehashes every live item into a fresh slot array in one
/// pass, so a single insert or removal can cost O(n).
///
/// Note: this type is not thread-safe. Wrap it in a lock for shared access.
#[derive(Debug, Clone)]
pub struct DoubleHashTable {
    /// The slot array; its length is the capacity, always prime
    slots: Vec<Slot>,
    /// Number of occupied slots (tombstones excluded)
    count: usize,
}

impl Default for DoubleHashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<(String, String)> for DoubleHashTable {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl DoubleHashTable {
    /// Creates a new table at the floor capacity (the next prime above 50).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(SIZE_FLOOR)
    }

    /// Creates a new table whose capacity is the next prime above `capacity`
    /// or above the 50-slot floor, whichever is larger.
    ///
    /// Clamping to the floor keeps every capacity above the shrink floor, so
    /// a grow request can never be mistaken for a vetoed shrink.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: vec![Slot::Empty; next_prime(capacity.max(SIZE_FLOOR))], count: 0 }
    }

    /// Walks the probe sequence for `key` from attempt 0.
    ///
    /// One walk serves lookup, insert, and removal. Tombstones never stop
    /// the walk; the first one passed is remembered as the preferred
    /// insertion slot. The walk is bounded by `capacity` attempts, one full
    /// cycle of the double-hash permutation, so it terminates even when no
    /// slot is empty.
    fn locate(&self, key: &str) -> Location {
        let capacity = self.slots.len();
        let mut reusable = None;

        for attempt in 0..capacity {
            let index = probe_index(key, capacity, attempt);
            match self.slots.get(index) {
                // An out-of-range index falls through to the absent case
                None | Some(Slot::Empty) => {
                    return Location::Absent { insert_at: Some(reusable.unwrap_or(index)) };
                }
                Some(Slot::Tombstone) => {
                    if reusable.is_none() {
                        reusable = Some(index);
                    }
                }
                Some(Slot::Occupied(item)) => {
                    if item.key == key {
                        return Location::Present(index);
                    }
                }
            }
        }

        Location::Absent { insert_at: reusable }
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present.
    ///
    /// This is an upsert: an existing key has its value replaced in place
    /// rather than gaining a second slot. New keys reuse the first tombstone
    /// on their probe chain when one exists. If the insert would push the
    /// load factor past 70%, the table grows to twice its capacity first.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        if self.load_percent() > GROW_ABOVE_PERCENT {
            self.rebuild(self.slots.len().saturating_mul(2));
        }

        match self.locate(&key) {
            Location::Present(index) => match self.slots.get_mut(index) {
                Some(Slot::Occupied(item)) => Some(mem::replace(&mut item.value, value)),
                // locate only reports Present for occupied slots
                _ => None,
            },
            Location::Absent { insert_at: Some(index) } => {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Slot::Occupied(Item { key, value });
                    self.count = self.count.saturating_add(1);
                }
                None
            }
            Location::Absent { insert_at: None } => {
                // A full cycle with no empty slot and no tombstone cannot
                // happen while the grow threshold holds, but a table choked
                // with tombstones is repaired the same way regardless:
                // rebuild at the current size to purge them, then retry.
                self.rebuild(self.slots.len());
                self.insert(key, value)
            }
        }
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// Absence is an ordinary outcome, not an error.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.locate(key) {
            Location::Present(index) => match self.slots.get(index) {
                Some(Slot::Occupied(item)) => Some(item.value.as_str()),
                _ => None,
            },
            Location::Absent { .. } => None,
        }
    }

    /// Returns a mutable reference to the value stored under `key`, if any.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        match self.locate(key) {
            Location::Present(index) => match self.slots.get_mut(index) {
                Some(Slot::Occupied(item)) => Some(&mut item.value),
                _ => None,
            },
            Location::Absent { .. } => None,
        }
    }

    /// Removes `key` from the table, returning its value if it was present.
    ///
    /// The slot becomes a tombstone so other keys probing through it remain
    /// reachable. Removing an absent key is a no-op. If the removal drops
    /// the load factor below 10%, the table shrinks to half its capacity,
    /// subject to the 50-slot floor.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = match self.locate(key) {
            Location::Present(index) => index,
            Location::Absent { .. } => return None,
        };

        let slot = self.slots.get_mut(index)?;
        let value = match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(item) => item.value,
            // locate only reports Present for occupied slots; put back
            // whatever was there rather than invent a tombstone.
            other => {
                *slot = other;
                return None;
            }
        };
        self.count = self.count.saturating_sub(1);

        if self.load_percent() < SHRINK_BELOW_PERCENT {
            self.rebuild(self.slots.len() / 2);
        }

        Some(value)
    }

    /// Returns the number of live entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots in the table. Always prime.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor as a fraction of occupied slots.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.slots.len() as f64
    }

    /// Load factor as the integer percentage the resize thresholds compare
    /// against.
    #[allow(clippy::arithmetic_side_effects)] // capacity is at least 7
    fn load_percent(&self) -> usize {
        self.count.saturating_mul(100) / self.slots.len().max(1)
    }

    /// Rebuilds the slot array at the next prime above `target`, rehashing
    /// every live item through the ordinary insert path and discarding
    /// tombstones. Targets below the floor are ignored outright.
    ///
    /// The fresh table replaces `self` by a single assignment, so the caller
    /// keeps the same table identity across the rebuild.
    fn rebuild(&mut self, target: usize) {
        if target < SIZE_FLOOR {
            return;
        }

        let mut fresh = Self::with_capacity(target);
        for slot in mem::take(&mut self.slots) {
            if let Slot::Occupied(item) = slot {
                fresh.insert(item.key, item.value);
            }
        }

        *self = fresh;
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.count = 0;
    }

    /// Returns an iterator over the entries, in no particular order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_> {
        Iter { slots: &self.slots, index: 0 }
    }
}

/// Iterator over a table's live entries.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// The slot array being walked
    slots: &'a [Slot],
    /// Next slot position to examine
    index: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(item) = slot {
                return Some((item.key.as_str(), item.value.as_str()));
            }
        }
        None
    }
}


#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Trial-division check used to assert the capacity invariant.
    fn is_prime(n: usize) -> bool {
        n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    proptest! {
        #[test]
        fn round_trip(key in "[a-z]{1,12}", value in "[a-z0-9]{0,12}") {
            let mut table = DoubleHashTable::new();
            table.insert(key.clone(), value.clone());
            prop_assert_eq!(table.get(&key), Some(value.as_str()));
        }

        #[test]
        fn never_inserted_keys_are_absent(
            keys in prop::collection::hash_set("[a-m]{1,8}", 0..40),
            probe in "[n-z]{1,8}",
        ) {
            // The probe key draws from a disjoint alphabet, so it is never
            // one of the inserted keys.
            let mut table = DoubleHashTable::new();
            for key in &keys {
                table.insert(key.clone(), key.clone());
            }
            prop_assert_eq!(table.get(&probe), None);
        }

        #[test]
        fn removing_one_key_hides_only_that_key(
            entries in prop::collection::hash_map("[a-z]{1,6}", "[a-z]{0,6}", 1..120),
            victim in any::<prop::sample::Index>(),
        ) {
            let mut table = DoubleHashTable::new();
            for (key, value) in &entries {
                table.insert(key.clone(), value.clone());
            }

            let keys: Vec<&String> = entries.keys().collect();
            let victim = (*victim.get(&keys)).clone();
            prop_assert_eq!(table.remove(&victim), entries.get(&victim).cloned());

            prop_assert_eq!(table.get(&victim), None);
            for (key, value) in &entries {
                if *key != victim {
                    prop_assert_eq!(table.get(key), Some(value.as_str()));
                }
            }
        }

        #[test]
        fn removing_absent_keys_changes_nothing(
            entries in prop::collection::hash_map("[a-m]{1,6}", "[a-z]{0,6}", 0..60),
            absent in "[n-z]{1,6}",
        ) {
            let mut table = DoubleHashTable::new();
            for (key, value) in &entries {
                table.insert(key.clone(), value.clone());
            }
            let len = table.len();

            prop_assert_eq!(table.remove(&absent), None);
            prop_assert_eq!(table.len(), len);
        }

        #[test]
        fn capacity_stays_prime_and_load_stays_bounded(
            entries in prop::collection::vec(("[a-z]{1,6}", "[a-z]{0,6}"), 0..300),
        ) {
            let mut table = DoubleHashTable::new();
            for (key, value) in entries {
                table.insert(key, value);
                prop_assert!(is_prime(table.capacity()));
                prop_assert!(table.capacity() >= 7);
                // The grow check runs before the insert, so it is the
                // pre-insert count that the 70% threshold bounds.
                prop_assert!(table.len().saturating_sub(1) * 100 / table.capacity() <= 70);
            }
        }

        #[test]
        fn behaves_like_the_std_map(
            ops in prop::collection::vec(("[a-d]{1,3}", "[a-z]{0,4}", any::<bool>()), 0..400),
        ) {
            // Tiny key space forces collisions, tombstones, and reuse.
            let mut table = DoubleHashTable::new();
            let mut model: HashMap<String, String> = HashMap::new();

            for (key, value, is_insert) in ops {
                if is_insert {
                    prop_assert_eq!(
                        table.insert(key.clone(), value.clone()),
                        model.insert(key, value)
                    );
                } else {
                    prop_assert_eq!(table.remove(&key), model.remove(&key));
                }
                prop_assert_eq!(table.len(), model.len());
            }

            for (key, value) in &model {
                prop_assert_eq!(table.get(key), Some(value.as_str()));
            }
        }
    }
}
