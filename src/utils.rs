//! Utility functions and traits for [`DoubleHashTable`]

use crate::DoubleHashTable;

/// Extension trait providing convenience accessors over the table's iterator
pub trait TableExtensions {
    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<String>;

    /// Returns true if the table contains the given key
    fn contains_key(&self, key: &str) -> bool;
}

impl TableExtensions for DoubleHashTable {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }

    fn values(&self) -> Vec<String> {
        self.iter().map(|(_, value)| value.to_string()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Creates a [`DoubleHashTable`] from an iterator of key-value pairs
#[allow(dead_code)]
pub fn from_iter<I>(iter: I) -> DoubleHashTable
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut table = DoubleHashTable::new();

    for (key, value) in iter {
        table.insert(key, value);
    }

    table
}
