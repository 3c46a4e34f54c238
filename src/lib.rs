//! # Double-Hash Table
//!
//! A from-scratch `String → String` hash table built on open addressing with
//! double hashing, without leaning on the standard library's map types.
//!
//! The table keeps its capacity prime, which makes every double-hash probe
//! step coprime to the table size: a key's probe sequence is a full
//! permutation of the slots, so probing never cycles through a subset of the
//! table. Removed entries leave tombstones that keep other keys' probe
//! chains intact, and the table rebuilds itself (purging tombstones) when
//! the load factor leaves the 10-70% band.
//!
//! ## Basic Usage
//!
//! ```rust
//! use dhtable::DoubleHashTable;
//!
//! // Create a new table
//! let mut table = DoubleHashTable::new();
//!
//! // Insert values
//! table.insert("apple".to_string(), "red".to_string());
//! table.insert("banana".to_string(), "yellow".to_string());
//!
//! // Retrieve values
//! assert_eq!(table.get("apple"), Some("red"));
//!
//! // Inserting an existing key updates it and hands back the old value
//! assert_eq!(
//!     table.insert("apple".to_string(), "green".to_string()),
//!     Some("red".to_string()),
//! );
//! assert_eq!(table.get("apple"), Some("green"));
//!
//! // Remove values
//! assert_eq!(table.remove("apple"), Some("green".to_string()));
//! assert_eq!(table.get("apple"), None);
//! ```
//!
//! ## Scope
//!
//! Keys and values are owned `String`s: the table takes ownership of both on
//! insert and drops them on removal or when the table itself drops. The type
//! is single-threaded by design: wrap it in a lock if it must be shared.
//! There is no iteration-order guarantee and no defense against hash
//! flooding, since the hash bases are fixed and public.

/// Prime capacity selection and the double-hashing probe sequence
pub mod hashing;
/// Module implementing the open-addressing string table
mod table;
/// Utility functions and traits for the table
mod utils;

pub use table::{DoubleHashTable, Iter};
pub use utils::TableExtensions;
