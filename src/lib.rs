//! # Prime Table
//!
//! Hash maps built from first principles on prime-sized tables, with two
//! collision-resolution strategies:
//!
//! - `ChainedHashMap`: separate chaining — every bucket is a linked list of
//!   entries, the table doubles at load factor 1.0
//! - `ProbingHashMap`: open addressing — quadratic probing over single-entry
//!   slots with tombstone deletion, the table doubles at load factor 0.5
//!
//! Capacities are always prime: any requested capacity is promoted to the
//! next prime at construction and on every resize, which keeps the quadratic
//! probe sequence effective and spreads clustered hashes under modulo
//! indexing.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primetable::ChainedHashMap;
//!
//! // Create a new hash map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.insert("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Open Addressing
//!
//! ```rust
//! use primetable::ProbingHashMap;
//!
//! let mut map = ProbingHashMap::with_capacity(11);
//! assert_eq!(map.capacity(), 11);
//!
//! for i in 1..=5 {
//!     map.insert(i.to_string(), i * 10);
//! }
//! assert_eq!(map.len(), 5);
//!
//! // Removal tombstones the slot; the key is gone but the slot stays
//! // occupied for probing purposes.
//! map.remove("3");
//! assert!(!map.contains_key("3"));
//! assert_eq!(map.len(), 4);
//!
//! // Growth keeps the load factor at most 0.5 and the capacity prime.
//! for i in 6..=40 {
//!     map.insert(i.to_string(), i * 10);
//! }
//! assert!(map.load_factor() <= 0.5);
//! ```
//!
//! ## Frequency Counting
//!
//! ```rust
//! use primetable::find_mode;
//!
//! let votes = ["red", "blue", "red", "green", "red", "blue"];
//! let (modes, frequency) = find_mode(&votes);
//! assert_eq!(modes, vec!["red"]);
//! assert_eq!(frequency, 3);
//! ```

use std::hash::{BuildHasherDefault, DefaultHasher};

/// Module implementing a separate-chaining hash map over prime capacities
mod chained_hashmap;
/// Module implementing the most-frequent-value search
mod mode;
/// Module implementing prime capacity sizing
mod prime;
/// Module implementing a quadratic-probing open-addressing hash map
mod probing_hashmap;
/// Utility functions and traits for the hash maps
mod utils;

pub use chained_hashmap::ChainedHashMap;
pub use mode::find_mode;
pub use probing_hashmap::ProbingHashMap;
pub use utils::HashMapExtensions;

/// The hasher builder both maps use unless one is injected; deterministic
/// across runs.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;
