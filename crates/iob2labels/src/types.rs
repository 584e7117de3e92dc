//! # Common Types and Aliases

/// An integer IOB2 label, as fed to a sequence-labeling loss.
///
/// Signed, so that the ignore marker can live outside the label map range.
pub type LabelId = i64;

/// A token id produced by the tokenizer collaborator.
pub type TokenId = u32;

/// The default ignore marker; excluded from loss by most training frameworks.
pub const DEFAULT_IGNORE_LABEL: LabelId = -100;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type IobHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> IobHashMap<K, V> {
            IobHashMap::with_capacity(capacity)
        }
    } else if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type IobHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> IobHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type IobHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> IobHashMap<K, V> {
            IobHashMap::with_capacity(capacity)
        }
    }
}

/// Compile-time check that a value is `Send`.
pub fn check_is_send<S: Send>(_: &S) {}

/// Compile-time check that a value is `Sync`.
pub fn check_is_sync<S: Sync>(_: &S) {}
