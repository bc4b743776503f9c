//! String-keyed hash table used to look up nodes (or anything else) by label.
//!
//! - [LabelIndex]: chained hash table over Bernstein's hash with optional
//!   growth once a load threshold is reached.

use crate::error::LabelIndexError;
use crate::model::tree::{NodeIndex, Tree};
use log::{debug, warn};
use std::fmt;

/// Bins used by [LabelIndex::with_defaults].
pub const DEFAULT_INITIAL_BINS: usize = 16;
/// Load threshold used by [LabelIndex::with_defaults].
pub const DEFAULT_LOAD_THRESHOLD: f64 = 0.75;
/// Growth factor used by [LabelIndex::with_defaults].
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Bernstein's hash: `h = 33 * h + byte`, wrapping at 32 bits.
///
/// # Examples
/// ```
/// # use nwkit::model::label_index::bernstein_hash;
/// assert_eq!(bernstein_hash(""), 0);
/// assert_eq!(bernstein_hash("a"), 97);
/// assert_eq!(bernstein_hash("ab"), 33 * 97 + 98);
/// ```
pub fn bernstein_hash(key: &str) -> u32 {
    key.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(33).wrapping_add(u32::from(b)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Growth {
    Fixed,
    Dynamic {
        load_threshold: f64,
        growth_factor: usize,
    },
}

// =#========================================================================#=
// LABEL INDEX
// =#========================================================================#=
/// Maps labels to values of type `V`.
///
/// Keys are copied into the index; values are stored as given (for the tree
/// operations they are [NodeIndex]es, so the index never owns a node).
/// Setting an existing key replaces its value and keeps the stored key.
///
/// A fixed index keeps its number of bins. A dynamic index checks, before
/// each `set`, whether `len / num_bins` has reached its load threshold and
/// if so rehashes into `growth_factor` times as many bins. A failed rehash
/// leaves the index as it was.
///
/// # Example
/// ```
/// use nwkit::model::LabelIndex;
///
/// let mut index = LabelIndex::new_dynamic(2, 0.5, 2);
/// index.set("Homo", 1).unwrap();
/// index.set("Tamias", 2).unwrap();
/// index.set("Homo", 3).unwrap();
///
/// assert_eq!(index.get("Homo"), Some(&3));
/// assert_eq!(index.get("Vulpes"), None);
/// assert_eq!(index.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LabelIndex<V> {
    /// Bins of (key, value) pairs, in insertion order within each bin
    bins: Vec<Vec<(String, V)>>,
    /// Number of stored keys
    count: usize,
    growth: Growth,
}

impl<V> LabelIndex<V> {
    /// Creates an index with a fixed number of bins.
    ///
    /// # Panics
    /// Panics if `num_bins` is zero.
    pub fn new(num_bins: usize) -> Self {
        assert!(num_bins > 0, "a label index needs at least one bin");
        LabelIndex {
            bins: (0..num_bins).map(|_| Vec::new()).collect(),
            count: 0,
            growth: Growth::Fixed,
        }
    }

    /// Creates an index that grows by `growth_factor` once its load factor
    /// reaches `load_threshold`.
    ///
    /// # Panics
    /// Panics if `initial_bins` is zero, `load_threshold` is not positive, or
    /// `growth_factor` is below 2.
    pub fn new_dynamic(initial_bins: usize, load_threshold: f64, growth_factor: usize) -> Self {
        assert!(load_threshold > 0.0, "load threshold must be positive");
        assert!(growth_factor >= 2, "growth factor must be at least 2");
        LabelIndex {
            growth: Growth::Dynamic {
                load_threshold,
                growth_factor,
            },
            ..Self::new(initial_bins)
        }
    }

    /// Creates a dynamic index with default sizing.
    pub fn with_defaults() -> Self {
        Self::new_dynamic(
            DEFAULT_INITIAL_BINS,
            DEFAULT_LOAD_THRESHOLD,
            DEFAULT_GROWTH_FACTOR,
        )
    }

    fn bin_of(&self, key: &str) -> usize {
        bernstein_hash(key) as usize % self.bins.len()
    }

    /// Stores `value` under `key`, replacing the value of an existing key.
    ///
    /// # Errors
    /// [LabelIndexError::Allocation] if growing the index or storing a new
    /// key fails to allocate. The index is unchanged in that case.
    pub fn set(&mut self, key: &str, value: V) -> Result<(), LabelIndexError> {
        if let Growth::Dynamic {
            load_threshold,
            growth_factor,
        } = self.growth
        {
            if self.load_factor() >= load_threshold {
                self.rehash(self.bins.len().saturating_mul(growth_factor))?;
            }
        }

        let bin_index = self.bin_of(key);
        let bin = &mut self.bins[bin_index];
        if let Some((_, stored)) = bin.iter_mut().find(|(k, _)| k.as_str() == key) {
            *stored = value;
            return Ok(());
        }

        bin.try_reserve(1)
            .map_err(|_| LabelIndexError::Allocation { requested: 1 })?;
        bin.push((key.to_string(), value));
        self.count += 1;
        Ok(())
    }

    /// Moves all pairs into `new_size` bins. Every allocation happens before
    /// the first pair moves.
    fn rehash(&mut self, new_size: usize) -> Result<(), LabelIndexError> {
        let allocation_failed = LabelIndexError::Allocation {
            requested: new_size,
        };

        let mut sizes = Vec::new();
        sizes
            .try_reserve_exact(new_size)
            .map_err(|_| allocation_failed.clone())?;
        sizes.resize(new_size, 0usize);
        for (key, _) in self.bins.iter().flatten() {
            sizes[bernstein_hash(key) as usize % new_size] += 1;
        }

        let mut new_bins: Vec<Vec<(String, V)>> = Vec::new();
        new_bins
            .try_reserve_exact(new_size)
            .map_err(|_| allocation_failed.clone())?;
        for size in sizes {
            let mut bin = Vec::new();
            bin.try_reserve_exact(size)
                .map_err(|_| allocation_failed.clone())?;
            new_bins.push(bin);
        }

        for (key, value) in self.bins.drain(..).flatten() {
            let bin_index = bernstein_hash(&key) as usize % new_size;
            new_bins[bin_index].push((key, value));
        }
        debug!(
            "label index grew to {new_size} bins ({} keys)",
            self.count
        );
        self.bins = new_bins;
        Ok(())
    }

    /// Returns the value stored under `key`, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bins[self.bin_of(key)]
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Returns whether `key` is stored.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns all keys, bin by bin.
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Iterates over all (key, value) pairs, bin by bin.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.bins.iter().flatten().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the current number of bins.
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Returns `len / num_bins`.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.bins.len() as f64
    }
}

impl<V> Default for LabelIndex<V> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LabelIndex<NodeIndex> {
    /// Indexes the labeled leaves of `tree` by label.
    ///
    /// Labels are assumed unique; for a repeated label the last leaf in
    /// post-order wins and a warning is logged.
    pub fn from_leaves(tree: &Tree) -> Result<Self, LabelIndexError> {
        let mut index = Self::with_defaults();
        for node in tree.post_order_iter().filter(|n| n.is_leaf() && n.has_label()) {
            if index.contains_key(node.label()) {
                warn!("leaf label '{}' occurs more than once", node.label());
            }
            index.set(node.label(), node.index())?;
        }
        Ok(index)
    }
}

impl LabelIndex<()> {
    /// Collects a set of labels.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, LabelIndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::with_defaults();
        for label in labels {
            index.set(label.as_ref(), ())?;
        }
        Ok(index)
    }
}

impl<V> fmt::Display for LabelIndex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LabelIndex({} keys in {} bins)",
            self.count,
            self.bins.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_index_never_grows() {
        let mut index = LabelIndex::new(2);
        for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            index.set(key, i).unwrap();
        }
        assert_eq!(index.num_bins(), 2);
        assert_eq!(index.len(), 5);
        assert_eq!(index.load_factor(), 2.5);
    }

    #[test]
    fn test_growth_happens_before_insertion() {
        let mut index = LabelIndex::new_dynamic(2, 1.0, 3);
        index.set("a", 0).unwrap();
        index.set("b", 0).unwrap();
        assert_eq!(index.num_bins(), 2);
        // load factor is now 1.0, so the next set grows first
        index.set("c", 0).unwrap();
        assert_eq!(index.num_bins(), 6);
    }
}
