//! Ordered collections with replace-on-write reordering.
//!
//! An [`OrderedCollection`] is an immutable snapshot: every operator returns
//! a new collection and leaves the receiver untouched, so anyone holding a
//! clone keeps seeing a complete, consistent order. Elements are shared as
//! `Arc<T>`; reordering moves pointers, never payloads.
//!
//! # Examples
//!
//! ```
//! use pdfjoin::collection::OrderedCollection;
//!
//! let files: OrderedCollection<&str> = ["a", "b", "c", "d"].into_iter().collect();
//!
//! // Drag "a" from the top to the third slot.
//! let moved = files.move_item(0, 2).unwrap();
//! assert_eq!(moved.iter().copied().collect::<Vec<_>>(), ["b", "c", "a", "d"]);
//!
//! // The original snapshot is unchanged.
//! assert_eq!(files.iter().copied().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{PdfJoinError, Result};

/// A validated reordering of `0..len`.
///
/// `order[i]` is the old index of the element that ends up at position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
}

impl Permutation {
    /// The identity permutation on `len` elements.
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// Validate an explicit order against a collection of `len` elements.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::InvalidPermutation`] if the order has the wrong
    /// length, references an index out of range, or repeats an index.
    pub fn new(order: Vec<usize>, len: usize) -> Result<Self> {
        if order.len() != len {
            return Err(PdfJoinError::invalid_permutation(format!(
                "expected {len} indexes, got {}",
                order.len()
            )));
        }

        let mut seen = vec![false; len];
        for &index in &order {
            let slot = seen.get_mut(index).ok_or_else(|| {
                PdfJoinError::invalid_permutation(format!(
                    "index {index} is out of range for {len} elements"
                ))
            })?;
            if *slot {
                return Err(PdfJoinError::invalid_permutation(format!(
                    "index {index} appears more than once"
                )));
            }
            *slot = true;
        }

        Ok(Self { order })
    }

    /// Translate a drag gesture into a permutation.
    ///
    /// The element at `old` is removed and reinserted at `new`; everything in
    /// between shifts by one slot to fill the gap.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::InvalidPermutation`] if either index is out of
    /// range.
    pub fn single_move(len: usize, old: usize, new: usize) -> Result<Self> {
        if old >= len || new >= len {
            return Err(PdfJoinError::invalid_permutation(format!(
                "cannot move {old} -> {new} in a list of {len} element(s)"
            )));
        }

        let mut order: Vec<usize> = (0..len).collect();
        let moved = order.remove(old);
        order.insert(new, moved);

        Ok(Self { order })
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether this permutes nothing.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Old indexes in their new order.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// The permutation that undoes this one.
    pub fn inverse(&self) -> Self {
        let mut order = vec![0; self.order.len()];
        for (new, &old) in self.order.iter().enumerate() {
            order[old] = new;
        }
        Self { order }
    }
}

/// An ordered, immutable snapshot of elements.
pub struct OrderedCollection<T> {
    items: Arc<[Arc<T>]>,
}

impl<T> OrderedCollection<T> {
    /// An empty collection.
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    fn from_shared(items: Vec<Arc<T>>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(Arc::as_ref)
    }

    /// Shared handle of the element at `index`.
    ///
    /// Two handles are the same element iff [`Arc::ptr_eq`] holds.
    pub fn get_shared(&self, index: usize) -> Option<&Arc<T>> {
        self.items.get(index)
    }

    /// Iterate elements in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.items.iter().map(Arc::as_ref)
    }

    /// Whether `other` is this exact snapshot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Return a new collection arranged by `new_order`.
    ///
    /// `new_order[i]` names the current index of the element to place at
    /// position `i`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::InvalidPermutation`] if `new_order` is not a
    /// bijection on the current index set. `self` is never modified.
    pub fn replace_order(&self, new_order: &[usize]) -> Result<Self> {
        let permutation = Permutation::new(new_order.to_vec(), self.len())?;
        self.apply(&permutation)
    }

    /// Return a new collection arranged by an already validated permutation.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::InvalidPermutation`] if `permutation` was built
    /// for a collection of a different length.
    pub fn apply(&self, permutation: &Permutation) -> Result<Self> {
        if permutation.len() != self.len() {
            return Err(PdfJoinError::invalid_permutation(format!(
                "permutation covers {} element(s), collection has {}",
                permutation.len(),
                self.len()
            )));
        }
        let items = permutation
            .as_slice()
            .iter()
            .map(|&old| Arc::clone(&self.items[old]))
            .collect();
        Ok(Self::from_shared(items))
    }

    /// Move one element from `old` to `new`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::InvalidPermutation`] if either index is out of
    /// range.
    pub fn move_item(&self, old: usize, new: usize) -> Result<Self> {
        let permutation = Permutation::single_move(self.len(), old, new)?;
        self.apply(&permutation)
    }

    /// Return a new collection sorted by `compare`.
    ///
    /// The sort is stable: elements that compare equal keep their relative
    /// order.
    pub fn sorted_by<F>(&self, mut compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut items = self.items.to_vec();
        items.sort_by(|a, b| compare(&**a, &**b));
        Self::from_shared(items)
    }

    /// Return a new collection without the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::InvalidPermutation`] if `index` is out of range.
    pub fn without(&self, index: usize) -> Result<Self> {
        if index >= self.len() {
            return Err(PdfJoinError::invalid_permutation(format!(
                "cannot remove index {index} from a list of {} element(s)",
                self.len()
            )));
        }
        let mut items = self.items.to_vec();
        items.remove(index);
        Ok(Self::from_shared(items))
    }
}

impl<T> Clone for OrderedCollection<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for OrderedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_shared(iter.into_iter().map(Arc::new).collect())
    }
}

impl<T> From<Vec<T>> for OrderedCollection<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}
