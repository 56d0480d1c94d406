//! Thread-safe bounded integer sets.
//!
//! This module provides [`ValueSet`], a set over a fixed interval `[min, max]`
//! stored as packed 64-bit words behind a mutex.
//!
//! # Concurrency
//!
//! All operations take `&self`, so a set can be shared between threads (for
//! example through an [`Arc`](std::sync::Arc) or a scoped borrow). Each operation
//! holds the guard for exactly one critical section:
//!
//! - [`add`](ValueSet::add), [`remove`](ValueSet::remove) and
//!   [`clear`](ValueSet::clear) apply their whole batch under one acquisition, so no
//!   other caller can observe a half-applied batch.
//! - [`values`](ValueSet::values) copies the words under the guard and decodes the
//!   copy afterwards; later mutations are not reflected in the result.
//!
//! No order is promised between concurrent callers beyond per-call atomicity.
//! Whichever caller takes the guard first applies its whole batch first.
//!
//! # Examples
//!
//! ```
//! use std::thread;
//!
//! use valueset::ValueSet;
//!
//! let set = ValueSet::new(0, 999)?;
//!
//! thread::scope(|s| {
//!     s.spawn(|| set.add(&[1, 2, 3]));
//!     s.spawn(|| set.add(&[500, 999]));
//! });
//!
//! assert_eq!(set.values(), vec![1, 2, 3, 500, 999]);
//! # Ok::<(), valueset::RangeError>(())
//! ```

use std::fmt;

use parking_lot::Mutex;

use crate::{
    bounds::{BitAddress, Bounds},
    error::{OutOfRangeError, RangeError},
};

/// A batch mutation applied to one word at a time.
#[derive(Debug, Clone, Copy, derive_more::Display)]
enum Mutation {
    #[display("add")]
    Add,
    #[display("remove")]
    Remove,
}

impl Mutation {
    fn apply(self, word: u64, mask: u64) -> u64 {
        match self {
            Self::Add => word | mask,
            Self::Remove => word & !mask,
        }
    }
}

/// A set of integers from a fixed closed interval, safe for concurrent use.
///
/// Every value in `[min, max]` has one membership bit. The interval is chosen at
/// construction and never changes; the set never grows or shrinks its storage.
///
/// Mutations are batched: [`add`](Self::add) and [`remove`](Self::remove) take a
/// slice of values, validate all of them against the interval, and then apply them
/// atomically. They return the values whose membership actually changed, in input
/// order.
///
/// # Examples
///
/// ```
/// use valueset::ValueSet;
///
/// let set = ValueSet::new(1, 9)?;
/// set.add(&[1, 3, 5, 4])?;
///
/// // 1 and 3 are already members; only 6 changes.
/// assert_eq!(set.add(&[1, 6, 3])?, vec![6]);
/// assert_eq!(set.values(), vec![1, 3, 4, 5, 6]);
///
/// assert_eq!(set.remove(&[2, 3, 4])?, vec![3, 4]);
/// assert_eq!(set.values(), vec![1, 5, 6]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Out-of-range values
///
/// ```
/// use valueset::{OutOfRangeError, ValueSet};
///
/// let set = ValueSet::new(1, 9)?;
///
/// let err = set.add(&[1, 6, 10, 3]).unwrap_err();
/// assert_eq!(err, OutOfRangeError { value: 10, min: 1, max: 9 });
/// assert!(set.is_empty());
///
/// assert!(!set.contains(10));
/// # Ok::<(), valueset::RangeError>(())
/// ```
pub struct ValueSet {
    bounds: Bounds,
    words: Mutex<Vec<u64>>,
}

impl ValueSet {
    /// Creates an empty set over `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Inverted`] if `min > max`, and
    /// [`RangeError::TooLarge`] if the interval cannot be addressed on this target
    /// or its storage cannot be allocated.
    pub fn new(min: i64, max: i64) -> Result<Self, RangeError> {
        Bounds::new(min, max).and_then(Self::with_bounds)
    }

    /// Creates an empty set over `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::TooLarge`] if the storage words cannot be allocated.
    pub fn with_bounds(bounds: Bounds) -> Result<Self, RangeError> {
        let word_count = bounds.word_count();
        let mut words = Vec::new();
        words
            .try_reserve_exact(word_count)
            .map_err(|_| RangeError::TooLarge {
                min: bounds.min(),
                max: bounds.max(),
            })?;
        words.resize(word_count, 0);

        log::debug!("creating value set over {bounds} ({word_count} words)");
        Ok(Self {
            bounds,
            words: Mutex::new(words),
        })
    }

    /// Returns the interval this set is defined over.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the lower bound, inclusive.
    #[must_use]
    pub fn min(&self) -> i64 {
        self.bounds.min()
    }

    /// Returns the upper bound, inclusive.
    #[must_use]
    pub fn max(&self) -> i64 {
        self.bounds.max()
    }

    /// Adds every value in `values` as one atomic batch.
    ///
    /// Returns the values that were not members before the call, in input order.
    /// A value repeated within the batch is reported at most once.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] for the first value outside `[min, max]`.
    /// In that case nothing is added.
    pub fn add(&self, values: &[i64]) -> Result<Vec<i64>, OutOfRangeError> {
        self.apply(Mutation::Add, values)
    }

    /// Removes every value in `values` as one atomic batch.
    ///
    /// Returns the values that were members before the call, in input order.
    /// A value repeated within the batch is reported at most once.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] for the first value outside `[min, max]`.
    /// In that case nothing is removed.
    pub fn remove(&self, values: &[i64]) -> Result<Vec<i64>, OutOfRangeError> {
        self.apply(Mutation::Remove, values)
    }

    /// Returns `true` if `value` is a member.
    ///
    /// Values outside `[min, max]` are never members; this is not an error.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        let Some(address) = self.bounds.address(value) else {
            return false;
        };
        let words = self.words.lock();
        words[address.word()] & address.mask() != 0
    }

    /// Returns all members in ascending order.
    ///
    /// The result reflects a snapshot taken under the guard.
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        let snapshot = self.words.lock().clone();
        decode(self.bounds, &snapshot)
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        let words = self.words.lock();
        words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.lock().iter().all(|&word| word == 0)
    }

    /// Removes every member as one atomic batch.
    ///
    /// Returns the removed values in ascending order.
    pub fn clear(&self) -> Vec<i64> {
        let removed = {
            let mut words = self.words.lock();
            let removed = words.clone();
            words.fill(0);
            removed
        };
        let removed = decode(self.bounds, &removed);
        log::trace!("cleared {} values from {}", removed.len(), self.bounds);
        removed
    }

    fn check_bounds(&self, values: &[i64]) -> Result<(), OutOfRangeError> {
        match values.iter().find(|&&value| !self.bounds.contains(value)) {
            Some(&value) => Err(OutOfRangeError {
                value,
                min: self.bounds.min(),
                max: self.bounds.max(),
            }),
            None => Ok(()),
        }
    }

    fn apply(&self, mutation: Mutation, values: &[i64]) -> Result<Vec<i64>, OutOfRangeError> {
        self.check_bounds(values)?;

        let mut changed = Vec::with_capacity(values.len());
        {
            let mut words = self.words.lock();
            for &value in values {
                let address = self.bounds.address_in_range(value);
                let word = &mut words[address.word()];
                let updated = mutation.apply(*word, address.mask());
                if updated != *word {
                    *word = updated;
                    changed.push(value);
                }
            }
            debug_assert!(
                words
                    .last()
                    .is_none_or(|&last| last & !self.bounds.tail_mask() == 0),
                "padding bits set in {}",
                self.bounds
            );
        }

        log::trace!(
            "{mutation} batch of {} values on {}: {} changed",
            values.len(),
            self.bounds,
            changed.len()
        );
        Ok(changed)
    }
}

/// Decodes the members stored in `words`, ascending, stopping at the upper bound.
fn decode(bounds: Bounds, words: &[u64]) -> Vec<i64> {
    let count = words.iter().map(|word| word.count_ones() as usize).sum();
    let mut values = Vec::with_capacity(count);
    for (index, &word) in words.iter().enumerate() {
        let mut rest = word;
        while rest != 0 {
            let bit = rest.trailing_zeros();
            rest &= rest - 1;
            let Some(value) = bounds.value_at(BitAddress::new(index, bit)) else {
                return values;
            };
            values.push(value);
        }
    }
    values
}

impl Clone for ValueSet {
    fn clone(&self) -> Self {
        Self {
            bounds: self.bounds,
            words: Mutex::new(self.words.lock().clone()),
        }
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSet")
            .field("bounds", &self.bounds)
            .field("values", &self.values())
            .finish()
    }
}
