//! Closed intervals and value-to-bit addressing.
//!
//! This module provides [`Bounds`], the fixed interval `[min, max]` a set is
//! constructed over, and [`BitAddress`], the location of one value's membership
//! bit inside the packed word storage.
//!
//! Value `min + i * 64 + b` lives in word `i`, bit `b`. The mapping is a bijection
//! between the interval and the addresses it produces, and it is pure: computing
//! an address never touches the storage.
//!
//! # Examples
//!
//! ```
//! use valueset::Bounds;
//!
//! let bounds = Bounds::new(-10, 100)?;
//! assert_eq!(bounds.word_count(), 2);
//!
//! let address = bounds.address(60).unwrap();
//! assert_eq!((address.word(), address.bit()), (1, 6));
//! assert_eq!(bounds.value_at(address), Some(60));
//!
//! assert_eq!(bounds.address(101), None);
//! # Ok::<(), valueset::RangeError>(())
//! ```

use crate::error::RangeError;

pub(crate) const WORD_BITS: u64 = u64::BITS as u64;

/// The location of a value's membership bit: a word index and a bit index (0-63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitAddress {
    word: usize,
    bit: u32,
}

impl BitAddress {
    /// Creates a new bit address.
    ///
    /// # Panics
    ///
    /// Panics if `bit` is not in the range 0-63.
    #[must_use]
    pub const fn new(word: usize, bit: u32) -> Self {
        assert!(bit < u64::BITS, "bit index must be 0-63");
        Self { word, bit }
    }

    /// Returns the index of the word holding the bit.
    #[must_use]
    pub const fn word(self) -> usize {
        self.word
    }

    /// Returns the index of the bit within its word (0-63).
    #[must_use]
    pub const fn bit(self) -> u32 {
        self.bit
    }

    /// Returns a word with only this address's bit set.
    #[must_use]
    pub const fn mask(self) -> u64 {
        1 << self.bit
    }
}

/// A closed integer interval `[min, max]` with `min <= max`.
///
/// Bounds are immutable once constructed and know how many 64-bit words are
/// needed to hold one bit per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("[{min}, {max}]")]
pub struct Bounds {
    min: i64,
    max: i64,
    word_count: usize,
}

#[expect(clippy::len_without_is_empty)]
impl Bounds {
    /// Creates the interval `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Inverted`] if `min > max`, and
    /// [`RangeError::TooLarge`] if the number of storage words does not fit in
    /// `usize` on this target.
    pub fn new(min: i64, max: i64) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        let last_offset = max.abs_diff(min);
        let word_count = usize::try_from(last_offset / WORD_BITS + 1)
            .map_err(|_| RangeError::TooLarge { min, max })?;
        Ok(Self {
            min,
            max,
            word_count,
        })
    }

    /// Returns the lower bound, inclusive.
    #[must_use]
    pub const fn min(self) -> i64 {
        self.min
    }

    /// Returns the upper bound, inclusive.
    #[must_use]
    pub const fn max(self) -> i64 {
        self.max
    }

    /// Returns the number of values in the interval, `max - min + 1`.
    ///
    /// The count is a `u128` because the full `i64` range holds 2^64 values.
    #[must_use]
    pub fn len(self) -> u128 {
        u128::from(self.last_offset()) + 1
    }

    /// Returns the number of 64-bit words needed to store the interval,
    /// `ceil((max - min + 1) / 64)`.
    #[must_use]
    pub const fn word_count(self) -> usize {
        self.word_count
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[must_use]
    pub const fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns the bit address of `value`, or `None` if it is out of range.
    #[must_use]
    pub fn address(self, value: i64) -> Option<BitAddress> {
        self.contains(value).then(|| self.address_in_range(value))
    }

    /// Returns the value stored at `address`, or `None` if the address falls
    /// outside the interval (including the padding bits of the last word).
    #[must_use]
    pub fn value_at(self, address: BitAddress) -> Option<i64> {
        let word = u64::try_from(address.word).ok()?;
        let offset = word.checked_mul(WORD_BITS)? + u64::from(address.bit);
        if offset > self.last_offset() {
            return None;
        }
        self.min.checked_add_unsigned(offset)
    }

    /// Computes the address of a value already known to be in range.
    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn address_in_range(self, value: i64) -> BitAddress {
        debug_assert!(self.contains(value), "{value} is outside {self}");
        let offset = value.abs_diff(self.min);
        // offset / 64 < word_count, which fits in usize
        BitAddress {
            word: (offset / WORD_BITS) as usize,
            bit: (offset % WORD_BITS) as u32,
        }
    }

    /// Returns the mask of bits in the last word that map to values in range.
    pub(crate) fn tail_mask(self) -> u64 {
        let used = self.last_offset() % WORD_BITS + 1;
        if used == WORD_BITS {
            u64::MAX
        } else {
            (1 << used) - 1
        }
    }

    const fn last_offset(self) -> u64 {
        self.max.abs_diff(self.min)
    }
}
