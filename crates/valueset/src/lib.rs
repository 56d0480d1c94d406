//! Bounded integer sets for constraint domains.
//!
//! This crate provides [`ValueSet`], a set of integers drawn from a fixed closed
//! interval `[min, max]`. Membership is stored as one bit per value, packed into
//! 64-bit words, and every operation is safe to call concurrently from many
//! threads. A solver keeps one set per constrained variable (for example the
//! candidate digits of a number-place cell) and narrows or widens it in batches.
//!
//! # Overview
//!
//! The crate is organized in three layers:
//!
//! 1. **Addressing** - [`bounds`]: the interval [`Bounds`] and the pure mapping from a
//!    value to its [`BitAddress`] (word index, bit index) and back.
//! 2. **Storage** - [`value_set`]: [`ValueSet`], which owns the word storage behind a
//!    mutex and applies whole batches of additions or removals atomically.
//! 3. **Errors** - [`error`]: [`OutOfRangeError`] for values outside the interval and
//!    [`RangeError`] for intervals that cannot be constructed.
//!
//! # Bounds policy
//!
//! Batches are validated before anything is written. If any value in an
//! [`add`](ValueSet::add) or [`remove`](ValueSet::remove) batch lies outside the
//! interval, the call fails with [`OutOfRangeError`] and the set is left untouched.
//! [`contains`](ValueSet::contains) never fails: out-of-range values are simply not
//! members.
//!
//! # Examples
//!
//! ```
//! use valueset::ValueSet;
//!
//! let candidates = ValueSet::new(1, 9)?;
//!
//! // Only values whose membership actually flipped are reported.
//! assert_eq!(candidates.add(&[1, 3, 5])?, vec![1, 3, 5]);
//! assert_eq!(candidates.add(&[3, 4])?, vec![4]);
//!
//! // An out-of-range value rejects the whole batch.
//! assert!(candidates.remove(&[1, 10]).is_err());
//! assert_eq!(candidates.values(), vec![1, 3, 4, 5]);
//!
//! assert!(!candidates.contains(0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bounds;
pub mod error;
pub mod value_set;

// Re-export commonly used types
pub use self::{
    bounds::{BitAddress, Bounds},
    error::{OutOfRangeError, RangeError},
    value_set::ValueSet,
};
