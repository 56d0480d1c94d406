//! Error types for bounded sets.

/// A value passed to [`ValueSet::add`] or [`ValueSet::remove`] lies outside the
/// set's interval.
///
/// The whole batch containing the value was rejected; the set was not modified.
/// Callers usually treat this as a contract violation rather than a condition to
/// recover from.
///
/// [`ValueSet::add`]: crate::ValueSet::add
/// [`ValueSet::remove`]: crate::ValueSet::remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("value {value} is out of range (supported bounds are {min} and {max})")]
pub struct OutOfRangeError {
    /// The offending value.
    pub value: i64,
    /// Lower bound of the set, inclusive.
    pub min: i64,
    /// Upper bound of the set, inclusive.
    pub max: i64,
}

/// An interval that cannot back a set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum RangeError {
    /// The lower bound is greater than the upper bound.
    #[display("minimum {min} is greater than maximum {max}")]
    Inverted {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },
    /// The interval needs more storage words than the target can index.
    #[display("range {min}..={max} is too large to address on this target")]
    TooLarge {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },
}
