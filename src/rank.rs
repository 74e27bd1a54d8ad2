//! The rank constraint shared by the dimension-indexed binders of one binding pass.

use std::cell::Cell;

use crate::{json_binding::JsonBindingError, MAX_RANK};

/// Validate that `rank` is in `[0, MAX_RANK]`.
///
/// # Errors
/// Returns [`JsonBindingError::RankOutOfRange`] if `rank` exceeds [`MAX_RANK`].
pub fn validate_rank(rank: usize) -> Result<(), JsonBindingError> {
    if rank > MAX_RANK {
        Err(JsonBindingError::RankOutOfRange(rank))
    } else {
        Ok(())
    }
}

/// A rank constraint, either unconstrained or fixed to a rank.
///
/// A [`RankConstraint`] is created immediately before a binding pass and is shared by reference with every dimension-indexed binder of that pass.
/// The first array loaded while the constraint is unconstrained fixes the rank, and every subsequent array must have exactly that length.
/// Which field fixes the rank therefore depends on the order in which the caller binds fields.
///
/// The constraint is not [`Sync`]; concurrent binding passes must each create their own.
#[derive(Debug, Default)]
pub struct RankConstraint(Cell<Option<usize>>);

impl RankConstraint {
    /// Create an unconstrained rank constraint.
    #[must_use]
    pub const fn new() -> Self {
        Self(Cell::new(None))
    }

    /// Create a rank constraint fixed to `rank`.
    ///
    /// # Errors
    /// Returns [`JsonBindingError::RankOutOfRange`] if `rank` exceeds [`MAX_RANK`].
    pub fn fixed(rank: usize) -> Result<Self, JsonBindingError> {
        validate_rank(rank)?;
        Ok(Self(Cell::new(Some(rank))))
    }

    /// Returns the rank, or [`None`] if unconstrained.
    #[must_use]
    pub fn get(&self) -> Option<usize> {
        self.0.get()
    }

    /// Returns true if the rank has been fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.0.get().is_some()
    }

    /// Constrain the rank by an observed array length `size`.
    ///
    /// If unconstrained, the rank is fixed to `size`.
    ///
    /// # Errors
    /// Returns [`JsonBindingError::RankOutOfRange`] if `size` exceeds [`MAX_RANK`], or [`JsonBindingError::LengthMismatch`] if the rank is fixed to a value other than `size`.
    pub fn constrain(&self, size: usize) -> Result<(), JsonBindingError> {
        validate_rank(size)?;
        match self.0.get() {
            None => {
                tracing::trace!(rank = size, "rank constraint fixed");
                self.0.set(Some(size));
                Ok(())
            }
            Some(rank) if rank == size => Ok(()),
            Some(rank) => Err(JsonBindingError::LengthMismatch {
                expected: rank,
                actual: size,
            }),
        }
    }
}
