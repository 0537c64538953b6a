//! Per-row accumulation with checked arithmetic
//!
//! Sums are kept in a wider type than the stored `i64` values, so a
//! running total may leave the `i64` range as long as the final value
//! comes back into it.

use std::collections::BTreeMap;

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Zero};

use crate::error::{Result, SparseError};

/// Builds one output row
///
/// Partial sums may pass through zero or outside the `i64` range while
/// accumulating; both are only resolved when the row is finished.
pub(crate) struct RowAccumulator<W> {
    row: usize,
    values: BTreeMap<usize, W>,
}

impl<W> RowAccumulator<W>
where
    W: Copy + Zero + CheckedAdd + CheckedSub + CheckedMul + From<i64> + TryInto<i64>,
{
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: BTreeMap::new(),
        }
    }

    /// Starts from a copy of an existing row
    pub fn from_row(row: usize, cols: Option<&BTreeMap<usize, i64>>) -> Self {
        let values = cols
            .into_iter()
            .flatten()
            .map(|(&col, &value)| (col, W::from(value)))
            .collect();
        Self { row, values }
    }

    fn update(&mut self, col: usize, f: impl FnOnce(W) -> Option<W>) -> Result<()> {
        let slot = self.values.entry(col).or_insert_with(W::zero);
        *slot = f(*slot).ok_or(SparseError::Overflow { row: self.row, col })?;
        Ok(())
    }

    pub fn add(&mut self, col: usize, value: i64) -> Result<()> {
        let value = W::from(value);
        self.update(col, |current| current.checked_add(&value))
    }

    pub fn sub(&mut self, col: usize, value: i64) -> Result<()> {
        let value = W::from(value);
        self.update(col, |current| current.checked_sub(&value))
    }

    /// Adds `x * y` at `col`
    pub fn add_product(&mut self, col: usize, x: i64, y: i64) -> Result<()> {
        let product = W::from(x)
            .checked_mul(&W::from(y))
            .ok_or(SparseError::Overflow { row: self.row, col })?;
        self.update(col, |current| current.checked_add(&product))
    }

    /// Returns the row index and its non-zero values
    ///
    /// Fails with [`SparseError::Overflow`] for the first column whose final
    /// value does not fit in an `i64`.
    pub fn finish(self) -> Result<(usize, BTreeMap<usize, i64>)> {
        let row = self.row;
        let values = self
            .values
            .into_iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(col, v)| {
                v.try_into()
                    .map(|v| (col, v))
                    .map_err(|_| SparseError::Overflow { row, col })
            })
            .collect::<Result<_>>()?;
        Ok((row, values))
    }
}

/// Accumulator wide enough for any product of two `i64` values
pub(crate) type WideAccumulator = RowAccumulator<i128>;
