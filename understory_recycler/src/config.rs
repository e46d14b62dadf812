// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recycler configuration.

use core::num::NonZeroUsize;

use crate::{Axis, RecyclerError};

/// How cells are laid out along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    /// One cell per track: a single-row (or single-column) list.
    #[default]
    List,
    /// A grid with `cells_per_track` cells stacked along the cross axis of each track.
    ///
    /// A value of `0` is rejected when the recycler is initialized.
    Grid {
        /// Number of cells in each track (rows of a horizontal grid, columns of a vertical one).
        cells_per_track: usize,
    },
}

impl Arrangement {
    /// Returns `true` for [`Arrangement::Grid`].
    #[must_use]
    pub const fn is_grid(self) -> bool {
        matches!(self, Self::Grid { .. })
    }
}

/// Tuning for a [`Recycler`](crate::Recycler).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecyclerConfig {
    /// Scroll axis.
    pub axis: Axis,
    /// List or grid arrangement.
    pub arrangement: Arrangement,
    /// Fraction of the viewport's primary extent added on both sides of the
    /// viewport to form the recyclable bounds.
    pub threshold: f64,
    /// Minimum number of pooled cells, clamped to the data source's item count.
    ///
    /// Must be at least one.
    pub min_pool_size: usize,
    /// Minimum primary-axis span of the pool, as a multiple of the viewport's primary extent.
    pub min_pool_coverage: f64,
}

impl Default for RecyclerConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            arrangement: Arrangement::List,
            threshold: 0.2,
            min_pool_size: 10,
            min_pool_coverage: 1.5,
        }
    }
}

impl RecyclerConfig {
    /// Creates the default configuration for `axis`.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    /// Sets the arrangement.
    #[must_use]
    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    /// Switches to a grid with `cells_per_track` cells in each track.
    #[must_use]
    pub fn with_grid(self, cells_per_track: usize) -> Self {
        self.with_arrangement(Arrangement::Grid { cells_per_track })
    }

    /// Sets the recycling threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the minimum pool size.
    #[must_use]
    pub fn with_min_pool_size(mut self, min_pool_size: usize) -> Self {
        self.min_pool_size = min_pool_size;
        self
    }

    /// Sets the minimum pool coverage.
    #[must_use]
    pub fn with_min_pool_coverage(mut self, min_pool_coverage: f64) -> Self {
        self.min_pool_coverage = min_pool_coverage;
        self
    }

    /// Checks tuning values and resolves the number of cells per track.
    pub(crate) fn validate(&self) -> Result<NonZeroUsize, RecyclerError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RecyclerError::InvalidThreshold(self.threshold));
        }
        if self.min_pool_size == 0 {
            return Err(RecyclerError::ZeroMinPoolSize);
        }
        if !self.min_pool_coverage.is_finite() || self.min_pool_coverage < 0.0 {
            return Err(RecyclerError::InvalidPoolCoverage(self.min_pool_coverage));
        }
        match self.arrangement {
            Arrangement::List => Ok(NonZeroUsize::MIN),
            Arrangement::Grid { cells_per_track } => {
                NonZeroUsize::new(cells_per_track).ok_or(RecyclerError::ZeroCrossAxisCount)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Arrangement, RecyclerConfig};
    use crate::{Axis, RecyclerError};

    #[test]
    fn defaults_match_documented_tuning() {
        let config = RecyclerConfig::default();
        assert_eq!(config.axis, Axis::Horizontal);
        assert_eq!(config.arrangement, Arrangement::List);
        assert_eq!(config.threshold, 0.2);
        assert_eq!(config.min_pool_size, 10);
        assert_eq!(config.min_pool_coverage, 1.5);
        assert_eq!(config.validate().map(|n| n.get()), Ok(1));
    }

    #[test]
    fn grid_resolves_cells_per_track() {
        let config = RecyclerConfig::new(Axis::Vertical).with_grid(4);
        assert!(config.arrangement.is_grid());
        assert_eq!(config.validate().map(|n| n.get()), Ok(4));
    }

    #[test]
    fn invalid_tuning_is_rejected() {
        let zero_grid = RecyclerConfig::default().with_grid(0);
        assert_eq!(zero_grid.validate(), Err(RecyclerError::ZeroCrossAxisCount));

        let negative = RecyclerConfig::default().with_threshold(-0.1);
        assert_eq!(negative.validate(), Err(RecyclerError::InvalidThreshold(-0.1)));

        let no_pool = RecyclerConfig::default()
            .with_min_pool_size(0)
            .with_min_pool_coverage(0.0);
        assert_eq!(no_pool.validate(), Err(RecyclerError::ZeroMinPoolSize));

        let nan = RecyclerConfig::default().with_min_pool_coverage(f64::NAN);
        assert!(matches!(
            nan.validate(),
            Err(RecyclerError::InvalidPoolCoverage(_))
        ));
    }
}
