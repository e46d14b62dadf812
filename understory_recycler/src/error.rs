// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for recycler configuration and initialization.

use thiserror::Error;

/// Errors surfaced while setting up a [`Recycler`](crate::Recycler).
///
/// All variants are fatal for the instance that produced them: the engine
/// never starts building its pool from an invalid configuration, and a
/// failed layout pass leaves it awaiting layout.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RecyclerError {
    /// The prototype cell has a zero, negative, or non-finite extent.
    ///
    /// Cell extents are derived from the prototype's aspect ratio, so both
    /// components must be strictly positive.
    #[error("prototype cell extent must be positive and finite, got {width}x{height}")]
    InvalidPrototypeExtent {
        /// Prototype width.
        width: f64,
        /// Prototype height.
        height: f64,
    },

    /// A grid was configured with zero cells per track.
    #[error("grid arrangement needs at least one cell per track")]
    ZeroCrossAxisCount,

    /// The minimum pool size is zero, which could leave a non-empty data source without cells.
    #[error("minimum pool size must be at least one")]
    ZeroMinPoolSize,

    /// The recycling threshold is negative or non-finite.
    #[error("recycling threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),

    /// The minimum pool coverage is negative or non-finite.
    #[error("minimum pool coverage must be finite and non-negative, got {0}")]
    InvalidPoolCoverage(f64),

    /// The settled content container has no cross-axis extent to divide into cells.
    #[error("content cross-axis extent must be positive after layout, got {cross_extent}")]
    CollapsedContent {
        /// Cross-axis extent reported by the layout system.
        cross_extent: f64,
    },
}
