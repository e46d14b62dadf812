// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recyclable window: the viewport widened by a threshold along the primary axis.

use kurbo::Rect;

use crate::Axis;

/// Primary-axis interval outside which a cell may be recycled.
///
/// Both edges are in content-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecycleBounds {
    /// Near edge: the viewport start minus the threshold margin.
    pub start: f64,
    /// Far edge: the viewport end plus the threshold margin.
    pub end: f64,
}

impl RecycleBounds {
    /// Width of the interval.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` if a cell whose far edge is `cell_end` lies entirely before the window.
    #[must_use]
    pub fn is_past_start(&self, cell_end: f64) -> bool {
        cell_end < self.start
    }

    /// Returns `true` if a cell whose near edge is `cell_start` lies entirely after the window.
    #[must_use]
    pub fn is_past_end(&self, cell_start: f64) -> bool {
        cell_start > self.end
    }
}

/// Computes the recyclable window for a viewport.
///
/// - `viewport`: viewport rectangle in content-local coordinates.
/// - `threshold`: fraction of the viewport's primary extent added on each side.
///
/// Returns `None` when the viewport has no positive, finite primary extent.
/// Callers treat that as "nothing to recycle" so a bogus layout can never
/// drive a recycling loop.
#[must_use]
pub fn recyclable_bounds(axis: Axis, viewport: Rect, threshold: f64) -> Option<RecycleBounds> {
    let start = axis.rect_start(viewport);
    let end = axis.rect_end(viewport);
    let extent = end - start;
    if !(extent.is_finite() && extent > 0.0) {
        return None;
    }
    let margin = threshold.max(0.0) * extent;
    Some(RecycleBounds {
        start: start - margin,
        end: end + margin,
    })
}
