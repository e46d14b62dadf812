// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primary/cross axis mapping over kurbo geometry.

use kurbo::{Point, Rect, Size, Vec2};

/// The scroll axis of a recycler.
///
/// The *primary* axis is the one content scrolls along; the *cross* axis is
/// perpendicular to it and holds the cells of one track in grid mode.
/// Coordinates are y-down, so both orientations grow toward later items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Items flow left to right; cross axis is vertical.
    #[default]
    Horizontal,
    /// Items flow top to bottom; cross axis is horizontal.
    Vertical,
}

impl Axis {
    /// Primary-axis component of a vector.
    #[must_use]
    pub const fn primary(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Cross-axis component of a vector.
    #[must_use]
    pub const fn cross(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.y,
            Self::Vertical => v.x,
        }
    }

    /// Builds a vector from primary and cross components.
    #[must_use]
    pub const fn vec2(self, primary: f64, cross: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(primary, cross),
            Self::Vertical => Vec2::new(cross, primary),
        }
    }

    /// Builds a point from primary and cross coordinates.
    #[must_use]
    pub const fn point(self, primary: f64, cross: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(primary, cross),
            Self::Vertical => Point::new(cross, primary),
        }
    }

    /// Primary-axis extent of a size.
    #[must_use]
    pub const fn primary_extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Cross-axis extent of a size.
    #[must_use]
    pub const fn cross_extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Builds a size from primary and cross extents.
    #[must_use]
    pub const fn size(self, primary: f64, cross: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(primary, cross),
            Self::Vertical => Size::new(cross, primary),
        }
    }

    /// Returns `size` with its primary extent replaced.
    #[must_use]
    pub const fn with_primary_extent(self, size: Size, primary: f64) -> Size {
        self.size(primary, self.cross_extent(size))
    }

    /// Near (earlier) edge of a rectangle along the primary axis.
    #[must_use]
    pub const fn rect_start(self, rect: Rect) -> f64 {
        match self {
            Self::Horizontal => rect.x0,
            Self::Vertical => rect.y0,
        }
    }

    /// Far (later) edge of a rectangle along the primary axis.
    #[must_use]
    pub const fn rect_end(self, rect: Rect) -> f64 {
        match self {
            Self::Horizontal => rect.x1,
            Self::Vertical => rect.y1,
        }
    }
}

/// Reference corner the content container and cells are pinned to.
///
/// Hosts should anchor their content node this way so that every position
/// the recycler hands out is a pure additive offset along the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Pinned to the top-left corner. Used for grids, where cells stack along the cross axis.
    TopLeft,
    /// Pinned to the start of the primary axis, centered on the cross axis. Used for lists.
    StartCenter,
}

#[cfg(test)]
mod tests {
    use super::Axis;
    use kurbo::{Rect, Size, Vec2};

    #[test]
    fn components_swap_between_orientations() {
        let v = Vec2::new(3.0, 7.0);
        assert_eq!(Axis::Horizontal.primary(v), 3.0);
        assert_eq!(Axis::Horizontal.cross(v), 7.0);
        assert_eq!(Axis::Vertical.primary(v), 7.0);
        assert_eq!(Axis::Vertical.cross(v), 3.0);

        assert_eq!(Axis::Vertical.vec2(1.0, 2.0), Vec2::new(2.0, 1.0));
        assert_eq!(Axis::Vertical.size(10.0, 4.0), Size::new(4.0, 10.0));
    }

    #[test]
    fn rect_edges_follow_primary_axis() {
        let r = Rect::new(1.0, 2.0, 11.0, 22.0);
        assert_eq!(Axis::Horizontal.rect_start(r), 1.0);
        assert_eq!(Axis::Horizontal.rect_end(r), 11.0);
        assert_eq!(Axis::Vertical.rect_start(r), 2.0);
        assert_eq!(Axis::Vertical.rect_end(r), 22.0);
    }
}
