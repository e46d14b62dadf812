// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track/lane arithmetic shared by list and grid recycling.
//!
//! The scroll axis advances over *tracks* (columns of a horizontal grid,
//! rows of a vertical one) while each track holds `cells_per_track` cells
//! stacked along the cross axis, one per *lane*. A list is a grid with a
//! single lane, so every step along it starts a new track.
//!
//! The layout is chosen once at construction and never re-dispatched.

use core::num::NonZeroUsize;

use kurbo::Point;

use crate::{Anchor, Arrangement, Axis, CellExtent};

/// Axis and lane parameters for one recycler instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrackLayout {
    axis: Axis,
    cells_per_track: NonZeroUsize,
    grid: bool,
}

impl TrackLayout {
    pub(crate) const fn new(
        axis: Axis,
        arrangement: Arrangement,
        cells_per_track: NonZeroUsize,
    ) -> Self {
        Self {
            axis,
            cells_per_track,
            grid: arrangement.is_grid(),
        }
    }

    pub(crate) const fn axis(&self) -> Axis {
        self.axis
    }

    pub(crate) const fn is_grid(&self) -> bool {
        self.grid
    }

    pub(crate) const fn lanes(&self) -> NonZeroUsize {
        self.cells_per_track
    }

    pub(crate) const fn cells_per_track(&self) -> usize {
        self.cells_per_track.get()
    }

    /// Track containing the `cell`-th pooled cell, counting from the first slot.
    pub(crate) const fn track_of_cell(&self, cell: usize) -> usize {
        cell / self.cells_per_track.get()
    }

    /// Lane of the `cell`-th pooled cell within its track.
    pub(crate) const fn cell_in_track(&self, cell: usize) -> usize {
        cell % self.cells_per_track.get()
    }

    /// Number of tracks needed for `len` cells: `ceil(len / cells_per_track)`.
    pub(crate) const fn track_count(&self, len: usize) -> usize {
        len.div_ceil(self.cells_per_track.get())
    }

    /// Corner the content and cells are pinned to.
    pub(crate) const fn anchor(&self) -> Anchor {
        if self.grid {
            Anchor::TopLeft
        } else {
            Anchor::StartCenter
        }
    }

    /// Content-local origin of a cell in `lane`, for a track starting at `track_start`.
    pub(crate) fn cell_origin(
        &self,
        track_start: f64,
        lane: usize,
        extent: CellExtent,
        content_cross: f64,
    ) -> Point {
        let cross = match self.anchor() {
            Anchor::TopLeft => {
                #[allow(clippy::cast_precision_loss, reason = "Lane counts are small.")]
                let lane = lane as f64;
                lane * extent.cross
            }
            Anchor::StartCenter => (content_cross - extent.cross) * 0.5,
        };
        self.axis.point(track_start, cross)
    }
}

/// Lanes of the trailing and leading pooled cells.
///
/// Only meaningful for grids; in a list both lanes stay at zero and every
/// move wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct LaneCursor {
    pub(crate) trailing: usize,
    pub(crate) leading: usize,
}

impl LaneCursor {
    /// Cursor for a freshly built pool of `len` cells.
    pub(crate) const fn for_pool(layout: &TrackLayout, len: usize) -> Self {
        Self {
            trailing: 0,
            leading: layout.cell_in_track(len.saturating_sub(1)),
        }
    }

    /// Moves the leading lane one cell forward. Returns `true` if it wrapped into a new track.
    pub(crate) fn advance_leading(&mut self, layout: &TrackLayout) -> bool {
        let (lane, wrapped) = step_forward(self.leading, layout.cells_per_track());
        self.leading = lane;
        wrapped
    }

    /// Moves the trailing lane one cell forward. Returns `true` if it wrapped into a new track.
    pub(crate) fn advance_trailing(&mut self, layout: &TrackLayout) -> bool {
        let (lane, wrapped) = step_forward(self.trailing, layout.cells_per_track());
        self.trailing = lane;
        wrapped
    }

    /// Moves the trailing lane one cell backward. Returns `true` if it wrapped into a new track.
    pub(crate) fn retreat_trailing(&mut self, layout: &TrackLayout) -> bool {
        let (lane, wrapped) = step_backward(self.trailing, layout.cells_per_track());
        self.trailing = lane;
        wrapped
    }

    /// Moves the leading lane one cell backward. Returns `true` if it wrapped into a new track.
    pub(crate) fn retreat_leading(&mut self, layout: &TrackLayout) -> bool {
        let (lane, wrapped) = step_backward(self.leading, layout.cells_per_track());
        self.leading = lane;
        wrapped
    }
}

const fn step_forward(lane: usize, lanes: usize) -> (usize, bool) {
    if lane + 1 >= lanes {
        (0, true)
    } else {
        (lane + 1, false)
    }
}

const fn step_backward(lane: usize, lanes: usize) -> (usize, bool) {
    if lane == 0 {
        (lanes - 1, true)
    } else {
        (lane - 1, false)
    }
}

#[cfg(test)]
mod tests {
    use super::{LaneCursor, TrackLayout};
    use crate::{Anchor, Arrangement, Axis, CellExtent};
    use core::num::NonZeroUsize;
    use kurbo::Point;

    fn grid(lanes: usize) -> TrackLayout {
        TrackLayout::new(
            Axis::Horizontal,
            Arrangement::Grid {
                cells_per_track: lanes,
            },
            NonZeroUsize::new(lanes).unwrap(),
        )
    }

    #[test]
    fn cell_to_track_mapping() {
        let layout = grid(4);
        assert_eq!(layout.track_count(10), 3);
        assert_eq!(layout.track_count(0), 0);
        assert_eq!(layout.track_of_cell(3), 0);
        assert_eq!(layout.track_of_cell(4), 1);
        assert_eq!(layout.cell_in_track(4), 0);
        assert_eq!(layout.cell_in_track(7), 3);
        assert_eq!(layout.anchor(), Anchor::TopLeft);
    }

    #[test]
    fn lanes_wrap_in_both_directions() {
        let layout = grid(3);
        let mut cursor = LaneCursor::for_pool(&layout, 9);
        assert_eq!(cursor, LaneCursor { trailing: 0, leading: 2 });

        assert!(cursor.advance_leading(&layout));
        assert_eq!(cursor.leading, 0);
        assert!(!cursor.advance_trailing(&layout));
        assert_eq!(cursor.trailing, 1);

        assert!(cursor.retreat_leading(&layout));
        assert_eq!(cursor.leading, 2);
        assert!(!cursor.retreat_trailing(&layout));
        assert!(cursor.retreat_trailing(&layout));
        assert_eq!(cursor.trailing, 2);
    }

    #[test]
    fn list_wraps_on_every_step() {
        let layout = TrackLayout::new(Axis::Vertical, Arrangement::List, NonZeroUsize::MIN);
        let mut cursor = LaneCursor::for_pool(&layout, 5);
        assert_eq!(cursor, LaneCursor::default());
        assert!(cursor.advance_leading(&layout));
        assert!(cursor.retreat_trailing(&layout));
        assert_eq!(cursor, LaneCursor::default());
        assert_eq!(layout.anchor(), Anchor::StartCenter);
    }

    #[test]
    fn cell_origins_follow_anchor() {
        let extent = CellExtent {
            primary: 50.0,
            cross: 100.0,
        };
        let layout = grid(3);
        assert_eq!(
            layout.cell_origin(150.0, 2, extent, 300.0),
            Point::new(150.0, 200.0)
        );

        let list = TrackLayout::new(Axis::Vertical, Arrangement::List, NonZeroUsize::MIN);
        assert_eq!(
            list.cell_origin(150.0, 0, extent, 100.0),
            Point::new(0.0, 150.0)
        );
    }
}
