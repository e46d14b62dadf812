// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform cell extents derived from the prototype and the settled content.

use core::num::NonZeroUsize;

use kurbo::Size;

use crate::{Axis, RecyclerError};

/// Size shared by every pooled cell, split into primary and cross extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellExtent {
    /// Extent along the scroll axis; also the stride between tracks.
    pub primary: f64,
    /// Extent along the cross axis; also the stride between cells of a track.
    pub cross: f64,
}

impl CellExtent {
    /// Derives the cell extent for a pool laid out in `content_cross` cross-axis units.
    ///
    /// The cross extent is `content_cross / cells_per_track`; the primary
    /// extent keeps the prototype's aspect ratio against it.
    pub fn from_prototype(
        axis: Axis,
        prototype: Size,
        content_cross: f64,
        cells_per_track: NonZeroUsize,
    ) -> Result<Self, RecyclerError> {
        check_prototype(prototype)?;
        if !(content_cross.is_finite() && content_cross > 0.0) {
            return Err(RecyclerError::CollapsedContent {
                cross_extent: content_cross,
            });
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Cells per track is a small UI count."
        )]
        let cross = content_cross / cells_per_track.get() as f64;
        let primary = axis.primary_extent(prototype) / axis.cross_extent(prototype) * cross;
        Ok(Self { primary, cross })
    }

    /// Primary-axis offset of the start of `track`.
    #[must_use]
    pub fn offset_of(&self, track: usize) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Track counts stay far below 2^52."
        )]
        let track = track as f64;
        track * self.primary
    }

    /// Returns the extent as a [`Size`] in `axis` orientation.
    #[must_use]
    pub const fn to_size(&self, axis: Axis) -> Size {
        axis.size(self.primary, self.cross)
    }
}

/// Fails fast on prototype sizes that cannot produce a usable aspect ratio.
pub(crate) fn check_prototype(prototype: Size) -> Result<(), RecyclerError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(prototype.width) && ok(prototype.height) {
        Ok(())
    } else {
        Err(RecyclerError::InvalidPrototypeExtent {
            width: prototype.width,
            height: prototype.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CellExtent;
    use crate::{Axis, RecyclerError};
    use core::num::NonZeroUsize;
    use kurbo::Size;

    #[test]
    fn aspect_ratio_is_preserved_against_cross_extent() {
        // A 2:1 prototype in a 300-tall horizontal grid with three rows.
        let rows = NonZeroUsize::new(3).unwrap();
        let extent =
            CellExtent::from_prototype(Axis::Horizontal, Size::new(40.0, 20.0), 300.0, rows)
                .unwrap();
        assert_eq!(extent.cross, 100.0);
        assert_eq!(extent.primary, 200.0);
        assert_eq!(extent.to_size(Axis::Horizontal), Size::new(200.0, 100.0));

        // Vertical list: width is the cross axis.
        let extent = CellExtent::from_prototype(
            Axis::Vertical,
            Size::new(50.0, 10.0),
            250.0,
            NonZeroUsize::MIN,
        )
        .unwrap();
        assert_eq!(extent.cross, 250.0);
        assert_eq!(extent.primary, 50.0);
        assert_eq!(extent.offset_of(3), 150.0);
    }

    #[test]
    fn zero_cross_extent_fails_fast() {
        let err = CellExtent::from_prototype(
            Axis::Horizontal,
            Size::new(10.0, 0.0),
            100.0,
            NonZeroUsize::MIN,
        );
        assert_eq!(
            err,
            Err(RecyclerError::InvalidPrototypeExtent {
                width: 10.0,
                height: 0.0
            })
        );
    }

    #[test]
    fn collapsed_content_is_reported() {
        let err = CellExtent::from_prototype(
            Axis::Horizontal,
            Size::new(10.0, 10.0),
            0.0,
            NonZeroUsize::MIN,
        );
        assert_eq!(
            err,
            Err(RecyclerError::CollapsedContent { cross_extent: 0.0 })
        );
    }
}
