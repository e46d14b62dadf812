// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side collaborators: data, cell prototype, and layout geometry.

use kurbo::{Rect, Size};

/// Supplies the logical items that pooled cells are bound to.
///
/// `C` is the host's cell binding: whatever it needs to push an item's
/// visuals into a pooled view (a widget handle, a component reference, or
/// plain data the host renders later).
pub trait DataSource<C> {
    /// Number of logical items.
    fn item_count(&self) -> usize;

    /// Binds `cell` to the item at `index`.
    ///
    /// The recycler guarantees `index < self.item_count()`. Implementations
    /// must not assume any particular call order and may be called for the
    /// same index more than once.
    fn set_cell(&mut self, cell: &mut C, index: usize);
}

/// The template that pooled cells are instantiated from.
pub trait CellPrototype {
    /// Binding type produced for every pooled cell.
    type Cell;

    /// Natural size of the prototype. Only its aspect ratio is used; the
    /// cross-axis extent of every cell is derived from the content container.
    fn size(&self) -> Size;

    /// Creates the binding for a new pooled cell.
    ///
    /// Called once per pool slot; bindings are never recreated while the pool lives.
    fn instantiate(&mut self) -> Self::Cell;

    /// Returns `true` if the prototype is itself a live node in the host's
    /// scene rather than a detached template.
    fn is_live(&self) -> bool {
        false
    }

    /// Hides a live prototype once the pool has been built.
    fn deactivate(&mut self) {}
}

/// Read access to the host's settled layout.
///
/// Both queries must reflect the most recent completed layout pass and be
/// answerable synchronously.
pub trait ViewportGeometry {
    /// Viewport rectangle, expressed in the content container's local coordinates.
    ///
    /// Scrolling the content by `d` moves this rectangle by `-d`.
    fn viewport_bounds(&self) -> Rect;

    /// Size of the content container as laid out by the host.
    ///
    /// Only the cross-axis extent is consulted; the recycler owns the primary extent.
    fn content_size(&self) -> Size;
}
