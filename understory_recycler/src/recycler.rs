// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The recycling engine: owns the cell pool and rebinds it as the viewport moves.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use kurbo::{Rect, Size, Vec2};

use crate::track::{LaneCursor, TrackLayout};
use crate::{
    Anchor, CellExtent, CellPrototype, CellRing, DataSource, RecycleBounds, RecyclerConfig,
    RecyclerError, Slot, ViewportGeometry, extent::check_prototype, recyclable_bounds,
};

/// Initialization phase of a [`Recycler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecyclerState {
    /// Configuration is accepted; waiting for the host's layout pass to settle.
    AwaitingLayout,
    /// The pool is built and scroll deltas are processed.
    Ready,
}

/// Snapshot handed to the completion callback once the pool is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitSummary {
    /// Number of pooled cells.
    pub pool_len: usize,
    /// Item count reported by the data source at build time.
    pub item_count: usize,
    /// Size of every pooled cell.
    pub cell_size: Size,
    /// Size of the content container the host should apply.
    pub content_size: Size,
}

bitflags::bitflags! {
    /// What happened during one call to [`Recycler::on_scroll_delta_report`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RecycleFlags: u8 {
        /// A forward pass ran (trailing cells moved past the leading end).
        const FORWARD           = 0b0000_0001;
        /// A backward pass ran (leading cells moved before the trailing end).
        const BACKWARD          = 0b0000_0010;
        /// The content's primary extent grew (grids only).
        const CONTENT_GREW      = 0b0000_0100;
        /// The pass stopped because the data source had no further items in that direction.
        const EXHAUSTED         = 0b0000_1000;
        /// The call arrived while another pass was in progress and was ignored.
        const SKIPPED_REENTRANT = 0b0001_0000;
    }
}

/// Outcome of one scroll update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecycleReport {
    /// Offset the host must add to its own record of the content position.
    pub offset: Vec2,
    /// Number of cells moved and rebound.
    pub relocated: usize,
    /// Pass direction and stop reasons.
    pub flags: RecycleFlags,
}

impl RecycleReport {
    const fn idle() -> Self {
        Self {
            offset: Vec2::ZERO,
            relocated: 0,
            flags: RecycleFlags::empty(),
        }
    }
}

type Completion = Box<dyn FnOnce(&InitSummary)>;

/// Recycles a fixed pool of cells over a large collection of items.
///
/// The recycler keeps only enough cells to cover the viewport plus a
/// margin. When the host reports that its content moved, cells that left
/// the recyclable window on one side are moved to the other side and
/// rebound to the next (or previous) item through the [`DataSource`].
///
/// Lifecycle:
/// 1. [`Recycler::initialize`] validates the configuration.
/// 2. After the host has run one layout pass, it calls
///    [`Recycler::on_layout_settled`]; the pool is built and the completion
///    callback fires.
/// 3. Every time the content position changes, the host calls
///    [`Recycler::on_scroll_delta`] and adds the returned offset to its own
///    content position, so relocated cells do not visually jump.
///
/// Slot rectangles live in content-local coordinates; read them back
/// through [`Recycler::slots`] after each call.
pub struct Recycler<D, P: CellPrototype, G> {
    config: RecyclerConfig,
    layout: TrackLayout,
    data_source: D,
    prototype: P,
    geometry: G,

    state: RecyclerState,
    on_complete: Option<Completion>,

    ring: CellRing<P::Cell>,
    extent: CellExtent,
    content_size: Size,
    lanes: LaneCursor,
    bound_item_count: usize,
    recycling: bool,
}

impl<D, P, G> fmt::Debug for Recycler<D, P, G>
where
    D: fmt::Debug,
    P: CellPrototype + fmt::Debug,
    P::Cell: fmt::Debug,
    G: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recycler")
            .field("config", &self.config)
            .field("data_source", &self.data_source)
            .field("prototype", &self.prototype)
            .field("geometry", &self.geometry)
            .field("state", &self.state)
            .field("ring", &self.ring)
            .field("extent", &self.extent)
            .field("content_size", &self.content_size)
            .field("bound_item_count", &self.bound_item_count)
            .field("recycling", &self.recycling)
            .finish_non_exhaustive()
    }
}

impl<D, P, G> Recycler<D, P, G>
where
    D: DataSource<P::Cell>,
    P: CellPrototype,
    G: ViewportGeometry,
{
    /// Validates `config` and the prototype, returning an engine that awaits layout.
    ///
    /// `on_complete` runs exactly once, from [`Recycler::on_layout_settled`],
    /// after the pool has been built and positioned.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the prototype has a non-positive
    /// extent, a grid has zero cells per track, or a tuning value is invalid.
    /// No cell is instantiated in that case.
    pub fn initialize(
        config: RecyclerConfig,
        data_source: D,
        prototype: P,
        geometry: G,
        on_complete: impl FnOnce(&InitSummary) + 'static,
    ) -> Result<Self, RecyclerError> {
        let cells_per_track = config.validate()?;
        check_prototype(prototype.size())?;
        Ok(Self {
            config,
            layout: TrackLayout::new(config.axis, config.arrangement, cells_per_track),
            data_source,
            prototype,
            geometry,
            state: RecyclerState::AwaitingLayout,
            on_complete: Some(Box::new(on_complete)),
            ring: CellRing::default(),
            extent: CellExtent {
                primary: 0.0,
                cross: 0.0,
            },
            content_size: Size::ZERO,
            lanes: LaneCursor::default(),
            bound_item_count: 0,
            recycling: false,
        })
    }

    /// Builds the pool from the settled layout and fires the completion callback.
    ///
    /// Calling this once the recycler is [`RecyclerState::Ready`] does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RecyclerError::CollapsedContent`] if the content container
    /// has no cross-axis extent yet. The recycler stays in
    /// [`RecyclerState::AwaitingLayout`] and may be retried after the next layout pass.
    pub fn on_layout_settled(&mut self) -> Result<(), RecyclerError> {
        if self.state == RecyclerState::Ready {
            tracing::trace!("recycler already initialized; ignoring layout notification");
            return Ok(());
        }

        let axis = self.layout.axis();
        let viewport = self.geometry.viewport_bounds();
        let content_cross = axis.cross_extent(self.geometry.content_size());
        let extent = CellExtent::from_prototype(
            axis,
            self.prototype.size(),
            content_cross,
            self.layout.lanes(),
        )?;

        let item_count = self.data_source.item_count();
        let viewport_primary = (axis.rect_end(viewport) - axis.rect_start(viewport)).max(0.0);
        let required_coverage = self.config.min_pool_coverage * viewport_primary;
        let min_pool = self.config.min_pool_size.min(item_count);
        let cell_size = extent.to_size(axis);

        let mut slots = Vec::new();
        let mut coverage = 0.0;
        while (slots.len() < min_pool || coverage < required_coverage) && slots.len() < item_count
        {
            let index = slots.len();
            let lane = self.layout.cell_in_track(index);
            let track_start = extent.offset_of(self.layout.track_of_cell(index));
            let origin = self
                .layout
                .cell_origin(track_start, lane, extent, content_cross);

            let mut cell = self.prototype.instantiate();
            self.data_source.set_cell(&mut cell, index);
            slots.push(Slot {
                rect: Rect::from_origin_size(origin, cell_size),
                cell,
            });

            // Coverage only counts whole tracks.
            if lane + 1 == self.layout.cells_per_track() {
                coverage += extent.primary;
            }
        }

        let pool_len = slots.len();
        self.ring = CellRing::from_slots(slots);
        self.lanes = LaneCursor::for_pool(&self.layout, pool_len);
        self.bound_item_count = pool_len;
        self.extent = extent;
        self.content_size = axis.size(
            extent.offset_of(self.layout.track_count(pool_len)),
            content_cross,
        );

        if self.prototype.is_live() {
            self.prototype.deactivate();
        }
        self.state = RecyclerState::Ready;

        let summary = InitSummary {
            pool_len,
            item_count,
            cell_size,
            content_size: self.content_size,
        };
        tracing::debug!(
            pool_len,
            item_count,
            cell_primary = extent.primary,
            cell_cross = extent.cross,
            grid = self.layout.is_grid(),
            "recycler pool built"
        );
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(&summary);
        }
        Ok(())
    }

    /// Discards the pool and returns to [`RecyclerState::AwaitingLayout`].
    ///
    /// Use this after the data source changed wholesale. The next
    /// [`Recycler::on_layout_settled`] rebuilds the pool from scratch and
    /// invokes `on_complete`. Grid content is resized to the new pool.
    pub fn reload(&mut self, on_complete: impl FnOnce(&InitSummary) + 'static) {
        tracing::debug!(pool_len = self.ring.len(), "recycler reloading");
        self.ring = CellRing::default();
        self.lanes = LaneCursor::default();
        self.bound_item_count = 0;
        self.content_size = Size::ZERO;
        self.recycling = false;
        self.state = RecyclerState::AwaitingLayout;
        self.on_complete = Some(Box::new(on_complete));
    }

    /// Handles a change of content position and returns the corrective offset.
    ///
    /// `delta` is how far the content moved since the previous call. Only the
    /// sign of its primary-axis component matters: negative means later
    /// items are scrolling into view.
    ///
    /// Returns [`Vec2::ZERO`] when nothing was relocated along the primary axis.
    pub fn on_scroll_delta(&mut self, delta: Vec2) -> Vec2 {
        self.on_scroll_delta_report(delta).offset
    }

    /// Like [`Recycler::on_scroll_delta`], but reports what the pass did.
    pub fn on_scroll_delta_report(&mut self, delta: Vec2) -> RecycleReport {
        if self.recycling {
            tracing::trace!("recycling pass already running; skipping scroll update");
            return RecycleReport {
                flags: RecycleFlags::SKIPPED_REENTRANT,
                ..RecycleReport::idle()
            };
        }
        if self.ring.is_empty() || self.extent.primary.is_nan() || self.extent.primary <= 0.0 {
            return RecycleReport::idle();
        }

        let axis = self.layout.axis();
        // Recomputed every call: the viewport may have been resized by the host.
        let Some(bounds) =
            recyclable_bounds(axis, self.geometry.viewport_bounds(), self.config.threshold)
        else {
            tracing::trace!("viewport has no primary extent; skipping scroll update");
            return RecycleReport::idle();
        };

        let direction = axis.primary(delta);
        if direction < 0.0 {
            let leading_start = axis.rect_start(self.slot_rect(self.ring.leading()));
            if leading_start < bounds.end {
                return self.recycle_forward(bounds);
            }
        } else if direction > 0.0 {
            let trailing_end = axis.rect_end(self.slot_rect(self.ring.trailing()));
            if trailing_end > bounds.start {
                return self.recycle_backward(bounds);
            }
        }
        RecycleReport::idle()
    }

    /// Moves cells from the trailing end past the leading end and binds them to later items.
    fn recycle_forward(&mut self, bounds: RecycleBounds) -> RecycleReport {
        self.recycling = true;
        let axis = self.layout.axis();
        let extent = self.extent;
        let content_cross = axis.cross_extent(self.content_size);
        let item_count = self.data_source.item_count();

        let mut report = RecycleReport {
            flags: RecycleFlags::FORWARD,
            ..RecycleReport::idle()
        };
        let mut shift_tracks = 0_usize;
        let mut content_primary = axis.primary_extent(self.content_size);

        loop {
            let trailing = self.ring.trailing();
            if !bounds.is_past_start(axis.rect_end(self.slot_rect(trailing))) {
                break;
            }
            if self.bound_item_count >= item_count {
                report.flags |= RecycleFlags::EXHAUSTED;
                break;
            }

            let leading_start = axis.rect_start(self.slot_rect(self.ring.leading()));
            let new_track = self.lanes.advance_leading(&self.layout);
            let track_start = if new_track {
                leading_start + extent.primary
            } else {
                leading_start
            };
            let origin = self
                .layout
                .cell_origin(track_start, self.lanes.leading, extent, content_cross);
            self.lanes.advance_trailing(&self.layout);

            let Some(slot) = self.ring.get_mut(trailing) else {
                break;
            };
            slot.rect = Rect::from_origin_size(origin, slot.rect.size());
            self.data_source
                .set_cell(&mut slot.cell, self.bound_item_count);
            self.ring.rotate_forward();
            self.bound_item_count += 1;
            report.relocated += 1;

            if new_track {
                shift_tracks += 1;
                if self.layout.is_grid() {
                    // The content takes the new track in place, so the pool is not shifted for it.
                    shift_tracks -= 1;
                    if track_start + extent.primary > content_primary + extent.primary * 0.5 {
                        content_primary += extent.primary;
                        report.flags |= RecycleFlags::CONTENT_GREW;
                    }
                }
            }
        }

        self.content_size = axis.with_primary_extent(self.content_size, content_primary);
        let shift = axis.vec2(extent.offset_of(shift_tracks), 0.0);
        if shift_tracks > 0 {
            self.ring.translate_all(-shift);
        }
        report.offset = shift;
        self.recycling = false;

        tracing::trace!(
            relocated = report.relocated,
            shift_tracks,
            bound_item_count = self.bound_item_count,
            "forward recycling pass"
        );
        report
    }

    /// Moves cells from the leading end before the trailing end and binds them to earlier items.
    fn recycle_backward(&mut self, bounds: RecycleBounds) -> RecycleReport {
        self.recycling = true;
        let axis = self.layout.axis();
        let extent = self.extent;
        let content_cross = axis.cross_extent(self.content_size);
        let pool_len = self.ring.len();
        let item_count = self.data_source.item_count();
        if self.bound_item_count > item_count {
            tracing::trace!(
                bound_item_count = self.bound_item_count,
                item_count,
                "data source shrank below the bound window; reload to rebind"
            );
        }

        let mut report = RecycleReport {
            flags: RecycleFlags::BACKWARD,
            ..RecycleReport::idle()
        };
        let mut shift_tracks = 0_usize;

        loop {
            let leading = self.ring.leading();
            if !bounds.is_past_end(axis.rect_start(self.slot_rect(leading))) {
                break;
            }
            // Earlier items would map past the end of a shrunken data source.
            if self.bound_item_count <= pool_len || self.bound_item_count > item_count {
                report.flags |= RecycleFlags::EXHAUSTED;
                break;
            }

            let trailing_start = axis.rect_start(self.slot_rect(self.ring.trailing()));
            let new_track = self.lanes.retreat_trailing(&self.layout);
            let track_start = if new_track {
                trailing_start - extent.primary
            } else {
                trailing_start
            };
            let origin = self
                .layout
                .cell_origin(track_start, self.lanes.trailing, extent, content_cross);
            self.lanes.retreat_leading(&self.layout);

            let Some(slot) = self.ring.get_mut(leading) else {
                break;
            };
            slot.rect = Rect::from_origin_size(origin, slot.rect.size());
            self.bound_item_count -= 1;
            self.data_source
                .set_cell(&mut slot.cell, self.bound_item_count - pool_len);
            self.ring.rotate_backward();
            report.relocated += 1;

            if new_track {
                shift_tracks += 1;
                if self.layout.is_grid() {
                    // Grid content already spans every earlier track.
                    shift_tracks -= 1;
                    debug_assert!(
                        track_start > -extent.primary * 0.5,
                        "grid track placed before the content start: {track_start}"
                    );
                }
            }
        }

        let shift = axis.vec2(extent.offset_of(shift_tracks), 0.0);
        if shift_tracks > 0 {
            self.ring.translate_all(shift);
        }
        report.offset = -shift;
        self.recycling = false;

        tracing::trace!(
            relocated = report.relocated,
            shift_tracks,
            bound_item_count = self.bound_item_count,
            "backward recycling pass"
        );
        report
    }
}

impl<D, P: CellPrototype, G> Recycler<D, P, G> {
    fn slot_rect(&self, index: usize) -> Rect {
        self.ring.get(index).map_or(Rect::ZERO, |slot| slot.rect)
    }

    /// Current initialization phase.
    #[must_use]
    pub const fn state(&self) -> RecyclerState {
        self.state
    }

    /// Returns `true` while a recycling pass is running.
    ///
    /// Only observable if a pass was interrupted by a panic inside
    /// [`DataSource::set_cell`]; the recycler then ignores all further
    /// scroll updates until [`Recycler::reload`].
    #[must_use]
    pub const fn is_recycling(&self) -> bool {
        self.recycling
    }

    /// The configuration this recycler was created with.
    #[must_use]
    pub const fn config(&self) -> &RecyclerConfig {
        &self.config
    }

    /// Pooled slots in ring-index order.
    pub fn slots(&self) -> core::slice::Iter<'_, Slot<P::Cell>> {
        self.ring.iter()
    }

    /// Pooled slots in window order, from the earliest bound item to the latest.
    pub fn window(&self) -> impl Iterator<Item = &Slot<P::Cell>> + '_ {
        self.ring.iter_window()
    }

    /// The underlying ring of pooled cells.
    #[must_use]
    pub const fn ring(&self) -> &CellRing<P::Cell> {
        &self.ring
    }

    /// Ring index of the slot bound to the earliest item.
    #[must_use]
    pub const fn trailing_index(&self) -> usize {
        self.ring.trailing()
    }

    /// Ring index of the slot bound to the latest item.
    #[must_use]
    pub const fn leading_index(&self) -> usize {
        self.ring.leading()
    }

    /// One past the latest item index currently bound.
    #[must_use]
    pub const fn bound_item_count(&self) -> usize {
        self.bound_item_count
    }

    /// Item indices currently bound to pooled slots.
    #[must_use]
    pub fn bound_range(&self) -> Range<usize> {
        self.bound_item_count.saturating_sub(self.ring.len())..self.bound_item_count
    }

    /// Item index bound to the slot at ring index `slot`.
    #[must_use]
    pub fn logical_index_of_slot(&self, slot: usize) -> Option<usize> {
        let start = self.bound_range().start;
        self.ring.position_of(slot).map(|p| start + p)
    }

    /// Size every pooled cell is laid out with. Zero until the pool is built.
    #[must_use]
    pub fn cell_size(&self) -> Size {
        self.extent.to_size(self.layout.axis())
    }

    /// Size the host should give its content container.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.content_size
    }

    /// Corner the host should anchor its content container and cells to.
    #[must_use]
    pub const fn content_anchor(&self) -> Anchor {
        self.layout.anchor()
    }

    /// Shared reference to the data source.
    #[must_use]
    pub const fn data_source(&self) -> &D {
        &self.data_source
    }

    /// Mutable reference to the data source.
    ///
    /// A larger item count takes effect on the next pass. If the count drops
    /// below [`Recycler::bound_item_count`], recycling stops in both
    /// directions until [`Recycler::reload`] rebinds the pool.
    pub fn data_source_mut(&mut self) -> &mut D {
        &mut self.data_source
    }

    /// Shared reference to the geometry provider.
    #[must_use]
    pub const fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable reference to the geometry provider.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }
}
