// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_recycler --heading-base-level=0

//! Understory Recycler: pooled cell recycling for scrollable lists and grids.
//!
//! A scroll view over thousands of items only ever shows a handful of them.
//! This crate keeps a small, fixed pool of cells, and as the content scrolls
//! it moves cells that left the viewport to the opposite end and rebinds
//! them to the next (or previous) item. Cells are never created or
//! destroyed after the pool is built.
//!
//! The core concepts are:
//!
//! - [`DataSource`]: the host's items, exposed as a count plus a `set_cell` bind operation.
//! - [`CellPrototype`]: the template each pooled cell is instantiated from.
//! - [`ViewportGeometry`]: read access to the host's settled layout.
//! - [`Recycler`]: the engine. It owns a [`CellRing`] of [`Slot`]s, computes
//!   [`RecycleBounds`] from the viewport on every update, and relocates cells
//!   forward or backward along the scroll axis.
//! - [`RecyclerConfig`]: axis, [`Arrangement`] (list or grid), and pool tuning.
//!
//! This crate deliberately does **not** render anything, own a scene graph,
//! or implement scroll physics. Host frameworks are responsible for:
//!
//! - Running a layout pass and calling [`Recycler::on_layout_settled`] afterwards.
//! - Reporting every content move to [`Recycler::on_scroll_delta`] and adding
//!   the returned corrective offset to their own content position.
//! - Applying [`Recycler::slots`] rectangles and [`Recycler::content_size`] to
//!   their views.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size, Vec2};
//! use understory_recycler::{
//!     CellPrototype, DataSource, Recycler, RecyclerConfig, ViewportGeometry,
//! };
//!
//! struct Labels(Vec<String>);
//!
//! impl DataSource<String> for Labels {
//!     fn item_count(&self) -> usize {
//!         self.0.len()
//!     }
//!     fn set_cell(&mut self, cell: &mut String, index: usize) {
//!         cell.clone_from(&self.0[index]);
//!     }
//! }
//!
//! struct Template;
//!
//! impl CellPrototype for Template {
//!     type Cell = String;
//!     fn size(&self) -> Size {
//!         Size::new(80.0, 40.0)
//!     }
//!     fn instantiate(&mut self) -> String {
//!         String::new()
//!     }
//! }
//!
//! // The viewport, expressed in the content container's coordinates.
//! struct Viewport(Rect);
//!
//! impl ViewportGeometry for Viewport {
//!     fn viewport_bounds(&self) -> Rect {
//!         self.0
//!     }
//!     fn content_size(&self) -> Size {
//!         Size::new(0.0, 40.0)
//!     }
//! }
//!
//! let labels = Labels((0..1000).map(|i| format!("item {i}")).collect());
//! let viewport = Viewport(Rect::new(0.0, 0.0, 400.0, 40.0));
//! let mut recycler = Recycler::initialize(
//!     RecyclerConfig::default(),
//!     labels,
//!     Template,
//!     viewport,
//!     |summary| assert!(summary.pool_len < 1000),
//! )
//! .unwrap();
//!
//! // Once the host's layout has settled, the pool is built.
//! recycler.on_layout_settled().unwrap();
//! assert_eq!(recycler.bound_range(), 0..10);
//!
//! // The content moved 300 units to the left.
//! let moved = Vec2::new(-300.0, 0.0);
//! let viewport = recycler.geometry().0 - moved;
//! recycler.geometry_mut().0 = viewport;
//! let correction = recycler.on_scroll_delta(moved);
//!
//! // Two cells went from the front of the pool to the back.
//! assert_eq!(correction, Vec2::new(160.0, 0.0));
//! assert_eq!(recycler.bound_range(), 2..12);
//! ```
//!
//! ## Grids
//!
//! With [`RecyclerConfig::with_grid`], each step along the scroll axis is a
//! *track* of several cells stacked along the cross axis. Cells are placed at
//! their final content positions, and the content grows by one track
//! whenever a new one is first reached, so the corrective offset stays zero.
//!
//! All geometry is [`kurbo`] based and y-down; cell rectangles are in the
//! content container's local coordinates.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod bounds;
mod config;
mod error;
mod extent;
mod recycler;
mod ring;
mod source;
mod track;

pub use axis::{Anchor, Axis};
pub use bounds::{RecycleBounds, recyclable_bounds};
pub use config::{Arrangement, RecyclerConfig};
pub use error::RecyclerError;
pub use extent::CellExtent;
pub use recycler::{InitSummary, RecycleFlags, RecycleReport, Recycler, RecyclerState};
pub use ring::{CellRing, Slot};
pub use source::{CellPrototype, DataSource, ViewportGeometry};
