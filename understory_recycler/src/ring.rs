// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-length ring of pooled cells.

use alloc::vec::Vec;

use kurbo::{Rect, Vec2};

/// One pooled cell: its view rectangle and the binding used to fill it.
#[derive(Debug, Clone)]
pub struct Slot<C> {
    /// Rectangle of the cell's view in content-local coordinates.
    pub rect: Rect,
    /// The host's binding for this cell, created once when the pool was built.
    pub cell: C,
}

/// A fixed-length circular buffer of [`Slot`]s.
///
/// The visible window is the arc from `trailing` forward to `leading`
/// (inclusive). Whenever the ring is non-empty it covers every slot, so
/// `(leading - trailing + len) % len == len - 1` holds after every rotation.
#[derive(Debug, Clone)]
pub struct CellRing<C> {
    slots: Vec<Slot<C>>,
    trailing: usize,
    leading: usize,
}

impl<C> Default for CellRing<C> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            trailing: 0,
            leading: 0,
        }
    }
}

impl<C> CellRing<C> {
    /// Seals a fully built pool. Slot `0` is the trailing end and the last slot the leading end.
    #[must_use]
    pub fn from_slots(slots: Vec<Slot<C>>) -> Self {
        let leading = slots.len().saturating_sub(1);
        Self {
            slots,
            trailing: 0,
            leading,
        }
    }

    /// Number of pooled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the pool holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the slot at the trailing (earliest) end of the window.
    #[must_use]
    pub const fn trailing(&self) -> usize {
        self.trailing
    }

    /// Index of the slot at the leading (latest) end of the window.
    #[must_use]
    pub const fn leading(&self) -> usize {
        self.leading
    }

    /// Returns `true` if the trailing/leading pair describes a full circular arc.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let len = self.slots.len();
        if len == 0 {
            return self.trailing == 0 && self.leading == 0;
        }
        self.trailing < len
            && self.leading < len
            && (self.leading + len - self.trailing) % len == len - 1
    }

    /// Returns the slot at ring index `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slot<C>> {
        self.slots.get(index)
    }

    /// Returns the slot at ring index `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot<C>> {
        self.slots.get_mut(index)
    }

    /// Distance of ring index `index` from the trailing end, in slots.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Option<usize> {
        let len = self.slots.len();
        (index < len).then(|| (index + len - self.trailing) % len)
    }

    /// Slots in ring-index order.
    pub fn iter(&self) -> core::slice::Iter<'_, Slot<C>> {
        self.slots.iter()
    }

    /// Slots in window order, from the trailing end to the leading end.
    pub fn iter_window(&self) -> impl Iterator<Item = &Slot<C>> + '_ {
        let (head, tail) = self.slots.split_at(self.trailing.min(self.slots.len()));
        tail.iter().chain(head.iter())
    }

    /// The old trailing slot becomes the leading slot; its successor becomes the trailing slot.
    pub(crate) fn rotate_forward(&mut self) {
        let len = self.slots.len();
        if len == 0 {
            return;
        }
        self.leading = self.trailing;
        self.trailing = (self.trailing + 1) % len;
        debug_assert!(self.is_consistent(), "ring out of sync after forward rotation");
    }

    /// The old leading slot becomes the trailing slot; its predecessor becomes the leading slot.
    pub(crate) fn rotate_backward(&mut self) {
        let len = self.slots.len();
        if len == 0 {
            return;
        }
        self.trailing = self.leading;
        self.leading = (self.leading + len - 1) % len;
        debug_assert!(self.is_consistent(), "ring out of sync after backward rotation");
    }

    /// Offsets every slot rectangle by `delta`.
    pub(crate) fn translate_all(&mut self, delta: Vec2) {
        for slot in &mut self.slots {
            slot.rect = slot.rect + delta;
        }
    }
}
