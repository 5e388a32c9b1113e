// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strip geometry.
//!
//! [`TierGeometry`] is derived from a [`Tier`] and an item count and is
//! recomputed whenever either changes. It decides the [`StripMode`]:
//!
//! - no items: [`StripMode::Empty`], a placeholder is shown;
//! - one to three items: [`StripMode::Static`], items render once, centered,
//!   without motion;
//! - more than three: [`StripMode::Infinite`], the list is rendered three
//!   times back to back and the offset wraps inside the middle lap.
//!
//! ```text
//!   track:  | lap 0 | lap 1 | lap 2 |
//!   offset:         ^-lap_length      (initial)
//!   valid:  [-2 * lap_length, 0]
//! ```

use core::fmt;

/// Item counts above this value enable infinite mode.
pub const STATIC_MAX_ITEMS: usize = 3;

/// Number of back-to-back copies rendered in infinite mode.
pub const LAP_COPIES: usize = 3;

/// Per-tier item widths and the shared gap, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierTable {
    /// Width of a [`Tier::Top`] item.
    pub top: f64,
    /// Width of a [`Tier::Mid`] item.
    pub mid: f64,
    /// Width of a [`Tier::Other`] item. Also used for unknown tier names.
    pub other: f64,
    /// Gap between neighbouring items, independent of tier.
    pub gap: f64,
}

impl TierTable {
    /// The stock table: 320 / 280 / 240 px with a 16 px gap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            top: 320.0,
            mid: 280.0,
            other: 240.0,
            gap: 16.0,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Visual tier of a strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Headline sponsors, widest items.
    Top,
    /// Second row.
    Mid,
    /// Everything else, including unrecognized tier names.
    #[default]
    Other,
}

impl Tier {
    /// Parses a host-supplied tier name. Matching is ASCII case-insensitive
    /// and ignores surrounding whitespace; unknown names map to
    /// [`Tier::Other`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        let is = |candidate: &str| name.eq_ignore_ascii_case(candidate);
        if is("top") || is("top-tier") {
            Self::Top
        } else if is("mid") || is("mid-tier") {
            Self::Mid
        } else {
            Self::Other
        }
    }

    /// Looks up the item width for this tier.
    #[must_use]
    pub const fn base_width(self, table: &TierTable) -> f64 {
        match self {
            Self::Top => table.top,
            Self::Mid => table.mid,
            Self::Other => table.other,
        }
    }

    /// Short label, used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Mid => "mid",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering policy chosen from the item count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StripMode {
    /// Nothing to show; the host renders a placeholder.
    Empty,
    /// Items render once, centered, with no motion and no drag handling.
    Static,
    /// Items are tripled and scroll continuously.
    Infinite,
}

impl StripMode {
    /// Chooses the mode for `item_count` items.
    #[must_use]
    pub const fn for_count(item_count: usize) -> Self {
        match item_count {
            0 => Self::Empty,
            n if n <= STATIC_MAX_ITEMS => Self::Static,
            _ => Self::Infinite,
        }
    }
}

/// Derived per-strip geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierGeometry {
    /// Tier the widths were taken from.
    pub tier: Tier,
    /// Number of distinct items.
    pub item_count: usize,
    /// Width of one item.
    pub base_width: f64,
    /// Gap after each item.
    pub gap: f64,
    /// `base_width + gap`.
    pub item_stride: f64,
    /// `item_stride * item_count`: the length of one lap.
    pub lap_length: f64,
}

impl TierGeometry {
    /// Computes the geometry for `item_count` items of `tier`.
    #[must_use]
    pub fn compute(tier: Tier, item_count: usize, table: &TierTable) -> Self {
        let base_width = tier.base_width(table);
        let gap = table.gap;
        let item_stride = base_width + gap;
        Self {
            tier,
            item_count,
            base_width,
            gap,
            item_stride,
            lap_length: item_stride * item_count as f64,
        }
    }

    /// Returns the rendering policy for this geometry.
    #[must_use]
    pub const fn mode(&self) -> StripMode {
        StripMode::for_count(self.item_count)
    }

    /// Returns `true` when the strip scrolls and wraps.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self.mode(), StripMode::Infinite)
    }

    /// Number of rendered entries: the item count, tripled in infinite mode.
    #[must_use]
    pub const fn slot_count(&self) -> usize {
        match self.mode() {
            StripMode::Empty => 0,
            StripMode::Static => self.item_count,
            StripMode::Infinite => self.item_count * LAP_COPIES,
        }
    }

    /// Left edge of rendered entry `slot`, relative to the track start.
    #[must_use]
    pub fn slot_origin(&self, slot: usize) -> f64 {
        slot as f64 * self.item_stride
    }

    /// Total width of the rendered track.
    ///
    /// Static tracks have no trailing gap so they can be centered exactly.
    #[must_use]
    pub fn track_width(&self) -> f64 {
        match self.mode() {
            StripMode::Empty => 0.0,
            StripMode::Static => {
                self.item_count as f64 * self.base_width + (self.item_count - 1) as f64 * self.gap
            }
            StripMode::Infinite => self.lap_length * LAP_COPIES as f64,
        }
    }

    /// Returns the rendered entry under `track_x`, or `None` for gaps and
    /// points outside the track.
    #[must_use]
    pub fn slot_at(&self, track_x: f64) -> Option<usize> {
        if !track_x.is_finite() || track_x < 0.0 || self.item_stride <= 0.0 {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "track_x is finite and non-negative; out-of-range slots are rejected below"
        )]
        let slot = (track_x / self.item_stride) as usize;
        if slot >= self.slot_count() {
            return None;
        }
        if track_x - self.slot_origin(slot) >= self.base_width {
            return None;
        }
        Some(slot)
    }

    /// Returns the item index under `track_x`, folding tripled copies back
    /// onto the canonical list.
    #[must_use]
    pub fn item_at(&self, track_x: f64) -> Option<usize> {
        self.slot_at(track_x).map(|slot| slot % self.item_count)
    }
}

/// Computes the geometry for a tier name using the stock [`TierTable`].
#[must_use]
pub fn compute_geometry(tier_name: &str, item_count: usize) -> TierGeometry {
    TierGeometry::compute(Tier::from_name(tier_name), item_count, &TierTable::new())
}

/// Identity of a rendered entry.
///
/// Combined with the item's name this is unique across the tripled list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// Which copy of the list (0 in static mode).
    pub copy: usize,
    /// Index into the canonical item list.
    pub item_index: usize,
}

/// One rendered entry of the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSlot {
    /// Position in the rendered list.
    pub slot: usize,
    /// Stable key for this entry.
    pub key: SlotKey,
    /// Left edge relative to the track start.
    pub x: f64,
}

impl RenderSlot {
    /// Index into the canonical item list.
    #[must_use]
    pub const fn item_index(&self) -> usize {
        self.key.item_index
    }
}

/// Iterator over the rendered entries of a [`TierGeometry`].
#[derive(Clone, Debug)]
pub struct RenderSlots {
    geometry: TierGeometry,
    next: usize,
}

impl Iterator for RenderSlots {
    type Item = RenderSlot;

    fn next(&mut self) -> Option<RenderSlot> {
        let slot = self.next;
        if slot >= self.geometry.slot_count() {
            return None;
        }
        self.next += 1;
        let n = self.geometry.item_count;
        Some(RenderSlot {
            slot,
            key: SlotKey {
                copy: slot / n,
                item_index: slot % n,
            },
            x: self.geometry.slot_origin(slot),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.geometry.slot_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RenderSlots {}

/// Iterates the entries to render for `geometry`: the item list once in
/// static mode, three times in infinite mode, nothing when empty.
#[must_use]
pub fn render_slots(geometry: &TierGeometry) -> RenderSlots {
    RenderSlots {
        geometry: *geometry,
        next: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn widths_follow_tier_table() {
        assert_eq!(compute_geometry("top", 5).base_width, 320.0);
        assert_eq!(compute_geometry("Mid-Tier", 5).base_width, 280.0);
        assert_eq!(compute_geometry("other", 5).base_width, 240.0);
        // Unknown names fall back to the smallest width.
        assert_eq!(compute_geometry("diamond", 5).base_width, 240.0);
        assert_eq!(compute_geometry("", 5).tier, Tier::Other);
    }

    #[test]
    fn stride_and_lap() {
        let g = compute_geometry("mid", 6);
        assert_eq!(g.gap, 16.0);
        assert_eq!(g.item_stride, 296.0);
        assert_eq!(g.lap_length, 296.0 * 6.0);
        assert_eq!(g.track_width(), 296.0 * 18.0);
    }

    #[test]
    fn mode_thresholds() {
        assert_eq!(compute_geometry("top", 0).mode(), StripMode::Empty);
        assert_eq!(compute_geometry("top", 1).mode(), StripMode::Static);
        assert_eq!(compute_geometry("top", 3).mode(), StripMode::Static);
        assert_eq!(compute_geometry("top", 4).mode(), StripMode::Infinite);
        assert!(compute_geometry("top", 4).lap_length > 0.0);
    }

    #[test]
    fn infinite_render_list_is_tripled() {
        let g = compute_geometry("other", 4);
        let slots: Vec<_> = render_slots(&g).collect();
        assert_eq!(slots.len(), 12);
        assert_eq!(render_slots(&g).len(), 12);
        let items: Vec<_> = slots.iter().map(RenderSlot::item_index).collect();
        assert_eq!(items, [0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3]);
        assert_eq!(slots[5].key, SlotKey { copy: 1, item_index: 1 });
        assert_eq!(slots[5].x, 5.0 * 256.0);
    }

    #[test]
    fn static_render_list_is_single() {
        let g = compute_geometry("top", 2);
        assert_eq!(render_slots(&g).count(), 2);
        assert_eq!(g.track_width(), 320.0 * 2.0 + 16.0);
        assert_eq!(render_slots(&compute_geometry("top", 0)).count(), 0);
        assert_eq!(compute_geometry("top", 0).track_width(), 0.0);
    }

    #[test]
    fn hit_testing_skips_gaps() {
        let g = compute_geometry("mid", 6);
        assert_eq!(g.item_at(0.0), Some(0));
        assert_eq!(g.item_at(279.9), Some(0));
        // Inside the gap after item 0.
        assert_eq!(g.item_at(285.0), None);
        assert_eq!(g.item_at(296.0), Some(1));
        // Second copy folds back onto the canonical list.
        assert_eq!(g.item_at(g.lap_length + 2.0 * 296.0 + 10.0), Some(2));
        assert_eq!(g.slot_at(g.lap_length + 2.0 * 296.0 + 10.0), Some(8));
        assert_eq!(g.item_at(-1.0), None);
        assert_eq!(g.item_at(g.track_width() + 1.0), None);
        assert_eq!(g.item_at(f64::NAN), None);
    }
}
