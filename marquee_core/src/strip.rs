// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One showcase strip: geometry, motion, and gesture handling together.
//!
//! [`ShowcaseStrip`] is what a host page mounts. It derives a
//! [`TierGeometry`] from the items and tier, creates a [`MotionEngine`] only
//! when the geometry is infinite, and routes pointer events through an
//! [`InteractionClassifier`]:
//!
//! ```text
//!   pointer_down ──► classifier.press()
//!   pointer_move ──► classifier.motion() ──DragStarted──► engine.begin_drag()
//!                                       │                 host.capture_pointer()
//!                                       └─delta──────────► engine.drag_by()
//!   pointer_up   ──► classifier.release(item_at(x)) ──Click──► host.item_selected()
//!                                                    └─Drag───► engine.end_drag()
//!                                                               host.release_pointer()
//!   tick         ──► frame clock ──► engine.step()
//! ```
//!
//! Strips share nothing: two strips on one page each own their geometry,
//! offset, session, and capture state.

use alloc::vec::Vec;

use kurbo::Affine;

use crate::backend::StripHost;
use crate::gesture::{DRAG_THRESHOLD, Gesture, InteractionClassifier, MoveOutcome};
use crate::id::StripId;
use crate::item::SponsorItem;
use crate::layout::{RenderSlots, StripMode, Tier, TierGeometry, TierTable, render_slots};
use crate::motion::{MotionConfig, MotionEngine, MotionMode, MotionState, WrapDirection};
use crate::time::Timebase;
use crate::timing::{FrameClock, FrameTick};
use crate::trace::{
    CaptureEvent, FrameEvent, GeometryEvent, GestureEvent, GestureKind, ModeChangeEvent, Tracer,
    WrapEvent,
};

/// Configuration for a [`ShowcaseStrip`].
#[derive(Clone, Copy, Debug)]
pub struct StripConfig {
    /// Motion tuning.
    pub motion: MotionConfig,
    /// Item widths per tier.
    pub tiers: TierTable,
    /// Distance in pixels a press must travel to become a drag.
    pub drag_threshold: f64,
    /// Whether an open detail popup slows this strip like a hover does.
    ///
    /// Pages with one strip per tier share a single popup flag, so with this
    /// set every strip slows down together while any popup is open.
    pub popup_slows_strip: bool,
    /// Text shown when there are no items.
    pub placeholder: &'static str,
    /// Timebase of the ticks this strip will receive.
    pub timebase: Timebase,
}

impl StripConfig {
    /// Stock configuration for ticks in `timebase`.
    #[must_use]
    pub const fn new(timebase: Timebase) -> Self {
        Self {
            motion: MotionConfig::new(),
            tiers: TierTable::new(),
            drag_threshold: DRAG_THRESHOLD,
            popup_slows_strip: true,
            placeholder: "No sponsors yet",
            timebase,
        }
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::new(Timebase::NANOS)
    }
}

/// Result of one [`ShowcaseStrip::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    /// Offset after the frame.
    pub offset: f64,
    /// Wrap applied this frame, if any.
    pub wrapped: Option<WrapDirection>,
}

/// An auto-scrolling, draggable strip of items.
#[derive(Debug)]
pub struct ShowcaseStrip {
    id: StripId,
    items: Vec<SponsorItem>,
    geometry: TierGeometry,
    config: StripConfig,
    engine: Option<MotionEngine>,
    classifier: InteractionClassifier,
    clock: FrameClock,
    hovered: bool,
    external_pause: bool,
    capturing: bool,
    mounted: bool,
}

impl ShowcaseStrip {
    /// Mounts a strip for `items` in the tier named `tier_name`.
    #[must_use]
    pub fn new(
        id: StripId,
        items: Vec<SponsorItem>,
        tier_name: &str,
        config: StripConfig,
    ) -> Self {
        let geometry = TierGeometry::compute(Tier::from_name(tier_name), items.len(), &config.tiers);
        Self {
            id,
            items,
            geometry,
            engine: build_engine(&geometry, &config),
            classifier: InteractionClassifier::new(config.drag_threshold),
            clock: FrameClock::new(config.timebase, config.motion.max_frame_delta),
            hovered: false,
            external_pause: false,
            capturing: false,
            mounted: true,
            config,
        }
    }

    /// Returns the instance id.
    #[must_use]
    pub const fn id(&self) -> StripId {
        self.id
    }

    /// Returns the items in display order.
    #[must_use]
    pub fn items(&self) -> &[SponsorItem] {
        &self.items
    }

    /// Returns the current geometry.
    #[must_use]
    pub const fn geometry(&self) -> &TierGeometry {
        &self.geometry
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Returns the rendering policy.
    #[must_use]
    pub const fn mode(&self) -> StripMode {
        self.geometry.mode()
    }

    /// Returns the motion state, or `None` outside infinite mode.
    #[must_use]
    pub fn motion(&self) -> Option<MotionState> {
        self.engine.as_ref().map(MotionEngine::state)
    }

    /// Returns the current offset; `0.0` when the strip does not scroll.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.engine.as_ref().map_or(0.0, MotionEngine::offset)
    }

    /// Returns the translation to apply to the track.
    #[must_use]
    pub fn translation(&self) -> Affine {
        Affine::translate((self.offset(), 0.0))
    }

    /// Iterates the entries to render.
    #[must_use]
    pub fn render_slots(&self) -> RenderSlots {
        render_slots(&self.geometry)
    }

    /// Returns `true` while the pointer is over the strip.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Returns `true` while viewport-wide pointer tracking is requested.
    #[must_use]
    pub const fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Returns `false` once [`unmount`](Self::unmount) has run.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns `true` when the host should keep delivering frame ticks.
    #[must_use]
    pub const fn wants_frames(&self) -> bool {
        self.mounted && self.engine.is_some()
    }

    /// Returns `true` when the strip should run at the hovered speed.
    #[must_use]
    pub const fn has_attention(&self) -> bool {
        self.hovered || (self.config.popup_slows_strip && self.external_pause)
    }

    /// Emits a [`GeometryEvent`] for the current geometry.
    pub fn trace_geometry(&self, tracer: &mut Tracer<'_>) {
        tracer.geometry(&GeometryEvent {
            strip: self.id,
            tier: self.geometry.tier,
            item_count: self.geometry.item_count,
            lap_length: self.geometry.lap_length,
            mode: self.geometry.mode(),
        });
    }

    /// Replaces the items and tier.
    ///
    /// When the geometry changes, a press in progress is abandoned (no click,
    /// capture released) and the offset restarts in the middle lap. Returns
    /// `true` if the geometry changed.
    pub fn set_items(
        &mut self,
        items: Vec<SponsorItem>,
        tier_name: &str,
        host: &mut dyn StripHost,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let geometry =
            TierGeometry::compute(Tier::from_name(tier_name), items.len(), &self.config.tiers);
        self.items = items;
        if geometry == self.geometry {
            return false;
        }
        self.abandon_press(host, tracer);
        self.geometry = geometry;
        if self.mounted {
            self.engine = build_engine(&geometry, &self.config);
        }
        self.clock.reset();
        self.trace_geometry(tracer);
        true
    }

    /// Sets the page-level pause flag (a detail popup is open).
    pub fn set_external_pause(&mut self, paused: bool) {
        self.external_pause = paused;
    }

    /// Runs one motion frame.
    ///
    /// Returns `None` when the strip does not animate: not infinite, or
    /// unmounted.
    pub fn tick(&mut self, tick: &FrameTick, tracer: &mut Tracer<'_>) -> Option<FrameOutput> {
        if !self.mounted {
            return None;
        }
        let attention = self.has_attention();
        let strip = self.id;
        let engine = self.engine.as_mut()?;
        let dt = self.clock.delta(tick);
        let step = engine.step(dt, attention);

        if let Some((from, to)) = step.mode_change {
            tracer.mode_change(&ModeChangeEvent { strip, from, to });
        }
        if let Some(direction) = step.wrapped {
            tracer.wrap(&WrapEvent {
                strip,
                direction,
                offset: step.offset,
            });
        }
        tracer.frame(&FrameEvent {
            strip,
            frame_index: tick.frame_index,
            now: tick.now,
            dt,
            offset: step.offset,
            speed: step.speed,
            target_speed: step.target_speed,
            mode: engine.mode(),
        });

        Some(FrameOutput {
            offset: step.offset,
            wrapped: step.wrapped,
        })
    }

    /// The pointer entered the strip.
    pub fn pointer_enter(&mut self) {
        if self.mounted {
            self.hovered = true;
        }
    }

    /// The pointer left the strip. Ends a press like a release would, but
    /// never selects an item.
    pub fn pointer_leave(
        &mut self,
        host: &mut dyn StripHost,
        tracer: &mut Tracer<'_>,
    ) -> Option<Gesture> {
        self.hovered = false;
        let gesture = self.classifier.leave()?;
        self.trace_gesture(gesture, tracer);
        self.finish_drag(host, tracer);
        Some(gesture)
    }

    /// A press at `x`, measured from the strip's left edge.
    ///
    /// Only infinite strips track presses; static items are plain buttons
    /// (see [`select`](Self::select)). Returns `true` if a session started.
    pub fn pointer_down(
        &mut self,
        x: f64,
        host: &mut dyn StripHost,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if !self.mounted || self.engine.is_none() {
            return false;
        }
        if self.classifier.session().is_some() {
            // The previous release never arrived.
            self.abandon_press(host, tracer);
        }
        self.hovered = true;
        self.classifier.press(x);
        true
    }

    /// A pointer move to `x`. Returns `true` if the offset moved.
    pub fn pointer_move(
        &mut self,
        x: f64,
        host: &mut dyn StripHost,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if self.engine.is_none() {
            return false;
        }
        let delta = match self.classifier.motion(x) {
            MoveOutcome::NoSession | MoveOutcome::Pending => return false,
            MoveOutcome::DragStarted { delta } => {
                self.start_drag(host, tracer);
                delta
            }
            MoveOutcome::Dragged { delta } => delta,
        };
        let strip = self.id;
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        if let Some(direction) = engine.drag_by(delta) {
            tracer.wrap(&WrapEvent {
                strip,
                direction,
                offset: engine.offset(),
            });
        }
        true
    }

    /// A release at `x`.
    ///
    /// A final move to `x` is applied first. A press that never crossed the
    /// threshold selects the item under `x` at the current offset, which may
    /// differ from the one pressed if the strip kept scrolling meanwhile.
    pub fn pointer_up(
        &mut self,
        x: f64,
        host: &mut dyn StripHost,
        tracer: &mut Tracer<'_>,
    ) -> Option<Gesture> {
        self.classifier.session()?;
        self.pointer_move(x, host, tracer);
        let item = self.geometry.item_at(x - self.offset());
        let gesture = self.classifier.release(item)?;
        self.trace_gesture(gesture, tracer);
        self.finish_drag(host, tracer);
        if let Gesture::Click { item: Some(index) } = gesture
            && let Some(item) = self.items.get(index)
        {
            host.item_selected(index, item);
        }
        Some(gesture)
    }

    /// Activates a static item directly, as a button click would.
    ///
    /// Returns `false` in infinite mode, where selection goes through the
    /// press classifier, and for out-of-range indices.
    pub fn select(&mut self, index: usize, host: &mut dyn StripHost) -> bool {
        if !self.mounted || self.mode() != StripMode::Static {
            return false;
        }
        let Some(item) = self.items.get(index) else {
            return false;
        };
        host.item_selected(index, item);
        true
    }

    /// Tears the strip down: ends any press, releases capture, and drops
    /// the motion engine.
    pub fn unmount(&mut self, host: &mut dyn StripHost, tracer: &mut Tracer<'_>) {
        if !self.mounted {
            return;
        }
        self.abandon_press(host, tracer);
        self.engine = None;
        self.hovered = false;
        self.mounted = false;
    }

    fn start_drag(&mut self, host: &mut dyn StripHost, tracer: &mut Tracer<'_>) {
        if let Some(engine) = self.engine.as_mut() {
            let from = engine.mode();
            if engine.begin_drag() {
                tracer.mode_change(&ModeChangeEvent {
                    strip: self.id,
                    from,
                    to: MotionMode::Dragging,
                });
            }
        }
        if !self.capturing {
            self.capturing = true;
            host.capture_pointer();
            tracer.capture(&CaptureEvent {
                strip: self.id,
                acquired: true,
            });
        }
    }

    fn finish_drag(&mut self, host: &mut dyn StripHost, tracer: &mut Tracer<'_>) {
        if let Some(engine) = self.engine.as_mut()
            && engine.end_drag()
        {
            tracer.mode_change(&ModeChangeEvent {
                strip: self.id,
                from: MotionMode::Dragging,
                to: MotionMode::AutoScrolling,
            });
        }
        if self.capturing {
            self.capturing = false;
            host.release_pointer();
            tracer.capture(&CaptureEvent {
                strip: self.id,
                acquired: false,
            });
        }
    }

    fn abandon_press(&mut self, host: &mut dyn StripHost, tracer: &mut Tracer<'_>) {
        if self.classifier.abandon().is_some() {
            tracer.gesture(&GestureEvent {
                strip: self.id,
                kind: GestureKind::Abandoned,
                item: None,
            });
        }
        self.finish_drag(host, tracer);
    }

    fn trace_gesture(&self, gesture: Gesture, tracer: &mut Tracer<'_>) {
        let item = match gesture {
            Gesture::Click { item } => item,
            Gesture::Drag | Gesture::Cancelled => None,
        };
        tracer.gesture(&GestureEvent {
            strip: self.id,
            kind: gesture.into(),
            item,
        });
    }
}

fn build_engine(geometry: &TierGeometry, config: &StripConfig) -> Option<MotionEngine> {
    geometry
        .is_infinite()
        .then(|| MotionEngine::new(geometry.lap_length, config.motion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::HostTime;
    use alloc::format;

    #[derive(Default)]
    struct RecordingHost {
        selected: Vec<usize>,
        captures: u32,
        releases: u32,
    }

    impl StripHost for RecordingHost {
        fn item_selected(&mut self, index: usize, _item: &SponsorItem) {
            self.selected.push(index);
        }

        fn capture_pointer(&mut self) {
            self.captures += 1;
        }

        fn release_pointer(&mut self) {
            self.releases += 1;
        }
    }

    const FRAME_NS: u64 = 16_666_667;

    fn items(n: usize) -> Vec<SponsorItem> {
        (0..n)
            .map(|i| SponsorItem::new(format!("Sponsor {i}")))
            .collect()
    }

    fn strip(n: usize, tier: &str) -> ShowcaseStrip {
        ShowcaseStrip::new(StripId(0), items(n), tier, StripConfig::default())
    }

    fn tick(frame_index: u64) -> FrameTick {
        FrameTick {
            now: HostTime(frame_index * FRAME_NS),
            frame_index,
        }
    }

    fn run_frames(strip: &mut ShowcaseStrip, from: u64, count: u64) {
        for i in from..from + count {
            strip.tick(&tick(i), &mut Tracer::none());
        }
    }

    fn assert_in_range(strip: &ShowcaseStrip) {
        let lap = strip.geometry().lap_length;
        let offset = strip.offset();
        assert!(
            offset >= -2.0 * lap && offset <= 0.0,
            "offset {offset} outside [-{}, 0]",
            2.0 * lap
        );
    }

    #[test]
    fn autoplay_only_scenario() {
        let mut strip = strip(6, "mid");
        let lap = strip.geometry().lap_length;
        assert_eq!(lap, 1776.0);

        // 600 frames of 1/60 s after the first (zero-delta) tick: 10 s.
        run_frames(&mut strip, 0, 601);

        let mut offset = -lap;
        let mut speed = 135.0;
        let dt = FRAME_NS as f64 / 1e9;
        for _ in 0..600 {
            speed += (135.0 - speed) * 0.05;
            offset -= speed * dt;
            if offset <= -2.0 * lap {
                offset += lap;
            }
            if offset >= 0.0 {
                offset -= lap;
            }
        }
        let state = strip.motion().unwrap();
        assert!((state.offset - offset).abs() < 1e-6, "{} vs {offset}", state.offset);
        assert!((state.offset - (-lap - 1350.0)).abs() < 0.01);
        assert_eq!(state.mode, MotionMode::AutoScrolling);
    }

    #[test]
    fn long_autoplay_stays_in_range() {
        let mut strip = strip(4, "top");
        let mut wraps = 0;
        for i in 0..6000 {
            if let Some(out) = strip.tick(&tick(i), &mut Tracer::none())
                && out.wrapped.is_some()
            {
                wraps += 1;
            }
            assert_in_range(&strip);
        }
        assert!(wraps > 0);
    }

    #[test]
    fn drag_then_release_scenario() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        let lap = strip.geometry().lap_length;

        assert!(strip.pointer_down(500.0, &mut host, &mut tracer));
        assert!(strip.pointer_move(515.0, &mut host, &mut tracer));
        assert_eq!(strip.motion().unwrap().mode, MotionMode::Dragging);
        assert!(strip.is_capturing());
        strip.pointer_move(530.0, &mut host, &mut tracer);
        strip.pointer_move(545.0, &mut host, &mut tracer);
        let gesture = strip.pointer_up(545.0, &mut host, &mut tracer);

        assert_eq!(gesture, Some(Gesture::Drag));
        assert!(host.selected.is_empty());
        assert_eq!(strip.motion().unwrap().mode, MotionMode::AutoScrolling);
        assert!((strip.offset() - (-lap + 36.0)).abs() < 1e-9);
        assert_eq!((host.captures, host.releases), (1, 1));
        assert!(!strip.is_capturing());
    }

    #[test]
    fn quick_tap_scenario() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        let before = strip.offset();

        // Item 2 of the middle copy sits two strides right of the left edge.
        let x = 2.0 * 296.0 + 10.0;
        strip.pointer_down(x, &mut host, &mut tracer);
        let gesture = strip.pointer_up(x, &mut host, &mut tracer);

        assert_eq!(gesture, Some(Gesture::Click { item: Some(2) }));
        assert_eq!(host.selected, [2]);
        assert_eq!(strip.offset(), before);
        assert_eq!(host.captures, 0);
    }

    #[test]
    fn tap_follows_scrolled_offset() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        run_frames(&mut strip, 0, 150);
        let offset = strip.offset();
        assert!(offset < -1776.0 - 296.0);

        // Left edge of item 3 in the middle copy, plus a little.
        let x = offset + 1776.0 + 3.0 * 296.0 + 10.0;
        strip.pointer_down(x, &mut host, &mut tracer);
        strip.pointer_up(x, &mut host, &mut tracer);
        assert_eq!(host.selected, [3]);
    }

    #[test]
    fn held_tap_selects_item_under_release() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        run_frames(&mut strip, 0, 1);

        // Five pixels inside item 0's right edge.
        let x = 275.0;
        strip.pointer_down(x, &mut host, &mut tracer);
        run_frames(&mut strip, 1, 60);
        assert_eq!(strip.motion().unwrap().mode, MotionMode::AutoScrolling);
        let scrolled = -1776.0 - strip.offset();
        assert!(scrolled > 21.0, "scrolled {scrolled}");

        let gesture = strip.pointer_up(x, &mut host, &mut tracer);
        assert_eq!(gesture, Some(Gesture::Click { item: Some(1) }));
        assert_eq!(host.selected, [1]);
        assert_eq!(host.captures, 0);
    }

    #[test]
    fn tap_released_over_gap_selects_nothing() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();

        // Between item 0 (ends at 280) and item 1 (starts at 296).
        strip.pointer_down(283.0, &mut host, &mut tracer);
        let gesture = strip.pointer_up(285.0, &mut host, &mut tracer);
        assert_eq!(gesture, Some(Gesture::Click { item: None }));
        assert!(host.selected.is_empty());
    }

    #[test]
    fn threshold_boundary() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();

        strip.pointer_down(10.0, &mut host, &mut tracer);
        strip.pointer_move(20.0, &mut host, &mut tracer);
        let at = strip.pointer_up(20.0, &mut host, &mut tracer);
        assert_eq!(at, Some(Gesture::Click { item: Some(0) }));
        assert_eq!(strip.offset(), -1776.0);

        strip.pointer_down(10.0, &mut host, &mut tracer);
        strip.pointer_move(20.5, &mut host, &mut tracer);
        let past = strip.pointer_up(20.5, &mut host, &mut tracer);
        assert_eq!(past, Some(Gesture::Drag));
        assert_eq!(host.selected, [0]);
        assert!((strip.offset() - (-1776.0 + 8.4)).abs() < 1e-9);
    }

    #[test]
    fn click_and_drag_are_exclusive() {
        let moves: [&[f64]; 5] = [&[], &[3.0], &[-9.0, 9.0], &[40.0], &[12.0, 0.0]];
        for seq in moves {
            let mut strip = strip(5, "other");
            let mut host = RecordingHost::default();
            let mut tracer = Tracer::none();
            let before = strip.offset();
            let x0 = 100.0;
            strip.pointer_down(x0, &mut host, &mut tracer);
            for dx in seq {
                strip.pointer_move(x0 + dx, &mut host, &mut tracer);
            }
            let last = seq.last().map_or(x0, |dx| x0 + dx);
            let gesture = strip.pointer_up(last, &mut host, &mut tracer).unwrap();
            let clicked = !host.selected.is_empty();
            match gesture {
                Gesture::Click { .. } => {
                    assert!(clicked, "{seq:?}");
                    assert_eq!(strip.offset(), before, "{seq:?}");
                }
                Gesture::Drag => assert!(!clicked, "{seq:?}"),
                Gesture::Cancelled => panic!("release never cancels"),
            }
        }
    }

    #[test]
    fn dragging_gates_frames() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        run_frames(&mut strip, 0, 10);
        strip.pointer_down(300.0, &mut host, &mut tracer);
        strip.pointer_move(250.0, &mut host, &mut tracer);
        let held = strip.offset();
        run_frames(&mut strip, 10, 60);
        assert_eq!(strip.offset(), held);
        strip.pointer_up(250.0, &mut host, &mut tracer);
        run_frames(&mut strip, 70, 2);
        assert!(strip.offset() < held);
    }

    #[test]
    fn drag_never_leaves_range() {
        let mut strip = strip(4, "other");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        strip.pointer_down(0.0, &mut host, &mut tracer);
        for i in 1..400 {
            strip.pointer_move(f64::from(i) * 37.0, &mut host, &mut tracer);
            assert_in_range(&strip);
        }
        for i in (0..800).rev() {
            strip.pointer_move(f64::from(i) * -23.0, &mut host, &mut tracer);
            assert_in_range(&strip);
        }
    }

    #[test]
    fn leave_ends_press_without_click() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        strip.pointer_enter();
        assert!(strip.has_attention());

        strip.pointer_down(20.0, &mut host, &mut tracer);
        assert_eq!(strip.pointer_leave(&mut host, &mut tracer), Some(Gesture::Cancelled));
        assert!(!strip.has_attention());

        strip.pointer_down(20.0, &mut host, &mut tracer);
        strip.pointer_move(80.0, &mut host, &mut tracer);
        assert_eq!(strip.pointer_leave(&mut host, &mut tracer), Some(Gesture::Drag));
        assert_eq!(strip.motion().unwrap().mode, MotionMode::AutoScrolling);
        assert!(host.selected.is_empty());
        assert_eq!((host.captures, host.releases), (1, 1));
        // A stray release afterwards is ignored.
        assert_eq!(strip.pointer_up(80.0, &mut host, &mut tracer), None);
    }

    #[test]
    fn lost_release_is_replaced_by_next_press() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        strip.pointer_down(20.0, &mut host, &mut tracer);
        strip.pointer_move(80.0, &mut host, &mut tracer);
        strip.pointer_down(100.0, &mut host, &mut tracer);
        assert_eq!(strip.motion().unwrap().mode, MotionMode::AutoScrolling);
        assert_eq!((host.captures, host.releases), (1, 1));
        assert!(strip.classifier.session().is_some());
    }

    #[test]
    fn static_strip_passthrough() {
        let mut strip = strip(3, "top");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        assert_eq!(strip.mode(), StripMode::Static);
        assert!(!strip.wants_frames());
        assert_eq!(strip.tick(&tick(0), &mut tracer), None);
        assert!(!strip.pointer_down(10.0, &mut host, &mut tracer));
        assert!(strip.classifier.session().is_none());
        assert_eq!(strip.pointer_up(10.0, &mut host, &mut tracer), None);
        assert!(strip.select(1, &mut host));
        assert!(!strip.select(3, &mut host));
        assert_eq!(host.selected, [1]);
        assert_eq!(strip.translation(), Affine::IDENTITY);
    }

    #[test]
    fn select_is_static_only() {
        let mut strip = strip(5, "top");
        let mut host = RecordingHost::default();
        assert!(!strip.select(0, &mut host));
        assert!(host.selected.is_empty());
    }

    #[test]
    fn empty_strip_never_moves() {
        let mut strip = strip(0, "mid");
        assert_eq!(strip.mode(), StripMode::Empty);
        assert_eq!(strip.tick(&tick(0), &mut Tracer::none()), None);
        assert_eq!(strip.render_slots().count(), 0);
        assert_eq!(strip.config().placeholder, "No sponsors yet");
    }

    #[test]
    fn attention_from_popup_is_configurable() {
        let mut strip = strip(6, "mid");
        strip.set_external_pause(true);
        assert!(strip.has_attention());

        let config = StripConfig {
            popup_slows_strip: false,
            ..StripConfig::default()
        };
        let mut independent = ShowcaseStrip::new(StripId(1), items(6), "mid", config);
        independent.set_external_pause(true);
        assert!(!independent.has_attention());

        run_frames(&mut strip, 0, 300);
        run_frames(&mut independent, 0, 300);
        assert!(strip.motion().unwrap().speed < 45.0);
        assert_eq!(independent.motion().unwrap().speed, 135.0);
    }

    #[test]
    fn item_change_abandons_drag() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        strip.pointer_down(100.0, &mut host, &mut tracer);
        strip.pointer_move(200.0, &mut host, &mut tracer);

        assert!(strip.set_items(items(8), "mid", &mut host, &mut tracer));
        assert_eq!((host.captures, host.releases), (1, 1));
        assert_eq!(strip.pointer_up(200.0, &mut host, &mut tracer), None);
        assert!(host.selected.is_empty());
        let state = strip.motion().unwrap();
        assert_eq!(state.offset, -296.0 * 8.0);
        assert_eq!(state.mode, MotionMode::Idle);
    }

    #[test]
    fn same_geometry_keeps_press() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        strip.pointer_down(100.0, &mut host, &mut tracer);
        assert!(!strip.set_items(items(6), "Mid", &mut host, &mut tracer));
        assert_eq!(
            strip.pointer_up(100.0, &mut host, &mut tracer),
            Some(Gesture::Click { item: Some(0) })
        );
    }

    #[test]
    fn shrinking_to_static_drops_engine() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        strip.set_items(items(2), "mid", &mut host, &mut Tracer::none());
        assert!(strip.motion().is_none());
        assert!(!strip.wants_frames());
    }

    #[test]
    fn unmount_stops_everything() {
        let mut strip = strip(6, "mid");
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        strip.pointer_down(100.0, &mut host, &mut tracer);
        strip.pointer_move(150.0, &mut host, &mut tracer);
        strip.unmount(&mut host, &mut tracer);
        assert_eq!((host.captures, host.releases), (1, 1));
        assert!(!strip.is_mounted());
        assert!(!strip.wants_frames());
        assert!(strip.motion().is_none());
        assert_eq!(strip.offset(), 0.0);
        assert_eq!(strip.tick(&tick(1), &mut tracer), None);
        assert!(!strip.pointer_down(100.0, &mut host, &mut tracer));
        strip.unmount(&mut host, &mut tracer);
        assert_eq!(host.releases, 1);

        assert!(strip.set_items(items(9), "top", &mut host, &mut tracer));
        assert!(strip.motion().is_none());
        assert!(!strip.wants_frames());
    }

    #[test]
    fn instances_are_independent() {
        let mut a = strip(6, "mid");
        let mut b = ShowcaseStrip::new(StripId(7), items(4), "top", StripConfig::default());
        let mut host = RecordingHost::default();
        let mut tracer = Tracer::none();
        a.pointer_down(0.0, &mut host, &mut tracer);
        a.pointer_move(50.0, &mut host, &mut tracer);
        run_frames(&mut b, 0, 30);
        assert_eq!(b.motion().unwrap().mode, MotionMode::AutoScrolling);
        assert!(!b.is_capturing());
        assert!(b.offset() < -b.geometry().lap_length);
    }
}
