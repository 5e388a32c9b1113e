// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic headless harness for scripted strip sessions.
//!
//! A [`Simulation`] drives one [`ShowcaseStrip`] from a [`ManualClock`] and a
//! script of [`Step`]s, with a [`RecordingHost`] standing in for the page.
//! After every step it checks the offset range and the click/drag contract,
//! and [`Simulation::run`] returns a [`SimReport`].

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use marquee_core::backend::StripHost;
use marquee_core::gesture::Gesture;
use marquee_core::item::SponsorItem;
use marquee_core::motion::MotionMode;
use marquee_core::strip::ShowcaseStrip;
use marquee_core::time::{Duration, HostTime};
use marquee_core::timing::FrameTick;
use marquee_core::trace::Tracer;

/// Tick source advancing by a fixed interval per frame.
#[derive(Clone, Copy, Debug)]
pub struct ManualClock {
    now: HostTime,
    interval: Duration,
    frame_index: u64,
}

impl ManualClock {
    /// Creates a clock whose first tick is at `start`.
    #[must_use]
    pub const fn new(start: HostTime, interval: Duration) -> Self {
        Self {
            now: start,
            interval,
            frame_index: 0,
        }
    }

    /// Returns the time of the next tick.
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.now
    }

    /// Returns the tick at the current time and advances by one interval.
    pub fn next_tick(&mut self) -> FrameTick {
        let tick = FrameTick {
            now: self.now,
            frame_index: self.frame_index,
        };
        self.frame_index += 1;
        self.now = self.now + self.interval;
        tick
    }

    /// Moves the clock forward without producing ticks, like a hidden tab.
    pub fn skip(&mut self, duration: Duration) {
        self.now = self.now + duration;
    }
}

/// A [`StripHost`] that records what the strip asked for.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    /// Selected item indices, in order.
    pub selections: Vec<usize>,
    /// Capture transitions: `true` on acquire, `false` on release.
    pub captures: Vec<bool>,
    /// Acquire while held or release while not held.
    pub unbalanced: u32,
    capturing: bool,
}

impl RecordingHost {
    /// Returns `true` while capture is held.
    #[must_use]
    pub const fn is_capturing(&self) -> bool {
        self.capturing
    }
}

impl StripHost for RecordingHost {
    fn item_selected(&mut self, index: usize, _item: &SponsorItem) {
        self.selections.push(index);
    }

    fn capture_pointer(&mut self) {
        if self.capturing {
            self.unbalanced += 1;
        }
        self.capturing = true;
        self.captures.push(true);
    }

    fn release_pointer(&mut self) {
        if !self.capturing {
            self.unbalanced += 1;
        }
        self.capturing = false;
        self.captures.push(false);
    }
}

/// One scripted input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Run `n` frames.
    Frames(u32),
    /// Pointer enters the strip.
    Enter,
    /// Pointer leaves the strip.
    Leave,
    /// Press at `x`.
    Down(f64),
    /// Move to `x`.
    Move(f64),
    /// Release at `x`.
    Up(f64),
    /// Set or clear the popup pause flag.
    Pause(bool),
    /// Activate a static item.
    Select(usize),
    /// Advance the clock without frames.
    Stall(Duration),
}

/// What an invariant check found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViolationKind {
    /// The offset left `[-2 × lap, 0]`.
    OffsetOutOfRange {
        /// Offending offset.
        offset: f64,
    },
    /// A click moved the offset.
    ClickMovedOffset,
    /// A drag selected an item.
    DragSelected,
    /// Capture calls did not alternate.
    UnbalancedCapture,
}

/// An invariant violation and the step that caused it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Violation {
    /// Index into the script.
    pub step: usize,
    /// What went wrong.
    pub kind: ViolationKind,
}

/// Summary of a scripted run.
#[derive(Clone, Debug)]
pub struct SimReport {
    /// Frames that produced motion.
    pub frames: u64,
    /// Selected item indices, in order.
    pub selections: Vec<usize>,
    /// Offset at the end.
    pub final_offset: f64,
    /// Speed at the end; `0.0` when the strip does not scroll.
    pub final_speed: f64,
    /// Motion mode at the end; `None` when the strip does not scroll.
    pub final_mode: Option<MotionMode>,
    /// Smallest offset seen after any step.
    pub min_offset: f64,
    /// Largest offset seen after any step.
    pub max_offset: f64,
    /// Number of wraps applied by frames.
    pub wraps: u64,
    /// Gestures classified, in order.
    pub gestures: Vec<Gesture>,
    /// Invariant violations, in order.
    pub violations: Vec<Violation>,
}

impl SimReport {
    /// Returns `true` if no invariant was violated.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A strip under scripted control.
#[derive(Debug)]
pub struct Simulation {
    strip: ShowcaseStrip,
    clock: ManualClock,
    host: RecordingHost,
}

impl Simulation {
    /// Wraps `strip`, ticking it from `clock`.
    #[must_use]
    pub fn new(strip: ShowcaseStrip, clock: ManualClock) -> Self {
        Self {
            strip,
            clock,
            host: RecordingHost::default(),
        }
    }

    /// Returns the strip.
    #[must_use]
    pub fn strip(&self) -> &ShowcaseStrip {
        &self.strip
    }

    /// Returns the strip for direct manipulation between runs.
    pub fn strip_mut(&mut self) -> &mut ShowcaseStrip {
        &mut self.strip
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &RecordingHost {
        &self.host
    }

    /// Runs `steps` without tracing.
    pub fn run(&mut self, steps: &[Step]) -> SimReport {
        self.run_traced(steps, &mut Tracer::none())
    }

    /// Runs `steps`, forwarding strip events to `tracer`.
    pub fn run_traced(&mut self, steps: &[Step], tracer: &mut Tracer<'_>) -> SimReport {
        let start_offset = self.strip.offset();
        let selections_before = self.host.selections.len();
        let mut report = SimReport {
            frames: 0,
            selections: Vec::new(),
            final_offset: start_offset,
            final_speed: 0.0,
            final_mode: None,
            min_offset: start_offset,
            max_offset: start_offset,
            wraps: 0,
            gestures: Vec::new(),
            violations: Vec::new(),
        };

        for (index, step) in steps.iter().enumerate() {
            let offset_before = self.strip.offset();
            let selected_before = self.host.selections.len();
            let unbalanced_before = self.host.unbalanced;

            match *step {
                Step::Frames(n) => {
                    for _ in 0..n {
                        let tick = self.clock.next_tick();
                        if let Some(out) = self.strip.tick(&tick, tracer) {
                            report.frames += 1;
                            if out.wrapped.is_some() {
                                report.wraps += 1;
                            }
                            self.check_range(index, &mut report);
                        }
                    }
                }
                Step::Enter => self.strip.pointer_enter(),
                Step::Leave => {
                    if let Some(gesture) = self.strip.pointer_leave(&mut self.host, tracer) {
                        report.gestures.push(gesture);
                    }
                }
                Step::Down(x) => {
                    self.strip.pointer_down(x, &mut self.host, tracer);
                }
                Step::Move(x) => {
                    self.strip.pointer_move(x, &mut self.host, tracer);
                }
                Step::Up(x) => {
                    if let Some(gesture) = self.strip.pointer_up(x, &mut self.host, tracer) {
                        report.gestures.push(gesture);
                        match gesture {
                            Gesture::Click { .. } if self.strip.offset() != offset_before => {
                                report.violations.push(Violation {
                                    step: index,
                                    kind: ViolationKind::ClickMovedOffset,
                                });
                            }
                            Gesture::Drag if self.host.selections.len() != selected_before => {
                                report.violations.push(Violation {
                                    step: index,
                                    kind: ViolationKind::DragSelected,
                                });
                            }
                            _ => {}
                        }
                    }
                }
                Step::Pause(paused) => self.strip.set_external_pause(paused),
                Step::Select(item) => {
                    self.strip.select(item, &mut self.host);
                }
                Step::Stall(duration) => self.clock.skip(duration),
            }

            if self.host.unbalanced != unbalanced_before {
                report.violations.push(Violation {
                    step: index,
                    kind: ViolationKind::UnbalancedCapture,
                });
            }
            self.check_range(index, &mut report);
        }

        report.selections = self.host.selections[selections_before..].to_vec();
        report.final_offset = self.strip.offset();
        if let Some(state) = self.strip.motion() {
            report.final_speed = state.speed;
            report.final_mode = Some(state.mode);
        }
        report
    }

    fn check_range(&self, step: usize, report: &mut SimReport) {
        let offset = self.strip.offset();
        report.min_offset = report.min_offset.min(offset);
        report.max_offset = report.max_offset.max(offset);
        if self.strip.motion().is_none() {
            return;
        }
        let lap = self.strip.geometry().lap_length;
        if !(-2.0 * lap..=0.0).contains(&offset) {
            report.violations.push(Violation {
                step,
                kind: ViolationKind::OffsetOutOfRange { offset },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use marquee_core::id::StripId;
    use marquee_core::layout::StripMode;
    use marquee_core::strip::StripConfig;
    use marquee_core::time::Timebase;

    const FRAME: Duration = Duration(16_666_667);

    fn items(n: usize) -> Vec<SponsorItem> {
        (0..n)
            .map(|i| SponsorItem::new(format!("Sponsor {i}")))
            .collect()
    }

    fn sim(n: usize, tier: &str) -> Simulation {
        let strip = ShowcaseStrip::new(StripId(0), items(n), tier, StripConfig::new(Timebase::NANOS));
        Simulation::new(strip, ManualClock::new(HostTime(1_000_000_000), FRAME))
    }

    #[test]
    fn clock_advances_by_interval() {
        let mut clock = ManualClock::new(HostTime(100), Duration(10));
        assert_eq!(clock.next_tick().now, HostTime(100));
        clock.skip(Duration(1000));
        let tick = clock.next_tick();
        assert_eq!(tick.now, HostTime(1110));
        assert_eq!(tick.frame_index, 1);
    }

    #[test]
    fn autoplay_for_ten_seconds() {
        let mut sim = sim(6, "mid");
        let report = sim.run(&[Step::Frames(601)]);
        assert!(report.is_clean(), "{:?}", report.violations);
        assert_eq!(report.frames, 601);
        assert_eq!(report.final_mode, Some(MotionMode::AutoScrolling));
        assert!((report.final_offset - (-1776.0 - 1350.0)).abs() < 0.01);
        assert!(report.selections.is_empty());
    }

    #[test]
    fn drag_then_release() {
        let mut sim = sim(6, "mid");
        let report = sim.run(&[
            Step::Down(500.0),
            Step::Move(515.0),
            Step::Move(530.0),
            Step::Move(545.0),
            Step::Up(545.0),
        ]);
        assert!(report.is_clean(), "{:?}", report.violations);
        assert_eq!(report.gestures, [Gesture::Drag]);
        assert!(report.selections.is_empty());
        assert!((report.final_offset - (-1776.0 + 36.0)).abs() < 1e-9);
        assert_eq!(report.final_mode, Some(MotionMode::AutoScrolling));
        assert_eq!(sim.host().captures, [true, false]);
    }

    #[test]
    fn quick_tap_selects() {
        let mut sim = sim(6, "mid");
        let x = 2.0 * 296.0 + 10.0;
        let report = sim.run(&[Step::Down(x), Step::Up(x)]);
        assert!(report.is_clean(), "{:?}", report.violations);
        assert_eq!(report.selections, [2]);
        assert_eq!(report.final_offset, -1776.0);
    }

    #[test]
    fn held_tap_selects_what_scrolled_under_the_pointer() {
        let mut sim = sim(6, "mid");
        let report = sim.run(&[
            Step::Frames(1),
            Step::Down(275.0),
            Step::Frames(60),
            Step::Up(275.0),
        ]);
        assert!(report.is_clean(), "{:?}", report.violations);
        assert_eq!(report.gestures, [Gesture::Click { item: Some(1) }]);
        assert_eq!(report.selections, [1]);
    }

    #[test]
    fn static_strip_ignores_presses() {
        let mut sim = sim(2, "top");
        assert_eq!(sim.strip().mode(), StripMode::Static);
        let report = sim.run(&[
            Step::Frames(30),
            Step::Down(10.0),
            Step::Move(200.0),
            Step::Up(200.0),
            Step::Select(1),
        ]);
        assert_eq!(report.frames, 0);
        assert!(report.gestures.is_empty());
        assert_eq!(report.selections, [1]);
        assert_eq!(report.final_mode, None);
    }

    #[test]
    fn hover_and_popup_slow_the_strip() {
        let mut sim = sim(5, "other");
        let report = sim.run(&[Step::Frames(10), Step::Enter, Step::Frames(300)]);
        assert!(report.final_speed < 41.0);
        let report = sim.run(&[Step::Leave, Step::Pause(true), Step::Frames(300)]);
        assert!(report.final_speed < 41.0);
        let report = sim.run(&[Step::Pause(false), Step::Frames(300)]);
        assert!(report.final_speed > 134.0);
    }

    #[test]
    fn stall_is_clamped() {
        let mut sim = sim(6, "mid");
        let before = sim.run(&[Step::Frames(2)]).final_offset;
        let after = sim
            .run(&[Step::Stall(Duration(30_000_000_000)), Step::Frames(1)])
            .final_offset;
        // One frame covering 30 s moves at most 0.1 s worth.
        assert!((before - after - 13.5).abs() < 0.5, "moved {}", before - after);
    }

    #[test]
    fn long_mixed_session_stays_clean() {
        let mut sim = sim(4, "top");
        let mut steps = Vec::new();
        for round in 0..40_u32 {
            let x = f64::from(round % 7) * 90.0;
            steps.push(Step::Frames(45));
            steps.push(Step::Enter);
            steps.push(Step::Down(x));
            if round % 3 == 0 {
                steps.push(Step::Up(x + 4.0));
            } else {
                for k in 1..12_u32 {
                    let dir = if round % 2 == 0 { 1.0 } else { -1.0 };
                    steps.push(Step::Move(x + dir * f64::from(k) * 60.0));
                    steps.push(Step::Frames(1));
                }
                if round % 5 == 0 {
                    steps.push(Step::Leave);
                } else {
                    steps.push(Step::Up(x));
                }
            }
            steps.push(Step::Leave);
        }
        let report = sim.run(&steps);
        assert!(report.is_clean(), "{:?}", report.violations);
        assert!(report.wraps > 0 || report.min_offset < -1344.0);
        assert!(!report.selections.is_empty());
        assert!(!sim.host().is_capturing());
        assert_eq!(sim.host().unbalanced, 0);
    }
}
