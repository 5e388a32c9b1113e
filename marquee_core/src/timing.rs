// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks and delta-time measurement.
//!
//! A backend tick source (e.g. `requestAnimationFrame`) produces one
//! [`FrameTick`] per display refresh. [`FrameClock`] turns successive ticks
//! into elapsed seconds so that motion is time-based rather than
//! frame-count-based, which keeps scroll speed the same on 60 Hz and 144 Hz
//! displays.

use crate::time::{HostTime, Timebase};

/// A frame opportunity delivered by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

/// Measures the time between successive [`FrameTick`]s.
///
/// The first tick after construction or [`reset`](Self::reset) has no
/// predecessor and yields a zero delta. Deltas are clamped to `max_delta`
/// seconds: a tab that was backgrounded for a minute resumes with one short
/// step instead of a jump.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    timebase: Timebase,
    max_delta: f64,
    last: Option<HostTime>,
}

impl FrameClock {
    /// Creates a clock reading ticks in `timebase`, clamping deltas to
    /// `max_delta` seconds.
    #[must_use]
    pub const fn new(timebase: Timebase, max_delta: f64) -> Self {
        Self {
            timebase,
            max_delta,
            last: None,
        }
    }

    /// Returns the timebase ticks are interpreted in.
    #[must_use]
    pub const fn timebase(&self) -> Timebase {
        self.timebase
    }

    /// Returns the elapsed seconds since the previous tick and records `tick`
    /// as the new reference point.
    ///
    /// A tick that is not later than the previous one yields `0.0`.
    pub fn delta(&mut self, tick: &FrameTick) -> f64 {
        let prev = self.last.replace(tick.now);
        let Some(prev) = prev else {
            return 0.0;
        };
        let secs = tick
            .now
            .saturating_duration_since(prev)
            .as_secs_f64(self.timebase);
        secs.min(self.max_delta)
    }

    /// Forgets the previous tick. The next delta will be zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
