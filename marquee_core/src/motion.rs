// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset state machine for the infinite strip.
//!
//! [`MotionEngine`] owns the horizontal offset of the tripled track and moves
//! through three modes:
//!
//! ```text
//!   Idle ──first frame──► AutoScrolling ◄──end_drag── Dragging
//!                               └────────begin_drag──────►┘
//! ```
//!
//! While auto-scrolling, each frame blends the current speed toward a target
//! speed and advances the offset by `speed * dt`. While dragging, frames do
//! not touch the offset at all; only [`MotionEngine::drag_by`] moves it.
//! Both paths end in the same wrap so the offset stays inside
//! `[-2 * lap_length, 0]`.

/// Current mode of a [`MotionEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionMode {
    /// Created, no frame has run yet.
    Idle,
    /// Autoplay advances the offset every frame.
    AutoScrolling,
    /// Pointer deltas drive the offset; autoplay is suspended.
    Dragging,
}

/// Which way a wrap moved the offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WrapDirection {
    /// The offset reached `-2 * lap_length` and was moved one lap right.
    /// This is the wrap autoplay produces.
    Forward,
    /// The offset reached `0` and was moved one lap left (dragging right).
    Backward,
}

/// Tuning constants for the motion engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Target speed with nobody looking, in px/s.
    pub normal_speed: f64,
    /// Target speed while the strip has attention, in px/s. Lower than
    /// `normal_speed`.
    pub hovered_speed: f64,
    /// Fraction of the remaining speed difference closed per frame,
    /// in `(0, 1]`.
    pub smoothing: f64,
    /// Multiplier applied to pointer deltas while dragging.
    pub drag_damping: f64,
    /// Longest frame delta accepted, in seconds.
    pub max_frame_delta: f64,
}

impl MotionConfig {
    /// Stock tuning: 135 px/s normally, 40 px/s under attention.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            normal_speed: 135.0,
            hovered_speed: 40.0,
            smoothing: 0.05,
            drag_damping: 0.8,
            max_frame_delta: 0.1,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the mutable motion state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    /// Horizontal translation of the track. Never positive.
    pub offset: f64,
    /// Current effective speed in px/s.
    pub speed: f64,
    /// Current mode.
    pub mode: MotionMode,
}

/// Result of one [`MotionEngine::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStep {
    /// Offset after the frame.
    pub offset: f64,
    /// Speed after smoothing.
    pub speed: f64,
    /// Speed the engine was blending toward.
    pub target_speed: f64,
    /// Wrap applied this frame, if any.
    pub wrapped: Option<WrapDirection>,
    /// Mode transition taken this frame, as `(from, to)`.
    pub mode_change: Option<(MotionMode, MotionMode)>,
}

/// Owns the offset and speed of one infinite strip.
#[derive(Clone, Debug)]
pub struct MotionEngine {
    lap_length: f64,
    config: MotionConfig,
    state: MotionState,
}

impl MotionEngine {
    /// Creates an engine for a track whose lap is `lap_length` pixels.
    ///
    /// The offset starts at `-lap_length`, the middle of the three laps, and
    /// the speed starts at the normal speed.
    #[must_use]
    pub fn new(lap_length: f64, config: MotionConfig) -> Self {
        let mut config = config;
        let stock = MotionConfig::new();
        if !(config.smoothing > 0.0 && config.smoothing <= 1.0) {
            config.smoothing = stock.smoothing;
        }
        if !(config.max_frame_delta > 0.0 && config.max_frame_delta.is_finite()) {
            config.max_frame_delta = stock.max_frame_delta;
        }
        Self {
            lap_length,
            state: MotionState {
                offset: -lap_length,
                speed: config.normal_speed,
                mode: MotionMode::Idle,
            },
            config,
        }
    }

    /// Returns the lap length this engine wraps on.
    #[must_use]
    pub const fn lap_length(&self) -> f64 {
        self.lap_length
    }

    /// Returns the effective configuration.
    #[must_use]
    pub const fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub const fn state(&self) -> MotionState {
        self.state
    }

    /// Returns the current offset.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> MotionMode {
        self.state.mode
    }

    /// Folds `x` back into the valid offset range.
    ///
    /// A zero lap length makes this a no-op.
    #[must_use]
    pub fn wrap(&self, x: f64) -> f64 {
        wrap_offset(self.lap_length, x).0
    }

    /// Returns the speed to blend toward. `attention` is true while the
    /// pointer is over the strip or a detail popup is open.
    #[must_use]
    pub const fn target_speed(&self, attention: bool) -> f64 {
        if attention {
            self.config.hovered_speed
        } else {
            self.config.normal_speed
        }
    }

    /// Runs one frame of `dt` seconds.
    ///
    /// The first call moves the engine out of [`MotionMode::Idle`]. While
    /// dragging, the offset and speed are left untouched.
    pub fn step(&mut self, dt: f64, attention: bool) -> FrameStep {
        let mut mode_change = None;
        if self.state.mode == MotionMode::Idle {
            self.state.mode = MotionMode::AutoScrolling;
            mode_change = Some((MotionMode::Idle, MotionMode::AutoScrolling));
        }

        let target_speed = self.target_speed(attention);
        if self.state.mode == MotionMode::Dragging {
            return FrameStep {
                offset: self.state.offset,
                speed: self.state.speed,
                target_speed,
                wrapped: None,
                mode_change,
            };
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_delta)
        } else {
            0.0
        };
        self.state.speed += (target_speed - self.state.speed) * self.config.smoothing;
        let (offset, wrapped) = wrap_offset(self.lap_length, self.state.offset - self.state.speed * dt);
        self.state.offset = offset;

        FrameStep {
            offset,
            speed: self.state.speed,
            target_speed,
            wrapped,
            mode_change,
        }
    }

    /// Enters [`MotionMode::Dragging`]. Returns `false` if already dragging.
    pub fn begin_drag(&mut self) -> bool {
        if self.state.mode == MotionMode::Dragging {
            return false;
        }
        self.state.mode = MotionMode::Dragging;
        true
    }

    /// Moves the offset by a damped pointer delta. Ignored unless dragging.
    pub fn drag_by(&mut self, pointer_delta: f64) -> Option<WrapDirection> {
        if self.state.mode != MotionMode::Dragging || !pointer_delta.is_finite() {
            return None;
        }
        let (offset, wrapped) = wrap_offset(
            self.lap_length,
            self.state.offset + pointer_delta * self.config.drag_damping,
        );
        self.state.offset = offset;
        wrapped
    }

    /// Leaves [`MotionMode::Dragging`] for autoplay. Returns `false` if no
    /// drag was active.
    pub fn end_drag(&mut self) -> bool {
        if self.state.mode != MotionMode::Dragging {
            return false;
        }
        self.state.mode = MotionMode::AutoScrolling;
        true
    }
}

/// Applies the wrap rule: at or past `-2 * lap` add a lap, at or past `0`
/// subtract one.
fn wrap_offset(lap: f64, x: f64) -> (f64, Option<WrapDirection>) {
    if !(lap > 0.0 && lap.is_finite()) {
        return (x, None);
    }
    if !x.is_finite() {
        return (-lap, None);
    }

    let mut x = x;
    let mut wrapped = None;
    // Far outside the window: drop whole laps first so the loops below run
    // at most a couple of times.
    if x < -4.0 * lap || x > 2.0 * lap {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "only the whole-lap count matters; saturation is harmless"
        )]
        let laps = (x / lap) as i64;
        x -= laps as f64 * lap;
        wrapped = Some(if laps < 0 {
            WrapDirection::Forward
        } else {
            WrapDirection::Backward
        });
    }
    while x <= -2.0 * lap {
        x += lap;
        wrapped = Some(WrapDirection::Forward);
    }
    while x >= 0.0 {
        x -= lap;
        wrapped = Some(WrapDirection::Backward);
    }
    (x, wrapped)
}
