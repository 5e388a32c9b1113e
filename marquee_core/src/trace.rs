// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for strip motion and gestures.
//!
//! [`TraceSink`] has one method per event; all default to no-ops so a sink
//! only implements what it cares about.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::gesture::Gesture;
use crate::id::StripId;
use crate::layout::{StripMode, Tier};
use crate::motion::{MotionMode, WrapDirection};
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a strip (re)computes its geometry.
#[derive(Clone, Copy, Debug)]
pub struct GeometryEvent {
    /// Strip instance.
    pub strip: StripId,
    /// Tier the widths came from.
    pub tier: Tier,
    /// Number of distinct items.
    pub item_count: usize,
    /// Length of one lap in pixels.
    pub lap_length: f64,
    /// Rendering policy chosen.
    pub mode: StripMode,
}

/// Per-frame motion sample.
#[derive(Clone, Copy, Debug)]
pub struct FrameEvent {
    /// Strip instance.
    pub strip: StripId,
    /// Frame counter from the tick.
    pub frame_index: u64,
    /// Host time of the tick.
    pub now: HostTime,
    /// Seconds since the previous tick, after clamping.
    pub dt: f64,
    /// Offset after the frame.
    pub offset: f64,
    /// Speed after smoothing.
    pub speed: f64,
    /// Speed being blended toward.
    pub target_speed: f64,
    /// Mode after the frame.
    pub mode: MotionMode,
}

/// Emitted on every motion mode transition.
#[derive(Clone, Copy, Debug)]
pub struct ModeChangeEvent {
    /// Strip instance.
    pub strip: StripId,
    /// Previous mode.
    pub from: MotionMode,
    /// New mode.
    pub to: MotionMode,
}

/// Emitted when the offset wraps by a lap.
#[derive(Clone, Copy, Debug)]
pub struct WrapEvent {
    /// Strip instance.
    pub strip: StripId,
    /// Which way the offset moved.
    pub direction: WrapDirection,
    /// Offset after wrapping.
    pub offset: f64,
}

/// How a press ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Released within the threshold.
    Click,
    /// Released or left after crossing the threshold.
    Drag,
    /// Left within the threshold.
    Cancelled,
    /// Dropped because the item list changed mid-press.
    Abandoned,
}

impl From<Gesture> for GestureKind {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Click { .. } => Self::Click,
            Gesture::Drag => Self::Drag,
            Gesture::Cancelled => Self::Cancelled,
        }
    }
}

/// Emitted when a press is classified.
#[derive(Clone, Copy, Debug)]
pub struct GestureEvent {
    /// Strip instance.
    pub strip: StripId,
    /// Classification.
    pub kind: GestureKind,
    /// Item that was pressed, if any.
    pub item: Option<usize>,
}

/// Emitted when viewport-wide pointer tracking starts or stops.
#[derive(Clone, Copy, Debug)]
pub struct CaptureEvent {
    /// Strip instance.
    pub strip: StripId,
    /// `true` on acquire, `false` on release.
    pub acquired: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from strips.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called when geometry is computed.
    fn on_geometry(&mut self, e: &GeometryEvent) {
        _ = e;
    }

    /// Called once per motion frame.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called on a motion mode transition.
    fn on_mode_change(&mut self, e: &ModeChangeEvent) {
        _ = e;
    }

    /// Called when the offset wraps.
    fn on_wrap(&mut self, e: &WrapEvent) {
        _ = e;
    }

    /// Called when a press is classified.
    fn on_gesture(&mut self, e: &GestureEvent) {
        _ = e;
    }

    /// Called when pointer capture is acquired or released.
    fn on_capture(&mut self, e: &CaptureEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $e:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`GeometryEvent`].
    #[inline]
    pub fn geometry(&mut self, e: &GeometryEvent) {
        dispatch!(self, on_geometry, e);
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        dispatch!(self, on_frame, e);
    }

    /// Emits a [`ModeChangeEvent`].
    #[inline]
    pub fn mode_change(&mut self, e: &ModeChangeEvent) {
        dispatch!(self, on_mode_change, e);
    }

    /// Emits a [`WrapEvent`].
    #[inline]
    pub fn wrap(&mut self, e: &WrapEvent) {
        dispatch!(self, on_wrap, e);
    }

    /// Emits a [`GestureEvent`].
    #[inline]
    pub fn gesture(&mut self, e: &GestureEvent) {
        dispatch!(self, on_gesture, e);
    }

    /// Emits a [`CaptureEvent`].
    #[inline]
    pub fn capture(&mut self, e: &CaptureEvent) {
        dispatch!(self, on_capture, e);
    }
}

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> FrameEvent {
        FrameEvent {
            strip: StripId(1),
            frame_index: 42,
            now: HostTime(1_000_000),
            dt: 0.016,
            offset: -1776.0,
            speed: 135.0,
            target_speed: 135.0,
            mode: MotionMode::AutoScrolling,
        }
    }

    #[test]
    fn gesture_kind_from_gesture() {
        assert_eq!(
            GestureKind::from(Gesture::Click { item: Some(3) }),
            GestureKind::Click
        );
        assert_eq!(GestureKind::from(Gesture::Drag), GestureKind::Drag);
        assert_eq!(GestureKind::from(Gesture::Cancelled), GestureKind::Cancelled);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame(&sample_frame());
        sink.on_capture(&CaptureEvent {
            strip: StripId(0),
            acquired: true,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame(&sample_frame());
        tracer.wrap(&WrapEvent {
            strip: StripId(0),
            direction: WrapDirection::Forward,
            offset: -10.0,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame(&mut self, e: &FrameEvent) {
                self.frames.push(e.frame_index);
            }
        }

        let mut sink = RecordingSink { frames: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame(&sample_frame());
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
    }
}
