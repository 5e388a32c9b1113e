// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use marquee_core::time::{HostTime, Timebase};
use marquee_core::trace::{
    CaptureEvent, FrameEvent, GeometryEvent, GestureEvent, ModeChangeEvent, TraceSink, WrapEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    frames: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            frames: true,
        }
    }

    /// Suppresses per-frame lines, keeping only transitions.
    #[must_use]
    pub fn without_frames(mut self) -> Self {
        self.frames = false;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_geometry(&mut self, e: &GeometryEvent) {
        let _ = writeln!(
            self.writer,
            "[geometry] strip={} tier={} items={} lap={:.1}px mode={:?}",
            e.strip.0, e.tier, e.item_count, e.lap_length, e.mode,
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if !self.frames {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[frame] strip={} frame={} now={:.1}µs dt={:.4}s offset={:.2} speed={:.2}→{:.0} mode={:?}",
            e.strip.0,
            e.frame_index,
            self.host_us(e.now),
            e.dt,
            e.offset,
            e.speed,
            e.target_speed,
            e.mode,
        );
    }

    fn on_mode_change(&mut self, e: &ModeChangeEvent) {
        let _ = writeln!(
            self.writer,
            "[mode] strip={} {:?} → {:?}",
            e.strip.0, e.from, e.to,
        );
    }

    fn on_wrap(&mut self, e: &WrapEvent) {
        let _ = writeln!(
            self.writer,
            "[wrap] strip={} {:?} offset={:.2}",
            e.strip.0, e.direction, e.offset,
        );
    }

    fn on_gesture(&mut self, e: &GestureEvent) {
        match e.item {
            Some(item) => {
                let _ = writeln!(
                    self.writer,
                    "[gesture] strip={} {:?} item={item}",
                    e.strip.0, e.kind,
                );
            }
            None => {
                let _ = writeln!(self.writer, "[gesture] strip={} {:?}", e.strip.0, e.kind);
            }
        }
    }

    fn on_capture(&mut self, e: &CaptureEvent) {
        let state = if e.acquired { "acquired" } else { "released" };
        let _ = writeln!(self.writer, "[capture] strip={} {state}", e.strip.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::id::StripId;
    use marquee_core::motion::MotionMode;
    use marquee_core::trace::GestureKind;

    fn frame_event() -> FrameEvent {
        FrameEvent {
            strip: StripId(2),
            frame_index: 1,
            now: HostTime(1_000_000),
            dt: 0.016,
            offset: -1800.5,
            speed: 134.0,
            target_speed: 135.0,
            mode: MotionMode::AutoScrolling,
        }
    }

    #[test]
    fn pretty_print_frame() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_frame(&frame_event());
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("[frame]"), "got: {output}");
        assert!(output.contains("strip=2"), "got: {output}");
        assert!(output.contains("now=1000.0µs"), "got: {output}");
    }

    #[test]
    fn frames_can_be_suppressed() {
        let mut sink =
            PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS).without_frames();
        sink.on_frame(&frame_event());
        sink.on_gesture(&GestureEvent {
            strip: StripId(0),
            kind: GestureKind::Click,
            item: Some(3),
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(!output.contains("[frame]"), "got: {output}");
        assert!(output.contains("Click item=3"), "got: {output}");
    }
}
