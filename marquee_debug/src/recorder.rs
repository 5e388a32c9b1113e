// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`]. Floating-point fields are stored as
//! their IEEE 754 bit patterns, so decoding is exact.

use marquee_core::id::StripId;
use marquee_core::layout::{StripMode, Tier};
use marquee_core::motion::{MotionMode, WrapDirection};
use marquee_core::time::HostTime;
use marquee_core::trace::{
    CaptureEvent, FrameEvent, GeometryEvent, GestureEvent, GestureKind, ModeChangeEvent,
    TraceSink, WrapEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_GEOMETRY: u8 = 1;
const TAG_FRAME: u8 = 2;
const TAG_MODE_CHANGE: u8 = 3;
const TAG_WRAP: u8 = 4;
const TAG_GESTURE: u8 = 5;
const TAG_CAPTURE: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_count(&mut self, v: usize) {
        self.write_u64(u64::try_from(v).unwrap_or(u64::MAX));
    }

    fn write_option_count(&mut self, v: Option<usize>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_count(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_mode(&mut self, m: MotionMode) {
        self.write_u8(match m {
            MotionMode::Idle => 0,
            MotionMode::AutoScrolling => 1,
            MotionMode::Dragging => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_geometry(&mut self, e: &GeometryEvent) {
        self.write_u8(TAG_GEOMETRY);
        self.write_u32(e.strip.0);
        self.write_u8(match e.tier {
            Tier::Top => 0,
            Tier::Mid => 1,
            Tier::Other => 2,
        });
        self.write_count(e.item_count);
        self.write_f64(e.lap_length);
        self.write_u8(match e.mode {
            StripMode::Empty => 0,
            StripMode::Static => 1,
            StripMode::Infinite => 2,
        });
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_u32(e.strip.0);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.ticks());
        self.write_f64(e.dt);
        self.write_f64(e.offset);
        self.write_f64(e.speed);
        self.write_f64(e.target_speed);
        self.write_mode(e.mode);
    }

    fn on_mode_change(&mut self, e: &ModeChangeEvent) {
        self.write_u8(TAG_MODE_CHANGE);
        self.write_u32(e.strip.0);
        self.write_mode(e.from);
        self.write_mode(e.to);
    }

    fn on_wrap(&mut self, e: &WrapEvent) {
        self.write_u8(TAG_WRAP);
        self.write_u32(e.strip.0);
        self.write_u8(match e.direction {
            WrapDirection::Forward => 0,
            WrapDirection::Backward => 1,
        });
        self.write_f64(e.offset);
    }

    fn on_gesture(&mut self, e: &GestureEvent) {
        self.write_u8(TAG_GESTURE);
        self.write_u32(e.strip.0);
        self.write_u8(match e.kind {
            GestureKind::Click => 0,
            GestureKind::Drag => 1,
            GestureKind::Cancelled => 2,
            GestureKind::Abandoned => 3,
        });
        self.write_option_count(e.item);
    }

    fn on_capture(&mut self, e: &CaptureEvent) {
        self.write_u8(TAG_CAPTURE);
        self.write_u32(e.strip.0);
        self.write_u8(u8::from(e.acquired));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`GeometryEvent`].
    Geometry(GeometryEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// A [`ModeChangeEvent`].
    ModeChange(ModeChangeEvent),
    /// A [`WrapEvent`].
    Wrap(WrapEvent),
    /// A [`GestureEvent`].
    Gesture(GestureEvent),
    /// A [`CaptureEvent`].
    Capture(CaptureEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.take::<1>()?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        Some(f64::from_bits(self.read_u64()?))
    }

    fn read_count(&mut self) -> Option<usize> {
        Some(usize::try_from(self.read_u64()?).unwrap_or(usize::MAX))
    }

    fn read_option_count(&mut self) -> Option<Option<usize>> {
        let present = self.read_u8()?;
        let val = self.read_count()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_strip(&mut self) -> Option<StripId> {
        Some(StripId(self.read_u32()?))
    }

    fn read_mode(&mut self) -> Option<MotionMode> {
        Some(match self.read_u8()? {
            0 => MotionMode::Idle,
            1 => MotionMode::AutoScrolling,
            _ => MotionMode::Dragging,
        })
    }

    fn decode_geometry(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Geometry(GeometryEvent {
            strip: self.read_strip()?,
            tier: match self.read_u8()? {
                0 => Tier::Top,
                1 => Tier::Mid,
                _ => Tier::Other,
            },
            item_count: self.read_count()?,
            lap_length: self.read_f64()?,
            mode: match self.read_u8()? {
                0 => StripMode::Empty,
                1 => StripMode::Static,
                _ => StripMode::Infinite,
            },
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            strip: self.read_strip()?,
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            dt: self.read_f64()?,
            offset: self.read_f64()?,
            speed: self.read_f64()?,
            target_speed: self.read_f64()?,
            mode: self.read_mode()?,
        }))
    }

    fn decode_mode_change(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ModeChange(ModeChangeEvent {
            strip: self.read_strip()?,
            from: self.read_mode()?,
            to: self.read_mode()?,
        }))
    }

    fn decode_wrap(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Wrap(WrapEvent {
            strip: self.read_strip()?,
            direction: match self.read_u8()? {
                0 => WrapDirection::Forward,
                _ => WrapDirection::Backward,
            },
            offset: self.read_f64()?,
        }))
    }

    fn decode_gesture(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Gesture(GestureEvent {
            strip: self.read_strip()?,
            kind: match self.read_u8()? {
                0 => GestureKind::Click,
                1 => GestureKind::Drag,
                2 => GestureKind::Cancelled,
                _ => GestureKind::Abandoned,
            },
            item: self.read_option_count()?,
        }))
    }

    fn decode_capture(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Capture(CaptureEvent {
            strip: self.read_strip()?,
            acquired: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_GEOMETRY => self.decode_geometry(),
            TAG_FRAME => self.decode_frame(),
            TAG_MODE_CHANGE => self.decode_mode_change(),
            TAG_WRAP => self.decode_wrap(),
            TAG_GESTURE => self.decode_gesture(),
            TAG_CAPTURE => self.decode_capture(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> FrameEvent {
        FrameEvent {
            strip: StripId(1),
            frame_index: 7,
            now: HostTime(1_016_667),
            dt: 1.0 / 60.0,
            offset: -1776.0 - 2.25,
            speed: 134.5,
            target_speed: 135.0,
            mode: MotionMode::AutoScrolling,
        }
    }

    #[test]
    fn frame_fields_survive_exactly() {
        let mut rec = RecorderSink::new();
        let orig = sample_frame();
        rec.on_frame(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Frame(e) => {
                assert_eq!(e.strip, orig.strip);
                assert_eq!(e.frame_index, orig.frame_index);
                assert_eq!(e.now, orig.now);
                assert_eq!(e.dt.to_bits(), orig.dt.to_bits());
                assert_eq!(e.offset.to_bits(), orig.offset.to_bits());
                assert_eq!(e.mode, orig.mode);
            }
            other => panic!("expected Frame, got {other:?}"),
        }
    }

    #[test]
    fn gesture_with_and_without_item() {
        let mut rec = RecorderSink::new();
        rec.on_gesture(&GestureEvent {
            strip: StripId(0),
            kind: GestureKind::Click,
            item: Some(4),
        });
        rec.on_gesture(&GestureEvent {
            strip: StripId(0),
            kind: GestureKind::Abandoned,
            item: None,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match (&events[0], &events[1]) {
            (RecordedEvent::Gesture(a), RecordedEvent::Gesture(b)) => {
                assert_eq!((a.kind, a.item), (GestureKind::Click, Some(4)));
                assert_eq!((b.kind, b.item), (GestureKind::Abandoned, None));
            }
            other => panic!("expected two gestures, got {other:?}"),
        }
    }

    #[test]
    fn mixed_stream_keeps_order() {
        let mut rec = RecorderSink::new();
        rec.on_geometry(&GeometryEvent {
            strip: StripId(3),
            tier: Tier::Mid,
            item_count: 6,
            lap_length: 1776.0,
            mode: StripMode::Infinite,
        });
        rec.on_mode_change(&ModeChangeEvent {
            strip: StripId(3),
            from: MotionMode::Idle,
            to: MotionMode::AutoScrolling,
        });
        rec.on_frame(&sample_frame());
        rec.on_wrap(&WrapEvent {
            strip: StripId(3),
            direction: WrapDirection::Forward,
            offset: -1777.0,
        });
        rec.on_capture(&CaptureEvent {
            strip: StripId(3),
            acquired: true,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 5);
        assert!(matches!(
            events[0],
            RecordedEvent::Geometry(GeometryEvent {
                tier: Tier::Mid,
                item_count: 6,
                mode: StripMode::Infinite,
                ..
            })
        ));
        assert!(matches!(events[1], RecordedEvent::ModeChange(_)));
        assert!(matches!(events[2], RecordedEvent::Frame(_)));
        assert!(matches!(
            events[3],
            RecordedEvent::Wrap(WrapEvent {
                direction: WrapDirection::Forward,
                ..
            })
        ));
        assert!(matches!(
            events[4],
            RecordedEvent::Capture(CaptureEvent { acquired: true, .. })
        ));
    }

    #[test]
    fn truncated_record_stops_decoding() {
        let mut rec = RecorderSink::new();
        rec.on_frame(&sample_frame());
        rec.on_frame(&sample_frame());
        let bytes = rec.into_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
