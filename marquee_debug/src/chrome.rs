// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Each strip becomes its own process row. Frames become counter tracks for
//! offset and speed; capture spans become duration events.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::collections::HashMap;
use std::io::{self, Write};

use serde_json::{Value, json};

use marquee_core::id::StripId;
use marquee_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Only frame events carry a timestamp; every other event is stamped with the
/// most recent frame time of its strip (or 0 before the first frame).
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_ts: HashMap<StripId, f64> = HashMap::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Geometry(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Geometry",
                    "cat": "Layout",
                    "ts": ts_of(e.strip, &last_ts),
                    "pid": e.strip.0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "tier": e.tier.as_str(),
                        "item_count": e.item_count,
                        "lap_length": e.lap_length,
                        "mode": format!("{:?}", e.mode),
                    }
                }));
            }
            RecordedEvent::Frame(e) => {
                let ts = ticks_to_us(e.now.ticks(), timebase);
                last_ts.insert(e.strip, ts);
                events.push(json!({
                    "ph": "C",
                    "name": "Motion",
                    "cat": "Motion",
                    "ts": ts,
                    "pid": e.strip.0,
                    "tid": 0,
                    "args": {
                        "offset": e.offset,
                        "speed": e.speed,
                        "target_speed": e.target_speed,
                    }
                }));
            }
            RecordedEvent::ModeChange(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.to),
                    "cat": "Mode",
                    "ts": ts_of(e.strip, &last_ts),
                    "pid": e.strip.0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "from": format!("{:?}", e.from),
                    }
                }));
            }
            RecordedEvent::Wrap(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Wrap",
                    "cat": "Motion",
                    "ts": ts_of(e.strip, &last_ts),
                    "pid": e.strip.0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "direction": format!("{:?}", e.direction),
                        "offset": e.offset,
                    }
                }));
            }
            RecordedEvent::Gesture(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.kind),
                    "cat": "Gesture",
                    "ts": ts_of(e.strip, &last_ts),
                    "pid": e.strip.0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "item": e.item,
                    }
                }));
            }
            RecordedEvent::Capture(e) => {
                events.push(json!({
                    "ph": if e.acquired { "B" } else { "E" },
                    "name": "Capture",
                    "cat": "Gesture",
                    "ts": ts_of(e.strip, &last_ts),
                    "pid": e.strip.0,
                    "tid": 1,
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ts_of(strip: StripId, last_ts: &HashMap<StripId, f64>) -> f64 {
    last_ts.get(&strip).copied().unwrap_or(0.0)
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}
