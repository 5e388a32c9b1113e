// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted strip session that exercises the tracing and diagnostics pipeline.
//!
//! Runs a mid-tier strip through autoplay, hover, a drag, and a click,
//! recording events to both a
//! [`PrettyPrintSink`](marquee_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](marquee_debug::recorder::RecorderSink), then exports a
//! Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use marquee_core::id::StripId;
use marquee_core::item::SponsorItem;
use marquee_core::strip::{ShowcaseStrip, StripConfig};
use marquee_core::time::{Duration, HostTime, Timebase};
use marquee_core::trace::{
    CaptureEvent, FrameEvent, GeometryEvent, GestureEvent, ModeChangeEvent, TraceSink, Tracer,
    WrapEvent,
};
use marquee_sim::{ManualClock, Simulation, Step};

use marquee_debug::pretty::PrettyPrintSink;
use marquee_debug::recorder::RecorderSink;

/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;

const SPONSORS: [&str; 6] = [
    "Northwind",
    "Contoso",
    "Fabrikam",
    "Tailspin",
    "Litware",
    "Adatum",
];

/// Forwards every event to both sinks.
struct Fanout<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Fanout<'_> {
    fn on_geometry(&mut self, e: &GeometryEvent) {
        self.pretty.on_geometry(e);
        self.recorder.on_geometry(e);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.pretty.on_frame(e);
        self.recorder.on_frame(e);
    }

    fn on_mode_change(&mut self, e: &ModeChangeEvent) {
        self.pretty.on_mode_change(e);
        self.recorder.on_mode_change(e);
    }

    fn on_wrap(&mut self, e: &WrapEvent) {
        self.pretty.on_wrap(e);
        self.recorder.on_wrap(e);
    }

    fn on_gesture(&mut self, e: &GestureEvent) {
        self.pretty.on_gesture(e);
        self.recorder.on_gesture(e);
    }

    fn on_capture(&mut self, e: &CaptureEvent) {
        self.pretty.on_capture(e);
        self.recorder.on_capture(e);
    }
}

fn main() {
    let timebase = Timebase::NANOS;

    // -- sinks -------------------------------------------------------------
    let mut pretty =
        PrettyPrintSink::new(Box::new(std::io::stdout()), timebase).without_frames();
    let mut recorder = RecorderSink::new();

    // -- strip -------------------------------------------------------------
    let items = SPONSORS
        .iter()
        .map(|name| SponsorItem::new(*name).with_link(format!("https://example.com/{name}")))
        .collect();
    let strip = ShowcaseStrip::new(StripId(0), items, "mid-tier", StripConfig::new(timebase));
    let clock = ManualClock::new(HostTime(1_000_000_000), Duration(REFRESH_INTERVAL_NS));
    let mut sim = Simulation::new(strip, clock);

    // -- script ------------------------------------------------------------
    let stride = sim.strip().geometry().item_stride;
    let script = [
        Step::Frames(240),
        Step::Enter,
        Step::Frames(120),
        Step::Down(400.0),
        Step::Move(420.0),
        Step::Frames(3),
        Step::Move(700.0),
        Step::Move(1100.0),
        Step::Up(1100.0),
        Step::Frames(60),
        Step::Down(stride * 1.5),
        Step::Up(stride * 1.5),
        Step::Leave,
        Step::Pause(true),
        Step::Frames(120),
        Step::Pause(false),
        Step::Stall(Duration(5_000_000_000)),
        Step::Frames(600),
    ];

    let report = {
        let mut fanout = Fanout {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut fanout);
        sim.strip().trace_geometry(&mut tracer);
        sim.run_traced(&script, &mut tracer)
    };

    println!(
        "{} frames, {} wraps, selections {:?}, offset {:.2} in [{:.2}, {:.2}]",
        report.frames,
        report.wraps,
        report.selections,
        report.final_offset,
        report.min_offset,
        report.max_offset,
    );
    for violation in &report.violations {
        println!("violation at step {}: {:?}", violation.step, violation.kind);
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    marquee_debug::chrome::export(recorder.as_bytes(), timebase, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path}");
}
