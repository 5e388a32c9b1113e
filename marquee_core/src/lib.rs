// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout, motion, and gesture logic for infinite sponsor showcase strips.
//!
//! `marquee_core` holds everything about a showcase strip that does not touch
//! a real display: how wide the items are, how far the track has scrolled,
//! and whether a press was a click or a drag. It is `no_std` compatible (with
//! `alloc`) and drives its host through small traits, so the same strip runs
//! in a browser, under a deterministic simulation, or in unit tests.
//!
//! # Architecture
//!
//! ```text
//!   items + tier name
//!       │
//!       ▼
//!   TierGeometry::compute() ──► StripMode (Empty / Static / Infinite)
//!       │
//!       ▼
//!   ShowcaseStrip
//!       ├── MotionEngine          (offset, speed, wrap)
//!       ├── InteractionClassifier (click vs drag)
//!       └── FrameClock            (tick → seconds)
//!       │
//!       ▼
//!   Presenter::apply() ──► translate(offset, 0)
//! ```
//!
//! **[`layout`]**: Tier widths, stride and lap length, the tripled render
//! list, and hit testing from track coordinates to items.
//!
//! **[`motion`]**: Eased auto-scroll with hover slow-down, damped dragging,
//! and the wrap that keeps the offset inside the middle copies.
//!
//! **[`gesture`]**: Press sessions classified as click or drag by a
//! distance threshold.
//!
//! **[`strip`]**: [`ShowcaseStrip`](strip::ShowcaseStrip), which ties the
//! pieces together per mounted instance.
//!
//! **[`timing`]**: Frame ticks and the clamped frame delta.
//!
//! **[`backend`]**: [`StripHost`](backend::StripHost) and
//! [`Presenter`](backend::Presenter), the seams a platform backend fills.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! strip instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod gesture;
pub mod id;
pub mod item;
pub mod layout;
pub mod motion;
pub mod strip;
pub mod time;
pub mod timing;
pub mod trace;
