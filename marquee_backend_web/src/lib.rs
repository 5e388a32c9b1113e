// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for marquee.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`DomPresenter`]: viewport, track, and item elements
//! - [`StripHandle`]: a mounted strip with pointer listeners and
//!   window-level capture while dragging

#![no_std]

extern crate alloc;

mod handle;
mod presenter;
mod raf;

pub use handle::{SelectCallback, StripHandle};
pub use marquee_core::backend::Presenter;
pub use presenter::{DomPresenter, ITEM_ATTRIBUTE};
pub use raf::RafLoop;

use marquee_core::strip::StripConfig;
use marquee_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    raf::ms_to_host_time(raf::performance_now())
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}

/// Stock strip configuration for ticks from [`RafLoop`].
#[must_use]
pub fn strip_config() -> StripConfig {
    StripConfig::new(timebase())
}
