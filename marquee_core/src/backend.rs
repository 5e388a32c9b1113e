// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts between a strip and the page hosting it.
//!
//! Platform glue lives in backend crates. Each backend provides:
//!
//! - **Tick source**: produces [`FrameTick`] values from the display's
//!   per-frame callback (e.g. `requestAnimationFrame`). Not abstracted by a
//!   trait; setup and cancellation differ per platform.
//!
//! - **Host**: implements [`StripHost`] to receive selections and to
//!   start/stop viewport-wide pointer tracking.
//!
//! - **Presenter**: implements [`Presenter`] to mirror the strip into a
//!   native tree (e.g. DOM elements).
//!
//! [`FrameTick`]: crate::timing::FrameTick

use crate::item::SponsorItem;
use crate::strip::ShowcaseStrip;

/// Side effects a strip requests from its host.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     if strip.tick(&tick, &mut Tracer::none()).is_some() {
///         presenter.apply(&strip);
///     }
/// }
///
/// fn on_pointer_up(x: f64) {
///     strip.pointer_up(x, &mut host, &mut Tracer::none());
/// }
/// ```
pub trait StripHost {
    /// A press was classified as a click on `item`. Never called for a drag.
    fn item_selected(&mut self, index: usize, item: &SponsorItem);

    /// The strip entered dragging: start delivering pointer moves and
    /// releases from the whole viewport, not just the strip.
    fn capture_pointer(&mut self) {}

    /// The drag ended or was abandoned: stop viewport-wide delivery.
    fn release_pointer(&mut self) {}
}

/// Mirrors strip state into a platform-native presentation tree.
pub trait Presenter {
    /// Recreates the rendered entries after the item list or geometry
    /// changed.
    fn rebuild(&mut self, strip: &ShowcaseStrip);

    /// Pushes the current translation. Called after every motion frame and
    /// drag update.
    fn apply(&mut self, strip: &ShowcaseStrip);
}
