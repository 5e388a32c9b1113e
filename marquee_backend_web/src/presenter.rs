// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Mirrors a [`ShowcaseStrip`] into a clipping viewport `<div>` holding a
//! flex track of item entries. Only the track's transform changes per frame.
//!
//! [`ShowcaseStrip`]: marquee_core::strip::ShowcaseStrip

use alloc::format;
use alloc::string::ToString as _;
use alloc::vec::Vec;

use marquee_core::backend::Presenter;
use marquee_core::item::SponsorItem;
use marquee_core::layout::{RenderSlot, StripMode};
use marquee_core::strip::ShowcaseStrip;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement};

/// Attribute holding the item index on each rendered entry.
pub const ITEM_ATTRIBUTE: &str = "data-item";

/// Maps a [`ShowcaseStrip`] to live DOM elements.
///
/// The presenter owns a viewport `HtmlElement`. [`rebuild`](Presenter::rebuild)
/// replaces its children whenever the strip's items or geometry change;
/// [`apply`](Presenter::apply) only moves the track.
///
/// [`ShowcaseStrip`]: marquee_core::strip::ShowcaseStrip
pub struct DomPresenter {
    viewport: HtmlElement,
    track: Option<HtmlElement>,
    entries: Vec<HtmlElement>,
    last_offset: Option<f64>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("viewport", &"HtmlElement")
            .field("has_track", &self.track.is_some())
            .field("entries_len", &self.entries.len())
            .field("last_offset", &self.last_offset)
            .finish()
    }
}

impl DomPresenter {
    /// Creates a presenter that manages the children of `viewport`.
    #[must_use]
    pub fn new(viewport: HtmlElement) -> Self {
        let s = viewport.style();
        let _ = s.set_property("overflow", "hidden");
        let _ = s.set_property("position", "relative");
        let _ = s.set_property("user-select", "none");
        let _ = s.set_property("touch-action", "pan-y");
        Self {
            viewport,
            track: None,
            entries: Vec::new(),
            last_offset: None,
        }
    }

    /// Returns the viewport element.
    #[must_use]
    pub fn viewport(&self) -> &HtmlElement {
        &self.viewport
    }

    /// Returns the rendered entries in track order.
    #[must_use]
    pub fn entries(&self) -> &[HtmlElement] {
        &self.entries
    }

    /// Rebuilds the viewport's children, reporting DOM failures.
    pub fn try_rebuild(&mut self, strip: &ShowcaseStrip) -> Result<(), JsValue> {
        self.clear();
        let doc = self
            .viewport
            .owner_document()
            .ok_or_else(|| JsValue::from_str("viewport has no owner document"))?;

        let geometry = strip.geometry();
        match strip.mode() {
            StripMode::Empty => {
                let placeholder = create_div(&doc)?;
                placeholder.set_class_name("marquee-placeholder");
                placeholder.set_text_content(Some(strip.config().placeholder));
                let _ = placeholder.style().set_property("text-align", "center");
                self.viewport.append_child(&placeholder)?;
                return Ok(());
            }
            StripMode::Static => {
                let track = create_track(&doc, geometry.gap)?;
                let _ = track.style().set_property("justify-content", "center");
                for (index, item) in strip.items().iter().enumerate() {
                    let entry = create_entry(&doc, index, item, geometry.base_width)?;
                    track.append_child(&entry)?;
                    self.entries.push(entry);
                }
                self.viewport.append_child(&track)?;
                self.track = Some(track);
            }
            StripMode::Infinite => {
                let track = create_track(&doc, geometry.gap)?;
                let _ = track.style().set_property("will-change", "transform");
                for slot in strip.render_slots() {
                    let entry = create_slot_entry(&doc, &slot, strip.items(), geometry.base_width)?;
                    track.append_child(&entry)?;
                    self.entries.push(entry);
                }
                self.viewport.append_child(&track)?;
                self.track = Some(track);
                self.apply_offset(strip.offset());
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.track = None;
        self.last_offset = None;
        while let Some(child) = self.viewport.first_child() {
            let _ = self.viewport.remove_child(&child);
        }
    }

    fn apply_offset(&mut self, offset: f64) {
        if self.last_offset == Some(offset) {
            return;
        }
        if let Some(track) = &self.track {
            let _ = track
                .style()
                .set_property("transform", &format!("translate3d({offset}px, 0, 0)"));
            self.last_offset = Some(offset);
        }
    }

    /// Removes everything this presenter added to the viewport.
    pub fn detach(&mut self) {
        self.clear();
    }
}

impl Presenter for DomPresenter {
    fn rebuild(&mut self, strip: &ShowcaseStrip) {
        let _ = self.try_rebuild(strip);
    }

    fn apply(&mut self, strip: &ShowcaseStrip) {
        if strip.mode() == StripMode::Infinite {
            self.apply_offset(strip.translation().translation().x);
        }
    }
}

fn create_div(doc: &Document) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element("div")?.unchecked_into())
}

fn create_track(doc: &Document, gap: f64) -> Result<HtmlElement, JsValue> {
    let track = create_div(doc)?;
    track.set_class_name("marquee-track");
    let s = track.style();
    let _ = s.set_property("display", "flex");
    let _ = s.set_property("flex-wrap", "nowrap");
    let _ = s.set_property("gap", &format!("{gap}px"));
    Ok(track)
}

fn create_slot_entry(
    doc: &Document,
    slot: &RenderSlot,
    items: &[SponsorItem],
    width: f64,
) -> Result<HtmlElement, JsValue> {
    let index = slot.item_index();
    let item = items
        .get(index)
        .ok_or_else(|| JsValue::from_str("render slot past the item list"))?;
    let entry = create_entry(doc, index, item, width)?;
    entry.set_attribute("data-copy", &slot.key.copy.to_string())?;
    Ok(entry)
}

fn create_entry(
    doc: &Document,
    index: usize,
    item: &SponsorItem,
    width: f64,
) -> Result<HtmlElement, JsValue> {
    let entry = create_div(doc)?;
    entry.set_class_name("marquee-item");
    entry.set_attribute(ITEM_ATTRIBUTE, &index.to_string())?;
    entry.set_attribute("role", "button")?;
    entry.set_attribute("aria-label", &item.name)?;
    if let Some(style) = &item.style {
        entry.set_attribute("style", style)?;
    }
    let s = entry.style();
    let _ = s.set_property("flex", &format!("0 0 {width}px"));
    let _ = s.set_property("width", &format!("{width}px"));
    let _ = s.set_property("cursor", "pointer");

    match &item.logo {
        Some(logo) => {
            let img = doc.create_element("img")?;
            img.set_attribute("src", logo)?;
            img.set_attribute("alt", &item.name)?;
            img.set_attribute("draggable", "false")?;
            entry.append_child(&img)?;
        }
        None => entry.set_text_content(Some(&item.name)),
    }
    Ok(entry)
}

/// Reads the item index from the entry containing `target`, if any.
pub(crate) fn item_from_target(target: &web_sys::Element) -> Option<usize> {
    let entry = target
        .closest(&format!("[{ITEM_ATTRIBUTE}]"))
        .ok()
        .flatten()?;
    entry.get_attribute(ITEM_ATTRIBUTE)?.parse().ok()
}
