// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mounting a strip into the page.
//!
//! [`StripHandle`] wires a [`ShowcaseStrip`] to a [`DomPresenter`], a
//! [`RafLoop`], and pointer listeners on the viewport. While a drag is in
//! progress, `pointermove` and `pointerup` are also observed on the window,
//! attached on capture and detached on release. A drag still ends as soon as
//! the pointer leaves the viewport: `pointerleave` finishes it like a
//! release, without selecting anything.
//!
//! Strip calls never re-enter page code: selections and capture requests are
//! collected while the strip is borrowed and acted on afterwards.
//!
//! [`ShowcaseStrip`]: marquee_core::strip::ShowcaseStrip

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};

use marquee_core::backend::{Presenter as _, StripHost};
use marquee_core::id::StripId;
use marquee_core::item::SponsorItem;
use marquee_core::layout::StripMode;
use marquee_core::strip::{ShowcaseStrip, StripConfig};
use marquee_core::timing::FrameTick;
use marquee_core::trace::Tracer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Element, Event, EventTarget, HtmlElement, PointerEvent};

use crate::presenter::{DomPresenter, item_from_target};
use crate::raf::RafLoop;

static NEXT_STRIP_ID: AtomicU32 = AtomicU32::new(0);

/// Called with the index and item of a clicked entry.
pub type SelectCallback = Box<dyn FnMut(usize, &SponsorItem)>;

/// Side effects requested by the strip during one event.
#[derive(Debug, Default)]
struct PendingEffects {
    selected: Option<usize>,
    capture: Option<bool>,
}

impl StripHost for PendingEffects {
    fn item_selected(&mut self, index: usize, _item: &SponsorItem) {
        self.selected = Some(index);
    }

    fn capture_pointer(&mut self) {
        self.capture = Some(true);
    }

    fn release_pointer(&mut self) {
        self.capture = Some(false);
    }
}

/// A DOM listener that can be attached and detached repeatedly.
///
/// The closure lives as long as the listener, so detaching from inside its
/// own callback is fine. Dropping detaches.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        Self {
            target: target.clone(),
            event,
            closure: Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>),
        }
    }

    fn attach(&self) -> Result<(), JsValue> {
        self.target
            .add_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}

struct MountState {
    strip: ShowcaseStrip,
    presenter: DomPresenter,
}

struct Shared {
    state: RefCell<MountState>,
    on_select: RefCell<SelectCallback>,
    viewport_listeners: RefCell<Vec<Listener>>,
    /// Created on the first capture, then attached only while capturing.
    window_listeners: RefCell<Vec<Listener>>,
    raf: RefCell<Option<RafLoop>>,
}

impl Shared {
    /// Runs `f` against the strip, then applies what it asked for.
    fn with_strip<R>(
        self: &Rc<Self>,
        f: impl FnOnce(&mut ShowcaseStrip, &mut PendingEffects) -> R,
    ) -> R {
        let mut effects = PendingEffects::default();
        let (result, selected) = {
            let mut state = self.state.borrow_mut();
            let result = f(&mut state.strip, &mut effects);
            let MountState { strip, presenter } = &mut *state;
            presenter.apply(strip);
            let selected = effects
                .selected
                .and_then(|index| strip.items().get(index).cloned().map(|item| (index, item)));
            (result, selected)
        };
        match effects.capture {
            Some(true) => self.capture_window(),
            Some(false) => self.release_window(),
            None => {}
        }
        if let Some((index, item)) = selected {
            (self.on_select.borrow_mut())(index, &item);
        }
        result
    }

    fn capture_window(self: &Rc<Self>) {
        let mut listeners = self.window_listeners.borrow_mut();
        if listeners.is_empty() {
            let Some(window) = web_sys::window() else {
                return;
            };
            let target: &EventTarget = window.as_ref();
            let weak = Rc::downgrade(self);
            listeners.push(Listener::new(target, "pointermove", {
                let weak = Weak::clone(&weak);
                move |event| {
                    if let Some(shared) = weak.upgrade() {
                        shared.pointer_move(&event, true);
                    }
                }
            }));
            listeners.push(Listener::new(target, "pointerup", move |event| {
                if let Some(shared) = weak.upgrade() {
                    shared.pointer_up(&event, true);
                }
            }));
        }
        for listener in listeners.iter() {
            let _ = listener.attach();
        }
    }

    fn release_window(&self) {
        for listener in self.window_listeners.borrow().iter() {
            listener.detach();
        }
    }

    fn local_x(&self, event: &Event) -> Option<f64> {
        let event = event.dyn_ref::<PointerEvent>()?;
        let state = self.state.borrow();
        let rect = state.presenter.viewport().get_bounding_client_rect();
        Some(f64::from(event.client_x()) - rect.left())
    }

    fn pointer_move(self: &Rc<Self>, event: &Event, from_window: bool) {
        // Window listeners own moves while captured.
        if self.state.borrow().strip.is_capturing() != from_window {
            return;
        }
        if let Some(x) = self.local_x(event) {
            self.with_strip(|strip, host| strip.pointer_move(x, host, &mut Tracer::none()));
        }
    }

    fn pointer_up(self: &Rc<Self>, event: &Event, from_window: bool) {
        if self.state.borrow().strip.is_capturing() != from_window {
            return;
        }
        if let Some(x) = self.local_x(event) {
            self.with_strip(|strip, host| strip.pointer_up(x, host, &mut Tracer::none()));
        }
    }

    fn on_frame(&self, tick: FrameTick) {
        let mut state = self.state.borrow_mut();
        let MountState { strip, presenter } = &mut *state;
        if strip.tick(&tick, &mut Tracer::none()).is_some() {
            presenter.apply(strip);
        }
    }

    fn sync_frames(&self) {
        let wants = self.state.borrow().strip.wants_frames();
        if let Some(raf) = self.raf.borrow().as_ref() {
            if wants {
                raf.start();
            } else {
                raf.stop();
            }
        }
    }
}

/// A strip mounted into a container element.
///
/// Dropping the handle unmounts the strip: the frame loop stops, listeners
/// are detached, and the container's children are removed.
pub struct StripHandle {
    shared: Rc<Shared>,
}

impl core::fmt::Debug for StripHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("StripHandle")
            .field("strip", &state.strip.id())
            .field("mode", &state.strip.mode())
            .field("capturing", &state.strip.is_capturing())
            .finish_non_exhaustive()
    }
}

impl StripHandle {
    /// Mounts a strip for `items` of tier `tier_name` into `container`.
    ///
    /// `on_select` runs for every click on an item, never for a drag.
    pub fn mount(
        container: &HtmlElement,
        items: Vec<SponsorItem>,
        tier_name: &str,
        config: StripConfig,
        on_select: impl FnMut(usize, &SponsorItem) + 'static,
    ) -> Result<Self, JsValue> {
        let id = StripId(NEXT_STRIP_ID.fetch_add(1, Ordering::Relaxed));
        let strip = ShowcaseStrip::new(id, items, tier_name, config);
        let mut presenter = DomPresenter::new(container.clone());
        presenter.try_rebuild(&strip)?;

        let shared = Rc::new(Shared {
            state: RefCell::new(MountState { strip, presenter }),
            on_select: RefCell::new(Box::new(on_select)),
            viewport_listeners: RefCell::new(Vec::new()),
            window_listeners: RefCell::new(Vec::new()),
            raf: RefCell::new(None),
        });

        let weak = Rc::downgrade(&shared);
        let raf = RafLoop::new(move |tick| {
            if let Some(shared) = weak.upgrade() {
                shared.on_frame(tick);
            }
        });
        *shared.raf.borrow_mut() = Some(raf);
        shared.sync_frames();

        let listeners = viewport_listeners(&shared, container);
        for listener in &listeners {
            listener.attach()?;
        }
        *shared.viewport_listeners.borrow_mut() = listeners;
        Ok(Self { shared })
    }

    /// Returns the strip's instance id.
    #[must_use]
    pub fn id(&self) -> StripId {
        self.shared.state.borrow().strip.id()
    }

    /// Replaces the items and tier and re-renders.
    ///
    /// A layout change abandons any press in progress and restarts the
    /// offset in the middle lap.
    pub fn set_items(&self, items: Vec<SponsorItem>, tier_name: &str) -> Result<(), JsValue> {
        self.shared.with_strip(|strip, host| {
            strip.set_items(items, tier_name, host, &mut Tracer::none())
        });
        {
            let mut state = self.shared.state.borrow_mut();
            let MountState { strip, presenter } = &mut *state;
            presenter.try_rebuild(strip)?;
        }
        self.shared.sync_frames();
        Ok(())
    }

    /// Tells the strip whether a detail popup is open.
    pub fn set_external_pause(&self, paused: bool) {
        self.shared.state.borrow_mut().strip.set_external_pause(paused);
    }

    /// Returns the current track offset in pixels.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.shared.state.borrow().strip.offset()
    }

    /// Unmounts the strip. Equivalent to dropping the handle.
    pub fn unmount(self) {}
}

impl Drop for StripHandle {
    fn drop(&mut self) {
        for listener in self.shared.viewport_listeners.borrow().iter() {
            listener.detach();
        }
        self.shared.with_strip(|strip, host| strip.unmount(host, &mut Tracer::none()));
        self.shared.release_window();
        self.shared.raf.borrow_mut().take();
        self.shared.state.borrow_mut().presenter.detach();
    }
}

fn viewport_listeners(shared: &Rc<Shared>, container: &HtmlElement) -> Vec<Listener> {
    let target: &EventTarget = container.as_ref();
    let mut listeners = Vec::with_capacity(6);

    let weak = Rc::downgrade(shared);
    listeners.push(Listener::new(target, "pointerenter", move |_event| {
        if let Some(shared) = weak.upgrade() {
            shared.state.borrow_mut().strip.pointer_enter();
        }
    }));

    let weak = Rc::downgrade(shared);
    listeners.push(Listener::new(target, "pointerleave", move |_event| {
        if let Some(shared) = weak.upgrade() {
            shared.with_strip(|strip, host| strip.pointer_leave(host, &mut Tracer::none()));
        }
    }));

    let weak = Rc::downgrade(shared);
    listeners.push(Listener::new(target, "pointerdown", move |event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if let Some(x) = shared.local_x(&event) {
            let started =
                shared.with_strip(|strip, host| strip.pointer_down(x, host, &mut Tracer::none()));
            if started {
                // Keeps the browser from starting a native image drag.
                event.prevent_default();
            }
        }
    }));

    let weak = Rc::downgrade(shared);
    listeners.push(Listener::new(target, "pointermove", move |event| {
        if let Some(shared) = weak.upgrade() {
            shared.pointer_move(&event, false);
        }
    }));

    let weak = Rc::downgrade(shared);
    listeners.push(Listener::new(target, "pointerup", move |event| {
        if let Some(shared) = weak.upgrade() {
            shared.pointer_up(&event, false);
        }
    }));

    // Static entries behave as plain buttons.
    let weak = Rc::downgrade(shared);
    listeners.push(Listener::new(target, "click", move |event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if shared.state.borrow().strip.mode() != StripMode::Static {
            return;
        }
        let index = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| item_from_target(&el));
        if let Some(index) = index {
            shared.with_strip(|strip, host| strip.select(index, host));
        }
    }));

    listeners
}
