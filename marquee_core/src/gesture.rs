// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap-versus-swipe classification.
//!
//! [`InteractionClassifier`] turns pointer down/move/up sequences into exactly
//! one [`Gesture`]. A press opens a [`DragSession`]; the session only becomes
//! a drag once the pointer has travelled more than the threshold away from
//! where it was pressed. A released session that never crossed the threshold
//! is a click on whichever item is under the pointer at release.
//!
//! The classifier never touches the offset. It reports horizontal deltas in
//! [`MoveOutcome`] and the caller forwards them to the motion engine.

/// Default distance, in pixels, a press has to travel before it is a drag.
pub const DRAG_THRESHOLD: f64 = 10.0;

/// State of one press, from pointer-down until release or leave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    origin_x: f64,
    last_x: f64,
    threshold_exceeded: bool,
}

impl DragSession {
    /// Pointer position of the press.
    #[must_use]
    pub const fn origin_x(&self) -> f64 {
        self.origin_x
    }

    /// Last pointer position that was applied as a drag delta.
    #[must_use]
    pub const fn last_x(&self) -> f64 {
        self.last_x
    }

    /// Whether this press has become a drag.
    #[must_use]
    pub const fn threshold_exceeded(&self) -> bool {
        self.threshold_exceeded
    }
}

/// Final classification of a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Released without crossing the threshold. `item` is `None` when the
    /// release landed in a gap.
    Click {
        /// Item under the pointer at release.
        item: Option<usize>,
    },
    /// Crossed the threshold at some point; any click is suppressed.
    Drag,
    /// Left the surface before crossing the threshold.
    Cancelled,
}

/// What a pointer move meant for the current session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// No press in progress.
    NoSession,
    /// Still within the threshold.
    Pending,
    /// This move crossed the threshold. `delta` is the full displacement
    /// since the press.
    DragStarted {
        /// Horizontal pointer delta to apply.
        delta: f64,
    },
    /// Continued drag.
    Dragged {
        /// Horizontal pointer delta since the previous move.
        delta: f64,
    },
}

/// Classifies presses into clicks and drags.
#[derive(Clone, Debug)]
pub struct InteractionClassifier {
    threshold: f64,
    session: Option<DragSession>,
}

impl InteractionClassifier {
    /// Creates a classifier with the given drag threshold in pixels.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            session: None,
        }
    }

    /// Returns the drag threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the press in progress, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Returns `true` while a press that crossed the threshold is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some_and(|s| s.threshold_exceeded)
    }

    /// Starts a session at `x`. A session still open from a lost release is
    /// replaced.
    pub fn press(&mut self, x: f64) {
        self.session = Some(DragSession {
            origin_x: x,
            last_x: x,
            threshold_exceeded: false,
        });
    }

    /// Feeds a pointer move.
    ///
    /// The threshold is strict: travelling exactly `threshold` pixels is still
    /// a click.
    pub fn motion(&mut self, x: f64) -> MoveOutcome {
        let Some(session) = &mut self.session else {
            return MoveOutcome::NoSession;
        };
        if session.threshold_exceeded {
            let delta = x - session.last_x;
            session.last_x = x;
            return MoveOutcome::Dragged { delta };
        }
        if (x - session.origin_x).abs() > self.threshold {
            session.threshold_exceeded = true;
            let delta = x - session.last_x;
            session.last_x = x;
            MoveOutcome::DragStarted { delta }
        } else {
            MoveOutcome::Pending
        }
    }

    /// Ends the session on pointer-up. `item` is what lies under the
    /// pointer at the release position; it is only reported for a click.
    pub fn release(&mut self, item: Option<usize>) -> Option<Gesture> {
        let session = self.session.take()?;
        Some(if session.threshold_exceeded {
            Gesture::Drag
        } else {
            Gesture::Click { item }
        })
    }

    /// Ends the session because the pointer left the surface. Never yields a
    /// click.
    pub fn leave(&mut self) -> Option<Gesture> {
        let session = self.session.take()?;
        Some(if session.threshold_exceeded {
            Gesture::Drag
        } else {
            Gesture::Cancelled
        })
    }

    /// Drops the session without classifying it.
    pub fn abandon(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

impl Default for InteractionClassifier {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD)
    }
}
