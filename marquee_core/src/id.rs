// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strip instance identification.
//!
//! [`StripId`] distinguishes independent strip instances on one page (one per
//! sponsor tier). Hosts assign these; core only carries them into trace
//! events.

use core::fmt;

/// Identifies one showcase strip instance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StripId(pub u32);

impl fmt::Debug for StripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StripId({})", self.0)
    }
}
