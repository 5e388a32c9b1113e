// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Displayed entries.

use alloc::string::String;

/// One entry shown on a strip.
///
/// Supplied by the host page and never mutated by the strip. Rendered entries
/// are keyed by name together with their position in the list, see
/// [`SlotKey`](crate::layout::SlotKey).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SponsorItem {
    /// Display name.
    pub name: String,
    /// Logo image reference (URL or asset path).
    pub logo: Option<String>,
    /// Free-text description shown in the detail popup.
    pub description: Option<String>,
    /// Outbound link.
    pub link: Option<String>,
    /// Special visual styling tag, interpreted by the host.
    pub style: Option<String>,
}

impl SponsorItem {
    /// Creates an item with only a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the logo reference.
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the outbound link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the styling tag.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}
