// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the engine needs to know about its host environment.

use std::sync::Arc;

use bubblewall_core::color::Color;
use bubblewall_core::placement::Bounds;

/// Host environment queried by the engine.
///
/// Calls may come from both the event thread and the worker thread.
pub trait Host: Send + Sync {
    /// Whether the system is in dark (night) mode.
    fn is_dark_mode(&self) -> bool;

    /// The system accent color used to tint the background.
    ///
    /// Read on every frame, so a changed accent shows up on the next one.
    fn accent_color(&self) -> Color;

    /// Bubble colors as `#RRGGBB` / `#AARRGGBB` strings, consumed in
    /// `(outline, fill)` pairs.
    fn bubble_colors(&self) -> Vec<String>;

    /// Display size used as placement bounds.
    ///
    /// `None` places bubbles within the surface size instead.
    fn display_size(&self) -> Option<Bounds> {
        None
    }
}

impl<H: Host + ?Sized> Host for Arc<H> {
    fn is_dark_mode(&self) -> bool {
        (**self).is_dark_mode()
    }

    fn accent_color(&self) -> Color {
        (**self).accent_color()
    }

    fn bubble_colors(&self) -> Vec<String> {
        (**self).bubble_colors()
    }

    fn display_size(&self) -> Option<Bounds> {
        (**self).display_size()
    }
}
