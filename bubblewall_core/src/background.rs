// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background theme, brightness, and visibility.

/// Light/dark theme of the background.
///
/// The theme is unknown until the first surface sizing reads it from the
/// host, and afterwards only flips on an explicit theme change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    /// Not yet read from the host.
    #[default]
    Uninitialized,
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

impl ThemeMode {
    /// `Dark` when `dark`, else `Light`.
    #[inline]
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    /// Whether this is [`ThemeMode::Dark`].
    #[inline]
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Brightness the background rests at outside of transitions.
    #[inline]
    #[must_use]
    pub const fn resting_brightness(self) -> f32 {
        if self.is_dark() { 0.0 } else { 1.0 }
    }

    /// Compact encoding for sharing through an atomic.
    #[inline]
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Light => 1,
            Self::Dark => 2,
        }
    }

    /// Inverse of [`to_u8`](Self::to_u8); unknown values decode as
    /// `Uninitialized`.
    #[inline]
    #[must_use]
    pub const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Light,
            2 => Self::Dark,
            _ => Self::Uninitialized,
        }
    }
}

/// Result of [`BackgroundState::apply_theme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeChange {
    /// The theme was unknown and is now set; nothing to animate.
    Initialized,
    /// The theme flipped direction.
    Changed,
    /// The theme already matched.
    Unchanged,
}

/// Background state shared by every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundState {
    /// Current theme.
    pub theme: ThemeMode,
    /// Greyscale level in `[0, 1]`.
    pub brightness: f32,
    /// Whether the surface is currently visible.
    pub visible: bool,
}

impl Default for BackgroundState {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundState {
    /// Uninitialized theme, full brightness, not visible.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            theme: ThemeMode::Uninitialized,
            brightness: 1.0,
            visible: false,
        }
    }

    /// Sets the theme from the host if it is still unknown.
    ///
    /// Returns `true` when the theme was initialized by this call.
    pub fn initialize_from(&mut self, dark: bool) -> bool {
        if self.theme != ThemeMode::Uninitialized {
            return false;
        }
        self.theme = ThemeMode::from_dark(dark);
        true
    }

    /// Records an explicit theme change reported by the host.
    pub fn apply_theme(&mut self, dark: bool) -> ThemeChange {
        let next = ThemeMode::from_dark(dark);
        let change = match self.theme {
            ThemeMode::Uninitialized => ThemeChange::Initialized,
            current if current == next => ThemeChange::Unchanged,
            _ => ThemeChange::Changed,
        };
        self.theme = next;
        change
    }

    /// Snaps brightness to the resting level of the current theme.
    pub fn settle(&mut self) {
        self.brightness = self.theme.resting_brightness();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_only_once() {
        let mut bg = BackgroundState::new();
        assert!(bg.initialize_from(true));
        assert_eq!(bg.theme, ThemeMode::Dark);
        assert!(!bg.initialize_from(false));
        assert_eq!(bg.theme, ThemeMode::Dark);
    }

    #[test]
    fn apply_theme_reports_direction() {
        let mut bg = BackgroundState::new();
        assert_eq!(bg.apply_theme(false), ThemeChange::Initialized);
        assert_eq!(bg.apply_theme(false), ThemeChange::Unchanged);
        assert_eq!(bg.apply_theme(true), ThemeChange::Changed);
        assert_eq!(bg.theme, ThemeMode::Dark);
    }

    #[test]
    fn settle_uses_theme() {
        let mut bg = BackgroundState::new();
        bg.theme = ThemeMode::Dark;
        bg.brightness = 0.4;
        bg.settle();
        assert_eq!(bg.brightness, 0.0);
        bg.theme = ThemeMode::Uninitialized;
        bg.settle();
        assert_eq!(bg.brightness, 1.0);
    }

    #[test]
    fn u8_round_trip_is_total() {
        for mode in [ThemeMode::Uninitialized, ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_u8(mode.to_u8()), mode);
        }
        assert_eq!(ThemeMode::from_u8(99), ThemeMode::Uninitialized);
    }
}
