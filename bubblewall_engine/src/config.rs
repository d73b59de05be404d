// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use std::time::Duration;

use bubblewall_core::placement::PlacementConfig;
use bubblewall_render::SceneStyle;

/// Parameters of an [`Engine`](crate::Engine).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Placement parameters used on every rebuild.
    pub placement: PlacementConfig,
    /// Drawing parameters.
    pub style: SceneStyle,
    /// Delay between the user unlocking the device and the expand animation.
    pub expand_delay: Duration,
    /// Preview surfaces ignore user-present, screen-off, and theme events.
    pub preview: bool,
    /// Seed for placement; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// The stock wallpaper configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            placement: PlacementConfig::new(),
            style: SceneStyle::new(),
            expand_delay: Duration::from_millis(250),
            preview: false,
            seed: None,
        }
    }

    /// Returns this configuration with a fixed placement seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns this configuration marked as a preview surface.
    #[must_use]
    pub const fn preview(mut self) -> Self {
        self.preview = true;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_wallpaper() {
        let config = EngineConfig::default();
        assert_eq!(config.expand_delay, Duration::from_millis(250));
        assert_eq!(config.placement.max_overlap_retries, 50);
        assert!(!config.preview);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builders_set_fields() {
        let config = EngineConfig::new().with_seed(9).preview();
        assert_eq!(config.seed, Some(9));
        assert!(config.preview);
    }
}
