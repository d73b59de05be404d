// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame building: bubble state in, [`Scene`] out.
//!
//! Each bubble contributes three items. Shadows for all bubbles come first,
//! then the fill and outline of every bubble:
//!
//! ```text
//!        p315 ●
//!            ╱ ╲
//!   center  ╱   ╲
//!          ╱     ╲
//!    p135 ●───────● corner = center + trunc(r) + shadow_offset
//! ```
//!
//! Rim points are truncated toward zero to whole pixels; the gradient runs
//! from the 315° rim point to the corner and mirrors past it.

use core::f64::consts::PI;

use bubblewall_core::background::BackgroundState;
use bubblewall_core::bubble::{Bubble, BubbleSet};
use bubblewall_core::color::Color;
use kurbo::{Circle, Point, Vec2};

use crate::scene::{
    Background, DrawItem, FilledCircle, LinearGradient, OutlineCircle, Scene, ShadowTriangle,
};

/// Fixed drawing parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneStyle {
    /// Stroke width of the bubble rim.
    pub outline_width: f64,
    /// How far the rim's center line sits inside the fill radius.
    pub outline_inset: f64,
    /// Smallest radius the rim is drawn at.
    pub min_outline_radius: f64,
    /// Offset of the shadow corner beyond the bubble's bounding box.
    pub shadow_offset: i32,
    /// Alpha of the shadow gradient's opaque end.
    pub shadow_alpha: u8,
    /// Alpha of the accent tint on a dark background.
    pub dark_tint_alpha: u8,
    /// Alpha of the accent tint on a light background.
    pub light_tint_alpha: u8,
}

impl SceneStyle {
    /// The stock wallpaper look.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outline_width: 30.0,
            outline_inset: 15.0,
            min_outline_radius: 1.0,
            shadow_offset: 50,
            shadow_alpha: 100,
            dark_tint_alpha: 50,
            light_tint_alpha: 90,
        }
    }
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds scenes into a reusable buffer.
#[derive(Clone, Debug, Default)]
pub struct FrameBuilder {
    style: SceneStyle,
    scene: Scene,
}

impl FrameBuilder {
    /// Creates a builder with the given style.
    #[must_use]
    pub fn new(style: SceneStyle) -> Self {
        Self {
            style,
            scene: Scene::new(),
        }
    }

    /// The style scenes are built with.
    #[must_use]
    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    /// The most recently built scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Rebuilds the scene for the given state.
    pub fn build(
        &mut self,
        bubbles: &BubbleSet,
        background: &BackgroundState,
        accent: Color,
    ) -> &Scene {
        let style = &self.style;
        let scene = &mut self.scene;
        scene.clear();
        scene.background = background_for(style, background, accent);
        scene.items.reserve(bubbles.len() * 3);
        scene
            .items
            .extend(bubbles.iter().map(|b| DrawItem::Shadow(shadow_for(style, b))));
        for bubble in bubbles {
            let center = bubble.center();
            let radius = f64::from(bubble.current_radius);
            scene.items.push(DrawItem::Fill(FilledCircle {
                circle: Circle::new(center, radius),
                color: bubble.fill_color,
            }));
            scene.items.push(DrawItem::Outline(OutlineCircle {
                circle: Circle::new(
                    center,
                    (radius - style.outline_inset).max(style.min_outline_radius),
                ),
                color: bubble.outline_color,
                stroke_width: style.outline_width,
            }));
        }
        &self.scene
    }
}

/// Builds a standalone scene with the given style.
#[must_use]
pub fn build_frame(
    style: SceneStyle,
    bubbles: &BubbleSet,
    background: &BackgroundState,
    accent: Color,
) -> Scene {
    let mut builder = FrameBuilder::new(style);
    builder.build(bubbles, background, accent);
    builder.scene
}

fn background_for(style: &SceneStyle, background: &BackgroundState, accent: Color) -> Background {
    let level = 255.0 * background.brightness.clamp(0.0, 1.0) + 0.5;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "level is in [0.5, 255.5] and the cast floors it"
    )]
    let level = level as u8;
    let tint_alpha = if background.theme.is_dark() {
        style.dark_tint_alpha
    } else {
        style.light_tint_alpha
    };
    Background {
        base: Color::grey(level),
        tint: accent.with_alpha(tint_alpha),
    }
}

fn shadow_for(style: &SceneStyle, bubble: &Bubble) -> ShadowTriangle {
    let center = bubble.center();
    let radius = f64::from(bubble.current_radius);
    let rim = |angle: f64| -> Point { (center + Vec2::from_angle(angle) * radius).trunc() };
    let upper = rim(PI * 1.75);
    let lower = rim(PI * 0.75);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "radii are far below i32::MAX and the cast truncates toward zero"
    )]
    let reach = bubble.current_radius as i32 + style.shadow_offset;
    let corner = Point::new(f64::from(bubble.x + reach), f64::from(bubble.y + reach));
    ShadowTriangle {
        vertices: [upper, lower, corner],
        gradient: LinearGradient {
            start: upper,
            end: corner,
            start_color: bubble.outline_color.with_alpha(style.shadow_alpha),
            end_color: Color::TRANSPARENT,
        },
    }
}
