// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene: the background and an ordered sequence of draw items for one frame.

use alloc::vec::Vec;

use bubblewall_core::color::Color;
use kurbo::{Circle, Point};

/// Solid background: an opaque grey base with a translucent accent tint on
/// top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Background {
    /// Opaque grey derived from the brightness.
    pub base: Color,
    /// Accent color drawn over the base.
    pub tint: Color,
}

impl Background {
    /// The single color a pixel of bare background ends up with.
    #[must_use]
    pub fn flattened(&self) -> Color {
        self.tint.over(self.base)
    }
}

/// Two-stop linear gradient that mirrors beyond its end points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    /// Where `start_color` is fully applied.
    pub start: Point,
    /// Where `end_color` is fully applied.
    pub end: Point,
    /// Color at `start`.
    pub start_color: Color,
    /// Color at `end`.
    pub end_color: Color,
}

/// Drop shadow cast towards the lower right of a bubble.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowTriangle {
    /// Vertices in drawing order: upper-right rim point, lower-left rim
    /// point, offset corner.
    pub vertices: [Point; 3],
    /// Fill of the triangle.
    pub gradient: LinearGradient,
}

/// Filled disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilledCircle {
    /// Geometry.
    pub circle: Circle,
    /// Fill color.
    pub color: Color,
}

/// Stroked ring; the stroke is centered on the circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineCircle {
    /// Geometry of the stroke center line.
    pub circle: Circle,
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

/// A single draw command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawItem {
    /// Gradient-filled shadow triangle.
    Shadow(ShadowTriangle),
    /// Bubble body.
    Fill(FilledCircle),
    /// Bubble rim.
    Outline(OutlineCircle),
}

/// Everything needed to paint one frame.
///
/// Items are in back-to-front order: every shadow precedes every circle, and
/// each bubble's fill precedes its outline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Painted first, covering the whole surface.
    pub background: Background,
    /// Draw items in back-to-front order.
    pub items: Vec<DrawItem>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the scene for reuse, keeping its allocation.
    pub fn clear(&mut self) {
        self.background = Background::default();
        self.items.clear();
    }

    /// Shadow items in drawing order.
    pub fn shadows(&self) -> impl Iterator<Item = &ShadowTriangle> + '_ {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Shadow(s) => Some(s),
            _ => None,
        })
    }

    /// Fill items in drawing order.
    pub fn fills(&self) -> impl Iterator<Item = &FilledCircle> + '_ {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Fill(f) => Some(f),
            _ => None,
        })
    }

    /// Outline items in drawing order.
    pub fn outlines(&self) -> impl Iterator<Item = &OutlineCircle> + '_ {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Outline(o) => Some(o),
            _ => None,
        })
    }
}
