// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placed bubbles and the ordered set that holds them.

use alloc::vec::Vec;
use core::ops::Index;
use core::slice;

use kurbo::Point;

use crate::color::Color;

/// One placed circle.
///
/// The center and maximum radius are fixed at placement; only
/// [`current_radius`](Self::current_radius) changes while animating.
#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    /// Center x, in surface pixels.
    pub x: i32,
    /// Center y, in surface pixels.
    pub y: i32,
    max_radius: i32,
    minimized_radius: i32,
    /// Radius drawn on the next frame.
    pub current_radius: f32,
    /// Stroke color of the outline ring and the shadow gradient.
    pub outline_color: Color,
    /// Fill color of the disc.
    pub fill_color: Color,
}

impl Bubble {
    /// Creates a bubble with `current_radius` at zero.
    ///
    /// `max_radius` is expected to be non-negative.
    #[must_use]
    pub fn new(x: i32, y: i32, max_radius: i32, outline_color: Color, fill_color: Color) -> Self {
        Self {
            x,
            y,
            max_radius,
            minimized_radius: minimized_radius_for(max_radius),
            current_radius: 0.0,
            outline_color,
            fill_color,
        }
    }

    /// Radius when fully maximized.
    #[inline]
    #[must_use]
    pub const fn max_radius(&self) -> i32 {
        self.max_radius
    }

    /// Radius when minimized: `round(max_radius / 3)`.
    #[inline]
    #[must_use]
    pub const fn minimized_radius(&self) -> i32 {
        self.minimized_radius
    }

    /// Center as a floating-point point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Whether `(px, py)` lies strictly inside the maximized circle.
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let dx = i64::from(px) - i64::from(self.x);
        let dy = i64::from(py) - i64::from(self.y);
        let r = i64::from(self.max_radius);
        dx * dx + dy * dy < r * r
    }
}

/// `round(max_radius / 3)` with halves rounded up, for non-negative radii.
#[inline]
#[must_use]
pub const fn minimized_radius_for(max_radius: i32) -> i32 {
    (max_radius + 1) / 3
}

/// Bubbles in placement order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BubbleSet {
    bubbles: Vec<Bubble>,
}

impl BubbleSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bubbles: Vec::new(),
        }
    }

    /// Appends a bubble; it becomes last in placement order.
    pub fn push(&mut self, bubble: Bubble) {
        self.bubbles.push(bubble);
    }

    /// Removes every bubble.
    pub fn clear(&mut self) {
        self.bubbles.clear();
    }

    /// Number of bubbles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Returns the bubble at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bubble> {
        self.bubbles.get(index)
    }

    /// Returns the bubble at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Bubble> {
        self.bubbles.get_mut(index)
    }

    /// Iterates in placement order.
    pub fn iter(&self) -> slice::Iter<'_, Bubble> {
        self.bubbles.iter()
    }

    /// Iterates mutably in placement order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Bubble> {
        self.bubbles.iter_mut()
    }

    /// Index of the first bubble (in placement order) containing the point.
    #[must_use]
    pub fn hit_test(&self, px: i32, py: i32) -> Option<usize> {
        self.bubbles.iter().position(|b| b.contains(px, py))
    }

    /// Sets every bubble's radius to `radius_of(bubble)`.
    pub fn set_all_radii(&mut self, mut radius_of: impl FnMut(&Bubble) -> f32) {
        for bubble in &mut self.bubbles {
            bubble.current_radius = radius_of(bubble);
        }
    }

    /// Whether every bubble has reached its maximum radius.
    ///
    /// `true` for an empty set.
    #[must_use]
    pub fn all_at_least_max(&self) -> bool {
        self.bubbles
            .iter()
            .all(|b| b.current_radius >= b.max_radius as f32)
    }
}

impl Index<usize> for BubbleSet {
    type Output = Bubble;

    fn index(&self, index: usize) -> &Bubble {
        &self.bubbles[index]
    }
}

impl<'a> IntoIterator for &'a BubbleSet {
    type Item = &'a Bubble;
    type IntoIter = slice::Iter<'a, Bubble>;

    fn into_iter(self) -> Self::IntoIter {
        self.bubbles.iter()
    }
}

impl FromIterator<Bubble> for BubbleSet {
    fn from_iter<I: IntoIterator<Item = Bubble>>(iter: I) -> Self {
        Self {
            bubbles: iter.into_iter().collect(),
        }
    }
}
