// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized non-overlapping circle placement.
//!
//! [`Placer::place`] fills a [`Bounds`] rectangle with bubbles using
//! rejection sampling. Each slot draws candidates until one keeps the minimum
//! separation from every bubble already placed:
//!
//! ```text
//! distance(a.center, b.center) >= a.max_radius + b.max_radius + padding
//! ```
//!
//! A slot that needs more than [`PlacementConfig::max_overlap_retries`] draws
//! ends the whole placement; whatever was accepted so far is returned. Dense
//! configurations on small displays therefore produce partial (possibly
//! empty) sets rather than errors.
//!
//! Colors come from the [`Palette`] two at a time. The cursor lives on the
//! [`Placer`], so it carries over between placements of the same engine and
//! wraps to the start when fewer than two colors remain.

use crate::bubble::{Bubble, BubbleSet};
use crate::color::{Color, Palette};
use crate::sample::Sampler;

/// Placement bounds in surface pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Bounds {
    /// Creates bounds of the given size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Parameters of the placement engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Extra gap kept between neighbouring bubbles and from the top/left
    /// edges.
    pub padding: i32,
    /// Smallest maximum radius a bubble may get.
    pub min_radius: i32,
    /// Exclusive upper bound of the sampled radius.
    pub max_radius: i32,
    /// Draws allowed for one slot before placement stops.
    pub max_overlap_retries: u32,
}

impl PlacementConfig {
    /// The stock wallpaper parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            padding: 50,
            min_radius: 20,
            max_radius: 250,
            max_overlap_retries: 50,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of one [`Placer::place_with_report`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Bubbles accepted.
    pub placed: usize,
    /// Candidates drawn across all slots, including the final failing slot.
    pub draws: u32,
}

/// Rejection-sampling placement engine.
#[derive(Debug)]
pub struct Placer<S> {
    sampler: S,
    palette: Palette,
    config: PlacementConfig,
    color_cursor: usize,
}

impl<S: Sampler> Placer<S> {
    /// Creates a placer with a fresh color cursor.
    #[must_use]
    pub fn new(sampler: S, palette: Palette, config: PlacementConfig) -> Self {
        Self {
            sampler,
            palette,
            config,
            color_cursor: 0,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// The palette colors are drawn from.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Fills `bounds` with bubbles.
    pub fn place(&mut self, bounds: Bounds) -> BubbleSet {
        self.place_with_report(bounds).0
    }

    /// Fills `bounds` with bubbles and reports how much sampling it took.
    pub fn place_with_report(&mut self, bounds: Bounds) -> (BubbleSet, PlacementReport) {
        let mut set = BubbleSet::new();
        let mut report = PlacementReport::default();
        while let Some((x, y, radius)) = self.sample_slot(&set, bounds, &mut report.draws) {
            let (outline, fill) = self.next_colors();
            set.push(Bubble::new(x, y, radius, outline, fill));
        }
        report.placed = set.len();
        (set, report)
    }

    /// Draws candidates for one slot; `None` once the retry budget is spent.
    fn sample_slot(
        &mut self,
        placed: &BubbleSet,
        bounds: Bounds,
        draws: &mut u32,
    ) -> Option<(i32, i32, i32)> {
        let PlacementConfig {
            padding,
            min_radius,
            max_radius,
            max_overlap_retries,
        } = self.config;

        // A zero radius is never accepted, so at least one draw happens.
        let (mut x, mut y, mut radius) = (0, 0, 0);
        let mut attempts = 0_u32;
        while radius == 0 || overlaps(placed, x, y, radius, padding) {
            radius = self.sampler.uniform_below(max_radius).max(min_radius);
            x = self
                .sampler
                .uniform_below(bounds.width - radius - padding)
                .max(radius + padding);
            y = self
                .sampler
                .uniform_below(bounds.height - radius - padding)
                .max(radius + padding);
            attempts += 1;
            *draws += 1;
            if attempts > max_overlap_retries {
                return None;
            }
        }
        Some((x, y, radius))
    }

    fn next_colors(&mut self) -> (Color, Color) {
        if self.color_cursor + 1 >= self.palette.len() {
            self.color_cursor = 0;
        }
        let colors = self.palette.colors();
        let pair = (colors[self.color_cursor], colors[self.color_cursor + 1]);
        self.color_cursor += 2;
        pair
    }
}

/// Whether a circle at `(x, y)` with `radius` comes closer than `padding` to
/// any bubble in `placed` (measured against their maximum radii).
#[must_use]
pub fn overlaps(placed: &BubbleSet, x: i32, y: i32, radius: i32, padding: i32) -> bool {
    placed.iter().any(|b| {
        let dx = i64::from(x) - i64::from(b.x);
        let dy = i64::from(y) - i64::from(b.y);
        let min = i64::from(radius) + i64::from(b.max_radius()) + i64::from(padding);
        dx * dx + dy * dy < min * min
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::sample::{RandSampler, SequenceSampler};

    fn palette() -> Palette {
        Palette::parse(&["#ff0000", "#00ff00", "#0000ff", "#ffffff", "#000000"]).unwrap()
    }

    #[test]
    fn seeded_placement_keeps_separation() {
        let mut placer = Placer::new(
            RandSampler::new(SmallRng::seed_from_u64(42)),
            palette(),
            PlacementConfig::default(),
        );
        let set = placer.place(Bounds::new(1080, 1920));
        assert!(!set.is_empty(), "a phone-sized display fits bubbles");
        for (i, a) in set.iter().enumerate() {
            for b in set.iter().skip(i + 1) {
                let d = a.center().distance(b.center());
                let min = f64::from(a.max_radius() + b.max_radius() + 50);
                assert!(d >= min, "{a:?} and {b:?} are {d} apart");
            }
        }
    }

    #[test]
    fn single_large_bubble_is_accepted_on_first_draw() {
        // radius 249, then x and y draw 0 and are lifted to radius + padding.
        let mut placer = Placer::new(
            SequenceSampler::new(vec![249, 0, 0]),
            palette(),
            PlacementConfig::default(),
        );
        let (set, report) = placer.place_with_report(Bounds::new(1080, 1920));
        assert_eq!(set.len(), 1);
        assert_eq!((set[0].x, set[0].y, set[0].max_radius()), (299, 299, 249));
        // One accepted draw, then 51 identical rejected draws end placement.
        assert_eq!(report.draws, 1 + 51);
    }

    #[test]
    fn radius_is_lifted_to_minimum() {
        let mut placer = Placer::new(
            SequenceSampler::new(vec![3, 500, 700]),
            palette(),
            PlacementConfig::default(),
        );
        let set = placer.place(Bounds::new(1080, 1920));
        assert_eq!(set[0].max_radius(), 20);
        assert_eq!((set[0].x, set[0].y), (500, 700));
    }

    #[test]
    fn tiny_display_places_at_margin() {
        // Every bound collapses to <= 0, so each draw yields the margin.
        let mut placer = Placer::new(
            RandSampler::new(SmallRng::seed_from_u64(1)),
            palette(),
            PlacementConfig::default(),
        );
        let set = placer.place(Bounds::new(10, 10));
        assert_eq!(set.len(), 1, "only one bubble fits at the clamped margin");
        let b = &set[0];
        assert_eq!(b.x, b.max_radius() + 50);
        assert_eq!(b.y, b.max_radius() + 50);
    }

    #[test]
    fn zero_retry_budget_places_nothing() {
        let config = PlacementConfig {
            max_overlap_retries: 0,
            ..PlacementConfig::default()
        };
        let mut placer = Placer::new(SequenceSampler::new(vec![100]), palette(), config);
        let (set, report) = placer.place_with_report(Bounds::new(1080, 1920));
        assert!(set.is_empty());
        assert_eq!(report.draws, 1);
    }

    #[test]
    fn colors_cycle_in_pairs_across_placements() {
        let red = Color::parse("#ff0000").unwrap();
        let green = Color::parse("#00ff00").unwrap();
        let blue = Color::parse("#0000ff").unwrap();
        let white = Color::WHITE;

        // Two well-separated bubbles per placement.
        let mut placer = Placer::new(
            SequenceSampler::new(vec![20, 0, 0, 20, 900, 1800]),
            palette(),
            PlacementConfig {
                max_overlap_retries: 2,
                ..PlacementConfig::default()
            },
        );
        let first = placer.place(Bounds::new(1080, 1920));
        assert_eq!(first.len(), 2);
        assert_eq!((first[0].outline_color, first[0].fill_color), (red, green));
        assert_eq!((first[1].outline_color, first[1].fill_color), (blue, white));

        // The next placement continues from the cursor, which wraps instead
        // of pairing the lone trailing color.
        let second = placer.place(Bounds::new(1080, 1920));
        assert_eq!((second[0].outline_color, second[0].fill_color), (red, green));
    }

    #[test]
    fn overlap_uses_padding() {
        let mut set = BubbleSet::new();
        set.push(Bubble::new(0, 0, 100, Color::BLACK, Color::WHITE));
        // 100 + 50 + 50 = 200
        assert!(overlaps(&set, 199, 0, 50, 50));
        assert!(!overlaps(&set, 200, 0, 50, 50));
    }
}
