// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data model, placement, and animation transitions for a bubble wall.
//!
//! `bubblewall_core` holds everything about the bubble wall that does not
//! depend on threads, clocks, or a drawing surface. It is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   Palette + Sampler
//!          │
//!          ▼
//!   Placer::place(bounds) ──► BubbleSet
//!                                 │
//!                                 ▼
//!   animation::{maximize, minimize, expand, touch_pulse, ...}
//!          │  mutates radii / BackgroundState
//!          ▼
//!   FrameContext::present() ──► (renderer, surface)
//! ```
//!
//! **[`color`]**: ARGB [`Color`](color::Color) with hex parsing and the
//! ordered [`Palette`](color::Palette) bubbles draw their colors from.
//!
//! **[`bubble`]**: [`Bubble`](bubble::Bubble) and the placement-ordered
//! [`BubbleSet`](bubble::BubbleSet) with hit testing.
//!
//! **[`placement`]**: Rejection-sampling [`Placer`](placement::Placer) that
//! fills a rectangle with non-overlapping bubbles.
//!
//! **[`sample`]**: The [`Sampler`](sample::Sampler) seam between placement
//! and `rand`.
//!
//! **[`background`]**: Theme, brightness, and visibility of the background.
//!
//! **[`animation`]**: Frame-stepped transitions driven through a
//! [`FrameContext`](animation::FrameContext).
//!
//! **[`job`]**: [`JobKind`](job::JobKind) and the rules for which jobs
//! replace or cancel which.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! engine instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies,
//!   including `rand`'s `StdRng`.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod background;
pub mod bubble;
pub mod color;
pub mod job;
pub mod placement;
pub mod sample;
pub mod trace;
