// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene description and frame building for the bubble wall.
//!
//! This crate sits between [`bubblewall_core`]'s bubble state and whatever
//! actually rasterizes pixels. It defines:
//!
//! - [`Scene`]: the background plus an ordered list of [`DrawItem`]s for one frame
//! - [`FrameBuilder`]: turns a [`BubbleSet`](bubblewall_core::bubble::BubbleSet)
//!   and [`BackgroundState`](bubblewall_core::background::BackgroundState) into a scene
//! - [`Surface`]: the lock/draw/post contract a host surface implements, and
//!   [`present`] which drives it

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod builder;
mod scene;
mod surface;

pub use builder::{FrameBuilder, SceneStyle, build_frame};
pub use scene::{
    Background, DrawItem, FilledCircle, LinearGradient, OutlineCircle, Scene, ShadowTriangle,
};
pub use surface::{Surface, present};
