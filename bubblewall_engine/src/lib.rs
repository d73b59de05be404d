// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threaded lifecycle engine for the bubble wall.
//!
//! An [`Engine`] owns one worker thread that runs animation jobs strictly one
//! at a time. Host events arrive on the caller's thread and become jobs:
//!
//! ```text
//!   host events ──► Engine ──► JobQueue ──► worker thread
//!                     │    (replace/cancel)      │
//!                     │                          ▼
//!                     │               animation transition
//!                     │                          │
//!                     ▼                          ▼
//!           visibility / theme ◄──── FrameBuilder ──► Surface
//! ```
//!
//! The worker owns the bubbles, the background state, the placement engine,
//! and the [`Surface`](bubblewall_render::Surface). Only visibility, theme,
//! the touch gate, and a cancellation flag per running job cross threads.
//!
//! # Crate features
//!
//! - `trace` (enabled by default): Forwards engine events to the
//!   [`TraceSink`](bubblewall_core::trace::TraceSink) given to
//!   [`Engine::with_trace_sink`].

mod config;
mod engine;
mod error;
mod host;
mod job;
mod queue;
mod worker;

pub use config::EngineConfig;
pub use engine::{Engine, TouchAction, TouchEvent, WORKER_THREAD_NAME};
pub use error::EngineError;
pub use host::Host;
pub use worker::SharedSink;
