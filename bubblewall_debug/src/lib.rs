// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for bubble wall
//! diagnostics.
//!
//! This crate provides [`TraceSink`](bubblewall_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: one human-readable line per event.
//! - [`recorder::RecorderSink`]: compact binary recording, read back with
//!   [`recorder::decode`].
//! - [`chrome::export`]: turns a recording into Chrome Trace Event Format
//!   JSON, viewable in Perfetto or `chrome://tracing`.

pub mod chrome;
pub mod pretty;
pub mod recorder;
