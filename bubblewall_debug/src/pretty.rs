// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds since the engine started.

use std::io::Write;

use bubblewall_core::trace::{
    EventDropEvent, FrameEvent, JobBeginEvent, JobEndEvent, PlacementEvent, Timestamp, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write + Send>> {
    writer: W,
    frames: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            frames: true,
        }
    }

    /// Skips per-frame lines; jobs, placements, and drops are still printed.
    #[must_use]
    pub fn without_frames(mut self) -> Self {
        self.frames = false;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(at: Timestamp) -> f64 {
    at.micros_f64() / 1000.0
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_placement(&mut self, e: &PlacementEvent) {
        let _ = writeln!(
            self.writer,
            "[placement] {}x{} placed={} draws={} at {:.3}ms",
            e.width,
            e.height,
            e.placed,
            e.draws,
            ms(e.at),
        );
    }

    fn on_job_begin(&mut self, e: &JobBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[job:begin] #{} {} at {:.3}ms",
            e.job_index,
            e.kind.name(),
            ms(e.at),
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if !self.frames {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[frame] #{} job={} {} brightness={:.2} bubbles={} at {:.3}ms",
            e.frame_index,
            e.job_index,
            e.kind.name(),
            e.brightness,
            e.bubbles,
            ms(e.at),
        );
    }

    fn on_job_end(&mut self, e: &JobEndEvent) {
        let _ = writeln!(
            self.writer,
            "[job:end] #{} {} frames={} {} at {:.3}ms",
            e.job_index,
            e.kind.name(),
            e.frames,
            e.status.name(),
            ms(e.at),
        );
    }

    fn on_event_drop(&mut self, e: &EventDropEvent) {
        let _ = writeln!(
            self.writer,
            "[drop] {} at {:.3}ms",
            e.reason.name(),
            ms(e.at),
        );
    }
}
