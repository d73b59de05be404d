// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the animation engine.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! engine calls as it places bubbles, runs jobs, and presents frames. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Timestamps are engine-relative: [`Timestamp`] counts nanoseconds since the
//! engine started.

pub use crate::job::JobKind;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a job ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobStatus {
    /// Ran to completion.
    Completed,
    /// Stopped early because it was cancelled or the surface was hidden.
    Interrupted,
    /// Presenting a frame failed.
    Failed,
}

impl JobStatus {
    /// Short lowercase name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
            Self::Failed => "failed",
        }
    }

    /// Compact encoding for recordings.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Completed => 0,
            Self::Interrupted => 1,
            Self::Failed => 2,
        }
    }

    /// Inverse of [`to_u8`](Self::to_u8).
    #[must_use]
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Completed),
            1 => Some(Self::Interrupted),
            2 => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Why an input event produced no job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// Preview surfaces ignore broadcast-style events.
    Preview,
    /// The touch was not a primary-pointer down.
    NotPrimaryDown,
    /// A touch job was already pending or running.
    TouchBusy,
    /// The touch hit no bubble.
    NoHit,
    /// The engine was already shut down.
    Stopped,
}

impl DropReason {
    /// Short lowercase name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::NotPrimaryDown => "not-primary-down",
            Self::TouchBusy => "touch-busy",
            Self::NoHit => "no-hit",
            Self::Stopped => "stopped",
        }
    }

    /// Compact encoding for recordings.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Preview => 0,
            Self::NotPrimaryDown => 1,
            Self::TouchBusy => 2,
            Self::NoHit => 3,
            Self::Stopped => 4,
        }
    }

    /// Inverse of [`to_u8`](Self::to_u8).
    #[must_use]
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Preview),
            1 => Some(Self::NotPrimaryDown),
            2 => Some(Self::TouchBusy),
            3 => Some(Self::NoHit),
            4 => Some(Self::Stopped),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// Nanoseconds since the engine started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The engine start.
    pub const ZERO: Self = Self(0);

    /// Raw nanoseconds.
    #[inline]
    #[must_use]
    pub const fn nanos(self) -> u64 {
        self.0
    }

    /// Microseconds, as used by the Chrome trace format.
    #[inline]
    #[must_use]
    pub fn micros_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Nanoseconds elapsed since `earlier`, or zero if `earlier` is later.
    #[inline]
    #[must_use]
    pub const fn saturating_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a bubble set was rebuilt for new bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementEvent {
    /// Bounds width in pixels.
    pub width: i32,
    /// Bounds height in pixels.
    pub height: i32,
    /// Bubbles accepted.
    pub placed: u32,
    /// Candidates drawn.
    pub draws: u32,
    /// When placement finished.
    pub at: Timestamp,
}

/// Emitted when the worker starts a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobBeginEvent {
    /// Monotonic job counter.
    pub job_index: u64,
    /// What the job does.
    pub kind: JobKind,
    /// When the job started.
    pub at: Timestamp,
}

/// Emitted after every presented frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Job this frame belongs to.
    pub job_index: u64,
    /// Monotonic frame counter across all jobs.
    pub frame_index: u64,
    /// Kind of the owning job.
    pub kind: JobKind,
    /// Background brightness of the frame.
    pub brightness: f32,
    /// Bubbles drawn.
    pub bubbles: u32,
    /// When the frame was posted.
    pub at: Timestamp,
}

/// Emitted when the worker finishes a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobEndEvent {
    /// Job counter, matching the [`JobBeginEvent`].
    pub job_index: u64,
    /// What the job did.
    pub kind: JobKind,
    /// Frames presented by the job.
    pub frames: u32,
    /// How the job ended.
    pub status: JobStatus,
    /// When the job ended.
    pub at: Timestamp,
}

/// Emitted when an input event is discarded without posting a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventDropEvent {
    /// Why it was discarded.
    pub reason: DropReason,
    /// When it was discarded.
    pub at: Timestamp,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a placement.
    fn on_placement(&mut self, e: &PlacementEvent) {
        _ = e;
    }

    /// Called when a job starts.
    fn on_job_begin(&mut self, e: &JobBeginEvent) {
        _ = e;
    }

    /// Called after each presented frame.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a job ends.
    fn on_job_end(&mut self, e: &JobEndEvent) {
        _ = e;
    }

    /// Called when an input event is dropped.
    fn on_event_drop(&mut self, e: &EventDropEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PlacementEvent`].
    #[inline]
    pub fn placement(&mut self, e: &PlacementEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_placement(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`JobBeginEvent`].
    #[inline]
    pub fn job_begin(&mut self, e: &JobBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_job_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`JobEndEvent`].
    #[inline]
    pub fn job_end(&mut self, e: &JobEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_job_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`EventDropEvent`].
    #[inline]
    pub fn event_drop(&mut self, e: &EventDropEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_event_drop(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
