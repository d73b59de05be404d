// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records, each led by a one-byte tag.
//! [`decode`] reads them back as an iterator of [`RecordedEvent`].

use bubblewall_core::trace::{
    DropReason, EventDropEvent, FrameEvent, JobBeginEvent, JobEndEvent, JobKind, JobStatus,
    PlacementEvent, Timestamp, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PLACEMENT: u8 = 1;
const TAG_JOB_BEGIN: u8 = 2;
const TAG_FRAME: u8 = 3;
const TAG_JOB_END: u8 = 4;
const TAG_EVENT_DROP: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_at(&mut self, at: Timestamp) {
        self.write_u64(at.nanos());
    }
}

impl TraceSink for RecorderSink {
    fn on_placement(&mut self, e: &PlacementEvent) {
        self.write_u8(TAG_PLACEMENT);
        self.write_i32(e.width);
        self.write_i32(e.height);
        self.write_u32(e.placed);
        self.write_u32(e.draws);
        self.write_at(e.at);
    }

    fn on_job_begin(&mut self, e: &JobBeginEvent) {
        self.write_u8(TAG_JOB_BEGIN);
        self.write_u64(e.job_index);
        self.write_u8(e.kind.to_u8());
        self.write_at(e.at);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_u64(e.job_index);
        self.write_u64(e.frame_index);
        self.write_u8(e.kind.to_u8());
        self.write_f32(e.brightness);
        self.write_u32(e.bubbles);
        self.write_at(e.at);
    }

    fn on_job_end(&mut self, e: &JobEndEvent) {
        self.write_u8(TAG_JOB_END);
        self.write_u64(e.job_index);
        self.write_u8(e.kind.to_u8());
        self.write_u32(e.frames);
        self.write_u8(e.status.to_u8());
        self.write_at(e.at);
    }

    fn on_event_drop(&mut self, e: &EventDropEvent) {
        self.write_u8(TAG_EVENT_DROP);
        self.write_u8(e.reason.to_u8());
        self.write_at(e.at);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`PlacementEvent`].
    Placement(PlacementEvent),
    /// A [`JobBeginEvent`].
    JobBegin(JobBeginEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// A [`JobEndEvent`].
    JobEnd(JobEndEvent),
    /// An [`EventDropEvent`].
    EventDrop(EventDropEvent),
}

impl RecordedEvent {
    /// When the event happened.
    #[must_use]
    pub fn at(&self) -> Timestamp {
        match self {
            Self::Placement(e) => e.at,
            Self::JobBegin(e) => e.at,
            Self::Frame(e) => e.at,
            Self::JobEnd(e) => e.at,
            Self::EventDrop(e) => e.at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first truncated record, unknown tag, or
/// out-of-range enum byte.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes: [u8; N] = self.data.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f32(&mut self) -> Option<f32> {
        self.read_u32().map(f32::from_bits)
    }

    fn read_at(&mut self) -> Option<Timestamp> {
        self.read_u64().map(Timestamp)
    }

    fn read_kind(&mut self) -> Option<JobKind> {
        JobKind::from_u8(self.read_u8()?)
    }

    fn decode_placement(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Placement(PlacementEvent {
            width: self.read_i32()?,
            height: self.read_i32()?,
            placed: self.read_u32()?,
            draws: self.read_u32()?,
            at: self.read_at()?,
        }))
    }

    fn decode_job_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::JobBegin(JobBeginEvent {
            job_index: self.read_u64()?,
            kind: self.read_kind()?,
            at: self.read_at()?,
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            job_index: self.read_u64()?,
            frame_index: self.read_u64()?,
            kind: self.read_kind()?,
            brightness: self.read_f32()?,
            bubbles: self.read_u32()?,
            at: self.read_at()?,
        }))
    }

    fn decode_job_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::JobEnd(JobEndEvent {
            job_index: self.read_u64()?,
            kind: self.read_kind()?,
            frames: self.read_u32()?,
            status: JobStatus::from_u8(self.read_u8()?)?,
            at: self.read_at()?,
        }))
    }

    fn decode_event_drop(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::EventDrop(EventDropEvent {
            reason: DropReason::from_u8(self.read_u8()?)?,
            at: self.read_at()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let event = match tag {
            TAG_PLACEMENT => self.decode_placement(),
            TAG_JOB_BEGIN => self.decode_job_begin(),
            TAG_FRAME => self.decode_frame(),
            TAG_JOB_END => self.decode_job_end(),
            TAG_EVENT_DROP => self.decode_event_drop(),
            _ => None,
        };
        if event.is_none() {
            // Never resume inside a corrupt record.
            self.pos = self.data.len();
        }
        event
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
