// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Jobs become duration slices on the worker track; frames, placements, and
//! drops become instant events.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Track of events raised on the event thread.
const EVENT_TID: u32 = 0;
/// Track of events raised on the worker thread.
const WORKER_TID: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = recorded.at().micros_f64();
        match recorded {
            RecordedEvent::Placement(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Placement",
                    "cat": "Placement",
                    "ts": ts,
                    "pid": 0,
                    "tid": WORKER_TID,
                    "s": "t",
                    "args": {
                        "width": e.width,
                        "height": e.height,
                        "placed": e.placed,
                        "draws": e.draws,
                    }
                }));
            }
            RecordedEvent::JobBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": e.kind.name(),
                    "cat": "Job",
                    "ts": ts,
                    "pid": 0,
                    "tid": WORKER_TID,
                    "args": {
                        "job_index": e.job_index,
                    }
                }));
            }
            RecordedEvent::Frame(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Frame",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": WORKER_TID,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "job_index": e.job_index,
                        "brightness": e.brightness,
                        "bubbles": e.bubbles,
                    }
                }));
            }
            RecordedEvent::JobEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": e.kind.name(),
                    "cat": "Job",
                    "ts": ts,
                    "pid": 0,
                    "tid": WORKER_TID,
                    "args": {
                        "job_index": e.job_index,
                        "frames": e.frames,
                        "status": e.status.name(),
                    }
                }));
            }
            RecordedEvent::EventDrop(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Drop",
                    "cat": "Input",
                    "ts": ts,
                    "pid": 0,
                    "tid": EVENT_TID,
                    "s": "t",
                    "args": {
                        "reason": e.reason.name(),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
