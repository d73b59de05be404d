// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Internal delayed job queue with priority-replace.
//!
//! Entries are ordered by `(ready_at, seq)`, so jobs with the same ready time
//! run in post order. Posting a job first applies the replacement rules of
//! [`JobKind`]: superseded pending entries are removed and a preempted
//! running job has its [`CancelToken`] raised.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use bubblewall_core::job::JobKind;

use crate::job::{CancelToken, Job};

/// Returned by posts after [`JobQueue::close`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Closed;

#[derive(Debug)]
struct Entry {
    job: Job,
    ready_at: Instant,
    seq: u64,
}

#[derive(Debug, Default)]
struct State {
    entries: Vec<Entry>,
    next_seq: u64,
    running: Option<(JobKind, CancelToken)>,
    closed: bool,
}

/// Single-consumer queue feeding the worker thread.
#[derive(Debug, Default)]
pub(crate) struct JobQueue {
    state: Mutex<State>,
    wake: Condvar,
}

impl JobQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Posts a job that is ready immediately.
    pub(crate) fn post(&self, job: Job) -> Result<(), Closed> {
        self.post_at(job, Instant::now())
    }

    /// Posts a job that becomes ready after `delay`.
    pub(crate) fn post_delayed(&self, job: Job, delay: Duration) -> Result<(), Closed> {
        self.post_at(job, Instant::now() + delay)
    }

    fn post_at(&self, job: Job, ready_at: Instant) -> Result<(), Closed> {
        let mut state = self.lock();
        if state.closed {
            return Err(Closed);
        }
        let kind = job.kind();
        state.entries.retain(|e| !kind.supersedes(e.job.kind()));
        if let Some((running, token)) = &state.running
            && kind.preempts(*running)
        {
            token.cancel();
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.push(Entry { job, ready_at, seq });
        drop(state);
        self.wake.notify_one();
        Ok(())
    }

    /// Blocks until the earliest entry is ready and hands it out together
    /// with a fresh cancellation token.
    ///
    /// Returns `None` once the queue is closed. The previous job counts as
    /// finished when this is called.
    pub(crate) fn next(&self) -> Option<(Job, CancelToken)> {
        let mut state = self.lock();
        state.running = None;
        loop {
            if state.closed {
                return None;
            }
            let earliest = state
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| (e.ready_at, e.seq))
                .map(|(i, e)| (i, e.ready_at));
            match earliest {
                None => {
                    state = self.wake.wait(state).unwrap_or_else(PoisonError::into_inner);
                }
                Some((index, ready_at)) => {
                    let now = Instant::now();
                    if ready_at <= now {
                        let entry = state.entries.remove(index);
                        let token = CancelToken::new();
                        state.running = Some((entry.job.kind(), token.clone()));
                        return Some((entry.job, token));
                    }
                    state = self
                        .wake
                        .wait_timeout(state, ready_at - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0;
                }
            }
        }
    }

    /// Marks the running job finished without waiting for the next one.
    pub(crate) fn finish(&self) {
        self.lock().running = None;
    }

    /// Rejects further posts, drops pending entries, cancels the running job,
    /// and wakes the consumer.
    pub(crate) fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.entries.clear();
        if let Some((_, token)) = &state.running {
            token.cancel();
        }
        drop(state);
        self.wake.notify_all();
    }

    /// Whether [`close`](Self::close) has run.
    pub(crate) fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Whether a job of `kind` is waiting.
    #[cfg(test)]
    pub(crate) fn has_pending(&self, kind: JobKind) -> bool {
        self.lock().entries.iter().any(|e| e.job.kind() == kind)
    }

    /// Kind of the job currently handed out, if any.
    #[cfg(test)]
    pub(crate) fn running(&self) -> Option<JobKind> {
        self.lock().running.as_ref().map(|(kind, _)| *kind)
    }

    /// Pending entries.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().entries.len()
    }
}
