// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Jobs posted to the worker and their cancellation tokens.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bubblewall_core::job::JobKind;
use bubblewall_core::placement::Bounds;

/// One unit of work for the worker thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Job {
    /// Re-place bubbles within `bounds`. Presents nothing.
    Reset { bounds: Bounds },
    Maximize,
    Minimize,
    Expand,
    /// Hit-test `(x, y)` and pulse the first bubble under it.
    Touch { x: i32, y: i32 },
    BackgroundTransition,
    Redraw,
}

impl Job {
    pub(crate) const fn kind(self) -> JobKind {
        match self {
            Self::Reset { .. } => JobKind::Reset,
            Self::Maximize => JobKind::Maximize,
            Self::Minimize => JobKind::Minimize,
            Self::Expand => JobKind::Expand,
            Self::Touch { .. } => JobKind::TouchPulse,
            Self::BackgroundTransition => JobKind::BackgroundTransition,
            Self::Redraw => JobKind::Redraw,
        }
    }
}

/// Shared stop flag of one running job.
#[derive(Clone, Debug, Default)]
pub(crate) struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
