// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The worker thread: runs one job at a time against the owned bubble state.

use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use bubblewall_core::animation::{self, FrameContext, TransitionOutcome};
use bubblewall_core::background::{BackgroundState, ThemeChange, ThemeMode};
use bubblewall_core::bubble::BubbleSet;
use bubblewall_core::job::JobKind;
use bubblewall_core::placement::{Bounds, Placer};
use bubblewall_core::sample::RandSampler;
use bubblewall_core::trace::{
    DropReason, EventDropEvent, FrameEvent, JobBeginEvent, JobEndEvent, JobStatus,
    PlacementEvent, Timestamp, TraceSink, Tracer,
};
use bubblewall_render::{FrameBuilder, Surface, present};
use rand::rngs::StdRng;

use crate::error::EngineError;
use crate::host::Host;
use crate::job::{CancelToken, Job};
use crate::queue::JobQueue;

/// A trace sink shared between the event thread and the worker.
pub type SharedSink = Arc<Mutex<dyn TraceSink + Send>>;

/// State read and written by both threads.
pub(crate) struct Shared {
    pub(crate) visible: AtomicBool,
    theme: AtomicU8,
    pub(crate) touch_in_flight: AtomicBool,
    error: Mutex<Option<EngineError>>,
    start: Instant,
    sink: SharedSink,
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("visible", &self.visible)
            .field("theme", &self.theme())
            .field("touch_in_flight", &self.touch_in_flight)
            .finish_non_exhaustive()
    }
}

impl Shared {
    pub(crate) fn new(sink: SharedSink) -> Self {
        Self {
            visible: AtomicBool::new(false),
            theme: AtomicU8::new(ThemeMode::Uninitialized.to_u8()),
            touch_in_flight: AtomicBool::new(false),
            error: Mutex::new(None),
            start: Instant::now(),
            sink,
        }
    }

    pub(crate) fn theme(&self) -> ThemeMode {
        ThemeMode::from_u8(self.theme.load(Ordering::Acquire))
    }

    /// Stores the theme reported by the host in one atomic step.
    pub(crate) fn apply_theme(&self, dark: bool) -> ThemeChange {
        let previous = self
            .theme
            .swap(ThemeMode::from_dark(dark).to_u8(), Ordering::AcqRel);
        let mut background = BackgroundState {
            theme: ThemeMode::from_u8(previous),
            ..BackgroundState::new()
        };
        background.apply_theme(dark)
    }

    /// Sets the theme only if it is still uninitialized.
    pub(crate) fn initialize_theme(&self, dark: bool) -> bool {
        self.theme
            .compare_exchange(
                ThemeMode::Uninitialized.to_u8(),
                ThemeMode::from_dark(dark).to_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    pub(crate) fn now(&self) -> Timestamp {
        Timestamp(u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX))
    }

    /// Keeps the first unreported error.
    pub(crate) fn record_error(&self, err: EngineError) {
        let mut slot = self.error.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    pub(crate) fn take_error(&self) -> Option<EngineError> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub(crate) fn trace(&self, emit: impl FnOnce(&mut Tracer<'_>)) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let mut tracer = Tracer::new(&mut *sink);
        emit(&mut tracer);
    }

    pub(crate) fn trace_drop(&self, reason: DropReason) {
        let at = self.now();
        self.trace(|t| t.event_drop(&EventDropEvent { reason, at }));
    }
}

/// Everything the worker thread owns.
pub(crate) struct Worker<S> {
    shared: Arc<Shared>,
    queue: Arc<JobQueue>,
    host: Arc<dyn Host>,
    surface: S,
    placer: Placer<RandSampler<StdRng>>,
    builder: FrameBuilder,
    bubbles: BubbleSet,
    background: BackgroundState,
    job_counter: u64,
    frame_counter: u64,
}

impl<S> Worker<S>
where
    S: Surface,
    S::Error: Error + Send + Sync + 'static,
{
    pub(crate) fn new(
        shared: Arc<Shared>,
        queue: Arc<JobQueue>,
        host: Arc<dyn Host>,
        surface: S,
        placer: Placer<RandSampler<StdRng>>,
        builder: FrameBuilder,
    ) -> Self {
        Self {
            shared,
            queue,
            host,
            surface,
            placer,
            builder,
            bubbles: BubbleSet::new(),
            background: BackgroundState::new(),
            job_counter: 0,
            frame_counter: 0,
        }
    }

    /// Runs jobs until the queue is closed.
    pub(crate) fn run(mut self) {
        while let Some((job, token)) = self.queue.next() {
            self.run_job(job, &token);
            self.queue.finish();
        }
    }

    fn run_job(&mut self, job: Job, token: &CancelToken) {
        self.background.theme = self.shared.theme();
        self.background.visible = self.shared.is_visible();

        // A touch that misses every bubble runs no frames.
        let mut touched = 0;
        if let Job::Touch { x, y } = job {
            let Some(index) = self.bubbles.hit_test(x, y) else {
                self.shared.trace_drop(DropReason::NoHit);
                self.shared.touch_in_flight.store(false, Ordering::Release);
                return;
            };
            touched = index;
        }

        let kind = job.kind();
        let job_index = self.job_counter;
        self.job_counter += 1;
        let frames_before = self.frame_counter;
        let at = self.shared.now();
        self.shared.trace(|t| t.job_begin(&JobBeginEvent { job_index, kind, at }));

        let Self {
            shared,
            host,
            surface,
            placer,
            builder,
            bubbles,
            background,
            frame_counter,
            ..
        } = self;

        if let Job::Reset { bounds } = job {
            *bubbles = place(shared, placer, bounds);
        }

        let mut ctx = EngineContext {
            surface: &mut *surface,
            builder: &mut *builder,
            host: &**host,
            shared: &**shared,
            cancel: token,
            job_index,
            kind,
            frame_counter: &mut *frame_counter,
        };
        let result = match job {
            Job::Reset { .. } => Ok(TransitionOutcome::default()),
            Job::Maximize => animation::maximize(bubbles, background, &mut ctx),
            Job::Minimize => animation::minimize(bubbles, background, &mut ctx),
            Job::Expand => animation::expand(bubbles, background, &mut ctx),
            Job::Touch { .. } => animation::touch_pulse(bubbles, background, touched, &mut ctx),
            Job::BackgroundTransition => {
                animation::background_transition(bubbles, background, &mut ctx)
            }
            Job::Redraw => animation::redraw(bubbles, background, &mut ctx),
        };

        let status = match result {
            Ok(TransitionOutcome {
                interrupted: true, ..
            }) => JobStatus::Interrupted,
            Ok(_) => JobStatus::Completed,
            Err(err) => {
                shared.record_error(EngineError::Surface(Box::new(err)));
                JobStatus::Failed
            }
        };
        let frames = u32::try_from(*frame_counter - frames_before).unwrap_or(u32::MAX);
        let at = shared.now();
        shared.trace(|t| {
            t.job_end(&JobEndEvent {
                job_index,
                kind,
                frames,
                status,
                at,
            });
        });

        if kind == JobKind::TouchPulse {
            shared.touch_in_flight.store(false, Ordering::Release);
        }
    }
}

fn place(shared: &Shared, placer: &mut Placer<RandSampler<StdRng>>, bounds: Bounds) -> BubbleSet {
    let (set, report) = placer.place_with_report(bounds);
    let at = shared.now();
    shared.trace(|t| {
        t.placement(&PlacementEvent {
            width: bounds.width,
            height: bounds.height,
            placed: u32::try_from(report.placed).unwrap_or(u32::MAX),
            draws: report.draws,
            at,
        });
    });
    set
}

/// The worker's [`FrameContext`]: builds scenes, presents them, and traces
/// every frame.
struct EngineContext<'a, S> {
    surface: &'a mut S,
    builder: &'a mut FrameBuilder,
    host: &'a dyn Host,
    shared: &'a Shared,
    cancel: &'a CancelToken,
    job_index: u64,
    kind: JobKind,
    frame_counter: &'a mut u64,
}

impl<S: Surface> FrameContext for EngineContext<'_, S> {
    type Error = S::Error;

    fn present(
        &mut self,
        bubbles: &BubbleSet,
        background: &BackgroundState,
    ) -> Result<(), S::Error> {
        let scene = self
            .builder
            .build(bubbles, background, self.host.accent_color());
        present(&mut *self.surface, scene)?;
        let frame_index = *self.frame_counter;
        *self.frame_counter += 1;
        let event = FrameEvent {
            job_index: self.job_index,
            frame_index,
            kind: self.kind,
            brightness: background.brightness,
            bubbles: u32::try_from(bubbles.len()).unwrap_or(u32::MAX),
            at: self.shared.now(),
        };
        self.shared.trace(|t| t.frame(&event));
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.shared.is_visible()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
