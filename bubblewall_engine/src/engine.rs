// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The lifecycle coordinator.
//!
//! [`Engine`] receives host events on the caller's thread, updates the small
//! amount of state shared with the worker (visibility, theme, touch gate), and
//! posts jobs. It never touches bubbles or the surface itself.
//!
//! | Event | Job |
//! |---|---|
//! | [`surface_resized`](Engine::surface_resized) | `Reset`, then `Maximize` |
//! | [`user_present`](Engine::user_present) | `Expand`, after [`EngineConfig::expand_delay`] |
//! | [`screen_off`](Engine::screen_off) | `Minimize` |
//! | [`configuration_changed`](Engine::configuration_changed) | `BackgroundTransition`, if the theme flipped |
//! | [`touch`](Engine::touch) | `TouchPulse`, for a primary down with no touch in flight |
//! | [`redraw`](Engine::redraw) | `Redraw` |
//! | [`visibility_changed`](Engine::visibility_changed) | none |

use std::error::Error;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use bubblewall_core::background::{ThemeChange, ThemeMode};
use bubblewall_core::color::Palette;
use bubblewall_core::placement::{Bounds, Placer};
use bubblewall_core::sample::RandSampler;
use bubblewall_core::trace::{DropReason, NoopSink};
use bubblewall_render::{FrameBuilder, Surface};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::host::Host;
use crate::job::Job;
use crate::queue::JobQueue;
use crate::worker::{Shared, SharedSink, Worker};

/// Name of the worker thread.
pub const WORKER_THREAD_NAME: &str = "bubblewall-worker";

/// Pointer action of a [`TouchEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// The primary pointer went down.
    Down,
    /// A pointer moved.
    Move,
    /// The primary pointer went up.
    Up,
    /// The gesture was aborted.
    Cancel,
    /// An additional pointer went down.
    PointerDown,
    /// An additional pointer went up.
    PointerUp,
}

/// A touch reported by the host, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub action: TouchAction,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl TouchEvent {
    /// Creates a touch event.
    #[must_use]
    pub const fn new(action: TouchAction, x: f32, y: f32) -> Self {
        Self { action, x, y }
    }
}

/// The animated bubble wall behind one surface.
///
/// Dropping the engine shuts it down.
pub struct Engine {
    host: Arc<dyn Host>,
    config: EngineConfig,
    shared: Arc<Shared>,
    queue: Arc<JobQueue>,
    worker: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("shared", &self.shared)
            .field("running", &self.worker.is_some())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Starts an engine that discards trace events.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Palette`] if the host's bubble colors are
    /// unusable and [`EngineError::Spawn`] if the worker thread cannot start.
    pub fn new<S>(host: Arc<dyn Host>, surface: S, config: EngineConfig) -> Result<Self, EngineError>
    where
        S: Surface + Send + 'static,
        S::Error: Error + Send + Sync + 'static,
    {
        Self::with_trace_sink(host, surface, config, Arc::new(Mutex::new(NoopSink)))
    }

    /// Starts an engine that reports to `sink`.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::new`].
    pub fn with_trace_sink<S>(
        host: Arc<dyn Host>,
        surface: S,
        config: EngineConfig,
        sink: SharedSink,
    ) -> Result<Self, EngineError>
    where
        S: Surface + Send + 'static,
        S::Error: Error + Send + Sync + 'static,
    {
        let palette = Palette::parse(&host.bubble_colors())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let placer = Placer::new(RandSampler::new(rng), palette, config.placement);

        let shared = Arc::new(Shared::new(sink));
        let queue = Arc::new(JobQueue::new());
        let worker = Worker::new(
            Arc::clone(&shared),
            Arc::clone(&queue),
            Arc::clone(&host),
            surface,
            placer,
            FrameBuilder::new(config.style),
        );
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || worker.run())
            .map_err(EngineError::Spawn)?;

        Ok(Self {
            host,
            config,
            shared,
            queue,
            worker: Some(handle),
        })
    }

    /// The configuration the engine was started with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current background theme.
    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.shared.theme()
    }

    /// Whether the surface was last reported visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shared.is_visible()
    }

    /// Whether [`shutdown`](Self::shutdown) has run.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.worker.is_none()
    }

    /// The surface was created or changed size.
    ///
    /// Reads the theme from the host the first time, then rebuilds the
    /// bubbles for the display size (or the surface size when the host does
    /// not report one) and maximizes them.
    ///
    /// The rebuild drops any pending maximize or expand.
    ///
    /// # Errors
    ///
    /// [`EngineError::Stopped`] after shutdown.
    pub fn surface_resized(&self, width: i32, height: i32) -> Result<(), EngineError> {
        if self.shared.theme() == ThemeMode::Uninitialized {
            self.shared.initialize_theme(self.host.is_dark_mode());
        }
        let bounds = self
            .host
            .display_size()
            .unwrap_or(Bounds::new(width, height));
        self.post(Job::Reset { bounds })?;
        self.post(Job::Maximize)
    }

    /// The user unlocked the device; expand after the configured delay.
    ///
    /// # Errors
    ///
    /// [`EngineError::Stopped`] after shutdown.
    pub fn user_present(&self) -> Result<(), EngineError> {
        if self.drops_broadcast() {
            return Ok(());
        }
        self.post_delayed(Job::Expand, self.config.expand_delay)
    }

    /// The screen turned off; minimize, dropping any pending expand.
    ///
    /// # Errors
    ///
    /// [`EngineError::Stopped`] after shutdown.
    pub fn screen_off(&self) -> Result<(), EngineError> {
        if self.drops_broadcast() {
            return Ok(());
        }
        self.post(Job::Minimize)
    }

    /// The system configuration changed; fade the background if the theme
    /// flipped.
    ///
    /// A theme that was never read is initialized without a transition.
    ///
    /// # Errors
    ///
    /// [`EngineError::Stopped`] after shutdown.
    pub fn configuration_changed(&self) -> Result<(), EngineError> {
        if self.drops_broadcast() {
            return Ok(());
        }
        match self.shared.apply_theme(self.host.is_dark_mode()) {
            ThemeChange::Changed => self.post(Job::BackgroundTransition),
            ThemeChange::Initialized | ThemeChange::Unchanged => Ok(()),
        }
    }

    /// A touch event arrived.
    ///
    /// Only a primary down starts a pulse, and only while no other touch is
    /// pending or animating. The worker pulses the first bubble under the
    /// floored coordinates.
    ///
    /// # Errors
    ///
    /// [`EngineError::Stopped`] after shutdown.
    pub fn touch(&self, event: TouchEvent) -> Result<(), EngineError> {
        if self.queue.is_closed() {
            return Err(self.stopped());
        }
        if event.action != TouchAction::Down {
            self.shared.trace_drop(DropReason::NotPrimaryDown);
            return Ok(());
        }
        if self.shared.touch_in_flight.swap(true, Ordering::AcqRel) {
            self.shared.trace_drop(DropReason::TouchBusy);
            return Ok(());
        }
        let job = Job::Touch {
            x: floor_to_i32(event.x),
            y: floor_to_i32(event.y),
        };
        self.post(job).inspect_err(|_| {
            self.shared.touch_in_flight.store(false, Ordering::Release);
        })
    }

    /// The surface became visible or hidden.
    ///
    /// Running expand and background transitions observe the change before
    /// their next frame.
    pub fn visibility_changed(&self, visible: bool) {
        self.shared.visible.store(visible, Ordering::Release);
    }

    /// Presents one frame of the current state.
    ///
    /// # Errors
    ///
    /// [`EngineError::Stopped`] after shutdown.
    pub fn redraw(&self) -> Result<(), EngineError> {
        self.post(Job::Redraw)
    }

    /// Takes the first surface error since the last call.
    pub fn take_error(&self) -> Option<EngineError> {
        self.shared.take_error()
    }

    /// Stops the worker: pending jobs are dropped, the running job is
    /// cancelled, and the thread is joined.
    ///
    /// Idempotent.
    pub fn shutdown(&mut self) {
        self.queue.close();
        if let Some(handle) = self.worker.take() {
            _ = handle.join();
        }
        // A touch dropped from the queue never clears its own gate.
        self.shared.touch_in_flight.store(false, Ordering::Release);
    }

    fn drops_broadcast(&self) -> bool {
        if self.config.preview {
            self.shared.trace_drop(DropReason::Preview);
        }
        self.config.preview
    }

    fn post(&self, job: Job) -> Result<(), EngineError> {
        self.queue.post(job).map_err(|_| self.stopped())
    }

    fn post_delayed(&self, job: Job, delay: Duration) -> Result<(), EngineError> {
        self.queue
            .post_delayed(job, delay)
            .map_err(|_| self.stopped())
    }

    fn stopped(&self) -> EngineError {
        self.shared.trace_drop(DropReason::Stopped);
        EngineError::Stopped
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "touch coordinates are surface pixels; out-of-range values saturate"
)]
fn floor_to_i32(v: f32) -> i32 {
    v.floor() as i32
}
