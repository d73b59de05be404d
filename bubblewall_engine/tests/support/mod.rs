// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fake host, surface, and trace log shared by the engine tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use bubblewall_core::bubble::BubbleSet;
use bubblewall_core::color::{Color, Palette};
use bubblewall_core::placement::{Bounds, PlacementConfig, Placer};
use bubblewall_core::sample::RandSampler;
use bubblewall_core::trace::{
    DropReason, EventDropEvent, FrameEvent, JobEndEvent, JobKind, JobStatus, PlacementEvent,
    TraceSink,
};
use bubblewall_engine::{Engine, EngineConfig, Host};
use bubblewall_render::{Scene, Surface};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const SEED: u64 = 0x00b0_bb1e;
pub const WIDTH: i32 = 1080;
pub const HEIGHT: i32 = 1920;
pub const ACCENT: Color = Color::from_argb(255, 0x21, 0x96, 0xf3);
pub const COLORS: [&str; 6] = [
    "#ff6d00", "#ffd180", "#2962ff", "#82b1ff", "#00c853", "#b9f6ca",
];

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FakeHost {
    pub dark: AtomicBool,
    pub colors: Vec<String>,
    pub display: Option<Bounds>,
}

impl FakeHost {
    pub fn light() -> Arc<Self> {
        Arc::new(Self {
            colors: COLORS.iter().map(ToString::to_string).collect(),
            ..Self::default()
        })
    }

    pub fn set_dark(&self, dark: bool) {
        self.dark.store(dark, Ordering::SeqCst);
    }
}

impl Host for FakeHost {
    fn is_dark_mode(&self) -> bool {
        self.dark.load(Ordering::SeqCst)
    }

    fn accent_color(&self) -> Color {
        ACCENT
    }

    fn bubble_colors(&self) -> Vec<String> {
        self.colors.clone()
    }

    fn display_size(&self) -> Option<Bounds> {
        self.display
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
pub struct SurfaceBroke;

impl fmt::Display for SurfaceBroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface lost")
    }
}

impl Error for SurfaceBroke {}

/// Records every drawn scene; draws fail while `failing` is set and take
/// `frame_delay_ms` each.
#[derive(Clone, Debug, Default)]
pub struct FakeSurface {
    pub scenes: Arc<Mutex<Vec<Scene>>>,
    pub failing: Arc<AtomicBool>,
    pub locked: Arc<AtomicBool>,
    pub frame_delay_ms: Arc<AtomicU64>,
}

impl FakeSurface {
    pub fn set_frame_delay(&self, delay: Duration) {
        let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.frame_delay_ms.store(ms, Ordering::SeqCst);
    }

    pub fn scenes(&self) -> Vec<Scene> {
        self.scenes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Surface for FakeSurface {
    type Error = SurfaceBroke;

    fn lock_canvas(&mut self) -> Result<(), SurfaceBroke> {
        assert!(!self.locked.swap(true, Ordering::SeqCst), "canvas locked twice");
        Ok(())
    }

    fn draw(&mut self, scene: &Scene) -> Result<(), SurfaceBroke> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SurfaceBroke);
        }
        let delay = self.frame_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
        self.scenes.lock().unwrap().push(scene.clone());
        Ok(())
    }

    fn unlock_and_post(&mut self) -> Result<(), SurfaceBroke> {
        assert!(self.locked.swap(false, Ordering::SeqCst), "canvas posted unlocked");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Trace log
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TraceLog {
    pub placements: Vec<PlacementEvent>,
    pub frames: Vec<FrameEvent>,
    pub jobs: Vec<JobEndEvent>,
    pub drops: Vec<EventDropEvent>,
}

impl TraceSink for TraceLog {
    fn on_placement(&mut self, e: &PlacementEvent) {
        self.placements.push(*e);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.frames.push(*e);
    }

    fn on_job_end(&mut self, e: &JobEndEvent) {
        self.jobs.push(*e);
    }

    fn on_event_drop(&mut self, e: &EventDropEvent) {
        self.drops.push(*e);
    }
}

impl TraceLog {
    pub fn job_kinds(&self) -> Vec<JobKind> {
        self.jobs.iter().map(|j| j.kind).collect()
    }

    pub fn finished(&self, kind: JobKind) -> usize {
        self.jobs.iter().filter(|j| j.kind == kind).count()
    }

    pub fn last_job(&self, kind: JobKind) -> Option<JobEndEvent> {
        self.jobs.iter().rev().find(|j| j.kind == kind).copied()
    }

    pub fn drop_reasons(&self) -> Vec<DropReason> {
        self.drops.iter().map(|d| d.reason).collect()
    }

    pub fn brightness_of(&self, job_index: u64) -> Vec<f32> {
        self.frames
            .iter()
            .filter(|f| f.job_index == job_index)
            .map(|f| f.brightness)
            .collect()
    }

    pub fn is_failed(&self, kind: JobKind) -> bool {
        self.last_job(kind)
            .is_some_and(|j| j.status == JobStatus::Failed)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub engine: Engine,
    pub host: Arc<FakeHost>,
    pub surface: FakeSurface,
    pub log: Arc<Mutex<TraceLog>>,
}

impl Harness {
    pub fn start(host: Arc<FakeHost>, config: EngineConfig) -> Self {
        let surface = FakeSurface::default();
        let log = Arc::new(Mutex::new(TraceLog::default()));
        let engine = Engine::with_trace_sink(
            host.clone(),
            surface.clone(),
            config,
            log.clone(),
        )
        .expect("engine starts");
        Self {
            engine,
            host,
            surface,
            log,
        }
    }

    pub fn light() -> Self {
        Self::start(FakeHost::light(), EngineConfig::new().with_seed(SEED))
    }

    pub fn log<R>(&self, read: impl FnOnce(&TraceLog) -> R) -> R {
        read(&self.log.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Waits until `count` jobs of `kind` have finished.
    pub fn wait_for(&self, kind: JobKind, count: usize) {
        wait_until(|| self.log(|l| l.finished(kind) >= count), kind);
    }

    /// Posts a redraw and waits for it, so every job posted before it has
    /// finished.
    pub fn settle(&self) {
        let before = self.log(|l| l.finished(JobKind::Redraw));
        self.engine.redraw().expect("engine is running");
        self.wait_for(JobKind::Redraw, before + 1);
    }

    pub fn resize(&self) {
        let before = self.log(|l| l.finished(JobKind::Maximize));
        self.engine.surface_resized(WIDTH, HEIGHT).expect("engine is running");
        self.wait_for(JobKind::Maximize, before + 1);
    }

    /// Fill radii of the most recent frame.
    pub fn last_radii(&self) -> Vec<f64> {
        self.surface
            .scenes()
            .last()
            .map(|scene| scene.fills().map(|f| f.circle.radius).collect())
            .unwrap_or_default()
    }
}

pub fn wait_until(mut done: impl FnMut() -> bool, what: impl fmt::Debug) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !done() {
        assert!(Instant::now() < deadline, "timed out waiting for {what:?}");
        thread::sleep(Duration::from_millis(2));
    }
}

/// The layout a seeded engine places for `bounds`.
pub fn expected_layout(bounds: Bounds) -> BubbleSet {
    let palette = Palette::parse(&COLORS).expect("test palette parses");
    Placer::new(
        RandSampler::new(StdRng::seed_from_u64(SEED)),
        palette,
        PlacementConfig::default(),
    )
    .place(bounds)
}
