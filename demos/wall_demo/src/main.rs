// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated device session that exercises the engine and the diagnostics
//! pipeline.
//!
//! Drives an [`Engine`] through resize, unlock, touch, screen-off, and a theme
//! flip against an in-memory surface, printing every trace event through a
//! [`PrettyPrintSink`] while a [`RecorderSink`] captures them. The recording
//! is exported as a Chrome trace JSON file at the end.

use std::fs::File;
use std::io::BufWriter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use bubblewall_core::color::Color;
use bubblewall_core::trace::{
    EventDropEvent, FrameEvent, JobBeginEvent, JobEndEvent, PlacementEvent, TraceSink,
};
use bubblewall_debug::pretty::PrettyPrintSink;
use bubblewall_debug::recorder::RecorderSink;
use bubblewall_engine::{Engine, EngineConfig, Host, TouchAction, TouchEvent};
use bubblewall_render::{Scene, Surface};

const WIDTH: i32 = 1080;
const HEIGHT: i32 = 2340;
/// Long enough for the slowest transition (21 background frames).
const SETTLE: Duration = Duration::from_millis(300);

/// A host whose dark-mode flag the session flips.
#[derive(Debug, Default)]
struct DemoHost {
    dark: AtomicBool,
}

impl Host for DemoHost {
    fn is_dark_mode(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }

    fn accent_color(&self) -> Color {
        Color::from_argb(255, 0x67, 0x50, 0xa4)
    }

    fn bubble_colors(&self) -> Vec<String> {
        [
            "#ef6c00", "#ffcc80", "#1565c0", "#90caf9", "#2e7d32", "#a5d6a7", "#ad1457", "#f48fb1",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

/// Keeps every presented scene.
#[derive(Debug)]
struct MemorySurface {
    frames: Arc<Mutex<Vec<Scene>>>,
}

impl Surface for MemorySurface {
    type Error = std::io::Error;

    fn lock_canvas(&mut self) -> Result<(), std::io::Error> {
        Ok(())
    }

    fn draw(&mut self, scene: &Scene) -> Result<(), std::io::Error> {
        self.frames
            .lock()
            .map_err(|_| std::io::Error::other("frame log poisoned"))?
            .push(scene.clone());
        Ok(())
    }

    fn unlock_and_post(&mut self) -> Result<(), std::io::Error> {
        Ok(())
    }
}

/// Forwards every event to both sinks.
#[derive(Debug)]
struct Tee {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for Tee {
    fn on_placement(&mut self, e: &PlacementEvent) {
        self.pretty.on_placement(e);
        self.recorder.on_placement(e);
    }

    fn on_job_begin(&mut self, e: &JobBeginEvent) {
        self.pretty.on_job_begin(e);
        self.recorder.on_job_begin(e);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.pretty.on_frame(e);
        self.recorder.on_frame(e);
    }

    fn on_job_end(&mut self, e: &JobEndEvent) {
        self.pretty.on_job_end(e);
        self.recorder.on_job_end(e);
    }

    fn on_event_drop(&mut self, e: &EventDropEvent) {
        self.pretty.on_event_drop(e);
        self.recorder.on_event_drop(e);
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let tee = Arc::new(Mutex::new(Tee {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())).without_frames(),
        recorder: RecorderSink::new(),
    }));

    // -- engine ------------------------------------------------------------
    let host = Arc::new(DemoHost::default());
    let frames = Arc::new(Mutex::new(Vec::new()));
    let surface = MemorySurface {
        frames: Arc::clone(&frames),
    };
    let config = EngineConfig::new().with_seed(7);
    let mut engine = Engine::with_trace_sink(host.clone(), surface, config, tee.clone())
        .expect("failed to start engine");

    // -- simulated session -------------------------------------------------
    engine.visibility_changed(true);
    engine
        .surface_resized(WIDTH, HEIGHT)
        .expect("engine stopped");
    thread::sleep(SETTLE);

    engine.screen_off().expect("engine stopped");
    engine.user_present().expect("engine stopped");
    thread::sleep(config.expand_delay + SETTLE);

    let first = frames
        .lock()
        .expect("frame log poisoned")
        .last()
        .and_then(|scene| scene.fills().next().map(|fill| fill.circle.center));
    if let Some(center) = first {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "bubble centers are whole surface pixels"
        )]
        let (x, y) = (center.x as f32, center.y as f32);
        engine
            .touch(TouchEvent::new(TouchAction::Down, x, y))
            .expect("engine stopped");
        // Dropped: the first pulse is still in flight.
        engine
            .touch(TouchEvent::new(TouchAction::Down, x, y))
            .expect("engine stopped");
        engine
            .touch(TouchEvent::new(TouchAction::Up, x, y))
            .expect("engine stopped");
        thread::sleep(SETTLE);
    }

    host.dark.store(true, Ordering::Relaxed);
    engine.configuration_changed().expect("engine stopped");
    thread::sleep(SETTLE);

    engine.visibility_changed(false);
    engine.screen_off().expect("engine stopped");
    thread::sleep(SETTLE);

    engine.shutdown();
    if let Some(err) = engine.take_error() {
        eprintln!("surface error during session: {err}");
    }

    // -- export Chrome trace -----------------------------------------------
    let frame_count = frames.lock().expect("frame log poisoned").len();
    let tee = tee.lock().expect("trace sink poisoned");
    let path = "bubblewall_trace.json";
    let file = File::create(path).expect("failed to create trace file");
    let mut writer = BufWriter::new(file);
    bubblewall_debug::chrome::export(tee.recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({frame_count} frames)");
}
