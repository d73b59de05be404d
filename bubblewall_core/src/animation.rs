// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-stepped bubble and background transitions.
//!
//! Every transition is a tight loop of the same shape:
//!
//! ```text
//!   mutate radii / brightness ──► FrameContext::present()
//!          ▲                               │
//!          └──── FrameContext::is_cancelled() / is_visible()
//! ```
//!
//! The [`FrameContext`] is the only way a transition reaches the outside
//! world: it builds and presents frames, and reports visibility and
//! cancellation. Both flags are polled between frames only, never in the
//! middle of one.
//!
//! Only [`expand`] observes cancellation. It is the one open-ended
//! transition, and it always finishes with a [`maximize`] pass so the final
//! radii are latched no matter why it stopped.

use crate::background::BackgroundState;
use crate::bubble::BubbleSet;

/// Fraction of the maximum radius added per expand frame at full speed.
pub const EXPAND_STEP_FRACTION: f32 = 0.25;

/// Floor of the expand speed modifier, so a bubble never stalls.
pub const MIN_SPEED: f32 = 0.001;

/// Frames emitted by [`maximize`].
pub const MAXIMIZE_PASSES: u32 = 2;

/// Frames emitted by [`touch_pulse`].
pub const TOUCH_FRAMES: u32 = 20;

/// Touch frames `0..=TOUCH_LAST_SHRINK_FRAME` shrink; the rest grow back.
pub const TOUCH_LAST_SHRINK_FRAME: u32 = 10;

/// Radius change per touch frame.
pub const TOUCH_STEP: f32 = 0.25;

/// Brightness steps of a background transition (21 frames, 0.05 apart).
pub const BACKGROUND_STEPS: u32 = 20;

/// Host-facing side of a running transition.
pub trait FrameContext {
    /// Error raised while presenting a frame.
    type Error;

    /// Builds a frame from the current state and hands it to the surface.
    fn present(
        &mut self,
        bubbles: &BubbleSet,
        background: &BackgroundState,
    ) -> Result<(), Self::Error>;

    /// Whether the surface is currently visible.
    fn is_visible(&self) -> bool;

    /// Whether a superseding job asked this transition to stop.
    fn is_cancelled(&self) -> bool;
}

/// What a transition did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Frames presented.
    pub frames: u32,
    /// Whether the transition stopped early (cancelled or hidden).
    pub interrupted: bool,
}

/// Sets every bubble to its maximum radius, presenting two identical frames.
///
/// The second pass latches the final state even if another writer raced the
/// first frame.
pub fn maximize<C: FrameContext>(
    bubbles: &mut BubbleSet,
    background: &mut BackgroundState,
    ctx: &mut C,
) -> Result<TransitionOutcome, C::Error> {
    background.settle();
    for _ in 0..MAXIMIZE_PASSES {
        bubbles.set_all_radii(|b| b.max_radius() as f32);
        ctx.present(bubbles, background)?;
    }
    Ok(TransitionOutcome {
        frames: MAXIMIZE_PASSES,
        interrupted: false,
    })
}

/// Sets every bubble to its minimized radius and presents one frame.
pub fn minimize<C: FrameContext>(
    bubbles: &mut BubbleSet,
    background: &mut BackgroundState,
    ctx: &mut C,
) -> Result<TransitionOutcome, C::Error> {
    background.settle();
    bubbles.set_all_radii(|b| b.minimized_radius() as f32);
    ctx.present(bubbles, background)?;
    Ok(TransitionOutcome {
        frames: 1,
        interrupted: false,
    })
}

/// Presents one frame of the current state at resting brightness.
pub fn redraw<C: FrameContext>(
    bubbles: &mut BubbleSet,
    background: &mut BackgroundState,
    ctx: &mut C,
) -> Result<TransitionOutcome, C::Error> {
    background.settle();
    ctx.present(bubbles, background)?;
    Ok(TransitionOutcome {
        frames: 1,
        interrupted: false,
    })
}

/// Easing multiplier for one expand step of one bubble.
///
/// Accelerates away from the minimized floor when the set started out
/// minimized, decelerates past the half-way radius, and never drops below
/// [`MIN_SPEED`].
#[must_use]
pub fn speed_modifier(
    current: f32,
    max_radius: i32,
    minimized_radius: i32,
    from_minimized: bool,
) -> f32 {
    let half = max_radius as f32 / 2.0;
    let minimized = minimized_radius as f32;
    let mut speed = current / half;
    if speed > 1.0 {
        speed = 2.0 - speed;
    } else if current >= minimized && from_minimized {
        speed = (current - minimized) / half;
    }
    speed.max(MIN_SPEED)
}

/// Grows every bubble towards its maximum radius with eased steps.
///
/// Before each frame the loop stops if the context is cancelled or the
/// surface is hidden; after each frame it stops once every bubble reached its
/// maximum. A [`maximize`] pass always follows.
///
/// Whether the set starts minimized is judged from the first bubble alone,
/// since all bubbles are minimized and maximized together.
pub fn expand<C: FrameContext>(
    bubbles: &mut BubbleSet,
    background: &mut BackgroundState,
    ctx: &mut C,
) -> Result<TransitionOutcome, C::Error> {
    background.settle();
    let from_minimized = bubbles
        .get(0)
        .is_some_and(|b| b.current_radius == b.minimized_radius() as f32);

    let mut frames = 0;
    let mut interrupted = false;
    loop {
        background.visible = ctx.is_visible();
        if ctx.is_cancelled() || !background.visible {
            interrupted = true;
            break;
        }
        for bubble in bubbles.iter_mut() {
            let delta = bubble.max_radius() as f32 * EXPAND_STEP_FRACTION;
            let speed = speed_modifier(
                bubble.current_radius,
                bubble.max_radius(),
                bubble.minimized_radius(),
                from_minimized,
            );
            bubble.current_radius += delta * speed;
        }
        ctx.present(bubbles, background)?;
        frames += 1;
        if bubbles.all_at_least_max() {
            break;
        }
    }

    let latch = maximize(bubbles, background, ctx)?;
    Ok(TransitionOutcome {
        frames: frames + latch.frames,
        interrupted,
    })
}

/// Squashes the bubble at `index`: 11 frames shrinking by [`TOUCH_STEP`],
/// then 9 frames growing back.
///
/// The net change is `-2 * TOUCH_STEP`. Radii are not clamped. An index
/// outside the set presents nothing.
pub fn touch_pulse<C: FrameContext>(
    bubbles: &mut BubbleSet,
    background: &mut BackgroundState,
    index: usize,
    ctx: &mut C,
) -> Result<TransitionOutcome, C::Error> {
    if index >= bubbles.len() {
        return Ok(TransitionOutcome::default());
    }
    background.settle();
    for frame in 0..TOUCH_FRAMES {
        if let Some(bubble) = bubbles.get_mut(index) {
            bubble.current_radius += if frame <= TOUCH_LAST_SHRINK_FRAME {
                -TOUCH_STEP
            } else {
                TOUCH_STEP
            };
        }
        ctx.present(bubbles, background)?;
    }
    Ok(TransitionOutcome {
        frames: TOUCH_FRAMES,
        interrupted: false,
    })
}

/// Fades the background towards the current theme.
///
/// While visible, brightness walks from the opposite end to the theme's
/// resting level in 21 frames. A hidden surface gets a single frame at the
/// resting level.
pub fn background_transition<C: FrameContext>(
    bubbles: &mut BubbleSet,
    background: &mut BackgroundState,
    ctx: &mut C,
) -> Result<TransitionOutcome, C::Error> {
    let dark = background.theme.is_dark();
    let mut frames = 0;
    for step in 0..=BACKGROUND_STEPS {
        let x = step as f32 / BACKGROUND_STEPS as f32;
        background.visible = ctx.is_visible();
        background.brightness = if background.visible {
            (if dark { 1.0 - x } else { x }).max(0.0)
        } else {
            background.theme.resting_brightness()
        };
        ctx.present(bubbles, background)?;
        frames += 1;
        if !background.visible {
            return Ok(TransitionOutcome {
                frames,
                interrupted: true,
            });
        }
    }
    Ok(TransitionOutcome {
        frames,
        interrupted: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;
    use core::cell::Cell;

    use crate::background::ThemeMode;
    use crate::bubble::Bubble;
    use crate::color::Color;

    #[derive(Debug, PartialEq)]
    struct Failed;

    /// Records radii and brightness of every presented frame.
    #[derive(Default)]
    struct Recorder {
        radii: Vec<Vec<f32>>,
        brightness: Vec<f32>,
        visible: bool,
        cancel_after: Option<usize>,
        fail_at: Option<usize>,
        polls: Cell<usize>,
    }

    impl Recorder {
        fn visible() -> Self {
            Self {
                visible: true,
                ..Self::default()
            }
        }
    }

    impl FrameContext for Recorder {
        type Error = Failed;

        fn present(&mut self, bubbles: &BubbleSet, bg: &BackgroundState) -> Result<(), Failed> {
            if self.fail_at == Some(self.radii.len()) {
                return Err(Failed);
            }
            self.radii.push(bubbles.iter().map(|b| b.current_radius).collect());
            self.brightness.push(bg.brightness);
            Ok(())
        }

        fn is_visible(&self) -> bool {
            self.visible
        }

        fn is_cancelled(&self) -> bool {
            self.polls.set(self.polls.get() + 1);
            self.cancel_after.is_some_and(|n| self.radii.len() >= n)
        }
    }

    fn set_of(radii: &[i32]) -> BubbleSet {
        radii
            .iter()
            .zip(0..)
            .map(|(&r, i)| Bubble::new(i * 1000, 0, r, Color::BLACK, Color::WHITE))
            .collect()
    }

    #[test]
    fn maximize_latches_max_radius_twice() {
        let mut set = set_of(&[90, 30]);
        set.get_mut(0).unwrap().current_radius = 500.0;
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder::visible();
        let out = maximize(&mut set, &mut bg, &mut ctx).unwrap();
        assert_eq!(out.frames, 2);
        assert_eq!(ctx.radii, [[90.0, 30.0], [90.0, 30.0]]);
    }

    #[test]
    fn minimize_sets_minimized_radius() {
        let mut set = set_of(&[90, 31]);
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder::default();
        let out = minimize(&mut set, &mut bg, &mut ctx).unwrap();
        assert_eq!(out.frames, 1);
        assert_eq!(ctx.radii, [[30.0, 10.0]]);
    }

    #[test]
    fn speed_modifier_eases_in_and_out() {
        // Past half-way the speed mirrors back down.
        assert!((speed_modifier(67.5, 90, 30, false) - 0.5).abs() < 1e-6);
        // At the minimized floor of a minimized set the speed is clamped.
        assert_eq!(speed_modifier(30.0, 90, 30, true), MIN_SPEED);
        // Without the minimized hint the same radius moves at radius / half.
        assert!((speed_modifier(30.0, 90, 30, false) - 30.0 / 45.0).abs() < 1e-6);
        // At the target the speed is clamped rather than zero.
        assert_eq!(speed_modifier(90.0, 90, 30, false), MIN_SPEED);
    }

    #[test]
    fn expand_from_minimized_converges_to_max() {
        let mut set = set_of(&[249, 90, 20]);
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder::visible();
        minimize(&mut set, &mut bg, &mut ctx).unwrap();
        ctx.radii.clear();

        let out = expand(&mut set, &mut bg, &mut ctx).unwrap();
        assert!(!out.interrupted);
        assert!(out.frames > MAXIMIZE_PASSES && out.frames < 500, "{} frames", out.frames);
        assert!(set.iter().all(|b| b.current_radius == b.max_radius() as f32));

        // Radii never shrink while expanding (the trailing maximize pass may
        // trim an overshoot).
        let expanding = &ctx.radii[..ctx.radii.len() - MAXIMIZE_PASSES as usize];
        let first: Vec<f32> = expanding.iter().map(|r| r[0]).collect();
        assert!(first.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn expand_when_maximized_is_one_tiny_frame() {
        let mut set = set_of(&[90]);
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder::visible();
        maximize(&mut set, &mut bg, &mut ctx).unwrap();
        ctx.radii.clear();

        let out = expand(&mut set, &mut bg, &mut ctx).unwrap();
        assert_eq!(out.frames, 1 + MAXIMIZE_PASSES);
        let step = 90.0 * EXPAND_STEP_FRACTION * MIN_SPEED;
        assert!((ctx.radii[0][0] - (90.0 + step)).abs() < 1e-4);
        assert_eq!(ctx.radii[2], [90.0]);
    }

    #[test]
    fn expand_stops_when_cancelled_but_still_maximizes() {
        let mut set = set_of(&[249]);
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder::visible();
        minimize(&mut set, &mut bg, &mut ctx).unwrap();
        ctx.radii.clear();
        ctx.cancel_after = Some(3);

        let out = expand(&mut set, &mut bg, &mut ctx).unwrap();
        assert!(out.interrupted);
        assert_eq!(out.frames, 3 + MAXIMIZE_PASSES);
        assert_eq!(set[0].current_radius, 249.0);
    }

    #[test]
    fn expand_while_hidden_only_maximizes() {
        let mut set = set_of(&[90]);
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder::default();
        let out = expand(&mut set, &mut bg, &mut ctx).unwrap();
        assert!(out.interrupted);
        assert_eq!(out.frames, MAXIMIZE_PASSES);
        assert!(!bg.visible);
        assert_eq!(ctx.polls.get(), 1);
    }

    #[test]
    fn touch_pulse_nets_minus_half() {
        let mut set = set_of(&[90, 60]);
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder::visible();
        maximize(&mut set, &mut bg, &mut ctx).unwrap();
        ctx.radii.clear();

        let out = touch_pulse(&mut set, &mut bg, 1, &mut ctx).unwrap();
        assert_eq!(out.frames, TOUCH_FRAMES);
        // 11 decrements then 9 increments.
        assert_eq!(ctx.radii[10][1], 60.0 - 11.0 * 0.25);
        assert_eq!(set[1].current_radius, 59.5);
        assert_eq!(set[0].current_radius, 90.0);
    }

    #[test]
    fn touch_pulse_out_of_range_presents_nothing() {
        let mut set = set_of(&[90]);
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder::visible();
        let out = touch_pulse(&mut set, &mut bg, 3, &mut ctx).unwrap();
        assert_eq!(out, TransitionOutcome::default());
        assert!(ctx.radii.is_empty());
    }

    #[test]
    fn dark_transition_walks_down_in_twenty_one_frames() {
        let mut set = set_of(&[90]);
        let mut bg = BackgroundState::new();
        bg.theme = ThemeMode::Dark;
        let mut ctx = Recorder::visible();
        let out = background_transition(&mut set, &mut bg, &mut ctx).unwrap();
        assert_eq!(out.frames, 21);
        assert_eq!(ctx.brightness[0], 1.0);
        assert_eq!(ctx.brightness[20], 0.0);
        for (i, pair) in ctx.brightness.windows(2).enumerate() {
            assert!(pair[1] < pair[0], "frame {i} not decreasing");
            assert!((pair[0] - pair[1] - 0.05).abs() < 1e-6);
        }
        // Radii are untouched.
        assert!(ctx.radii.iter().all(|r| r[0] == 0.0));
    }

    #[test]
    fn light_transition_walks_up() {
        let mut set = set_of(&[90]);
        let mut bg = BackgroundState::new();
        bg.theme = ThemeMode::Light;
        let mut ctx = Recorder::visible();
        background_transition(&mut set, &mut bg, &mut ctx).unwrap();
        assert_eq!(ctx.brightness.first(), Some(&0.0));
        assert_eq!(ctx.brightness.last(), Some(&1.0));
    }

    #[test]
    fn hidden_dark_transition_is_one_frame_at_zero() {
        let mut set = set_of(&[90]);
        let mut bg = BackgroundState::new();
        bg.theme = ThemeMode::Dark;
        let mut ctx = Recorder::default();
        let out = background_transition(&mut set, &mut bg, &mut ctx).unwrap();
        assert_eq!(out.frames, 1);
        assert_eq!(ctx.brightness, [0.0]);
    }

    #[test]
    fn present_errors_propagate() {
        let mut set = set_of(&[90]);
        let mut bg = BackgroundState::new();
        let mut ctx = Recorder {
            fail_at: Some(1),
            ..Recorder::visible()
        };
        assert_eq!(maximize(&mut set, &mut bg, &mut ctx), Err(Failed));
        assert_eq!(ctx.radii.len(), 1);
    }
}
