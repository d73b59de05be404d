// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing-surface contract.

use crate::scene::Scene;

/// A host drawing surface.
///
/// One frame is `lock_canvas`, `draw`, `unlock_and_post`. Implementations
/// rasterize the [`Scene`] however they like; nothing in this workspace
/// touches pixels.
pub trait Surface {
    /// Error reported by the surface.
    type Error;

    /// Acquires the canvas for one frame.
    fn lock_canvas(&mut self) -> Result<(), Self::Error>;

    /// Paints `scene` onto the locked canvas.
    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error>;

    /// Releases the canvas and queues it for display.
    fn unlock_and_post(&mut self) -> Result<(), Self::Error>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    type Error = S::Error;

    fn lock_canvas(&mut self) -> Result<(), Self::Error> {
        (**self).lock_canvas()
    }

    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error> {
        (**self).draw(scene)
    }

    fn unlock_and_post(&mut self) -> Result<(), Self::Error> {
        (**self).unlock_and_post()
    }
}

/// Presents one frame.
///
/// Once the lock succeeded the canvas is always unlocked and posted, even
/// when drawing fails. The first error wins; nothing is retried.
pub fn present<S: Surface + ?Sized>(surface: &mut S, scene: &Scene) -> Result<(), S::Error> {
    surface.lock_canvas()?;
    let drawn = surface.draw(scene);
    let posted = surface.unlock_and_post();
    drawn.and(posted)
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;

    #[derive(Debug, PartialEq)]
    enum Step {
        Lock,
        Draw,
        Post,
    }

    #[derive(Debug, PartialEq)]
    struct Broke(&'static str);

    #[derive(Default)]
    struct FakeSurface {
        steps: Vec<Step>,
        fail_lock: bool,
        fail_draw: bool,
        fail_post: bool,
    }

    impl Surface for FakeSurface {
        type Error = Broke;

        fn lock_canvas(&mut self) -> Result<(), Broke> {
            self.steps.push(Step::Lock);
            if self.fail_lock { Err(Broke("lock")) } else { Ok(()) }
        }

        fn draw(&mut self, _scene: &Scene) -> Result<(), Broke> {
            self.steps.push(Step::Draw);
            if self.fail_draw { Err(Broke("draw")) } else { Ok(()) }
        }

        fn unlock_and_post(&mut self) -> Result<(), Broke> {
            self.steps.push(Step::Post);
            if self.fail_post { Err(Broke("post")) } else { Ok(()) }
        }
    }

    #[test]
    fn present_runs_all_three_steps() {
        let mut surface = FakeSurface::default();
        assert_eq!(present(&mut surface, &Scene::new()), Ok(()));
        assert_eq!(surface.steps, [Step::Lock, Step::Draw, Step::Post]);
    }

    #[test]
    fn failed_lock_skips_the_rest() {
        let mut surface = FakeSurface {
            fail_lock: true,
            ..FakeSurface::default()
        };
        assert_eq!(present(&mut surface, &Scene::new()), Err(Broke("lock")));
        assert_eq!(surface.steps, [Step::Lock]);
    }

    #[test]
    fn failed_draw_still_posts_and_reports_first_error() {
        let mut surface = FakeSurface {
            fail_draw: true,
            fail_post: true,
            ..FakeSurface::default()
        };
        assert_eq!(present(&mut surface, &Scene::new()), Err(Broke("draw")));
        assert_eq!(surface.steps, [Step::Lock, Step::Draw, Step::Post]);
    }
}
