// SkeletonView: Fixed-step playback of a view
//
// Plays any view on a virtual clock: frame N is rendered at
// `origin + N * frame_duration`, so the output is reproducible regardless of
// how fast frames are pulled.

use std::time::{Duration, Instant};

use super::engine::{AnimationEngine, AnimationFrame, DirtyRegion};
use crate::compositor::Compositor;
use crate::view::View;

pub struct ViewAnimation<V> {
    view: V,
    compositor: Compositor,
    /// Current frame number
    frame_count: u64,
    /// Target frames per second
    fps: u32,
    /// Virtual time of frame 0
    origin: Instant,
    appeared: bool,
    /// Screen position of the view (for dirty region calculation)
    x_offset: usize,
    y_offset: usize,
}

impl<V: View + Send> ViewAnimation<V> {
    pub fn new(view: V, compositor: Compositor) -> Self {
        Self {
            view,
            compositor,
            frame_count: 0,
            fps: 30,
            origin: Instant::now(),
            appeared: false,
            x_offset: 0,
            y_offset: 0,
        }
    }

    /// Set custom FPS (for testing or performance tuning)
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    pub fn at_position(mut self, x: usize, y: usize) -> Self {
        self.x_offset = x;
        self.y_offset = y;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Virtual time elapsed at the next frame
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count as f64 / self.fps as f64)
    }
}

impl<V: View + Send> AnimationEngine for ViewAnimation<V> {
    fn next_frame(&mut self) -> Option<AnimationFrame> {
        let now = self.origin + self.elapsed();
        if !self.appeared {
            self.view.on_appear(now);
            self.appeared = true;
        }

        // The first frame always paints everything
        let changed = self.view.tick(now) || self.frame_count == 0;
        let surface = self.view.render();
        let dirty_regions = if changed {
            vec![DirtyRegion::new(
                self.x_offset,
                self.y_offset,
                surface.width(),
                surface.height(),
            )]
        } else {
            Vec::new()
        };

        let frame = AnimationFrame::new(
            self.compositor.compose(&surface),
            dirty_regions,
            self.frame_count,
        );
        self.frame_count += 1;
        Some(frame)
    }

    fn target_fps(&self) -> u32 {
        self.fps
    }

    fn reset(&mut self) {
        if self.appeared {
            self.view.on_disappear();
            self.appeared = false;
        }
        self.frame_count = 0;
        self.origin = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Text, ViewExt};

    fn shimmering_text(duration: f64, bounce: bool) -> ViewAnimation<crate::shimmer::Shimmering<Text>> {
        ViewAnimation::new(
            Text::new("Loading").shimmering(true, duration, bounce),
            Compositor::default(),
        )
        .with_fps(10)
    }

    #[test]
    fn test_first_frame_is_dirty() {
        let mut anim = shimmering_text(1.0, false);
        let frame = anim.next_frame().unwrap();
        assert_eq!(frame.sequence, 0);
        assert_eq!(frame.dirty_regions, vec![DirtyRegion::new(0, 0, 7, 1)]);
    }

    #[test]
    fn test_phase_advances_per_frame() {
        let mut anim = shimmering_text(1.0, false);
        for _ in 0..6 {
            anim.next_frame();
        }
        // Frame 5 was rendered at 0.5s into a 1s cycle
        assert!((anim.view().phase().unwrap() - 0.4).abs() < 1e-4);
    }

    #[test]
    fn test_static_view_frames_are_clean() {
        let mut anim = ViewAnimation::new(Text::new("idle"), Compositor::default()).with_fps(10);
        assert!(anim.next_frame().unwrap().is_dirty());
        assert!(!anim.next_frame().unwrap().is_dirty());
    }

    #[test]
    fn test_dirty_region_uses_offset() {
        let mut anim = shimmering_text(1.0, false).at_position(4, 2);
        let frame = anim.next_frame().unwrap();
        assert_eq!(frame.dirty_regions[0].x, 4);
        assert_eq!(frame.dirty_regions[0].y, 2);
    }

    #[test]
    fn test_reset_restarts_phase() {
        let mut anim = shimmering_text(1.0, false);
        for _ in 0..4 {
            anim.next_frame();
        }
        anim.reset();
        assert_eq!(anim.frame_count(), 0);

        anim.next_frame();
        assert_eq!(anim.view().phase(), Some(0.0));
    }

    #[test]
    fn test_infinite_animation() {
        let mut anim = shimmering_text(0.5, true);
        for _ in 0..1000 {
            assert!(anim.next_frame().is_some());
        }
    }

    #[test]
    fn test_elapsed_past_u32_frames() {
        let mut anim = shimmering_text(1.0, false).with_fps(1);
        anim.frame_count = u64::from(u32::MAX) + 2;
        assert_eq!(anim.elapsed(), Duration::from_secs(u64::from(u32::MAX) + 2));
    }

    #[test]
    fn test_target_fps() {
        let anim = ViewAnimation::new(Text::new("x"), Compositor::default());
        assert_eq!(anim.target_fps(), 30);
        assert_eq!(anim.with_fps(0).target_fps(), 1);
    }
}
