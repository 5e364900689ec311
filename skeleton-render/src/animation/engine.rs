// SkeletonView: AnimationEngine trait and frame types
use std::time::{Duration, Instant};

/// Defines a rectangular region that needs to be redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRegion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl DirtyRegion {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Represents a single composited frame with the regions that changed
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    /// Rendered terminal output for this frame
    pub content: String,
    /// Regions that changed from the previous frame
    pub dirty_regions: Vec<DirtyRegion>,
    /// Monotonic frame counter, starting at 0
    pub sequence: u64,
    /// Frame timestamp for FPS calculation
    pub timestamp: Instant,
}

impl AnimationFrame {
    pub fn new(content: String, dirty_regions: Vec<DirtyRegion>, sequence: u64) -> Self {
        Self {
            content,
            dirty_regions,
            sequence,
            timestamp: Instant::now(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_regions.iter().any(|region| !region.is_empty())
    }
}

/// Frame-based animation interface
pub trait AnimationEngine: Send {
    /// Generate the next frame of animation
    /// Returns None if animation is complete (for finite animations)
    fn next_frame(&mut self) -> Option<AnimationFrame>;

    /// Get the target FPS for this animation
    fn target_fps(&self) -> u32;

    /// Get the frame duration based on target FPS
    fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps().max(1) as f64)
    }

    /// Reset animation to initial state
    fn reset(&mut self);
}
