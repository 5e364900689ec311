// SkeletonView: Animation
// Frame-based playback and the timing curve behind the shimmer phase

pub mod engine;
pub mod playback;
pub mod timing;

pub use engine::{AnimationEngine, AnimationFrame, DirtyRegion};
pub use playback::ViewAnimation;
pub use timing::{CurveSample, Direction, LinearRepeat};
