// SkeletonView: render layer
//
// Views render into cell surfaces. Two decorators sit on top of any view:
// `shimmering`, an animated gradient mask, and `is_redacted`, which swaps
// content for placeholder shapes and shimmers over them.
//
// ```ignore
// use skeleton_render::{Text, View, ViewExt};
//
// let mut card = Text::new("Hello").is_redacted(true, true, 1.5, false);
// card.on_appear(now);
// card.tick(now + frame);
// let surface = card.render();
// ```

pub mod animation;
pub mod compositor;
pub mod mask;
pub mod redaction;
pub mod shimmer;
pub mod surface;
pub mod view;

pub use animation::{AnimationEngine, AnimationFrame, DirtyRegion, ViewAnimation};
pub use compositor::Compositor;
pub use mask::{GradientMask, PHASE_REST, PHASE_TARGET};
pub use redaction::{Redacted, Redaction, RedactionNode, PLACEHOLDER};
pub use shimmer::{Shimmer, Shimmering};
pub use surface::{Cell, Surface};
pub use view::{ClipShape, Image, Text, VStack, View, ViewExt};
