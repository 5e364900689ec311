// SkeletonView: Shimmer decorator
//
// `Shimmer` owns a single animation phase. It sits at rest until the view
// appears, then follows a linear repeating curve from 0 to 0.8 and masks its
// content with a `GradientMask` built from the current phase. Disappearing
// cancels the animation and returns the phase to rest.

use std::time::Instant;

use skeleton_utils::{MaskStyle, ShimmerConfig};

use crate::animation::timing::{Direction, LinearRepeat};
use crate::mask::{GradientMask, PHASE_REST, PHASE_TARGET};
use crate::surface::Surface;
use crate::view::View;

/// Content with an animated gradient mask
pub struct Shimmer<V> {
    content: V,
    curve: LinearRepeat,
    style: MaskStyle,
    phase: f32,
    direction: Direction,
    /// Set while the animation runs
    started_at: Option<Instant>,
    warned_at_rest: bool,
}

impl<V: View> Shimmer<V> {
    pub fn new(content: V, duration: f64, bounce: bool) -> Self {
        Self {
            content,
            curve: LinearRepeat::new(PHASE_REST, PHASE_TARGET, duration, bounce),
            style: MaskStyle::default(),
            phase: PHASE_REST,
            direction: Direction::Forward,
            started_at: None,
            warned_at_rest: false,
        }
    }

    pub fn with_style(mut self, style: MaskStyle) -> Self {
        self.style = style;
        self
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn curve(&self) -> &LinearRepeat {
        &self.curve
    }

    pub fn mask(&self) -> GradientMask {
        GradientMask::with_style(self.phase, &self.style)
    }

    pub fn content(&self) -> &V {
        &self.content
    }

    pub fn into_inner(self) -> V {
        self.content
    }
}

impl<V: View> View for Shimmer<V> {
    fn render(&self) -> Surface {
        let mut surface = self.content.render();
        self.mask().apply(&mut surface);
        surface
    }

    fn on_appear(&mut self, now: Instant) {
        self.content.on_appear(now);
        if self.started_at.is_some() {
            return;
        }
        self.phase = PHASE_REST;
        self.direction = Direction::Forward;
        self.started_at = Some(now);
        log::debug!(
            "Shimmer started: {:.2}s cycle, bounce={}",
            self.curve.duration(),
            self.curve.autoreverses()
        );
    }

    fn on_disappear(&mut self) {
        if self.started_at.take().is_some() {
            log::debug!("Shimmer cancelled at phase {:.3}", self.phase);
        }
        self.phase = PHASE_REST;
        self.direction = Direction::Forward;
        self.content.on_disappear();
    }

    fn tick(&mut self, now: Instant) -> bool {
        let content_dirty = self.content.tick(now);
        let Some(started_at) = self.started_at else {
            return content_dirty;
        };
        if !self.curve.is_animating() {
            if !self.warned_at_rest {
                log::warn!(
                    "Shimmer duration {} is not positive, effect will not animate",
                    self.curve.duration()
                );
                self.warned_at_rest = true;
            }
            return content_dirty;
        }

        let sample = self.curve.sample(now.saturating_duration_since(started_at));
        let changed = sample.value != self.phase;
        self.phase = sample.value;
        self.direction = sample.direction;
        changed || content_dirty
    }

    fn set_redacted(&mut self, when: bool, now: Instant) -> bool {
        self.content.set_redacted(when, now)
    }
}

/// Either the bare content or the content under a running shimmer.
///
/// The variant is chosen from `ShimmerConfig::active` when the decoration is
/// composed; an inactive shimmer costs nothing.
pub enum Shimmering<V> {
    Passthrough(V),
    Active(Shimmer<V>),
}

impl<V: View> Shimmering<V> {
    pub fn new(content: V, config: ShimmerConfig) -> Self {
        if config.active {
            Self::Active(Shimmer::new(content, config.duration, config.bounce))
        } else {
            Self::Passthrough(content)
        }
    }

    /// Replace the mask style. No effect on a passthrough.
    pub fn mask_style(self, style: MaskStyle) -> Self {
        match self {
            Self::Active(shimmer) => Self::Active(shimmer.with_style(style)),
            passthrough => passthrough,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Current phase, or None when no shimmer is attached
    pub fn phase(&self) -> Option<f32> {
        match self {
            Self::Active(shimmer) => Some(shimmer.phase()),
            Self::Passthrough(_) => None,
        }
    }

    pub fn content(&self) -> &V {
        match self {
            Self::Active(shimmer) => shimmer.content(),
            Self::Passthrough(content) => content,
        }
    }

    pub fn into_inner(self) -> V {
        match self {
            Self::Active(shimmer) => shimmer.into_inner(),
            Self::Passthrough(content) => content,
        }
    }
}

impl<V: View> View for Shimmering<V> {
    fn render(&self) -> Surface {
        match self {
            Self::Active(shimmer) => shimmer.render(),
            Self::Passthrough(content) => content.render(),
        }
    }

    fn on_appear(&mut self, now: Instant) {
        match self {
            Self::Active(shimmer) => shimmer.on_appear(now),
            Self::Passthrough(content) => content.on_appear(now),
        }
    }

    fn on_disappear(&mut self) {
        match self {
            Self::Active(shimmer) => shimmer.on_disappear(),
            Self::Passthrough(content) => content.on_disappear(),
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        match self {
            Self::Active(shimmer) => shimmer.tick(now),
            Self::Passthrough(content) => content.tick(now),
        }
    }

    fn set_redacted(&mut self, when: bool, now: Instant) -> bool {
        match self {
            Self::Active(shimmer) => shimmer.set_redacted(when, now),
            Self::Passthrough(content) => content.set_redacted(when, now),
        }
    }
}
