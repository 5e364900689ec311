// SkeletonView: Redaction
//
// `Redacted` swaps every visible symbol of its content for a neutral block,
// keeping the layout. `Redaction` is the skeleton toggle: while its condition
// holds the content is redacted and shimmering, otherwise it is left alone.

use std::time::Instant;

use skeleton_utils::{MaskStyle, Rgba, ShimmerConfig};

use crate::shimmer::Shimmering;
use crate::surface::{Cell, Surface};
use crate::view::View;

/// Symbol drawn in place of redacted content
pub const PLACEHOLDER: char = '█';

/// Content rendered as placeholder shapes
pub struct Redacted<V> {
    content: V,
    color: Rgba,
}

impl<V: View> Redacted<V> {
    pub fn new(content: V) -> Self {
        Self {
            content,
            color: Rgba::LIGHT_GRAY,
        }
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn content(&self) -> &V {
        &self.content
    }

    pub fn into_inner(self) -> V {
        self.content
    }
}

impl<V: View> View for Redacted<V> {
    fn render(&self) -> Surface {
        let mut surface = self.content.render();
        surface.for_each_cell_mut(|_, _, cell| {
            if cell.is_blank() {
                return;
            }
            // Wide symbols become one block per column
            *cell = Cell::new(PLACEHOLDER, self.color.opacity(cell.color.alpha));
        });
        surface
    }

    fn on_appear(&mut self, now: Instant) {
        self.content.on_appear(now)
    }

    fn on_disappear(&mut self) {
        self.content.on_disappear()
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.content.tick(now)
    }

    fn set_redacted(&mut self, when: bool, now: Instant) -> bool {
        self.content.set_redacted(when, now)
    }
}

/// The two shapes a redaction toggle can take
pub enum RedactionNode<V> {
    Plain(V),
    Skeleton(Shimmering<Redacted<V>>),
}

impl<V: View> RedactionNode<V> {
    fn into_content(self) -> V {
        match self {
            Self::Plain(content) => content,
            Self::Skeleton(skeleton) => skeleton.into_inner().into_inner(),
        }
    }

    fn as_view_mut(&mut self) -> &mut dyn View {
        match self {
            Self::Plain(content) => content,
            Self::Skeleton(skeleton) => skeleton,
        }
    }

    fn as_view(&self) -> &dyn View {
        match self {
            Self::Plain(content) => content,
            Self::Skeleton(skeleton) => skeleton,
        }
    }
}

/// Placeholder-plus-shimmer toggle.
///
/// Changing the condition swaps the node: the old one disappears and the new
/// one appears, so a fresh skeleton always starts its shimmer from rest.
pub struct Redaction<V> {
    // Only empty while `set_redacted` swaps nodes
    node: Option<RedactionNode<V>>,
    shimmer: ShimmerConfig,
    style: MaskStyle,
    mounted: bool,
}

impl<V: View> Redaction<V> {
    pub fn new(content: V, when: bool, shimmer: ShimmerConfig) -> Self {
        let style = MaskStyle::default();
        Self {
            node: Some(Self::compose(content, when, shimmer, style)),
            shimmer,
            style,
            mounted: false,
        }
    }

    fn compose(content: V, when: bool, shimmer: ShimmerConfig, style: MaskStyle) -> RedactionNode<V> {
        if when {
            RedactionNode::Skeleton(Shimmering::new(Redacted::new(content), shimmer).mask_style(style))
        } else {
            RedactionNode::Plain(content)
        }
    }

    pub fn mask_style(mut self, style: MaskStyle) -> Self {
        self.style = style;
        self.node = self.node.map(|node| match node {
            RedactionNode::Skeleton(skeleton) => RedactionNode::Skeleton(skeleton.mask_style(style)),
            plain => plain,
        });
        self
    }

    /// True while the content is shown as placeholders
    pub fn is_placeholder(&self) -> bool {
        matches!(self.node, Some(RedactionNode::Skeleton(_)))
    }

    /// True when a shimmer decoration is attached
    pub fn is_shimmering(&self) -> bool {
        matches!(&self.node, Some(RedactionNode::Skeleton(s)) if s.is_active())
    }

    /// Shimmer phase, or None when no shimmer is attached
    pub fn phase(&self) -> Option<f32> {
        match &self.node {
            Some(RedactionNode::Skeleton(skeleton)) => skeleton.phase(),
            _ => None,
        }
    }

    pub fn node(&self) -> Option<&RedactionNode<V>> {
        self.node.as_ref()
    }

    pub fn into_inner(self) -> Option<V> {
        self.node.map(RedactionNode::into_content)
    }
}

impl<V: View> View for Redaction<V> {
    fn render(&self) -> Surface {
        match &self.node {
            Some(node) => node.as_view().render(),
            None => Surface::new(0, 0),
        }
    }

    fn on_appear(&mut self, now: Instant) {
        self.mounted = true;
        if let Some(node) = self.node.as_mut() {
            node.as_view_mut().on_appear(now);
        }
    }

    fn on_disappear(&mut self) {
        self.mounted = false;
        if let Some(node) = self.node.as_mut() {
            node.as_view_mut().on_disappear();
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        match self.node.as_mut() {
            Some(node) => node.as_view_mut().tick(now),
            None => false,
        }
    }

    fn set_redacted(&mut self, when: bool, now: Instant) -> bool {
        if when == self.is_placeholder() {
            return false;
        }
        let Some(mut node) = self.node.take() else {
            return false;
        };
        if self.mounted {
            node.as_view_mut().on_disappear();
        }

        let mut next = Self::compose(node.into_content(), when, self.shimmer, self.style);
        if self.mounted {
            next.as_view_mut().on_appear(now);
        }
        log::debug!("Redaction toggled: redacted={}", when);
        self.node = Some(next);
        true
    }
}
