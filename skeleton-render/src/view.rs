// SkeletonView: Views
//
// A view renders itself into a `Surface` and receives lifecycle calls from
// whatever hosts it: `on_appear` when it enters the render tree, `tick` once
// per frame, `on_disappear` when it leaves.

use std::time::Instant;

use skeleton_utils::{Rgba, ShimmerConfig};
use unicode_width::UnicodeWidthStr;

use crate::redaction::{Redacted, Redaction};
use crate::shimmer::Shimmering;
use crate::surface::Surface;

pub trait View {
    fn render(&self) -> Surface;

    /// Called once when the view enters the render tree
    fn on_appear(&mut self, _now: Instant) {}

    /// Called once when the view leaves the render tree
    fn on_disappear(&mut self) {}

    /// Advance animations to `now`; returns true when the view needs a repaint
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }

    /// Re-evaluate a redaction condition. Returns true when the view changed.
    ///
    /// Views without a redaction toggle ignore the call.
    fn set_redacted(&mut self, _when: bool, _now: Instant) -> bool {
        false
    }
}

impl<V: View + ?Sized> View for Box<V> {
    fn render(&self) -> Surface {
        (**self).render()
    }

    fn on_appear(&mut self, now: Instant) {
        (**self).on_appear(now)
    }

    fn on_disappear(&mut self) {
        (**self).on_disappear()
    }

    fn tick(&mut self, now: Instant) -> bool {
        (**self).tick(now)
    }

    fn set_redacted(&mut self, when: bool, now: Instant) -> bool {
        (**self).set_redacted(when, now)
    }
}

/// Decorators available on every view
pub trait ViewExt: View + Sized {
    /// Shimmer over this view while `active`; identity otherwise.
    fn shimmering(self, active: bool, duration: f64, bounce: bool) -> Shimmering<Self> {
        Shimmering::new(self, ShimmerConfig::new(active, duration, bounce))
    }

    /// Shimmer with the default 1.5 s forward cycle
    fn shimmer(self) -> Shimmering<Self> {
        Shimmering::new(self, ShimmerConfig::default())
    }

    fn shimmering_with(self, config: ShimmerConfig) -> Shimmering<Self> {
        Shimmering::new(self, config)
    }

    /// Render as placeholder shapes
    fn redacted(self) -> Redacted<Self> {
        Redacted::new(self)
    }

    /// Placeholder shapes plus shimmer while `when`; identity otherwise.
    fn is_redacted(
        self,
        when: bool,
        enable_shimmer: bool,
        duration: f64,
        bounce: bool,
    ) -> Redaction<Self> {
        Redaction::new(self, when, ShimmerConfig::new(enable_shimmer, duration, bounce))
    }

    /// `is_redacted` with the default shimmer parameters
    fn redacted_if(self, when: bool) -> Redaction<Self> {
        Redaction::new(self, when, ShimmerConfig::default())
    }
}

impl<V: View> ViewExt for V {}

/// Lines of text
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    lines: Vec<String>,
    color: Rgba,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            lines: text.lines().map(str::to_string).collect(),
            color: Rgba::WHITE,
        }
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }
}

impl View for Text {
    fn render(&self) -> Surface {
        let width = self
            .lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .max()
            .unwrap_or(0);
        let mut surface = Surface::new(width, self.lines.len());
        for (row, line) in self.lines.iter().enumerate() {
            surface.put_str(0, row, line, self.color);
        }
        surface
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipShape {
    /// Ellipse inscribed in the image bounds
    Circle,
}

/// Fixed character art, optionally clipped to a shape
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    art: Text,
    clip: Option<ClipShape>,
}

impl Image {
    pub fn new(rows: &[&str]) -> Self {
        Self {
            art: Text::new(rows.join("\n")),
            clip: None,
        }
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.art = self.art.color(color);
        self
    }

    pub fn clip_circle(mut self) -> Self {
        self.clip = Some(ClipShape::Circle);
        self
    }
}

impl View for Image {
    fn render(&self) -> Surface {
        let mut surface = self.art.render();
        if let Some(ClipShape::Circle) = self.clip {
            let (w, h) = (surface.width() as f32, surface.height() as f32);
            surface.for_each_cell_mut(|x, y, cell| {
                let nx = (x as f32 + 0.5) / w * 2.0 - 1.0;
                let ny = (y as f32 + 0.5) / h * 2.0 - 1.0;
                if nx * nx + ny * ny > 1.0 {
                    *cell = crate::surface::Cell::BLANK;
                }
            });
        }
        surface
    }
}

/// Children stacked top to bottom, each centred horizontally
#[derive(Default)]
pub struct VStack {
    children: Vec<Box<dyn View + Send>>,
    spacing: usize,
}

impl VStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn child(mut self, view: impl View + Send + 'static) -> Self {
        self.children.push(Box::new(view));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl View for VStack {
    fn render(&self) -> Surface {
        let rendered: Vec<Surface> = self.children.iter().map(|child| child.render()).collect();
        let width = rendered.iter().map(Surface::width).max().unwrap_or(0);
        let height = rendered.iter().map(Surface::height).sum::<usize>()
            + self.spacing * rendered.len().saturating_sub(1);

        let mut surface = Surface::new(width, height);
        let mut y = 0;
        for child in &rendered {
            surface.blit(child, (width - child.width()) / 2, y);
            y += child.height() + self.spacing;
        }
        surface
    }

    fn on_appear(&mut self, now: Instant) {
        for child in &mut self.children {
            child.on_appear(now);
        }
    }

    fn on_disappear(&mut self) {
        for child in &mut self.children {
            child.on_disappear();
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.children
            .iter_mut()
            .fold(false, |dirty, child| child.tick(now) || dirty)
    }

    fn set_redacted(&mut self, when: bool, now: Instant) -> bool {
        self.children
            .iter_mut()
            .fold(false, |changed, child| child.set_redacted(when, now) || changed)
    }
}
