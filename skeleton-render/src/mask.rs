// SkeletonView: Shimmer gradient mask
//
// Three stops (translucent, opaque, translucent) along the top-leading to
// bottom-trailing diagonal, offset by the shimmer phase. The mask is larger
// than the content it covers, so the band enters and leaves the content
// well inside the mask.

use skeleton_utils::{GradientStop, LinearGradient, MaskStyle, UnitPoint};

use crate::surface::Surface;

/// Phase before the animation starts
pub const PHASE_REST: f32 = 0.0;

/// Phase the animation travels towards each cycle
pub const PHASE_TARGET: f32 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct GradientMask {
    gradient: LinearGradient,
    scale: f32,
}

impl GradientMask {
    /// Mask with the default gray style: edges at 0.5 opacity, scaled 3x.
    pub fn new(phase: f32) -> Self {
        Self::with_style(phase, &MaskStyle::default())
    }

    pub fn with_style(phase: f32, style: &MaskStyle) -> Self {
        let edge = style.color.opacity(style.edge_opacity);
        let center = style.color.opacity(style.center_opacity);
        let stops = vec![
            GradientStop::new(edge, phase),
            GradientStop::new(center, phase + style.band_width),
            GradientStop::new(edge, phase + 2.0 * style.band_width),
        ];
        Self {
            gradient: LinearGradient::new(stops, UnitPoint::TOP_LEADING, UnitPoint::BOTTOM_TRAILING),
            scale: style.scale,
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        self.gradient.stops()
    }

    pub fn gradient(&self) -> &LinearGradient {
        &self.gradient
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Mask opacity at the centre of cell `(x, y)` in a `width` x `height` area.
    ///
    /// The gradient spans a rectangle `scale` times the area, centred on it.
    pub fn alpha_at(&self, x: usize, y: usize, width: usize, height: usize) -> f32 {
        let (w, h) = (width as f32, height as f32);
        let (mask_w, mask_h) = (w * self.scale, h * self.scale);
        let (origin_x, origin_y) = ((w - mask_w) / 2.0, (h - mask_h) / 2.0);

        let t = self.gradient.project(
            x as f32 + 0.5 - origin_x,
            y as f32 + 0.5 - origin_y,
            mask_w,
            mask_h,
        );
        self.gradient.color_at(t).alpha
    }

    /// Multiply every cell's coverage by the mask opacity at that cell.
    pub fn apply(&self, surface: &mut Surface) {
        let (width, height) = (surface.width(), surface.height());
        surface.for_each_cell_mut(|x, y, cell| {
            cell.color.alpha *= self.alpha_at(x, y, width, height);
        });
    }
}
