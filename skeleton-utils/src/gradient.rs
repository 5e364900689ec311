// SkeletonView: Linear gradients
//
// A gradient is a list of colour stops laid along an axis between two unit
// points of a rectangle. Sampling projects a point onto that axis and
// interpolates between the neighbouring stops.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// A point in a rectangle's unit coordinate space (0,0 top-left, 1,1 bottom-right)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPoint {
    pub x: f32,
    pub y: f32,
}

impl UnitPoint {
    pub const TOP_LEADING: UnitPoint = UnitPoint { x: 0.0, y: 0.0 };
    pub const CENTER: UnitPoint = UnitPoint { x: 0.5, y: 0.5 };
    pub const BOTTOM_TRAILING: UnitPoint = UnitPoint { x: 1.0, y: 1.0 };
}

/// Colour pinned to a location along the gradient axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Rgba,
    pub location: f32,
}

impl GradientStop {
    pub fn new(color: Rgba, location: f32) -> Self {
        Self { color, location }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    stops: Vec<GradientStop>,
    pub start: UnitPoint,
    pub end: UnitPoint,
}

impl LinearGradient {
    /// Stops are kept in the order given; callers pass them sorted by location.
    pub fn new(stops: Vec<GradientStop>, start: UnitPoint, end: UnitPoint) -> Self {
        Self { stops, start, end }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Colour at axis parameter `t`.
    ///
    /// Before the first stop the first colour is held, after the last stop the
    /// last colour is held. An empty gradient is fully transparent.
    pub fn color_at(&self, t: f32) -> Rgba {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Rgba::CLEAR,
        };
        if t <= first.location {
            return first.color;
        }
        if t >= last.location {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if t <= b.location {
                let span = b.location - a.location;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.location) / span);
            }
        }
        last.color
    }

    /// Project a point onto the gradient axis.
    ///
    /// `(x, y)` is measured from the top-left corner of a `width` x `height`
    /// rectangle. Returns 0.0 at `start`, 1.0 at `end`.
    pub fn project(&self, x: f32, y: f32, width: f32, height: f32) -> f32 {
        let (sx, sy) = (self.start.x * width, self.start.y * height);
        let (dx, dy) = (self.end.x * width - sx, self.end.y * height - sy);
        let len2 = dx * dx + dy * dy;
        if len2 <= f32::EPSILON {
            return 0.0;
        }
        ((x - sx) * dx + (y - sy) * dy) / len2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_band() -> LinearGradient {
        LinearGradient::new(
            vec![
                GradientStop::new(Rgba::GRAY.opacity(0.5), 0.2),
                GradientStop::new(Rgba::GRAY, 0.3),
                GradientStop::new(Rgba::GRAY.opacity(0.5), 0.4),
            ],
            UnitPoint::TOP_LEADING,
            UnitPoint::BOTTOM_TRAILING,
        )
    }

    #[test]
    fn test_color_held_outside_stops() {
        let gradient = three_band();
        assert_eq!(gradient.color_at(-3.0).alpha, 0.5);
        assert_eq!(gradient.color_at(0.0).alpha, 0.5);
        assert_eq!(gradient.color_at(0.9).alpha, 0.5);
    }

    #[test]
    fn test_color_interpolates_between_stops() {
        let gradient = three_band();
        assert!((gradient.color_at(0.3).alpha - 1.0).abs() < 1e-5);
        assert!((gradient.color_at(0.25).alpha - 0.75).abs() < 1e-4);
        assert!((gradient.color_at(0.35).alpha - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_empty_gradient_is_clear() {
        let gradient = LinearGradient::new(vec![], UnitPoint::CENTER, UnitPoint::CENTER);
        assert_eq!(gradient.color_at(0.5), Rgba::CLEAR);
    }

    #[test]
    fn test_projection_along_diagonal() {
        let gradient = three_band();
        assert_eq!(gradient.project(0.0, 0.0, 10.0, 4.0), 0.0);
        assert!((gradient.project(10.0, 4.0, 10.0, 4.0) - 1.0).abs() < 1e-6);
        assert!((gradient.project(5.0, 2.0, 10.0, 4.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_axis_projects_to_zero() {
        let gradient = LinearGradient::new(vec![], UnitPoint::CENTER, UnitPoint::CENTER);
        assert_eq!(gradient.project(3.0, 3.0, 10.0, 10.0), 0.0);
    }
}
