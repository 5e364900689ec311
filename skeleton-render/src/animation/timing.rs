// SkeletonView: Linear repeating timing curve
//
// Maps elapsed time onto a value that travels linearly from `from` to `to`
// once per cycle, forever. Without autoreverse every cycle starts again at
// `from`; with autoreverse odd cycles run backwards.

use std::time::Duration;

/// Which way the current cycle is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Curve value at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub value: f32,
    pub direction: Direction,
    /// Number of completed cycles
    pub cycle: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRepeat {
    from: f32,
    to: f32,
    /// Seconds per cycle
    duration: f64,
    autoreverses: bool,
}

impl LinearRepeat {
    pub fn new(from: f32, to: f32, duration: f64, autoreverses: bool) -> Self {
        Self {
            from,
            to,
            duration,
            autoreverses,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn autoreverses(&self) -> bool {
        self.autoreverses
    }

    /// False for zero, negative or non-finite durations; such a curve stays at `from`.
    pub fn is_animating(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }

    pub fn sample(&self, elapsed: Duration) -> CurveSample {
        if !self.is_animating() {
            return CurveSample {
                value: self.from,
                direction: Direction::Forward,
                cycle: 0,
            };
        }

        let cycles = elapsed.as_secs_f64() / self.duration;
        let cycle = cycles.floor();
        let progress = cycles - cycle;
        let cycle = cycle as u64;

        let direction = if self.autoreverses && cycle % 2 == 1 {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        let progress = match direction {
            Direction::Forward => progress,
            Direction::Reverse => 1.0 - progress,
        };

        CurveSample {
            value: self.from + (self.to - self.from) * progress as f32,
            direction,
            cycle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_forward_cycle_restarts() {
        let curve = LinearRepeat::new(0.0, 0.8, 1.5, false);
        assert_close(curve.sample(secs(0.0)).value, 0.0);
        assert_close(curve.sample(secs(0.75)).value, 0.4);
        assert_close(curve.sample(secs(1.5)).value, 0.0);
        assert_close(curve.sample(secs(2.25)).value, 0.4);
        assert_eq!(curve.sample(secs(2.25)).cycle, 1);
        assert_eq!(curve.sample(secs(2.25)).direction, Direction::Forward);
    }

    #[test]
    fn test_reverse_cycle() {
        let curve = LinearRepeat::new(0.0, 0.8, 2.0, true);
        assert_close(curve.sample(secs(1.0)).value, 0.4);
        assert_close(curve.sample(secs(2.0)).value, 0.8);
        assert_eq!(curve.sample(secs(3.0)).direction, Direction::Reverse);
        assert_close(curve.sample(secs(3.0)).value, 0.4);
        assert_close(curve.sample(secs(4.0)).value, 0.0);
        assert_eq!(curve.sample(secs(4.0)).direction, Direction::Forward);
    }

    #[test]
    fn test_degenerate_durations_hold_start() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let curve = LinearRepeat::new(0.0, 0.8, duration, false);
            assert!(!curve.is_animating());
            assert_eq!(curve.sample(secs(5.0)).value, 0.0);
        }
    }

    #[test]
    fn test_values_stay_within_bounds() {
        let curve = LinearRepeat::new(0.0, 0.8, 0.3, true);
        for step in 0..500 {
            let value = curve.sample(Duration::from_millis(step * 7)).value;
            assert!((0.0..=0.8).contains(&value), "{value} out of range");
        }
    }
}
