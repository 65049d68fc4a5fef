// ============================================================================
// EASING FUNCTIONS for the trailer tweens and proximity offsets
// ============================================================================

/// Ease-in cubic: slow at start, fast at end
/// Used for the "entering" offset, so the pull only builds up near the rim
pub fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

/// Ease-out cubic: fast at start, decelerates at end
///
/// Not clamped: distance ratios past 1.0 (pointer in a region's corner)
/// extrapolate the curve.
pub fn ease_out_cubic(t: f32) -> f32 {
    let x = 1.0 - t;
    1.0 - x * x * x
}

const SOLVE_EPSILON: f32 = 1e-6;
const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;

/// CSS-style cubic bezier timing curve through (0,0), (x1,y1), (x2,y2), (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// Ease-out-back: overshoots past 1.0 then settles
    pub const BACK_OUT: Self = Self::new(0.34, 1.56, 0.64, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    fn slope_x(&self, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * self.x1
            + 6.0 * inv * s * (self.x2 - self.x1)
            + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Find the curve parameter whose x equals `t`
    fn solve_parameter(&self, t: f32) -> f32 {
        // Newton first; it converges in a couple of steps for sane curves
        let mut s = t;
        for _ in 0..NEWTON_ITERATIONS {
            let err = Self::sample(self.x1, self.x2, s) - t;
            if err.abs() < SOLVE_EPSILON {
                return s;
            }
            let slope = self.slope_x(s);
            if slope.abs() < SOLVE_EPSILON {
                break;
            }
            s -= err / slope;
        }

        // Flat spots: fall back to bisection on [0, 1]
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..BISECTION_ITERATIONS {
            let x = Self::sample(self.x1, self.x2, s);
            if (x - t).abs() < SOLVE_EPSILON {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }

    /// Eased progress for linear progress `t` in [0, 1]
    pub fn ease(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.solve_parameter(t))
    }
}

/// Timing curve applied to a tween's linear progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant speed, the default for every tween
    #[default]
    Linear,
    Bezier(CubicBezier),
}

impl Easing {
    pub const BACK_OUT: Self = Easing::Bezier(CubicBezier::BACK_OUT);

    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::Bezier(curve) => curve.ease(t),
        }
    }
}
