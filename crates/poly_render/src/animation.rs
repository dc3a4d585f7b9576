//! Spin animation
//!
//! The model transform is a pure function of elapsed time. [`SpinState`] is
//! the small piece of state a front end owns to accumulate frame deltas.

use poly_math::mat4::{self, Mat4};

/// Constant-rate rotation about the three coordinate axes, then a
/// translation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinAnimation {
    /// Radians per second applied to every axis rate
    pub speed: f32,
    /// Relative rate about X, Y and Z
    pub axis_rates: [f32; 3],
    /// Where the compound's center is placed
    pub translation: [f32; 3],
}

impl Default for SpinAnimation {
    fn default() -> Self {
        Self {
            speed: 1.0,
            axis_rates: [1.0, 0.3, 0.7],
            translation: [0.0, 0.0, 0.0],
        }
    }
}

impl SpinAnimation {
    pub fn new(speed: f32, axis_rates: [f32; 3], translation: [f32; 3]) -> Self {
        Self {
            speed,
            axis_rates,
            translation,
        }
    }

    /// Rotation angles about X, Y and Z after `elapsed` seconds
    pub fn angles(&self, elapsed: f32) -> [f32; 3] {
        let theta = elapsed * self.speed;
        [
            theta * self.axis_rates[0],
            theta * self.axis_rates[1],
            theta * self.axis_rates[2],
        ]
    }

    /// `T · Rx · Ry · Rz` at `elapsed` seconds
    pub fn model_matrix(&self, elapsed: f32) -> Mat4 {
        let [ax, ay, az] = self.angles(elapsed);
        let rotation = mat4::mul(
            mat4::rotation_x(ax),
            mat4::mul(mat4::rotation_y(ay), mat4::rotation_z(az)),
        );
        mat4::mul(mat4::translation(self.translation), rotation)
    }
}

/// Elapsed-time accumulator for a [`SpinAnimation`]
#[derive(Clone, Debug)]
pub struct SpinState {
    animation: SpinAnimation,
    elapsed: f32,
    max_dt: f32,
}

impl SpinState {
    /// `max_dt` caps a single step so a stalled frame does not jump the
    /// animation
    pub fn new(animation: SpinAnimation, max_dt: f32) -> Self {
        Self {
            animation,
            elapsed: 0.0,
            max_dt: max_dt.max(0.0),
        }
    }

    #[inline]
    pub fn animation(&self) -> &SpinAnimation {
        &self.animation
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Step forward and return the new model matrix
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f32) -> Mat4 {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.max_dt) } else { 0.0 };
        self.elapsed += dt;
        self.model_matrix()
    }

    /// Model matrix at the current elapsed time
    pub fn model_matrix(&self) -> Mat4 {
        self.animation.model_matrix(self.elapsed)
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_math::mat4::{transform_point, IDENTITY};
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn point_approx_eq(a: [f32; 3], b: [f32; 3]) -> bool {
        approx_eq(a[0], b[0]) && approx_eq(a[1], b[1]) && approx_eq(a[2], b[2])
    }

    #[test]
    fn test_at_rest_is_translation() {
        let spin = SpinAnimation::new(1.0, [1.0, 1.0, 1.0], [640.0, 360.0, 0.0]);
        let m = spin.model_matrix(0.0);
        assert!(point_approx_eq(transform_point(m, [0.0, 0.0, 0.0]), [640.0, 360.0, 0.0]));
        assert!(point_approx_eq(transform_point(m, [1.0, 0.0, 0.0]), [641.0, 360.0, 0.0]));
    }

    #[test]
    fn test_zero_speed_is_identity() {
        let spin = SpinAnimation::new(0.0, [1.0, 0.3, 0.7], [0.0; 3]);
        assert_eq!(spin.model_matrix(12.5), IDENTITY);
    }

    #[test]
    fn test_single_axis_rotation() {
        let spin = SpinAnimation::new(FRAC_PI_2, [0.0, 0.0, 1.0], [0.0; 3]);
        // One second at π/2 rad/s about Z takes X to Y
        let p = transform_point(spin.model_matrix(1.0), [1.0, 0.0, 0.0]);
        assert!(point_approx_eq(p, [0.0, 1.0, 0.0]), "got {:?}", p);
    }

    #[test]
    fn test_z_rotation_applies_first() {
        // Z then X: X axis goes to Y, then Y goes to Z
        let spin = SpinAnimation::new(FRAC_PI_2, [1.0, 0.0, 1.0], [0.0; 3]);
        let p = transform_point(spin.model_matrix(1.0), [1.0, 0.0, 0.0]);
        assert!(point_approx_eq(p, [0.0, 0.0, 1.0]), "got {:?}", p);
    }

    #[test]
    fn test_angles_scale_with_rates() {
        let spin = SpinAnimation::new(0.5, [1.0, 0.3, 0.7], [0.0; 3]);
        let [ax, ay, az] = spin.angles(2.0);
        assert!(approx_eq(ax, 1.0));
        assert!(approx_eq(ay, 0.3));
        assert!(approx_eq(az, 0.7));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let spin = SpinAnimation::default();
        let p = transform_point(spin.model_matrix(3.7), [3.0, 4.0, 0.0]);
        let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        assert!(approx_eq(len, 5.0));
    }

    #[test]
    fn test_advance_clamps_dt() {
        let mut state = SpinState::new(SpinAnimation::default(), 0.1);
        state.advance(0.05);
        assert!(approx_eq(state.elapsed(), 0.05));
        state.advance(5.0);
        assert!(approx_eq(state.elapsed(), 0.15));
        state.advance(-1.0);
        state.advance(f32::NAN);
        assert!(approx_eq(state.elapsed(), 0.15));
    }

    #[test]
    fn test_advance_matches_pure_function() {
        let spin = SpinAnimation::new(1.0, [1.0, 0.3, 0.7], [10.0, 0.0, 0.0]);
        let mut state = SpinState::new(spin, 1.0);
        let m = (0..4).map(|_| state.advance(0.25)).last().unwrap();
        let expected = spin.model_matrix(1.0);
        for i in 0..4 {
            for j in 0..4 {
                assert!(approx_eq(m[i][j], expected[i][j]));
            }
        }

        state.reset();
        assert_eq!(state.elapsed(), 0.0);
        assert_eq!(state.model_matrix(), spin.model_matrix(0.0));
    }
}
