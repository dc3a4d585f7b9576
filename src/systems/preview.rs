//! Headless spin preview
//!
//! Steps the spin animation a fixed number of frames and logs each model
//! matrix along with where the compound's first vertex lands. Front ends
//! run the same [`SpinState`] from their frame loop.

use poly_math::mat4::{transform_point, Mat4};
use poly_render::{GeometryBuffer, SpinState};

use crate::config::AnimationConfig;

/// Fixed-step driver for [`SpinState`]
pub struct PreviewSystem {
    state: SpinState,
    frame_dt: f32,
}

impl PreviewSystem {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            state: SpinState::new(config.to_spin(), config.max_dt),
            frame_dt: config.frame_dt,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.state.elapsed()
    }

    /// Advance one frame and return the model matrix
    pub fn step(&mut self) -> Mat4 {
        self.state.advance(self.frame_dt)
    }

    /// Step `frames` frames, returning every model matrix
    pub fn run(&mut self, frames: u32, buffer: &GeometryBuffer) -> Vec<Mat4> {
        (0..frames)
            .map(|frame| {
                let model = self.step();
                log::debug!("frame {} model: {:?}", frame, model);
                if let Some(p) = buffer.position(0) {
                    let q = transform_point(model, p);
                    log::debug!(
                        "frame {} t={:.4}: vertex 0 at ({:.2}, {:.2}, {:.2})",
                        frame,
                        self.elapsed(),
                        q[0],
                        q[1],
                        q[2]
                    );
                }
                model
            })
            .collect()
    }
}

impl Default for PreviewSystem {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_core::CompoundKind;
    use poly_core::CompoundPartitioner;
    use poly_render::BufferOptions;

    fn octahedron_buffer() -> GeometryBuffer {
        let table = CompoundKind::Octahedron.table();
        let vertices = table.family.generate();
        let compound = CompoundPartitioner::new(table).partition(&vertices).unwrap();
        GeometryBuffer::build(&compound, &BufferOptions::default()).unwrap()
    }

    #[test]
    fn test_run_steps_fixed_dt() {
        let mut preview = PreviewSystem::default();
        let matrices = preview.run(3, &octahedron_buffer());
        assert_eq!(matrices.len(), 3);
        assert!((preview.elapsed() - 3.0 / 60.0).abs() < 1e-5);
    }

    #[test]
    fn test_frame_dt_is_capped() {
        let config = AnimationConfig {
            frame_dt: 1.0,
            max_dt: 0.1,
            ..AnimationConfig::default()
        };
        let mut preview = PreviewSystem::new(&config);
        preview.step();
        preview.step();
        assert!((preview.elapsed() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_translation_applies_each_frame() {
        let config = AnimationConfig {
            speed: 0.0,
            ..AnimationConfig::default()
        };
        let mut preview = PreviewSystem::new(&config);
        let m = preview.step();
        let p = transform_point(m, [0.0, 0.0, 0.0]);
        assert_eq!(p, [640.0, 360.0, 0.0]);
    }
}
