//! The generated particle field.
//!
//! A [`Field`] is three parallel flat `f32` buffers, each `3 * len()` long and
//! laid out row-major per particle (`[x0, y0, z0, x1, y1, z1, ...]`):
//!
//! | Buffer | Written by | Mutated after generation |
//! |--------|------------|--------------------------|
//! | `base_positions` | generator | never |
//! | `render_positions` | generator, then [`perturb`](crate::perturb()) | every animated frame |
//! | `colors` | generator | never |
//!
//! Particle `i` occupies row `i` of all three buffers. Buffers are exposed as
//! slices for CPU consumers and as byte slices for GPU upload.

use glam::Vec3;

/// Particle positions and colors produced by [`generate`](crate::generate).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    base_positions: Vec<f32>,
    render_positions: Vec<f32>,
    colors: Vec<f32>,
    jittered: bool,
}

impl Field {
    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            base_positions: Vec::with_capacity(count * 3),
            render_positions: Vec::with_capacity(count * 3),
            colors: Vec::with_capacity(count * 3),
            jittered: false,
        }
    }

    /// Append one particle. Both position buffers receive `position`.
    pub(crate) fn push(&mut self, position: Vec3, color: Vec3) {
        self.base_positions.extend_from_slice(&position.to_array());
        self.render_positions.extend_from_slice(&position.to_array());
        self.colors.extend_from_slice(&color.to_array());
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.base_positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base_positions.is_empty()
    }

    /// Time-invariant positions as generated.
    #[inline]
    pub fn base_positions(&self) -> &[f32] {
        &self.base_positions
    }

    /// Positions to draw this frame.
    #[inline]
    pub fn render_positions(&self) -> &[f32] {
        &self.render_positions
    }

    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// `render_positions` as raw bytes for a vertex buffer upload.
    pub fn render_position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.render_positions)
    }

    /// `colors` as raw bytes for a vertex buffer upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Baseline position of particle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn base_position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.base_positions[index * 3..index * 3 + 3])
    }

    /// Current render position of particle `index`.
    pub fn render_position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.render_positions[index * 3..index * 3 + 3])
    }

    pub fn color(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[index * 3..index * 3 + 3])
    }

    /// Whether `render_positions` currently differs from the baseline.
    #[inline]
    pub fn is_jittered(&self) -> bool {
        self.jittered
    }

    /// Copy the baseline back over the render buffer.
    ///
    /// Returns `true` if the render buffer had been jittered, i.e. the
    /// renderer needs to re-upload it.
    pub fn reset_render_positions(&mut self) -> bool {
        if !self.jittered {
            return false;
        }
        self.render_positions.copy_from_slice(&self.base_positions);
        self.jittered = false;
        true
    }

    /// Baseline buffer and a writable render buffer, for the perturber.
    pub(crate) fn jitter_buffers(&mut self) -> (&[f32], &mut [f32]) {
        self.jittered = true;
        (&self.base_positions, &mut self.render_positions)
    }

    /// Axis-aligned bounds of the render positions, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut rows = self.render_positions.chunks_exact(3).map(Vec3::from_slice);
        let first = rows.next()?;
        Some(rows.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_particles() -> Field {
        let mut field = Field::with_capacity(2);
        field.push(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.0, 0.0));
        field.push(Vec3::new(-1.0, 0.5, 4.0), Vec3::new(0.0, 0.0, 1.0));
        field
    }

    #[test]
    fn test_push_fills_parallel_rows() {
        let field = two_particles();
        assert_eq!(field.len(), 2);
        assert_eq!(field.base_positions(), field.render_positions());
        assert_eq!(field.base_position(1), Vec3::new(-1.0, 0.5, 4.0));
        assert_eq!(field.color(1), Vec3::new(0.0, 0.0, 1.0));
        assert!(!field.is_jittered());
    }

    #[test]
    fn test_bytes_match_buffers() {
        let field = two_particles();
        assert_eq!(field.render_position_bytes().len(), 6 * 4);
        assert_eq!(field.color_bytes().len(), 6 * 4);
        let back: &[f32] = bytemuck::cast_slice(field.render_position_bytes());
        assert_eq!(back, field.render_positions());
    }

    #[test]
    fn test_bounds() {
        let (min, max) = two_particles().bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, 0.5, 3.0));
        assert_eq!(max, Vec3::new(1.0, 2.0, 4.0));
        assert!(Field::with_capacity(0).bounds().is_none());
    }

    #[test]
    fn test_reset_render_positions() {
        let mut field = two_particles();
        assert!(!field.reset_render_positions());

        let (_, render) = field.jitter_buffers();
        render[0] += 1.0;
        assert!(field.is_jittered());
        assert_ne!(field.base_positions(), field.render_positions());

        assert!(field.reset_render_positions());
        assert_eq!(field.base_positions(), field.render_positions());
    }
}
