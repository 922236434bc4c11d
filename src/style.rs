//! Point rendering hints handed to the renderer.
//!
//! The core never draws anything, but it knows how the field is meant to be
//! drawn: glowing points whose colors add up where arms overlap. A
//! [`Renderer`](crate::Renderer) receives a [`PointStyle`] whenever a field is
//! attached and whenever the cosmetic `size` parameter changes.

use crate::Parameters;

/// How overlapping points combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending.
    Alpha,

    /// Colors are added together, so dense regions glow (default).
    #[default]
    Additive,
}

/// Material settings for drawing a galaxy field as points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    /// Point size in world units.
    pub size: f32,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
    /// Write points to the depth buffer. Off so additive points don't
    /// occlude each other.
    pub depth_write: bool,
    pub blend: BlendMode,
    /// Use the field's per-particle colors.
    pub vertex_colors: bool,
}

impl PointStyle {
    pub fn from_parameters(params: &Parameters) -> Self {
        Self {
            size: params.size,
            ..Self::default()
        }
    }
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: Parameters::default().size,
            size_attenuation: true,
            depth_write: false,
            blend: BlendMode::Additive,
            vertex_colors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_follows_size() {
        let params = Parameters {
            size: 0.05,
            ..Parameters::default()
        };
        let style = PointStyle::from_parameters(&params);
        assert_eq!(style.size, 0.05);
        assert_eq!(style.blend, BlendMode::Additive);
        assert!(!style.depth_write);
        assert!(style.vertex_colors);
    }
}
