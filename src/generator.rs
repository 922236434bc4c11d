//! Procedural spiral galaxy generation.
//!
//! Each particle is placed on one of `branches` straight arms, twisted by an
//! angle proportional to its distance from the center, then scattered by a
//! small per-axis offset:
//!
//! ```text
//! radius  = U(0,1) * params.radius
//! spin    = radius * params.spin
//! branch  = (i mod branches) / branches * 2π
//! offset  = U(0,1)^randomness * ±1          (per axis)
//! x       = cos(branch + spin) * radius + offset.x
//! y       = offset.y
//! z       = sin(branch + spin) * radius + offset.z
//! color   = lerp(inside, outside, radius / params.radius)
//! ```
//!
//! Raising a uniform draw to a power concentrates it near zero, so a larger
//! `randomness` gives a tighter galaxy.
//!
//! Generation takes the random source as an argument. With a seeded RNG the
//! output is fully reproducible:
//!
//! ```
//! use galaxy::{generate, Parameters};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let params = Parameters { count: 1_000, ..Parameters::default() };
//! let a = generate(&params, &mut SmallRng::seed_from_u64(7)).unwrap();
//! let b = generate(&params, &mut SmallRng::seed_from_u64(7)).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.colors().len(), 3_000);
//! ```

use crate::{Field, GalaxyError, Parameters};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// The derived attributes of one particle.
///
/// Particles are not retained; [`generate`] writes them straight into the
/// [`Field`] buffers. The type is public so callers can inspect individual
/// samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Distance along the arm, in `0.0..params.radius`.
    pub radius: f32,
    /// Angle of the particle's arm.
    pub branch_angle: f32,
    /// Twist applied at this radius.
    pub spin_angle: f32,
    /// Scatter added to the arm position.
    pub offset: Vec3,
    /// Gradient color at this radius.
    pub color: Vec3,
}

impl Particle {
    /// Final position: arm point in the XZ plane plus the scatter offset.
    ///
    /// The Y coordinate comes from the offset alone.
    pub fn position(&self) -> Vec3 {
        let angle = self.branch_angle + self.spin_angle;
        Vec3::new(
            angle.cos() * self.radius + self.offset.x,
            self.offset.y,
            angle.sin() * self.radius + self.offset.z,
        )
    }
}

/// Arm angle for particle `index`: one of `branches` equally spaced angles
/// in `[0, 2π)`.
///
/// # Panics
///
/// Panics if `branches` is zero.
#[inline]
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    (index % branches) as f32 / branches as f32 * TAU
}

/// Draw a single scatter component: `U(0,1)^exponent` with a random sign.
#[inline]
fn scatter<R: Rng + ?Sized>(rng: &mut R, exponent: f32) -> f32 {
    let magnitude = rng.gen::<f32>().powf(exponent);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Sample particle `index`.
///
/// Draw order is fixed (radius, then magnitude and sign for x, y, z) so a
/// seeded RNG reproduces the same particle. `params` is assumed valid.
pub fn sample_particle<R: Rng + ?Sized>(index: u32, params: &Parameters, rng: &mut R) -> Particle {
    let radius = rng.gen::<f32>() * params.radius;
    let offset = Vec3::new(
        scatter(rng, params.randomness),
        scatter(rng, params.randomness),
        scatter(rng, params.randomness),
    );

    let color = params
        .inside_color
        .lerp(params.outside_color, radius / params.radius)
        .to_vec3();

    Particle {
        radius,
        branch_angle: branch_angle(index, params.branches),
        spin_angle: radius * params.spin,
        offset,
        color,
    }
}

/// Generate a complete field from `params`.
///
/// Fails with [`GalaxyError::InvalidParameter`] if `params` violates its
/// domain (see [`Parameters::validate`]); nothing is allocated in that case.
pub fn generate<R: Rng + ?Sized>(params: &Parameters, rng: &mut R) -> Result<Field, GalaxyError> {
    params.validate()?;

    let mut field = Field::with_capacity(params.count as usize);
    for index in 0..params.count {
        let particle = sample_particle(index, params, rng);
        field.push(particle.position(), particle.color);
    }
    Ok(field)
}
