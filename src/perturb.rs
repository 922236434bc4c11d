//! Per-frame jitter of the render buffer.
//!
//! Every animated frame redraws each render coordinate as its baseline plus a
//! fresh `U(0,1) * noise` offset. The offset replaces last frame's, so
//! particles flicker around their baseline instead of drifting. The offset
//! is one-sided: coordinates only ever move towards `+noise`.

use crate::Field;
use rand::Rng;

/// Jitter `field`'s render positions by up to `noise` per axis.
///
/// Base positions and colors are never touched. With `noise <= 0` (or a
/// non-finite `noise`) the render buffer is restored to the baseline if an
/// earlier call had jittered it.
///
/// Returns `true` when the render buffer was rewritten and the renderer must
/// re-upload it.
pub fn perturb<R: Rng + ?Sized>(field: &mut Field, noise: f32, rng: &mut R) -> bool {
    if !(noise.is_finite() && noise > 0.0) {
        return field.reset_render_positions();
    }

    let (base, render) = field.jitter_buffers();
    for (out, &baseline) in render.iter_mut().zip(base) {
        *out = baseline + rng.gen::<f32>() * noise;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate, Parameters};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn field() -> Field {
        let params = Parameters {
            count: 200,
            ..Parameters::default()
        };
        generate(&params, &mut SmallRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn test_zero_noise_is_noop() {
        let mut field = field();
        let before = field.clone();
        assert!(!perturb(&mut field, 0.0, &mut SmallRng::seed_from_u64(0)));
        assert_eq!(field, before);
    }

    #[test]
    fn test_jitter_is_bounded_and_one_sided() {
        let mut field = field();
        let mut rng = SmallRng::seed_from_u64(5);
        let noise = 0.25;

        for _ in 0..10 {
            assert!(perturb(&mut field, noise, &mut rng));
            for (r, b) in field.render_positions().iter().zip(field.base_positions()) {
                assert!(*r >= *b && *r <= *b + noise, "{r} not in [{b}, {b} + {noise}]");
            }
        }
    }

    #[test]
    fn test_jitter_does_not_accumulate() {
        let mut field = field();
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..100 {
            perturb(&mut field, 0.01, &mut rng);
        }
        let max_dev = field
            .render_positions()
            .iter()
            .zip(field.base_positions())
            .map(|(r, b)| r - b)
            .fold(0.0f32, f32::max);
        assert!(max_dev <= 0.01 + 1e-5);
    }

    #[test]
    fn test_base_and_colors_untouched() {
        let mut field = field();
        let base = field.base_positions().to_vec();
        let colors = field.colors().to_vec();
        perturb(&mut field, 1.0, &mut SmallRng::seed_from_u64(2));
        assert_eq!(field.base_positions(), &base[..]);
        assert_eq!(field.colors(), &colors[..]);
    }

    #[test]
    fn test_disabling_noise_restores_baseline() {
        let mut field = field();
        perturb(&mut field, 0.5, &mut SmallRng::seed_from_u64(4));
        assert!(field.is_jittered());

        assert!(perturb(&mut field, 0.0, &mut SmallRng::seed_from_u64(4)));
        assert_eq!(field.render_positions(), field.base_positions());
        assert!(!perturb(&mut field, -1.0, &mut SmallRng::seed_from_u64(4)));
    }
}
