//! The driver: parameters, the current field, and the frame loop.
//!
//! [`Galaxy`] owns a [`ParameterStore`], the current [`Field`], a
//! [`FrameClock`] and the random source. It runs two cycles:
//!
//! - **Edit**: [`set`](Galaxy::set) records every intermediate value (each
//!   slider drag tick). [`commit`](Galaxy::commit) regenerates the field if
//!   a structural parameter changed since the last generation.
//! - **Frame**: [`tick`](Galaxy::tick) jitters the render buffer (when
//!   `noise > 0` and not paused), tells the renderer what changed, then asks
//!   it to draw.
//!
//! A regenerated field replaces the old one wholesale. The renderer is handed
//! the new field through [`Renderer::attach`] at the start of the next tick,
//! before anything else is drawn, so no frame mixes old and new buffers.
//!
//! ```
//! use galaxy::prelude::*;
//!
//! let params = Parameters { count: 1_000, ..Parameters::default() };
//! let mut galaxy = Galaxy::with_seed(params, 42).unwrap();
//!
//! galaxy.set(ParamKey::Branches, 5).unwrap();
//! galaxy.set(ParamKey::Branches, 6).unwrap();
//! assert!(galaxy.commit().unwrap()); // regenerated once
//! assert!(!galaxy.commit().unwrap());
//! ```

use crate::params::Change;
use crate::time::FrameClock;
use crate::{
    generate, perturb, Field, GalaxyError, ParamKey, ParamValue, ParameterStore, Parameters,
    PointStyle,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Consumer of the generated buffers.
///
/// Implementations upload and draw the field. They only ever get shared
/// references; the driver is the sole writer of the buffers.
pub trait Renderer {
    /// A new field replaces whatever was attached before. Drop the old
    /// buffers and upload all three of the new ones.
    fn attach(&mut self, field: &Field, style: &PointStyle);

    /// Cosmetic style change (point size). The buffers are unchanged.
    fn style_changed(&mut self, _style: &PointStyle) {}

    /// `field.render_positions()` was rewritten and must be re-uploaded.
    fn positions_changed(&mut self, field: &Field);

    /// Draw one frame.
    fn render(&mut self, field: &Field);
}

/// Parameters plus the field generated from them.
pub struct Galaxy<R = SmallRng> {
    store: ParameterStore,
    field: Field,
    rng: R,
    clock: FrameClock,
    needs_attach: bool,
    style_dirty: bool,
}

impl Galaxy<SmallRng> {
    /// Galaxy seeded from OS entropy.
    pub fn new(params: Parameters) -> Result<Self, GalaxyError> {
        Self::with_rng(params, SmallRng::from_entropy())
    }

    /// Reproducible galaxy: the same seed and edits yield the same buffers.
    pub fn with_seed(params: Parameters, seed: u64) -> Result<Self, GalaxyError> {
        Self::with_rng(params, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Galaxy<R> {
    /// Validate `params` and generate the initial field.
    pub fn with_rng(params: Parameters, mut rng: R) -> Result<Self, GalaxyError> {
        let store = ParameterStore::with_parameters(params)?;
        let field = timed_generate(store.parameters(), &mut rng)?;
        Ok(Self {
            store,
            field,
            rng,
            clock: FrameClock::new(),
            needs_attach: true,
            style_dirty: false,
        })
    }

    #[inline]
    pub fn parameters(&self) -> &Parameters {
        self.store.parameters()
    }

    #[inline]
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Current point style derived from the parameters.
    pub fn style(&self) -> PointStyle {
        PointStyle::from_parameters(self.store.parameters())
    }

    /// Whether a structural edit is waiting for [`commit`](Self::commit).
    #[inline]
    pub fn has_pending_changes(&self) -> bool {
        self.store.is_dirty()
    }

    /// Record an edit without regenerating.
    ///
    /// Cosmetic edits take effect on the next tick. Structural edits wait
    /// for [`commit`](Self::commit).
    pub fn set(
        &mut self,
        key: ParamKey,
        value: impl Into<ParamValue>,
    ) -> Result<Change, GalaxyError> {
        let change = self.store.set(key, value)?;
        if key == ParamKey::Size && change == Change::Cosmetic {
            self.style_dirty = true;
        }
        Ok(change)
    }

    /// Finish an edit: regenerate if any structural parameter changed.
    ///
    /// Returns whether a new field was generated.
    pub fn commit(&mut self) -> Result<bool, GalaxyError> {
        if !self.store.is_dirty() {
            return Ok(false);
        }
        self.regenerate()?;
        Ok(true)
    }

    /// [`set`](Self::set) followed by [`commit`](Self::commit).
    pub fn apply(
        &mut self,
        key: ParamKey,
        value: impl Into<ParamValue>,
    ) -> Result<Change, GalaxyError> {
        let change = self.set(key, value)?;
        self.commit()?;
        Ok(change)
    }

    /// Replace all parameters (e.g. from a preset) and commit.
    pub fn load(&mut self, params: Parameters) -> Result<Change, GalaxyError> {
        let size_before = self.store.parameters().size;
        let change = self.store.replace(params)?;
        if self.store.parameters().size != size_before {
            self.style_dirty = true;
        }
        self.commit()?;
        Ok(change)
    }

    /// Unconditionally build a new field from the current parameters.
    ///
    /// The old field is dropped as soon as the new one is complete, and any
    /// pending structural edit counts as applied. On error the old field and
    /// the pending flag are kept.
    pub fn regenerate(&mut self) -> Result<(), GalaxyError> {
        self.field = timed_generate(self.store.parameters(), &mut self.rng)?;
        self.store.take_dirty();
        self.needs_attach = true;
        Ok(())
    }

    /// Stop the jitter. Rendering continues with the last positions.
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Run one frame against `renderer`.
    pub fn tick<T: Renderer + ?Sized>(&mut self, renderer: &mut T) {
        self.clock.update();

        if self.needs_attach {
            renderer.attach(&self.field, &self.style());
            self.needs_attach = false;
            self.style_dirty = false;
        } else if self.style_dirty {
            renderer.style_changed(&self.style());
            self.style_dirty = false;
        }

        if !self.clock.is_paused() {
            let noise = self.store.parameters().noise;
            if perturb(&mut self.field, noise, &mut self.rng) {
                renderer.positions_changed(&self.field);
            }
        }

        renderer.render(&self.field);
    }
}

fn timed_generate<R: Rng + ?Sized>(
    params: &Parameters,
    rng: &mut R,
) -> Result<Field, GalaxyError> {
    let started = Instant::now();
    let field = generate(params, rng)?;
    log::debug!(
        "generated {} particles ({} branches) in {:.2?}",
        field.len(),
        params.branches,
        started.elapsed()
    );
    Ok(field)
}
