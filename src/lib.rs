//! # galaxy - procedural spiral galaxy particle fields
//!
//! Turns a handful of tunable parameters into a spiral galaxy of points
//! (positions plus colors), and animates it with a cheap per-frame jitter.
//! Rendering is left to the caller: the crate produces flat `f32` buffers
//! ready for upload and tells a [`Renderer`] when they change.
//!
//! ## Quick Start
//!
//! ```ignore
//! use galaxy::prelude::*;
//!
//! let mut galaxy = Galaxy::new(Parameters::default())?;
//!
//! // Slider dragging: record every value, regenerate once on release.
//! galaxy.set(ParamKey::Spin, 1.2)?;
//! galaxy.set(ParamKey::Spin, 1.5)?;
//! galaxy.commit()?;
//!
//! loop {
//!     galaxy.tick(&mut my_renderer);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Parameters
//!
//! [`Parameters`] holds particle count, radius, arm count, twist, scatter,
//! jitter and the two gradient colors. [`ParameterStore`] validates every
//! write against the [`SCHEMA`] and classifies it as structural (the field
//! must be regenerated) or cosmetic (`size`, `noise`).
//!
//! ### Generation
//!
//! [`generate`] is a pure function of parameters and a random source. Pass a
//! seeded RNG for reproducible output.
//!
//! ### Animation
//!
//! [`perturb`] rewrites the render buffer as baseline plus a fresh one-sided
//! offset of at most `noise` per axis. The baseline never moves.
//!
//! ### Driver
//!
//! [`Galaxy`] owns all of the above and runs the edit → commit → regenerate
//! and tick → perturb → render cycles against a [`Renderer`].
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`params`] | [`Parameters`], [`ParameterStore`], [`SCHEMA`] |
//! | [`generator`] | [`generate`], [`Particle`], [`branch_angle`] |
//! | [`perturb`](mod@perturb) | [`perturb()`] |
//! | [`field`] | [`Field`] buffers |
//! | [`galaxy`] | [`Galaxy`], [`Renderer`] |
//! | [`style`] | [`PointStyle`], [`BlendMode`] |
//! | [`time`] | [`time::FrameClock`] |

mod color;
mod error;
pub mod field;
pub mod galaxy;
pub mod generator;
pub mod params;
pub mod perturb;
pub mod style;
pub mod time;

pub use color::Color;
pub use error::GalaxyError;
pub use field::Field;
pub use galaxy::{Galaxy, Renderer};
pub use generator::{branch_angle, generate, sample_particle, Particle};
pub use glam::Vec3;
pub use params::{
    Change, ParamKey, ParamKind, ParamSpec, ParamValue, ParameterStore, Parameters, SCHEMA,
};
pub use perturb::perturb;
pub use style::{BlendMode, PointStyle};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use galaxy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::galaxy::{Galaxy, Renderer};
    pub use crate::generator::{generate, Particle};
    pub use crate::params::{Change, ParamKey, ParamValue, ParameterStore, Parameters};
    pub use crate::perturb::perturb;
    pub use crate::style::{BlendMode, PointStyle};
    pub use crate::time::FrameClock;
    pub use crate::{Color, Field, GalaxyError, Vec3};
}
