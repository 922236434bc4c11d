//! Generation parameters and the parameter store.
//!
//! [`Parameters`] is the plain value type the generator consumes.
//! [`ParameterStore`] wraps it with validated writes: every [`set`] is
//! checked against the [`SCHEMA`] row for its key and either applied in full
//! or rejected with [`GalaxyError`]. Out of range values are never clamped.
//!
//! Writes are classified by [`Change`]. Structural writes (anything that
//! changes particle positions or colors) mark the store dirty; the driver
//! observes that flag on commit and regenerates the field.
//!
//! [`set`]: ParameterStore::set

use crate::{Color, GalaxyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Galaxy generation parameters.
///
/// Serialized as JSON presets. Missing fields take their default, and the
/// camelCase spellings (`insideColor`) are accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Number of particles.
    pub count: u32,
    /// Point size handed to the renderer. Does not affect generation.
    pub size: f32,
    /// Maximum distance of a particle's arm position from the center.
    pub radius: f32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Twist in radians per unit of radius.
    pub spin: f32,
    /// Exponent applied to scatter offsets. Larger values pull particles
    /// tighter onto their arm.
    pub randomness: f32,
    /// Per-frame jitter magnitude. Zero disables animation.
    pub noise: f32,
    /// Gradient color at the center.
    #[serde(alias = "insideColor")]
    pub inside_color: Color,
    /// Gradient color at the rim.
    #[serde(alias = "outsideColor")]
    pub outside_color: Color,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            count: 200_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: -3.75,
            randomness: 5.0,
            noise: 0.01,
            inside_color: Color::from_rgb8(0xff, 0x60, 0x30),
            outside_color: Color::from_rgb8(0x1b, 0x39, 0x84),
        }
    }
}

impl Parameters {
    /// Read one field as a [`ParamValue`].
    pub fn get(&self, key: ParamKey) -> ParamValue {
        match key {
            ParamKey::Count => ParamValue::Int(self.count as i64),
            ParamKey::Size => ParamValue::Float(self.size as f64),
            ParamKey::Radius => ParamValue::Float(self.radius as f64),
            ParamKey::Branches => ParamValue::Int(self.branches as i64),
            ParamKey::Spin => ParamValue::Float(self.spin as f64),
            ParamKey::Randomness => ParamValue::Float(self.randomness as f64),
            ParamKey::Noise => ParamValue::Float(self.noise as f64),
            ParamKey::InsideColor => ParamValue::Color(self.inside_color),
            ParamKey::OutsideColor => ParamValue::Color(self.outside_color),
        }
    }

    /// Write an already checked value. Kind mismatches are ignored.
    fn put(&mut self, key: ParamKey, value: ParamValue) {
        match (key, value) {
            (ParamKey::Count, ParamValue::Int(v)) => self.count = v as u32,
            (ParamKey::Branches, ParamValue::Int(v)) => self.branches = v as u32,
            (ParamKey::Size, ParamValue::Float(v)) => self.size = v as f32,
            (ParamKey::Radius, ParamValue::Float(v)) => self.radius = v as f32,
            (ParamKey::Spin, ParamValue::Float(v)) => self.spin = v as f32,
            (ParamKey::Randomness, ParamValue::Float(v)) => self.randomness = v as f32,
            (ParamKey::Noise, ParamValue::Float(v)) => self.noise = v as f32,
            (ParamKey::InsideColor, ParamValue::Color(c)) => self.inside_color = c,
            (ParamKey::OutsideColor, ParamValue::Color(c)) => self.outside_color = c,
            _ => {}
        }
    }

    /// Check the generator's domain constraints.
    ///
    /// This is looser than the [`SCHEMA`] ranges the store enforces: a
    /// caller driving the generator directly may use e.g. a single branch or
    /// four particles.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.count < 1 {
            return Err(GalaxyError::invalid("count", "must be at least 1"));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(GalaxyError::invalid("size", format!("must be > 0, got {}", self.size)));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(GalaxyError::invalid("radius", format!("must be > 0, got {}", self.radius)));
        }
        if self.branches < 1 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        if !self.spin.is_finite() {
            return Err(GalaxyError::invalid("spin", "must be finite"));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(GalaxyError::invalid(
                "randomness",
                format!("must be >= 0, got {}", self.randomness),
            ));
        }
        if !(self.noise.is_finite() && self.noise >= 0.0) {
            return Err(GalaxyError::invalid("noise", format!("must be >= 0, got {}", self.noise)));
        }
        if !self.inside_color.is_valid() {
            return Err(GalaxyError::invalid("inside_color", "channels must be within [0, 1]"));
        }
        if !self.outside_color.is_valid() {
            return Err(GalaxyError::invalid("outside_color", "channels must be within [0, 1]"));
        }
        Ok(())
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, GalaxyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON. The result is not range checked; see
    /// [`ParameterStore::with_parameters`].
    pub fn from_json(json: &str) -> Result<Self, GalaxyError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Identifies one field of [`Parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    Noise,
    InsideColor,
    OutsideColor,
}

impl ParamKey {
    /// Every key, in schema order.
    pub const ALL: [ParamKey; 9] = [
        ParamKey::Count,
        ParamKey::Size,
        ParamKey::Radius,
        ParamKey::Branches,
        ParamKey::Spin,
        ParamKey::Randomness,
        ParamKey::Noise,
        ParamKey::InsideColor,
        ParamKey::OutsideColor,
    ];

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// The schema row for this key.
    pub fn spec(self) -> &'static ParamSpec {
        &SCHEMA[self as usize]
    }

    /// Whether changing this parameter invalidates the generated field.
    pub fn is_structural(self) -> bool {
        self.spec().structural
    }

    /// Parse a textual value of the right kind for this key.
    ///
    /// Integers and floats use Rust's number syntax, colors use hex.
    pub fn parse_value(self, s: &str) -> Result<ParamValue, GalaxyError> {
        let s = s.trim();
        let name = self.name();
        match self.spec().kind {
            ParamKind::Int => s.parse::<i64>().map(ParamValue::Int).map_err(|_| {
                GalaxyError::TypeMismatch {
                    name,
                    expected: "integer",
                }
            }),
            ParamKind::Float => s.parse::<f64>().map(ParamValue::Float).map_err(|_| {
                GalaxyError::TypeMismatch {
                    name,
                    expected: "float",
                }
            }),
            ParamKind::Color => Color::from_hex(s).map(ParamValue::Color),
        }
    }
}

impl FromStr for ParamKey {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "count" => Ok(ParamKey::Count),
            "size" => Ok(ParamKey::Size),
            "radius" => Ok(ParamKey::Radius),
            "branches" => Ok(ParamKey::Branches),
            "spin" => Ok(ParamKey::Spin),
            "randomness" => Ok(ParamKey::Randomness),
            "noise" => Ok(ParamKey::Noise),
            "inside_color" | "insideColor" => Ok(ParamKey::InsideColor),
            "outside_color" | "outsideColor" => Ok(ParamKey::OutsideColor),
            other => Err(GalaxyError::UnknownParameter(other.to_string())),
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value kind a parameter holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
    Color,
}

impl ParamKind {
    fn label(self) -> &'static str {
        match self {
            ParamKind::Int => "integer",
            ParamKind::Float => "float",
            ParamKind::Color => "color",
        }
    }
}

/// A value written to or read from a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Color(Color),
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(v as f64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<Color> for ParamValue {
    fn from(c: Color) -> Self {
        ParamValue::Color(c)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Color(c) => write!(f, "{}", c),
        }
    }
}

/// One row of the parameter schema.
///
/// `min`, `max` and `step` are what an editing widget should offer. For
/// colors they describe a single channel. The store enforces `min..=max`;
/// `step` is advisory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub key: ParamKey,
    pub name: &'static str,
    pub kind: ParamKind,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Changing the parameter requires regenerating the field.
    pub structural: bool,
}

impl ParamSpec {
    /// Default value, taken from [`Parameters::default`].
    pub fn default_value(&self) -> ParamValue {
        Parameters::default().get(self.key)
    }

    /// Check `value` against this row, normalizing its kind.
    ///
    /// Integers are accepted for float parameters, and integral floats for
    /// integer parameters.
    pub fn check(&self, value: ParamValue) -> Result<ParamValue, GalaxyError> {
        let mismatch = || GalaxyError::TypeMismatch {
            name: self.name,
            expected: self.kind.label(),
        };

        match (self.kind, value) {
            (ParamKind::Int, ParamValue::Int(v)) => self.check_int(v),
            (ParamKind::Int, ParamValue::Float(v)) if v.is_finite() && v.fract() == 0.0 => {
                self.check_int(v as i64)
            }
            (ParamKind::Float, ParamValue::Float(v)) => self.check_float(v),
            (ParamKind::Float, ParamValue::Int(v)) => self.check_float(v as f64),
            (ParamKind::Color, ParamValue::Color(c)) => {
                if c.is_valid() {
                    Ok(ParamValue::Color(c))
                } else {
                    Err(GalaxyError::invalid(self.name, "channels must be within [0, 1]"))
                }
            }
            _ => Err(mismatch()),
        }
    }

    fn check_int(&self, v: i64) -> Result<ParamValue, GalaxyError> {
        if v < self.min as i64 || v > self.max as i64 {
            return Err(self.out_of_range(v));
        }
        Ok(ParamValue::Int(v))
    }

    // Compared at f32 precision, the precision values are stored at, so a
    // stored boundary value such as 0.01 re-validates cleanly.
    fn check_float(&self, v: f64) -> Result<ParamValue, GalaxyError> {
        if !v.is_finite() {
            return Err(GalaxyError::invalid(self.name, "must be finite"));
        }
        let stored = v as f32;
        if stored < self.min as f32 || stored > self.max as f32 {
            return Err(self.out_of_range(v));
        }
        Ok(ParamValue::Float(v))
    }

    fn out_of_range(&self, v: impl fmt::Display) -> GalaxyError {
        GalaxyError::invalid(
            self.name,
            format!("must be within [{}, {}], got {}", self.min, self.max, v),
        )
    }
}

/// The parameter schema, indexed by `ParamKey as usize`.
pub static SCHEMA: [ParamSpec; 9] = [
    ParamSpec {
        key: ParamKey::Count,
        name: "count",
        kind: ParamKind::Int,
        min: 100.0,
        max: 1_000_000.0,
        step: 100.0,
        structural: true,
    },
    ParamSpec {
        key: ParamKey::Size,
        name: "size",
        kind: ParamKind::Float,
        min: 0.001,
        max: 0.1,
        step: 0.001,
        structural: false,
    },
    ParamSpec {
        key: ParamKey::Radius,
        name: "radius",
        kind: ParamKind::Float,
        min: 0.01,
        max: 20.0,
        step: 0.01,
        structural: true,
    },
    ParamSpec {
        key: ParamKey::Branches,
        name: "branches",
        kind: ParamKind::Int,
        min: 2.0,
        max: 20.0,
        step: 1.0,
        structural: true,
    },
    ParamSpec {
        key: ParamKey::Spin,
        name: "spin",
        kind: ParamKind::Float,
        min: -5.0,
        max: 5.0,
        step: 0.001,
        structural: true,
    },
    ParamSpec {
        key: ParamKey::Randomness,
        name: "randomness",
        kind: ParamKind::Float,
        min: 1.0,
        max: 20.0,
        step: 1.0,
        structural: true,
    },
    ParamSpec {
        key: ParamKey::Noise,
        name: "noise",
        kind: ParamKind::Float,
        min: 0.0,
        max: 1.0,
        step: 0.001,
        structural: false,
    },
    ParamSpec {
        key: ParamKey::InsideColor,
        name: "inside_color",
        kind: ParamKind::Color,
        min: 0.0,
        max: 1.0,
        step: 1.0 / 255.0,
        structural: true,
    },
    ParamSpec {
        key: ParamKey::OutsideColor,
        name: "outside_color",
        kind: ParamKind::Color,
        min: 0.0,
        max: 1.0,
        step: 1.0 / 255.0,
        structural: true,
    },
];

/// What a write did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Change {
    /// The value was already current.
    Unchanged,
    /// Only renderer-facing state changed (`size`, `noise`).
    Cosmetic,
    /// The field must be regenerated.
    Structural,
}

impl Change {
    pub fn requires_regeneration(self) -> bool {
        self == Change::Structural
    }
}

/// Validated holder of the current [`Parameters`].
///
/// The store owns no buffers and never generates; it only records whether
/// the last generated field is stale.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    params: Parameters,
    dirty: bool,
}

impl ParameterStore {
    /// Store holding the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `params`, after checking every field against the schema.
    pub fn with_parameters(params: Parameters) -> Result<Self, GalaxyError> {
        check_all(&params)?;
        Ok(Self {
            params,
            dirty: false,
        })
    }

    /// Load a JSON preset and validate it.
    pub fn load_preset(path: impl AsRef<Path>) -> Result<Self, GalaxyError> {
        let json = fs::read_to_string(path)?;
        Self::with_parameters(Parameters::from_json(&json)?)
    }

    /// Write the current parameters as a JSON preset.
    pub fn save_preset(&self, path: impl AsRef<Path>) -> Result<(), GalaxyError> {
        fs::write(path, self.params.to_json()?)?;
        Ok(())
    }

    #[inline]
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    #[inline]
    pub fn get(&self, key: ParamKey) -> ParamValue {
        self.params.get(key)
    }

    /// Validate and write a single parameter.
    ///
    /// On error the store is left untouched.
    pub fn set(
        &mut self,
        key: ParamKey,
        value: impl Into<ParamValue>,
    ) -> Result<Change, GalaxyError> {
        let value = key.spec().check(value.into())?;

        let before = self.params.clone();
        self.params.put(key, value);
        if self.params == before {
            return Ok(Change::Unchanged);
        }

        if key.is_structural() {
            self.dirty = true;
            Ok(Change::Structural)
        } else {
            log::trace!("{} set to {}", key, value);
            Ok(Change::Cosmetic)
        }
    }

    /// Parse `name` and `value` as text, then [`set`](Self::set).
    pub fn set_str(&mut self, name: &str, value: &str) -> Result<Change, GalaxyError> {
        let key: ParamKey = name.parse()?;
        let value = key.parse_value(value)?;
        self.set(key, value)
    }

    /// Replace every parameter at once. All-or-nothing.
    pub fn replace(&mut self, params: Parameters) -> Result<Change, GalaxyError> {
        check_all(&params)?;

        let change = ParamKey::ALL
            .iter()
            .filter(|key| self.params.get(**key) != params.get(**key))
            .map(|key| {
                if key.is_structural() {
                    Change::Structural
                } else {
                    Change::Cosmetic
                }
            })
            .max()
            .unwrap_or(Change::Unchanged);

        self.params = params;
        if change == Change::Structural {
            self.dirty = true;
        }
        Ok(change)
    }

    /// Whether a structural write happened since the last [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

fn check_all(params: &Parameters) -> Result<(), GalaxyError> {
    for key in ParamKey::ALL {
        key.spec().check(params.get(key))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_indexed_by_key() {
        for key in ParamKey::ALL {
            assert_eq!(key.spec().key, key);
            assert_eq!(key.name().parse::<ParamKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_defaults_pass_schema() {
        let store = ParameterStore::with_parameters(Parameters::default()).unwrap();
        assert!(!store.is_dirty());
        assert_eq!(store.parameters().inside_color.to_hex(), "#ff6030");
        assert_eq!(store.parameters().outside_color.to_hex(), "#1b3984");
        assert_eq!(ParamKey::Spin.spec().default_value(), ParamValue::Float(-3.75));
    }

    #[test]
    fn test_structural_classification() {
        let structural: Vec<_> = ParamKey::ALL.iter().filter(|k| k.is_structural()).collect();
        assert_eq!(structural.len(), 7);
        assert!(!ParamKey::Size.is_structural());
        assert!(!ParamKey::Noise.is_structural());
    }

    #[test]
    fn test_set_structural_marks_dirty() {
        let mut store = ParameterStore::new();
        assert_eq!(store.set(ParamKey::Branches, 5).unwrap(), Change::Structural);
        assert!(store.is_dirty());
        assert!(store.take_dirty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_cosmetic_keeps_clean() {
        let mut store = ParameterStore::new();
        assert_eq!(store.set(ParamKey::Noise, 0.5).unwrap(), Change::Cosmetic);
        assert_eq!(store.set(ParamKey::Size, 0.02).unwrap(), Change::Cosmetic);
        assert!(!store.is_dirty());
        assert_eq!(store.parameters().noise, 0.5);
    }

    #[test]
    fn test_set_same_value_is_unchanged() {
        let mut store = ParameterStore::new();
        assert_eq!(store.set(ParamKey::Radius, 5.0).unwrap(), Change::Unchanged);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut store = ParameterStore::new();
        let before = store.parameters().clone();

        for (key, value) in [
            (ParamKey::Count, ParamValue::Int(0)),
            (ParamKey::Count, ParamValue::Int(99)),
            (ParamKey::Radius, ParamValue::Float(0.0)),
            (ParamKey::Branches, ParamValue::Int(1)),
            (ParamKey::Randomness, ParamValue::Float(-1.0)),
            (ParamKey::Noise, ParamValue::Float(-0.1)),
            (ParamKey::Spin, ParamValue::Float(f64::NAN)),
            (ParamKey::InsideColor, ParamValue::Color(Color::rgb(2.0, 0.0, 0.0))),
        ] {
            let err = store.set(key, value).unwrap_err();
            assert!(matches!(err, GalaxyError::InvalidParameter { .. }), "{key}: {err}");
        }

        assert_eq!(store.parameters(), &before);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_kind_mismatch() {
        let mut store = ParameterStore::new();
        let err = store.set(ParamKey::Count, 1000.5).unwrap_err();
        assert!(matches!(err, GalaxyError::TypeMismatch { name: "count", .. }));
        assert!(store.set(ParamKey::Radius, Color::WHITE).is_err());
        // Integral floats are fine for integer keys, integers for float keys.
        assert_eq!(store.set(ParamKey::Count, 1000.0).unwrap(), Change::Structural);
        assert_eq!(store.set(ParamKey::Radius, 7).unwrap(), Change::Structural);
        assert_eq!(store.parameters().radius, 7.0);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let mut store = ParameterStore::new();
        store.set(ParamKey::Radius, 0.01).unwrap();
        store.set(ParamKey::Count, 1_000_000).unwrap();
        store.set(ParamKey::Noise, 0.0).unwrap();
        // Stored values must survive re-validation.
        ParameterStore::with_parameters(store.parameters().clone()).unwrap();
    }

    #[test]
    fn test_set_str() {
        let mut store = ParameterStore::new();
        store.set_str("insideColor", "#00ff00").unwrap();
        assert_eq!(store.parameters().inside_color, Color::rgb(0.0, 1.0, 0.0));
        store.set_str("spin", "1.5").unwrap();
        assert_eq!(store.parameters().spin, 1.5);
        assert!(matches!(
            store.set_str("warp", "1"),
            Err(GalaxyError::UnknownParameter(_))
        ));
        assert!(matches!(
            store.set_str("branches", "three"),
            Err(GalaxyError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_replace_classifies_change() {
        let mut store = ParameterStore::new();
        let mut p = store.parameters().clone();
        p.noise = 0.2;
        assert_eq!(store.replace(p.clone()).unwrap(), Change::Cosmetic);
        assert!(!store.is_dirty());

        p.spin = 1.0;
        assert_eq!(store.replace(p.clone()).unwrap(), Change::Structural);
        assert!(store.is_dirty());

        p.count = 5;
        assert!(store.replace(p).is_err());
        assert_eq!(store.parameters().count, 200_000);
    }

    #[test]
    fn test_validate_domain_is_looser_than_schema() {
        let p = Parameters {
            count: 4,
            branches: 1,
            randomness: 0.0,
            ..Parameters::default()
        };
        p.validate().unwrap();
        assert!(ParameterStore::with_parameters(p).is_err());

        let bad = Parameters {
            radius: 0.0,
            ..Parameters::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(GalaxyError::InvalidParameter { name: "radius", .. })
        ));
    }

    #[test]
    fn test_json_defaults_and_aliases() {
        let p = Parameters::from_json(r##"{ "count": 1000, "insideColor": "#ffffff" }"##).unwrap();
        assert_eq!(p.count, 1000);
        assert_eq!(p.inside_color, Color::WHITE);
        assert_eq!(p.radius, Parameters::default().radius);

        let back = Parameters::from_json(&p.to_json().unwrap()).unwrap();
        assert_eq!(back, p);
    }
}
