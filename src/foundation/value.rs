use std::{
    fmt,
    ops::{Add, Mul, Sub},
};

use glam::DVec3;

/// Payload contract for path values.
///
/// A path interpolates values through linear combinations only, so anything that forms a vector
/// space over `f64` can be animated. Implementations also describe how they are edited (one
/// numeric field per component) and how they appear in a path document.
pub trait PathValue:
    Copy
    + fmt::Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + 'static
{
    /// Payload tag written in the `Data` field of a path document.
    const DATA_TAG: &'static str;

    /// Column labels used when the value is edited component-wise.
    const COMPONENT_LABELS: &'static [&'static str];

    /// Interpolate from `a` to `b` with factor `t` (not clamped).
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }

    /// Read component `i`; out-of-range components read as `0.0`.
    fn component(&self, i: usize) -> f64;

    /// Overwrite component `i`; out-of-range components are ignored.
    fn set_component(&mut self, i: usize, v: f64);

    /// `true` when every component is finite.
    fn is_finite_value(&self) -> bool;

    /// Document representation of this value.
    fn to_json(&self) -> serde_json::Value;

    /// Parse the document representation; `None` when the shape does not match.
    fn from_json(v: &serde_json::Value) -> Option<Self>;

    /// Human-readable description of the expected document shape.
    fn expected_shape() -> &'static str;
}

fn finite_number(v: &serde_json::Value) -> Option<f64> {
    v.as_f64().filter(|x| x.is_finite())
}

impl PathValue for f64 {
    const DATA_TAG: &'static str = "double";
    const COMPONENT_LABELS: &'static [&'static str] = &["Value"];

    fn component(&self, i: usize) -> f64 {
        if i == 0 { *self } else { 0.0 }
    }

    fn set_component(&mut self, i: usize, v: f64) {
        if i == 0 {
            *self = v;
        }
    }

    fn is_finite_value(&self) -> bool {
        f64::is_finite(*self)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!(*self)
    }

    fn from_json(v: &serde_json::Value) -> Option<Self> {
        finite_number(v)
    }

    fn expected_shape() -> &'static str {
        "a number"
    }
}

impl PathValue for DVec3 {
    const DATA_TAG: &'static str = "dvec3";
    const COMPONENT_LABELS: &'static [&'static str] = &["X", "Y", "Z"];

    fn component(&self, i: usize) -> f64 {
        match i {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => 0.0,
        }
    }

    fn set_component(&mut self, i: usize, v: f64) {
        match i {
            0 => self.x = v,
            1 => self.y = v,
            2 => self.z = v,
            _ => {}
        }
    }

    fn is_finite_value(&self) -> bool {
        DVec3::is_finite(*self)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!([self.x, self.y, self.z])
    }

    fn from_json(v: &serde_json::Value) -> Option<Self> {
        match v.as_array()?.as_slice() {
            [x, y, z] => Some(DVec3::new(
                finite_number(x)?,
                finite_number(y)?,
                finite_number(z)?,
            )),
            _ => None,
        }
    }

    fn expected_shape() -> &'static str {
        "a 3-element number array"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
