//! Cubic spline primitives.
//!
//! Both spline kinds split the path into `n - 1` uniform segments for `n` control points and
//! evaluate one cubic polynomial per segment. The sequence is padded with reflected phantom
//! points at each end, so both kinds start on the first control point and end on the last one.
//! The Catmull-Rom kind also passes through every interior point; the basis (uniform B-spline)
//! kind only approaches them.
//!
//! Per-segment polynomial coefficients are cached and rebuilt by `update()`, which keeps
//! `value(t)` free of allocation.

use crate::foundation::{
    error::{PathError, PathResult},
    value::PathValue,
};
use crate::path::primitive::{check_duration, check_finite, normalized_time};

/// Minimum number of control points accepted by spline paths.
pub const MIN_SPLINE_CTRL_PTS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Basis {
    CatmullRom,
    UniformB,
}

/// `c0 + c1*s + c2*s^2 + c3*s^3` for one segment.
type Coeffs<T> = [T; 4];

fn padded<T: PathValue>(pts: &[T], j: isize) -> T {
    let n = pts.len() as isize;
    if j < 0 {
        pts[0] * 2.0 - pts[1]
    } else if j >= n {
        pts[(n - 1) as usize] * 2.0 - pts[(n - 2) as usize]
    } else {
        pts[j as usize]
    }
}

fn segment_coeffs<T: PathValue>(basis: Basis, p0: T, p1: T, p2: T, p3: T) -> Coeffs<T> {
    match basis {
        Basis::CatmullRom => [
            p1,
            (p2 - p0) * 0.5,
            p0 - p1 * 2.5 + p2 * 2.0 - p3 * 0.5,
            (p1 - p2) * 1.5 + (p3 - p0) * 0.5,
        ],
        Basis::UniformB => [
            (p0 + p1 * 4.0 + p2) * (1.0 / 6.0),
            (p2 - p0) * 0.5,
            (p0 - p1 * 2.0 + p2) * 0.5,
            ((p1 - p2) * 3.0 + p3 - p0) * (1.0 / 6.0),
        ],
    }
}

fn build_coeffs<T: PathValue>(basis: Basis, pts: &[T], out: &mut Vec<Coeffs<T>>) {
    out.clear();
    for i in 0..pts.len().saturating_sub(1) {
        let i = i as isize;
        out.push(segment_coeffs(
            basis,
            padded(pts, i - 1),
            padded(pts, i),
            padded(pts, i + 1),
            padded(pts, i + 2),
        ));
    }
}

fn eval_coeffs<T: PathValue>(coeffs: &[Coeffs<T>], duration: f64, t: f64) -> T {
    let segs = coeffs.len();
    let u = normalized_time(t, duration) * segs as f64;
    let i = (u.floor() as usize).min(segs - 1);
    let s = u - i as f64;
    let [c0, c1, c2, c3] = coeffs[i];
    ((c3 * s + c2) * s + c1) * s + c0
}

fn check_ctrl_pts<T>(kind: &str, pts: &[T]) -> PathResult<()> {
    if pts.len() < MIN_SPLINE_CTRL_PTS {
        return Err(PathError::validation(format!(
            "{kind} needs at least {MIN_SPLINE_CTRL_PTS} control points (got {})",
            pts.len()
        )));
    }
    Ok(())
}

#[derive(Clone, Debug)]
struct SplineCore<T> {
    basis: Basis,
    duration: f64,
    ctrl_pts: Vec<T>,
    coeffs: Vec<Coeffs<T>>,
}

impl<T: PathValue> SplineCore<T> {
    fn new(kind: &str, basis: Basis, duration: f64, ctrl_pts: Vec<T>) -> PathResult<Self> {
        check_duration(duration)?;
        check_ctrl_pts(kind, &ctrl_pts)?;
        check_finite(&ctrl_pts)?;
        let mut core = Self {
            basis,
            duration,
            ctrl_pts,
            coeffs: Vec::new(),
        };
        core.update();
        Ok(core)
    }

    fn update(&mut self) {
        build_coeffs(self.basis, &self.ctrl_pts, &mut self.coeffs);
    }

    fn value(&self, t: f64) -> T {
        eval_coeffs(&self.coeffs, self.duration, t)
    }

    fn set_duration(&mut self, duration: f64) -> PathResult<()> {
        check_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    fn set_ctrl_pt(&mut self, index: usize, value: T) -> PathResult<()> {
        check_finite(&[value])?;
        let len = self.ctrl_pts.len();
        let slot = self.ctrl_pts.get_mut(index).ok_or_else(|| {
            PathError::validation(format!("control point {index} out of range (len {len})"))
        })?;
        *slot = value;
        self.update();
        Ok(())
    }
}

impl<T: PartialEq> PartialEq for SplineCore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.basis == other.basis
            && self.duration == other.duration
            && self.ctrl_pts == other.ctrl_pts
    }
}

macro_rules! spline_path {
    ($(#[$meta:meta])* $name:ident, $basis:expr, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name<T> {
            core: SplineCore<T>,
        }

        impl<T: PathValue> $name<T> {
            /// Build the spline; fails with fewer than two control points or a bad duration.
            pub fn new(duration: f64, ctrl_pts: Vec<T>) -> PathResult<Self> {
                Ok(Self {
                    core: SplineCore::new($kind, $basis, duration, ctrl_pts)?,
                })
            }

            /// Spline value at local time `t` (clamped to the path window).
            pub fn value(&self, t: f64) -> T {
                self.core.value(t)
            }

            /// Length of the path in seconds.
            pub fn duration(&self) -> f64 {
                self.core.duration
            }

            /// Change the length of the path; control points are untouched.
            pub fn set_duration(&mut self, duration: f64) -> PathResult<()> {
                self.core.set_duration(duration)
            }

            /// Control points in timeline order.
            pub fn ctrl_pts(&self) -> &[T] {
                &self.core.ctrl_pts
            }

            /// Mutable control points. Call [`Self::update`] after editing.
            pub fn ctrl_pts_mut(&mut self) -> &mut [T] {
                &mut self.core.ctrl_pts
            }

            /// Replace one control point and rebuild the cached segments.
            pub fn set_ctrl_pt(&mut self, index: usize, value: T) -> PathResult<()> {
                self.core.set_ctrl_pt(index, value)
            }

            /// Rebuild cached segment coefficients from the control points.
            pub fn update(&mut self) {
                self.core.update();
            }
        }
    };
}

spline_path!(
    /// Interpolating (Catmull-Rom) cubic spline through every control point.
    CubicSplinePath,
    Basis::CatmullRom,
    "CubicSplinePath"
);

spline_path!(
    /// Approximating uniform cubic B-spline anchored on its first and last control points.
    BasisSplinePath,
    Basis::UniformB,
    "BasisSplinePath"
);

#[cfg(test)]
#[path = "../../tests/unit/path/spline.rs"]
mod tests;
