use crate::foundation::{
    error::{PathError, PathResult},
    value::PathValue,
};

pub(crate) fn check_duration(duration: f64) -> PathResult<()> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(PathError::validation(format!(
            "path duration must be finite and >= 0 (got {duration})"
        )));
    }
    Ok(())
}

pub(crate) fn check_finite<T: PathValue>(pts: &[T]) -> PathResult<()> {
    match pts.iter().position(|p| !p.is_finite_value()) {
        Some(i) => Err(PathError::validation(format!(
            "control point {i} must be finite (got {:?})",
            pts[i]
        ))),
        None => Ok(()),
    }
}

/// Map local time onto `[0, 1]`, clamping out-of-window times to the boundary.
///
/// A zero duration maps every time to `0`.
pub(crate) fn normalized_time(t: f64, duration: f64) -> f64 {
    if duration <= 0.0 || t.is_nan() {
        return 0.0;
    }
    (t / duration).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, PartialEq)]
/// A path that holds a single value for its whole duration.
pub struct PointPath<T> {
    duration: f64,
    value: T,
}

impl<T: PathValue> PointPath<T> {
    /// Build a constant path.
    pub fn new(duration: f64, value: T) -> PathResult<Self> {
        check_duration(duration)?;
        check_finite(&[value])?;
        Ok(Self { duration, value })
    }

    /// Constant value.
    pub fn value(&self, _t: f64) -> T {
        self.value
    }

    /// Stored value.
    pub fn constant(&self) -> T {
        self.value
    }

    /// Length of the path in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Change the length of the path.
    pub fn set_duration(&mut self, duration: f64) -> PathResult<()> {
        check_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    /// The single control point.
    pub fn ctrl_pts(&self) -> &[T] {
        std::slice::from_ref(&self.value)
    }

    /// Mutable access to the single control point.
    pub fn ctrl_pts_mut(&mut self) -> &mut [T] {
        std::slice::from_mut(&mut self.value)
    }

    /// Nothing is cached for a constant path.
    pub fn update(&mut self) {}
}

#[derive(Clone, Debug, PartialEq)]
/// Straight interpolation between two endpoints.
pub struct LinearPath<T> {
    duration: f64,
    pts: [T; 2],
}

impl<T: PathValue> LinearPath<T> {
    /// Build a path going from `begin` to `end` over `duration` seconds.
    pub fn new(duration: f64, begin: T, end: T) -> PathResult<Self> {
        check_duration(duration)?;
        check_finite(&[begin, end])?;
        Ok(Self {
            duration,
            pts: [begin, end],
        })
    }

    /// Interpolated value at local time `t` (clamped to the path window).
    pub fn value(&self, t: f64) -> T {
        T::lerp(self.pts[0], self.pts[1], normalized_time(t, self.duration))
    }

    /// Start value.
    pub fn begin(&self) -> T {
        self.pts[0]
    }

    /// End value.
    pub fn end(&self) -> T {
        self.pts[1]
    }

    /// Length of the path in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Change the length of the path; endpoints are untouched.
    pub fn set_duration(&mut self, duration: f64) -> PathResult<()> {
        check_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    /// `[begin, end]`.
    pub fn ctrl_pts(&self) -> &[T] {
        &self.pts
    }

    /// Mutable `[begin, end]`.
    pub fn ctrl_pts_mut(&mut self) -> &mut [T] {
        &mut self.pts
    }

    /// Nothing is cached for a linear path.
    pub fn update(&mut self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/path/primitive.rs"]
mod tests;
