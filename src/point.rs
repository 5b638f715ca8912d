//! Two-dimensional point values

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::format_number;

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Build a point from two coordinates
///
/// # Examples
///
/// ```rust
/// use cim_capability::make_point;
///
/// let origin = make_point(0.0, 0.0);
/// assert_eq!(origin.to_string(), "{0, 0}");
/// ```
pub fn make_point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        format_number(self.x, f)?;
        write!(f, ", ")?;
        format_number(self.y, f)?;
        write!(f, "}}")
    }
}
