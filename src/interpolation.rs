//! Linear and bilinear interpolation over rectangular cells.
//!
//! Degenerate cells (zero width along an axis) never divide by zero: the
//! samples on either side of the collapsed axis are averaged instead.

use std::fmt;

use cgmath::{InnerSpace, Matrix2, Vector2};

/// Four known samples at the corners of the cell `(x1, y1)-(x2, y2)`.
///
/// `v11` sits at `(x1, y1)`, `v12` at `(x1, y2)`, `v21` at `(x2, y1)` and
/// `v22` at `(x2, y2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InterParam {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub v11: f64,
    pub v12: f64,
    pub v21: f64,
    pub v22: f64,
}

impl fmt::Display for InterParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "x1: {} y1: {} x2: {} y2: {}",
            self.x1, self.y1, self.x2, self.y2
        )?;
        writeln!(f, "v11: {}", self.v11)?;
        writeln!(f, "v12: {}", self.v12)?;
        writeln!(f, "v21: {}", self.v21)?;
        write!(f, "v22: {}", self.v22)
    }
}

/// Interpolate between `v1` at `x1` and `v2` at `x2`, evaluated at `x`.
///
/// Returns the plain average when `x1 == x2`.
pub fn interpolate_value(x1: f64, x2: f64, v1: f64, v2: f64, x: f64) -> f64 {
    if x1 == x2 {
        return (v1 + v2) / 2.0;
    }
    ((x2 - x) / (x2 - x1)) * v1 + ((x - x1) / (x2 - x1)) * v2
}

/// Resolve the value at `point` inside the cell described by `known`.
pub fn interpolate_cell(known: &InterParam, point: Vector2<f64>) -> f64 {
    let flat_x = known.x1 == known.x2;
    let flat_y = known.y1 == known.y2;
    match (flat_x, flat_y) {
        (true, true) => (known.v11 + known.v12 + known.v21 + known.v22) / 4.0,
        (true, false) => interpolate_value(
            known.y1,
            known.y2,
            (known.v11 + known.v21) / 2.0,
            (known.v12 + known.v22) / 2.0,
            point.y,
        ),
        (false, true) => interpolate_value(
            known.x1,
            known.x2,
            (known.v11 + known.v12) / 2.0,
            (known.v21 + known.v22) / 2.0,
            point.x,
        ),
        (false, false) => {
            let inv_area = 1.0 / ((known.x2 - known.x1) * (known.y2 - known.y1));
            let x_weights = Vector2::new(known.x2 - point.x, point.x - known.x1);
            let y_weights = Vector2::new(known.y2 - point.y, point.y - known.y1);
            // cgmath matrices are built column by column.
            let values = Matrix2::new(known.v11, known.v21, known.v12, known.v22);
            inv_area * x_weights.dot(values * y_weights)
        }
    }
}
