//! Planar polygon geometry.
//!
//! Atlas boundaries are drawn on the r/place canvas, so coordinates are plain
//! Cartesian pixels (not lat/lon).  `f64` keeps both the integer and the
//! sub-pixel coordinates found in the dataset exact enough for the
//! shoelace sum.

/// One polygon vertex in canvas coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Vertex {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Area of a closed polygon, rounded down to a whole number of pixels.
///
/// Shoelace formula: each vertex contributes `0.5 * (x[i]*y[i+1] - x[i+1]*y[i])`
/// with the last vertex pairing with the first.  The absolute value makes
/// the result independent of winding order.
///
/// Degenerate and self-intersecting polygons are not rejected; the formula is
/// applied as-is and the result is deterministic but may be meaningless.
/// Fewer than three vertices enclose nothing and yield 0.
pub fn polygon_area(vertices: &[Vertex]) -> u64 {
    let len = vertices.len();
    if len < 3 {
        return 0;
    }

    let mut total = 0.0f64;
    for (i, cur) in vertices.iter().enumerate() {
        let next = &vertices[(i + 1) % len];
        total += cur.x * next.y * 0.5;
        total -= next.x * cur.y * 0.5;
    }

    total.abs().floor() as u64
}
