// src/geometry.rs

use std::ops::Sub;

use glam::DVec2;

/// Integer point in sketch space. The origin sits at the window center and +y points down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn get(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64)
    }

    /// Rounds each component to the nearest integer, saturating at the `i32` bounds.
    /// NaN components become 0.
    pub fn from_vec2_round(v: DVec2) -> Self {
        Self::new(v.x.round() as i32, v.y.round() as i32)
    }

    pub fn dot(&self, other: &Point) -> i64 {
        self.x as i64 * other.x as i64 + self.y as i64 * other.y as i64
    }

    pub fn distance(&self, other: &Point) -> f64 {
        other.to_vec2().distance(self.to_vec2())
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Directed segment from `a` to `b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn get(&self) -> [i32; 4] {
        [self.a.x, self.a.y, self.b.x, self.b.y]
    }
}

/// A triangle built on the base `base_b -> base_c` with its apex at `peak_a`.
///
/// Vertex order is kept as given; `get` flattens it the way a `triangle(x1, y1, x2, y2, x3, y3)`
/// style draw call expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub base_b: Point,
    pub base_c: Point,
    pub peak_a: Point,
}

impl Triangle {
    pub const fn new(base_b: Point, base_c: Point, peak_a: Point) -> Self {
        Self { base_b, base_c, peak_a }
    }

    pub fn get(&self) -> [i32; 6] {
        [
            self.base_b.x,
            self.base_b.y,
            self.base_c.x,
            self.base_c.y,
            self.peak_a.x,
            self.peak_a.y,
        ]
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.base_b, self.base_c, self.peak_a]
    }

    pub fn base_midpoint(&self) -> Point {
        midpoint(self.base_b, self.base_c)
    }
}

/// Integer average of two points, rounded toward negative infinity.
pub fn midpoint(a: Point, b: Point) -> Point {
    let x = (a.x as i64 + b.x as i64).div_euclid(2);
    let y = (a.y as i64 + b.y as i64).div_euclid(2);
    Point::new(x as i32, y as i32)
}

/// Unit vector perpendicular to `a -> b`, rotated as `(dx, dy) -> (dy, -dx)`.
///
/// `a` and `b` must differ. For a zero-length segment the result is not finite.
pub fn normal(a: Point, b: Point) -> DVec2 {
    let ortho = DVec2::new(b.y as f64 - a.y as f64, a.x as f64 - b.x as f64);
    ortho / ortho.length()
}

/// Segment from the midpoint of `a -> b` out along its normal, `length` long.
///
/// The offset is rounded to the nearest integer rather than truncated, so the far
/// endpoint is within half a unit of `midpoint + length * normal` on either axis.
/// Endpoints past the `i32` range saturate at its bounds. A zero-length input
/// segment gives a zero offset, so both endpoints equal the midpoint.
pub fn perpendicular_line(a: Point, b: Point, length: f64) -> Segment {
    let mid = midpoint(a, b);
    let scaled = normal(a, b) * length;
    let offset = if scaled.is_nan() { DVec2::ZERO } else { scaled.round() };
    Segment::new(mid, Point::from_vec2_round(mid.to_vec2() + offset))
}
