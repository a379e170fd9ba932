// src/subdivision.rs

use rand::Rng;

use crate::geometry::{perpendicular_line, Point, Triangle};

/// Number of triangles `split` produces for one edge: `2^(max_depth + 1) - 1`.
/// Negative depths count as 0.
pub fn triangle_count(max_depth: i32) -> usize {
    let levels = max_depth.max(0) as u32 + 1;
    1usize.checked_shl(levels).map_or(usize::MAX, |n| n - 1)
}

/// Recursively erects peaks on the segment `a -> b` and returns every triangle formed.
///
/// Each call emits `Triangle(a, b, peak)` where `peak` sits `length` away from the midpoint
/// of `a -> b` along its normal, then recurses into `a -> peak` and `peak -> b`. Output is
/// in pre-order: parent, left subtree, right subtree. `length` is the same at every level.
///
/// Once `depth >= max_depth` the triangle is a leaf, so a `max_depth` of 0 or less yields
/// exactly one triangle. `a` and `b` must differ (see [`crate::geometry::normal`]).
pub fn split(a: Point, b: Point, length: f64, depth: i32, max_depth: i32) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(triangle_count(max_depth.saturating_sub(depth)));
    split_into(&mut triangles, a, b, length, depth, max_depth);
    triangles
}

/// Same traversal as [`split`], appending to `out` instead of allocating.
pub fn split_into(
    out: &mut Vec<Triangle>,
    a: Point,
    b: Point,
    length: f64,
    depth: i32,
    max_depth: i32,
) {
    split_with(out, a, b, length, depth, max_depth, &mut || 0.0);
}

/// Variant of [`split`] where every peak gets an extra offset drawn uniformly from
/// `[0, variance]` on top of `length`.
///
/// With `variance <= 0` no random numbers are drawn and the output matches `split`.
pub fn split_with_variance<R: Rng>(
    a: Point,
    b: Point,
    length: f64,
    variance: f64,
    depth: i32,
    max_depth: i32,
    rng: &mut R,
) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(triangle_count(max_depth.saturating_sub(depth)));
    if variance > 0.0 {
        split_with(&mut triangles, a, b, length, depth, max_depth, &mut || {
            rng.gen_range(0.0..=variance)
        });
    } else {
        split_into(&mut triangles, a, b, length, depth, max_depth);
    }
    triangles
}

fn split_with<F: FnMut() -> f64>(
    out: &mut Vec<Triangle>,
    a: Point,
    b: Point,
    length: f64,
    depth: i32,
    max_depth: i32,
    extra_length: &mut F,
) {
    let peak = perpendicular_line(a, b, length + extra_length()).b;
    out.push(Triangle::new(a, b, peak));

    if depth >= max_depth {
        return;
    }

    split_with(out, a, peak, length, depth + 1, max_depth, extra_length);
    split_with(out, peak, b, length, depth + 1, max_depth, extra_length);
}
