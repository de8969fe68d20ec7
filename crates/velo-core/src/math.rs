//! Small numeric helpers shared by the graph decoders and route queries.

/// `ceil(x / y)` for non-negative `x` and positive `y`.
#[inline]
pub fn ceil_div(x: u32, y: u32) -> u32 {
    assert!(y > 0, "ceil_div by zero");
    x.div_ceil(y)
}

/// Linear interpolation: `y0` at `x = 0`, `y1` at `x = 1`.
#[inline]
pub fn interpolate(y0: f64, y1: f64, x: f64) -> f64 {
    (y1 - y0).mul_add(x, y0)
}

/// Clamp `v` into `[min, max]`.  Works for any ordered domain (integers and
/// floats alike).
///
/// # Panics
///
/// Panics if `min > max`.
#[inline]
pub fn clamp<T: PartialOrd>(min: T, v: T, max: T) -> T {
    assert!(min <= max, "clamp bounds are reversed");
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

#[inline]
pub fn asinh(x: f64) -> f64 {
    (x + (1.0 + x * x).sqrt()).ln()
}

#[inline]
pub fn dot_product(u_x: f64, u_y: f64, v_x: f64, v_y: f64) -> f64 {
    u_x * v_x + u_y * v_y
}

#[inline]
pub fn squared_norm(u_x: f64, u_y: f64) -> f64 {
    u_x * u_x + u_y * u_y
}

#[inline]
pub fn norm(u_x: f64, u_y: f64) -> f64 {
    squared_norm(u_x, u_y).sqrt()
}

/// Signed length of the projection of `p - a` onto the direction `b - a`.
///
/// Negative when `p` projects before `a`, larger than `|b - a|` when it
/// projects past `b`.
#[inline]
pub fn projection_length(a_x: f64, a_y: f64, b_x: f64, b_y: f64, p_x: f64, p_y: f64) -> f64 {
    let (u_x, u_y) = (p_x - a_x, p_y - a_y);
    let (v_x, v_y) = (b_x - a_x, b_y - a_y);
    dot_product(u_x, u_y, v_x, v_y) / norm(v_x, v_y)
}
