//! Q28.4 fixed point: 28 integer bits, 4 fractional bits (1/16 resolution).
//!
//! The graph stores coordinates as full 32-bit Q28.4 words and lengths,
//! gains, and altitudes as unsigned 16-bit Q12.4 truncations of the same
//! format.

/// Number of fractional bits.
pub const FRACTION_BITS: u32 = 4;

/// Convert an integer to Q28.4.
#[inline]
pub fn of_int(i: i32) -> i32 {
    i << FRACTION_BITS
}

#[inline]
pub fn as_f64(q28_4: i32) -> f64 {
    q28_4 as f64 / (1 << FRACTION_BITS) as f64
}

#[inline]
pub fn as_f32(q28_4: i32) -> f32 {
    q28_4 as f32 / (1 << FRACTION_BITS) as f32
}

/// Round `value` to the nearest Q28.4 number.  Used when encoding graphs.
#[inline]
pub fn of_f64(value: f64) -> i32 {
    (value * (1 << FRACTION_BITS) as f64).round() as i32
}
