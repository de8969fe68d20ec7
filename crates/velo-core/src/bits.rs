//! Bit-field extraction from 32-bit words.
//!
//! Both functions isolate `length` bits starting at bit `start` (bit 0 is the
//! least significant) by shifting the field to the top of the word and then
//! back down: arithmetically for the signed variant, logically for the
//! unsigned one.

#[inline]
fn check_range(start: u32, length: u32) {
    assert!(
        start.checked_add(length).is_some_and(|end| end <= 32),
        "bit range [{start}, {start}+{length}) does not fit in 32 bits"
    );
}

/// Extract `length` bits of `value` starting at bit `start`, interpreted as a
/// two's-complement signed integer.
///
/// # Panics
///
/// Panics if `start + length > 32`.
#[inline]
pub fn extract_signed(value: i32, start: u32, length: u32) -> i32 {
    check_range(start, length);
    if length == 0 {
        return 0;
    }
    (value << (32 - start - length)) >> (32 - length)
}

/// Extract `length` bits of `value` starting at bit `start`, zero-extended.
///
/// # Panics
///
/// Panics if `start + length > 32` or `length == 32` (the result would not
/// be representable as a non-negative `i32`).
#[inline]
pub fn extract_unsigned(value: i32, start: u32, length: u32) -> u32 {
    check_range(start, length);
    assert!(length < 32, "unsigned bit field cannot span all 32 bits");
    if length == 0 {
        return 0;
    }
    ((value as u32) << (32 - start - length)) >> (32 - length)
}
