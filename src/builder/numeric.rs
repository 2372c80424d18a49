//! Numeric rendering: Base-10 integers and 7-significant-digit floats.
//!
//! Both renderers write digits straight into the tail of a [`CharBuffer`],
//! least significant first, then reverse the written run in place. No
//! intermediate string is ever allocated.

use super::storage::CharBuffer;

/// Worst case for a 64-bit integer: 20 digits plus a sign.
const MAX_INTEGER_CHARS: usize = 21;

/// Number of significant digits the float renderer keeps.
const SIGNIFICANT_DIGITS: usize = 7;

/// Smallest scaled magnitude holding all significant digits (10^6).
const SCALED_FLOOR: f64 = 1_000_000.0;

/// First magnitude with more significant digits than we keep (10^7).
const SCALED_CEILING: f64 = 10_000_000.0;

mod sealed {
    pub trait Sealed {}
}

/// Primitive integers the integer renderer accepts.
///
/// Implemented for every signed and unsigned integer up to 64 bits. The
/// trait is sealed; it only exists to let `append_int` take any of them.
pub trait DecimalInt: Copy + sealed::Sealed {
    /// Split into a sign flag and the absolute value.
    fn into_parts(self) -> (bool, u64);
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl DecimalInt for $t {
                #[inline]
                #[allow(clippy::cast_lossless)]
                fn into_parts(self) -> (bool, u64) {
                    (self < 0, self.unsigned_abs() as u64)
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl DecimalInt for $t {
                #[inline]
                #[allow(clippy::cast_lossless)]
                fn into_parts(self) -> (bool, u64) {
                    (false, self as u64)
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

/// Map a value in `0..10` to its ASCII digit.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn digit_char(digit: u64) -> char {
    char::from(b'0' + digit as u8)
}

/// Render an integer in base 10.
pub(crate) fn write_integer(buffer: &mut CharBuffer, negative: bool, mut magnitude: u64) {
    buffer.ensure_capacity(MAX_INTEGER_CHARS);

    if negative {
        buffer.push('-');
    }

    // Always emit at least one digit, so zero renders as "0".
    let mut digits = 0;
    loop {
        buffer.push(digit_char(magnitude % 10));
        magnitude /= 10;
        digits += 1;
        if magnitude == 0 {
            break;
        }
    }

    buffer.reverse_tail(digits);
}

/// Render a float with 7 significant digits.
///
/// Non-finite values render as `NaN`, `Infinity` or `-Infinity`.
/// Magnitudes of 10^7 and above keep their 7 leading digits and pad the
/// rest with zeros; smaller magnitudes place a decimal point and drop
/// trailing fractional zeros.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn write_float(buffer: &mut CharBuffer, value: f64) {
    if !value.is_finite() {
        let token = if value.is_nan() {
            "NaN"
        } else if value.is_sign_negative() {
            "-Infinity"
        } else {
            "Infinity"
        };
        buffer.ensure_capacity(token.len());
        buffer.push_chars(token.chars());
        return;
    }

    if value == 0.0 {
        buffer.ensure_capacity(1);
        buffer.push('0');
        return;
    }

    let mut magnitude = value.abs();

    // Both loops are bounded by the f64 exponent range and at most one runs.
    let mut decimal_shift: usize = 0;
    while magnitude < SCALED_FLOOR {
        magnitude *= 10.0;
        decimal_shift += 1;
    }
    let mut dropped_digits: usize = 0;
    while magnitude >= SCALED_CEILING {
        magnitude /= 10.0;
        dropped_digits += 1;
    }

    // Sign, "0.", one carry digit past the significant ones, the zeros
    // between the point and the first significant digit, and padding.
    buffer.ensure_capacity(3 + SIGNIFICANT_DIGITS + 1 + decimal_shift + dropped_digits);

    if value < 0.0 {
        buffer.push('-');
    }
    let start = buffer.len();

    buffer.push_repeated('0', dropped_digits);

    let mut remaining = magnitude.round() as u64;
    let mut shift = decimal_shift as isize;
    let mut leading_zero = true;
    while remaining != 0 || shift >= 0 {
        let digit = remaining % 10;
        // Fractional zeros are dropped until the first significant digit
        // or until the digit next to the point.
        if digit != 0 || shift <= 0 {
            leading_zero = false;
        }
        if !leading_zero {
            buffer.push(digit_char(digit));
        }
        shift -= 1;
        if shift == 0 && !leading_zero {
            buffer.push('.');
        }
        remaining /= 10;
    }

    buffer.reverse_tail(buffer.len() - start);
}
