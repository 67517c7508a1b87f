//! Packed BCD Codec
//!
//! The DS1302 keeps its clock/calendar registers as packed binary coded
//! decimal: the high nibble holds the tens digit, the low nibble the
//! units digit.

/// Encode a value in `0..=99` as packed BCD.
///
/// Values above 99 are not meaningful; the tens digit then spills past
/// nine and the result is not valid chip data.
#[must_use]
pub const fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode a packed BCD byte.
///
/// A nibble above nine yields an out-of-range result rather than an
/// error; a healthy chip never produces one.
#[must_use]
pub const fn from_bcd(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Check that both nibbles are decimal digits
#[must_use]
pub const fn is_valid_bcd(bcd: u8) -> bool {
    (bcd >> 4) <= 9 && (bcd & 0x0F) <= 9
}
