//! Timestamp rendering

use heapless::String;

use crate::types::Tm;

/// Length of an ISO timestamp, `YYYY-MM-DD hh:mm:ss`
pub const ISOTIME_LEN: usize = 19;

/// Write two zero padded decimal digits
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn put2(out: &mut [u8], value: i32) {
    let value = value.rem_euclid(100) as u8;
    out[0] = b'0' + value / 10;
    out[1] = b'0' + value % 10;
}

/// Render `tm` as `YYYY-MM-DD hh:mm:ss` into `buf`.
///
/// Not locale aware. Each field is printed as-is, so pass a normalized
/// value; fields outside two digits keep only their last two.
pub fn isotime<'a>(tm: &Tm, buf: &'a mut [u8; ISOTIME_LEN]) -> &'a str {
    let year = tm.full_year();
    put2(&mut buf[0..2], year / 100);
    put2(&mut buf[2..4], year % 100);
    buf[4] = b'-';
    put2(&mut buf[5..7], i32::from(tm.mon) + 1);
    buf[7] = b'-';
    put2(&mut buf[8..10], i32::from(tm.mday));
    buf[10] = b' ';
    put2(&mut buf[11..13], i32::from(tm.hour));
    buf[13] = b':';
    put2(&mut buf[14..16], i32::from(tm.min));
    buf[16] = b':';
    put2(&mut buf[17..19], i32::from(tm.sec));

    // Only ASCII digits and separators were written
    core::str::from_utf8(buf).unwrap_or_default()
}

/// Render `tm` as an owned `YYYY-MM-DD hh:mm:ss` string
#[must_use]
pub fn isotime_string(tm: &Tm) -> String<ISOTIME_LEN> {
    let mut buf = [0u8; ISOTIME_LEN];
    let mut out = String::new();
    // Capacity equals the rendered length, the push cannot fail
    let _ = out.push_str(isotime(tm, &mut buf));
    out
}
