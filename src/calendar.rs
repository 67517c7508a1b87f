//! Calendar Engine
//!
//! Conversions between epoch seconds ([`Time`](crate::types::Time)) and
//! broken-down time ([`Tm`](crate::types::Tm)).
//!
//! - `convert`: pure UTC conversions and leap-year arithmetic
//! - `zone`: the [`Calendar`] context holding time zone and DST rule
//! - `format`: fixed-layout ISO timestamp rendering

mod convert;
mod format;
mod zone;

pub use convert::{
    days_to_epoch, difftime, from_ntp, from_unix, gmtime, is_leap_year, mk_gmtime, to_ntp,
    to_unix,
};
pub use format::{isotime, isotime_string, ISOTIME_LEN};
pub use zone::{Calendar, DstFn};
