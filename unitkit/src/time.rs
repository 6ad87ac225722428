//! Encoding of instants as seconds relative to a time origin.
//!
//! Timestamps are stored as plain `f64` seconds since an origin, so they convert like any other value through
//! offset units over the second. The default origin is 2001-01-01T00:00:00Z.

use chrono::{DateTime, Duration, Utc};

use unitkit_core::{BaseUnit, Unit, UnitResult};

/// Seconds from 1970-01-01T00:00:00Z to the default origin 2001-01-01T00:00:00Z.
pub const DEFAULT_ORIGIN_UNIX_SECONDS: i64 = 978_307_200;

/// The default time origin, 2001-01-01T00:00:00Z.
pub fn default_origin() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + Duration::seconds(DEFAULT_ORIGIN_UNIX_SECONDS)
}

/// The Unix epoch, 1970-01-01T00:00:00Z.
pub fn unix_epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// Encodes `instant` as seconds since `origin`, with sub-second precision.
///
/// # Example
/// ```
/// use unitkit::time::{default_origin, encode_timestamp, unix_epoch};
/// assert_eq!(encode_timestamp(unix_epoch(), default_origin()), -978_307_200.0);
/// ```
pub fn encode_timestamp(instant: DateTime<Utc>, origin: DateTime<Utc>) -> f64 {
    let delta = instant.signed_duration_since(origin);
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
}

/// Decodes seconds since `origin` back into an instant.
///
/// Returns `None` for non-finite input or when the result is outside the representable range.
pub fn decode_timestamp(seconds: f64, origin: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as i64;
    let delta = Duration::try_seconds(whole as i64)?.checked_add(&Duration::nanoseconds(nanos))?;
    origin.checked_add_signed(delta)
}

/// An offset unit over the second whose zero is `epoch`, for encodings relative to `origin`.
///
/// A value `v` in the returned unit is `v + encode_timestamp(epoch, origin)` seconds since the origin.
///
/// # Errors
///
/// [`UnitError::MalformedUnit`](unitkit_core::UnitError::MalformedUnit) if the offset is not finite.
pub fn seconds_since(epoch: DateTime<Utc>, origin: DateTime<Utc>) -> UnitResult<Unit> {
    Unit::base(BaseUnit::SECOND).shift(encode_timestamp(epoch, origin))
}
