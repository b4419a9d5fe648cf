//! Lenient decoding of the few header values the engine consumes.
//!
//! HTTP servers emit malformed dates and ages all the time, and a cache that
//! errors out on them serves nobody. Every function here therefore returns
//! `Option`: an unreadable value is treated as an absent one and the caller
//! falls back to its documented default.

use chrono::{DateTime, Utc};
use http::HeaderValue;
use std::time::UNIX_EPOCH;

/// Decodes an HTTP date header value (`Date`, `Expires`, `Last-Modified`).
///
/// All three formats of RFC 7231 §7.1.1.1 are accepted: IMF-fixdate,
/// obsolete RFC 850 and ANSI C `asctime()`. Anything else yields `None`.
pub fn parse_http_date(value: &HeaderValue) -> Option<DateTime<Utc>> {
    let text = value.to_str().ok()?;
    let time = httpdate::parse_http_date(text.trim()).ok()?;
    let since_epoch = time.duration_since(UNIX_EPOCH).ok()?;
    DateTime::from_timestamp_millis(i64::try_from(since_epoch.as_millis()).ok()?)
}

/// Decodes a non-negative integer of seconds, as carried by `Age` and the
/// numeric cache directives.
///
/// Values beyond `u32::MAX` saturate instead of failing; negative or
/// non-numeric values yield `None`.
pub fn parse_seconds(value: &HeaderValue) -> Option<u32> {
    let text = value.to_str().ok()?;
    let seconds = text.trim().parse::<u64>().ok()?;
    Some(u32::try_from(seconds).unwrap_or(u32::MAX))
}
