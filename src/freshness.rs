//! Freshness lifetime and current age of a stored response.
//!
//! The two quantities a cache compares before serving a hit:
//! [`freshness_lifetime`] is how long the response was allowed to be served
//! without revalidation, [`current_age`] is how old it is right now by the
//! RFC 2616 §13.2.3 accounting. Both are plain functions of the stored
//! record and its validator snapshot; neither touches a clock on its own.

use chrono::{DateTime, TimeDelta, Utc};

use crate::{CachedResponse, Validators};

pub(crate) fn seconds_delta(value: u32) -> TimeDelta {
    TimeDelta::seconds(i64::from(value))
}

/// Computes how long `cached` stays fresh, by descending priority:
///
/// 1. a response `max-age` directive;
/// 2. `Expires` minus the served `Date`, with the arrival time standing in
///    when no `Date` parsed;
/// 3. a tenth of the gap between the served `Date` (or the request send
///    time) and `Last-Modified`, for responses without explicit expiry
///    whose URI has no query string;
/// 4. zero.
///
/// Never negative: a clock skew that would produce a negative lifetime
/// clamps to zero.
pub fn freshness_lifetime(cached: &CachedResponse, validators: &Validators) -> TimeDelta {
    if let Some(max_age) = cached.cache_control().max_age() {
        return seconds_delta(max_age);
    }
    if let Some(expires) = validators.expires() {
        let served = validators.served_date().unwrap_or(cached.received_at());
        return (expires - served).max(TimeDelta::zero());
    }
    if let Some(last_modified) = validators.last_modified() {
        if cached.request_uri().query().is_none() {
            let served = validators.served_date().unwrap_or(cached.sent_at());
            let interval = served - last_modified;
            if interval > TimeDelta::zero() {
                // Lifetime math is whole milliseconds; the tenth floors.
                return TimeDelta::milliseconds(interval.num_milliseconds() / 10);
            }
        }
    }
    TimeDelta::zero()
}

/// Whether the freshness of `cached` rests on the `Last-Modified` heuristic
/// rather than an explicit `max-age` or `Expires`.
pub fn has_heuristic_freshness(cached: &CachedResponse, validators: &Validators) -> bool {
    cached.cache_control().max_age().is_none() && validators.expires().is_none()
}

/// Computes the current age of `cached` at instant `now`.
///
/// RFC 2616 §13.2.3: the apparent age (arrival time minus served `Date`,
/// clamped at zero) is corrected upward by the `Age` header, then the
/// response transit time and the time spent resident in the cache are
/// added on top.
pub fn current_age(
    cached: &CachedResponse,
    validators: &Validators,
    now: DateTime<Utc>,
) -> TimeDelta {
    let apparent_age = match validators.served_date() {
        Some(served) => (cached.received_at() - served).max(TimeDelta::zero()),
        None => TimeDelta::zero(),
    };
    let corrected_age = match validators.age_seconds() {
        Some(age) => apparent_age.max(seconds_delta(age)),
        None => apparent_age,
    };
    let response_duration = cached.received_at() - cached.sent_at();
    let resident_duration = now - cached.received_at();
    corrected_age + response_duration + resident_duration
}
