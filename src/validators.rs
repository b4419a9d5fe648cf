//! Validator metadata and conditional request construction.
//!
//! [`Validators`] is a snapshot of the handful of response headers freshness
//! math and revalidation care about. It is taken once per decision, so the
//! engine never re-reads headers mid-flight, and it keeps the raw header
//! bytes next to the parsed values: a conditional request must echo the
//! server's own `Last-Modified` or `Date` text back verbatim, because some
//! servers compare validator strings instead of parsing them.

use chrono::{DateTime, Utc};
use http::{
    HeaderMap, HeaderValue,
    header::{AGE, DATE, ETAG, EXPIRES, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED},
};

use crate::parse::{parse_http_date, parse_seconds};
use crate::{CacheRequest, CachedResponse};

/// Parsed-and-raw snapshot of a response's validator headers.
///
/// Built with [`Validators::from_headers`]; a header that is missing or
/// unreadable leaves its slot `None`.
#[derive(Debug, Clone, Default)]
pub struct Validators {
    served_date: Option<DateTime<Utc>>,
    served_date_value: Option<HeaderValue>,
    last_modified: Option<DateTime<Utc>>,
    last_modified_value: Option<HeaderValue>,
    expires: Option<DateTime<Utc>>,
    etag: Option<HeaderValue>,
    age_seconds: Option<u32>,
}

impl Validators {
    /// Snapshots the validator headers of a stored response.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Validators {
            served_date: headers.get(DATE).and_then(parse_http_date),
            served_date_value: headers.get(DATE).cloned(),
            last_modified: headers.get(LAST_MODIFIED).and_then(parse_http_date),
            last_modified_value: headers.get(LAST_MODIFIED).cloned(),
            expires: headers.get(EXPIRES).and_then(parse_http_date),
            etag: headers.get(ETAG).cloned(),
            age_seconds: headers.get(AGE).and_then(parse_seconds),
        }
    }

    /// `Date` header, parsed.
    pub fn served_date(&self) -> Option<DateTime<Utc>> {
        self.served_date
    }

    /// `Date` header, raw bytes.
    pub fn served_date_value(&self) -> Option<&HeaderValue> {
        self.served_date_value.as_ref()
    }

    /// `Last-Modified` header, parsed.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// `Last-Modified` header, raw bytes.
    pub fn last_modified_value(&self) -> Option<&HeaderValue> {
        self.last_modified_value.as_ref()
    }

    /// `Expires` header, parsed.
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    /// `ETag` header, raw bytes.
    pub fn etag(&self) -> Option<&HeaderValue> {
        self.etag.as_ref()
    }

    /// `Age` header in seconds, if readable.
    pub fn age_seconds(&self) -> Option<u32> {
        self.age_seconds
    }
}

/// Derives the conditional request that would revalidate `cached`.
///
/// Validator precedence is `ETag` (as `If-None-Match`), then `Last-Modified`
/// and finally `Date` (both as `If-Modified-Since`, echoed verbatim). A
/// response with no usable validator cannot be revalidated and yields
/// `None`.
pub fn conditional_request(
    request: &CacheRequest,
    cached: &CachedResponse,
) -> Option<CacheRequest> {
    conditional_from(request, &Validators::from_headers(cached.headers()))
}

pub(crate) fn conditional_from(
    request: &CacheRequest,
    validators: &Validators,
) -> Option<CacheRequest> {
    let (name, value) = if let Some(etag) = validators.etag() {
        (IF_NONE_MATCH, etag.clone())
    } else if let Some(raw) = validators.last_modified().and(validators.last_modified_value()) {
        (IF_MODIFIED_SINCE, raw.clone())
    } else if let Some(raw) = validators.served_date().and(validators.served_date_value()) {
        (IF_MODIFIED_SINCE, raw.clone())
    } else {
        return None;
    };
    let mut conditional = request.clone();
    conditional.insert_header(name, value);
    Some(conditional)
}
