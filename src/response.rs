use chrono::{DateTime, Utc};
use http::{StatusCode, Uri, header::{HeaderMap, HeaderName, HeaderValue}};
use serde::{Deserialize, Serialize};

use crate::CacheControl;

/// A stored response record, exactly as a cache backend persists it.
///
/// Besides the status and headers this keeps the metadata freshness math
/// needs: the URI the response was stored under, the clock readings taken
/// when the originating request was sent and when the response arrived, and
/// whether the exchange completed a TLS handshake. Header values are kept
/// verbatim so that revalidation can echo them back byte for byte.
///
/// The record serializes with `serde`, so a backend can persist it in
/// whichever format it already speaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    #[serde(with = "http_serde::status_code")]
    status: StatusCode,
    #[serde(with = "http_serde::header_map")]
    headers: HeaderMap,
    cache_control: CacheControl,
    #[serde(with = "http_serde::uri")]
    request_uri: Uri,
    sent_at: DateTime<Utc>,
    received_at: DateTime<Utc>,
    has_handshake: bool,
}

impl CachedResponse {
    /// Starts building a record for a response with the given status.
    pub fn builder(status: StatusCode) -> CachedResponseBuilder {
        CachedResponseBuilder {
            status,
            headers: HeaderMap::new(),
            cache_control: CacheControl::default(),
            request_uri: Uri::from_static("/"),
            sent_at: DateTime::UNIX_EPOCH,
            received_at: DateTime::UNIX_EPOCH,
            has_handshake: false,
        }
    }

    /// Response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers, byte for byte as received.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Cache directives attached to the response.
    pub fn cache_control(&self) -> &CacheControl {
        &self.cache_control
    }

    /// URI of the request this response was stored for.
    pub fn request_uri(&self) -> &Uri {
        &self.request_uri
    }

    /// When the originating request left the client, by the local clock.
    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// When the response arrived, by the local clock.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Whether the exchange completed a TLS handshake.
    pub fn has_handshake(&self) -> bool {
        self.has_handshake
    }

    pub(crate) fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }
}

/// Builder for [`CachedResponse`].
///
/// Every field a setter does not touch keeps a defined default: empty
/// headers, no directives, request URI `/`, both clock readings at the Unix
/// epoch and no handshake.
#[derive(Debug)]
pub struct CachedResponseBuilder {
    status: StatusCode,
    headers: HeaderMap,
    cache_control: CacheControl,
    request_uri: Uri,
    sent_at: DateTime<Utc>,
    received_at: DateTime<Utc>,
    has_handshake: bool,
}

impl CachedResponseBuilder {
    /// Appends a response header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces all response headers at once.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the cache directives of the response.
    pub fn cache_control(mut self, cache_control: CacheControl) -> Self {
        self.cache_control = cache_control;
        self
    }

    /// Sets the URI the response was stored under.
    pub fn request_uri(mut self, uri: Uri) -> Self {
        self.request_uri = uri;
        self
    }

    /// Sets the local clock reading taken when the request was sent.
    pub fn sent_at(mut self, instant: DateTime<Utc>) -> Self {
        self.sent_at = instant;
        self
    }

    /// Sets the local clock reading taken when the response arrived.
    pub fn received_at(mut self, instant: DateTime<Utc>) -> Self {
        self.received_at = instant;
        self
    }

    /// Records whether the exchange completed a TLS handshake.
    pub fn has_handshake(mut self, handshake: bool) -> Self {
        self.has_handshake = handshake;
        self
    }

    /// Finalizes the record.
    pub fn build(self) -> CachedResponse {
        CachedResponse {
            status: self.status,
            headers: self.headers,
            cache_control: self.cache_control,
            request_uri: self.request_uri,
            sent_at: self.sent_at,
            received_at: self.received_at,
            has_handshake: self.has_handshake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::ETAG;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_defaults_are_inert() {
        let record = CachedResponse::builder(StatusCode::OK).build();
        assert_eq!(record.status(), StatusCode::OK);
        assert!(record.headers().is_empty());
        assert_eq!(record.cache_control(), &CacheControl::default());
        assert_eq!(record.request_uri(), &Uri::from_static("/"));
        assert_eq!(record.sent_at(), DateTime::UNIX_EPOCH);
        assert_eq!(record.received_at(), DateTime::UNIX_EPOCH);
        assert!(!record.has_handshake());
    }

    #[test]
    fn repeated_headers_are_kept() {
        let record = CachedResponse::builder(StatusCode::OK)
            .header(ETAG, HeaderValue::from_static("\"a\""))
            .header(ETAG, HeaderValue::from_static("\"b\""))
            .build();
        assert_eq!(record.headers().get_all(ETAG).iter().count(), 2);
    }
}
