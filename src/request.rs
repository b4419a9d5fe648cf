use http::{Uri, header::{HeaderMap, HeaderName, HeaderValue}};

use crate::CacheControl;

/// An outgoing request as the cache sees it.
///
/// Carries the target URI, the request headers and the already-structured
/// cache directives. The engine never mutates a request it was given; the
/// revalidation path works on a copy.
#[derive(Debug, Clone)]
pub struct CacheRequest {
    uri: Uri,
    headers: HeaderMap,
    cache_control: CacheControl,
}

impl CacheRequest {
    /// Starts building a request for the given target URI.
    pub fn builder(uri: Uri) -> CacheRequestBuilder {
        CacheRequestBuilder {
            uri,
            headers: HeaderMap::new(),
            cache_control: CacheControl::default(),
        }
    }

    /// Target URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Cache directives attached to the request.
    pub fn cache_control(&self) -> &CacheControl {
        &self.cache_control
    }

    /// Whether the target URI uses the `https` scheme.
    pub fn is_https(&self) -> bool {
        self.uri.scheme() == Some(&http::uri::Scheme::HTTPS)
    }

    pub(crate) fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }
}

/// Builder for [`CacheRequest`].
#[derive(Debug)]
pub struct CacheRequestBuilder {
    uri: Uri,
    headers: HeaderMap,
    cache_control: CacheControl,
}

impl CacheRequestBuilder {
    /// Appends a request header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces all request headers at once.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the cache directives of the request.
    pub fn cache_control(mut self, cache_control: CacheControl) -> Self {
        self.cache_control = cache_control;
        self
    }

    /// Finalizes the request.
    pub fn build(self) -> CacheRequest {
        CacheRequest {
            uri: self.uri,
            headers: self.headers,
            cache_control: self.cache_control,
        }
    }
}
