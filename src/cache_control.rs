//! Structured `Cache-Control` directives.
//!
//! [`CacheControl`] is the engine's view of the directives it acts on, one
//! value per message side: requests carry `no-cache`, `no-store`,
//! `only-if-cached`, `max-age`, `min-fresh` and `max-stale`; responses carry
//! `no-cache`, `no-store`, `max-age`, `must-revalidate`, `public` and
//! `private`. Directives a cache does not act on are not modeled.
//!
//! Values are immutable once built. An absent header is simply
//! [`CacheControl::default()`], which enables no directive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cache directives attached to a single request or response.
///
/// Numeric directives are `None` when absent, so `max-age=0` and a missing
/// `max-age` stay distinguishable.
///
/// # Examples
///
/// ```
/// use freshgate::CacheControl;
///
/// let directives = CacheControl::builder()
///     .max_age(3600)
///     .must_revalidate()
///     .build();
/// assert_eq!(directives.max_age(), Some(3600));
/// assert_eq!(directives.to_string(), "max-age=3600, must-revalidate");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheControl {
    no_cache: bool,
    no_store: bool,
    max_age: Option<u32>,
    min_fresh: Option<u32>,
    max_stale: Option<u32>,
    only_if_cached: bool,
    must_revalidate: bool,
    public: bool,
    private: bool,
}

impl CacheControl {
    /// Starts building a directive set.
    pub fn builder() -> CacheControlBuilder {
        CacheControlBuilder::default()
    }

    /// `no-cache`: the holder must not be served from cache without
    /// revalidation.
    #[inline]
    pub fn no_cache(&self) -> bool {
        self.no_cache
    }

    /// `no-store`: the exchange must not be cached at all.
    #[inline]
    pub fn no_store(&self) -> bool {
        self.no_store
    }

    /// `max-age` in seconds, if present.
    #[inline]
    pub fn max_age(&self) -> Option<u32> {
        self.max_age
    }

    /// `min-fresh` in seconds, if present. Request side only.
    #[inline]
    pub fn min_fresh(&self) -> Option<u32> {
        self.min_fresh
    }

    /// `max-stale` in seconds, if present. Request side only.
    #[inline]
    pub fn max_stale(&self) -> Option<u32> {
        self.max_stale
    }

    /// `only-if-cached`: the client refuses to touch the network.
    #[inline]
    pub fn only_if_cached(&self) -> bool {
        self.only_if_cached
    }

    /// `must-revalidate`: the server forbids serving this response stale.
    #[inline]
    pub fn must_revalidate(&self) -> bool {
        self.must_revalidate
    }

    /// `public`: the response is explicitly marked cacheable.
    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// `private`: the response is cacheable for a single user only.
    #[inline]
    pub fn is_private(&self) -> bool {
        self.private
    }
}

impl fmt::Display for CacheControl {
    /// Renders the directives in canonical header syntax, e.g.
    /// `no-cache, max-age=60`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.no_cache {
            parts.push("no-cache".to_owned());
        }
        if self.no_store {
            parts.push("no-store".to_owned());
        }
        if let Some(seconds) = self.max_age {
            parts.push(format!("max-age={seconds}"));
        }
        if let Some(seconds) = self.min_fresh {
            parts.push(format!("min-fresh={seconds}"));
        }
        if let Some(seconds) = self.max_stale {
            parts.push(format!("max-stale={seconds}"));
        }
        if self.only_if_cached {
            parts.push("only-if-cached".to_owned());
        }
        if self.must_revalidate {
            parts.push("must-revalidate".to_owned());
        }
        if self.public {
            parts.push("public".to_owned());
        }
        if self.private {
            parts.push("private".to_owned());
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Builder for [`CacheControl`].
///
/// Boolean directives are enabled by calling the matching method; numeric
/// ones take their value in seconds. Methods consume and return the builder.
#[derive(Debug, Clone, Default)]
pub struct CacheControlBuilder {
    directives: CacheControl,
}

impl CacheControlBuilder {
    /// Enables `no-cache`.
    pub fn no_cache(mut self) -> Self {
        self.directives.no_cache = true;
        self
    }

    /// Enables `no-store`.
    pub fn no_store(mut self) -> Self {
        self.directives.no_store = true;
        self
    }

    /// Sets `max-age` in seconds.
    pub fn max_age(mut self, seconds: u32) -> Self {
        self.directives.max_age = Some(seconds);
        self
    }

    /// Sets `min-fresh` in seconds.
    pub fn min_fresh(mut self, seconds: u32) -> Self {
        self.directives.min_fresh = Some(seconds);
        self
    }

    /// Sets `max-stale` in seconds.
    pub fn max_stale(mut self, seconds: u32) -> Self {
        self.directives.max_stale = Some(seconds);
        self
    }

    /// Enables `only-if-cached`.
    pub fn only_if_cached(mut self) -> Self {
        self.directives.only_if_cached = true;
        self
    }

    /// Enables `must-revalidate`.
    pub fn must_revalidate(mut self) -> Self {
        self.directives.must_revalidate = true;
        self
    }

    /// Enables `public`.
    pub fn public(mut self) -> Self {
        self.directives.public = true;
        self
    }

    /// Enables `private`.
    pub fn private(mut self) -> Self {
        self.directives.private = true;
        self
    }

    /// Finalizes the directive set.
    pub fn build(self) -> CacheControl {
        self.directives
    }
}
