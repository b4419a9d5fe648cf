//! The strategy decision itself.
//!
//! [`StrategyFactory`] takes one look at a request, an optional stored
//! response and a clock snapshot, and produces the [`CacheStrategy`] a cache
//! should follow. The decision is pure: same inputs, same answer, no I/O.

use chrono::{DateTime, TimeDelta, Utc};
use http::{HeaderValue, header::{EXPIRES, IF_MODIFIED_SINCE, IF_NONE_MATCH, WARNING}};
use tracing::{debug, trace};

use crate::freshness::{current_age, freshness_lifetime, has_heuristic_freshness, seconds_delta};
use crate::validators::{Validators, conditional_from};
use crate::{CacheRequest, CachedResponse};

const WARNING_STALE: HeaderValue = HeaderValue::from_static("110 freshgate \"Response is stale\"");
const WARNING_HEURISTIC: HeaderValue =
    HeaderValue::from_static("113 freshgate \"Heuristic expiration\"");

/// What a cache should do with one request.
///
/// Exactly one of four shapes comes out of [`StrategyFactory::get`]:
/// network only, cache only, both (a conditional revalidation), or neither.
/// No other combination exists.
#[derive(Debug, Clone)]
pub enum CacheStrategy {
    /// Forward the request to the network; the cache has nothing usable.
    NetworkOnly(CacheRequest),
    /// Serve the stored response without touching the network. Warning
    /// headers for staleness were already appended where required.
    ServeCached(CachedResponse),
    /// Send the conditional request and combine the answer with the stored
    /// response on a 304.
    Revalidate {
        /// The original request with its condition header set.
        request: CacheRequest,
        /// The stored response the condition guards.
        cached: CachedResponse,
    },
    /// The request was `only-if-cached` but needs the network: answer
    /// 504 Gateway Timeout without sending anything.
    Unsatisfiable,
}

impl CacheStrategy {
    /// The request to send, if this strategy touches the network.
    pub fn network_request(&self) -> Option<&CacheRequest> {
        match self {
            CacheStrategy::NetworkOnly(request) | CacheStrategy::Revalidate { request, .. } => {
                Some(request)
            }
            CacheStrategy::ServeCached(_) | CacheStrategy::Unsatisfiable => None,
        }
    }

    /// The stored response to use, if this strategy touches the cache.
    pub fn cached_response(&self) -> Option<&CachedResponse> {
        match self {
            CacheStrategy::ServeCached(cached) | CacheStrategy::Revalidate { cached, .. } => {
                Some(cached)
            }
            CacheStrategy::NetworkOnly(_) | CacheStrategy::Unsatisfiable => None,
        }
    }
}

/// Whether `response` may be stored and later reused for `request`.
///
/// Status codes cacheable by default pass outright; 302 and 307 pass only
/// with an explicit freshness or scope marker (`Expires`, `max-age`,
/// `public` or `private`); everything else fails. A `no-store` on either
/// side vetoes the whole exchange.
pub fn is_cacheable(response: &CachedResponse, request: &CacheRequest) -> bool {
    match response.status().as_u16() {
        200 | 203 | 204 | 300 | 301 | 308 | 404 | 405 | 410 | 414 | 501 => {}
        302 | 307 => {
            let marked = response.headers().contains_key(EXPIRES)
                || response.cache_control().max_age().is_some()
                || response.cache_control().is_public()
                || response.cache_control().is_private();
            if !marked {
                return false;
            }
        }
        _ => return false,
    }
    !response.cache_control().no_store() && !request.cache_control().no_store()
}

fn has_conditions(request: &CacheRequest) -> bool {
    request.headers().contains_key(IF_MODIFIED_SINCE)
        || request.headers().contains_key(IF_NONE_MATCH)
}

/// Decides the cache strategy for one request against one stored response.
///
/// The factory snapshots the validator headers on construction and consumes
/// itself in [`get`](StrategyFactory::get), so a decision cannot observe two
/// different clocks or two versions of the stored record.
#[derive(Debug)]
pub struct StrategyFactory {
    now: DateTime<Utc>,
    request: CacheRequest,
    cached: Option<CachedResponse>,
    validators: Validators,
}

impl StrategyFactory {
    /// Prepares a decision for `request` at instant `now`, against whatever
    /// the cache had stored under its key (`None` for a miss).
    pub fn new(now: DateTime<Utc>, request: CacheRequest, cached: Option<CachedResponse>) -> Self {
        let validators = cached
            .as_ref()
            .map(|cached| Validators::from_headers(cached.headers()))
            .unwrap_or_default();
        StrategyFactory {
            now,
            request,
            cached,
            validators,
        }
    }

    /// Produces the strategy to follow.
    ///
    /// An `only-if-cached` request that would otherwise need the network
    /// comes back [`CacheStrategy::Unsatisfiable`]; every other input maps
    /// onto one of the three remaining shapes.
    pub fn get(self) -> CacheStrategy {
        let only_if_cached = self.request.cache_control().only_if_cached();
        let candidate = self.candidate();
        if only_if_cached && candidate.network_request().is_some() {
            debug!("request is only-if-cached but needs the network");
            return CacheStrategy::Unsatisfiable;
        }
        candidate
    }

    fn candidate(self) -> CacheStrategy {
        let StrategyFactory {
            now,
            request,
            cached,
            validators,
        } = self;

        let Some(cached) = cached else {
            return CacheStrategy::NetworkOnly(request);
        };

        if request.is_https() && !cached.has_handshake() {
            debug!("stored response is missing its TLS handshake");
            return CacheStrategy::NetworkOnly(request);
        }

        if !is_cacheable(&cached, &request) {
            return CacheStrategy::NetworkOnly(request);
        }

        if request.cache_control().no_cache() || has_conditions(&request) {
            debug!("request insists on the network");
            return CacheStrategy::NetworkOnly(request);
        }

        let age = current_age(&cached, &validators, now);
        let mut fresh = freshness_lifetime(&cached, &validators);
        if let Some(max_age) = request.cache_control().max_age() {
            fresh = fresh.min(seconds_delta(max_age));
        }
        let min_fresh = request
            .cache_control()
            .min_fresh()
            .map_or(TimeDelta::zero(), seconds_delta);
        let max_stale = if cached.cache_control().must_revalidate() {
            TimeDelta::zero()
        } else {
            request
                .cache_control()
                .max_stale()
                .map_or(TimeDelta::zero(), seconds_delta)
        };
        trace!(
            age_ms = age.num_milliseconds(),
            fresh_ms = fresh.num_milliseconds(),
            min_fresh_ms = min_fresh.num_milliseconds(),
            max_stale_ms = max_stale.num_milliseconds(),
            "freshness window computed"
        );

        if !cached.cache_control().no_cache() && age + min_fresh < fresh + max_stale {
            let mut response = cached;
            if age + min_fresh >= fresh {
                response.append_header(WARNING, WARNING_STALE);
            }
            if age > TimeDelta::hours(24) && has_heuristic_freshness(&response, &validators) {
                response.append_header(WARNING, WARNING_HEURISTIC);
            }
            debug!("serving stored response without revalidation");
            return CacheStrategy::ServeCached(response);
        }

        match conditional_from(&request, &validators) {
            Some(conditional) => {
                debug!("revalidating stored response");
                CacheStrategy::Revalidate {
                    request: conditional,
                    cached,
                }
            }
            None => CacheStrategy::NetworkOnly(request),
        }
    }
}
