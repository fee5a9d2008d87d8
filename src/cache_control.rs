//! Request-side `Cache-Control` directives.

use tracing::trace;

const NO_CACHE: &str = "no-cache";
const NO_STORE: &str = "no-store";
const NO_TRANSFORM: &str = "no-transform";
const ONLY_IF_CACHED: &str = "only-if-cached";
const MAX_AGE: &str = "max-age";
const MAX_STALE: &str = "max-stale";
const MIN_FRESH: &str = "min-fresh";

/// Bound given by a `max-stale` directive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MaxStale {
    /// Bare `max-stale`: a response of any staleness is acceptable.
    AnyAge,
    Seconds(u64),
}

/// Directives of one `Cache-Control` request header.
///
/// Unset age directives are `None`, which is distinct from zero.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct CacheControl {
    pub no_cache: bool,
    pub no_store: bool,
    pub no_transform: bool,
    pub only_if_cached: bool,
    pub max_age: Option<u64>,
    pub max_stale: Option<MaxStale>,
    pub min_fresh: Option<u64>,
}

impl CacheControl {
    /// Parses a header value.
    ///
    /// Tokens are matched by case-sensitive prefix. Unknown directives and
    /// malformed numeric values are ignored; parsing never fails.
    pub fn parse(value: &str) -> Self {
        let mut cc = Self::default();

        for directive in value.split(',').map(str::trim) {
            if directive.starts_with(NO_CACHE) {
                cc.no_cache = true;
            } else if directive.starts_with(NO_STORE) {
                cc.no_store = true;
            } else if directive.starts_with(NO_TRANSFORM) {
                cc.no_transform = true;
            } else if directive.starts_with(ONLY_IF_CACHED) {
                cc.only_if_cached = true;
            } else if directive.starts_with(MAX_AGE) {
                cc.max_age = seconds(directive);
            } else if directive == MAX_STALE {
                cc.max_stale = Some(MaxStale::AnyAge);
            } else if directive.starts_with(MAX_STALE) {
                cc.max_stale = seconds(directive).map(MaxStale::Seconds);
            } else if directive.starts_with(MIN_FRESH) {
                cc.min_fresh = seconds(directive);
            } else if !directive.is_empty() {
                trace!(directive, "ignoring unknown cache-control directive");
            }
        }

        cc
    }

    /// True when a `max-stale` directive of any form is present.
    #[inline]
    pub fn accepts_stale(&self) -> bool {
        self.max_stale.is_some()
    }
}

fn seconds(directive: &str) -> Option<u64> {
    let (_, value) = directive.split_once('=')?;
    match value.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            trace!(directive, "malformed cache-control age, treating as unset");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed() {
        let cc = CacheControl::parse("no-cache, max-age=60, max-stale");
        assert_eq!(
            cc,
            CacheControl {
                no_cache: true,
                max_age: Some(60),
                max_stale: Some(MaxStale::AnyAge),
                ..Default::default()
            }
        );
        assert!(cc.accepts_stale());
    }

    #[test]
    fn test_parse_expectations() {
        let expectations: Vec<(&str, CacheControl)> = vec![
            ("", CacheControl::default()),
            (" , ,", CacheControl::default()),
            (
                "no-store,no-transform,only-if-cached",
                CacheControl {
                    no_store: true,
                    no_transform: true,
                    only_if_cached: true,
                    ..Default::default()
                },
            ),
            (
                "max-stale=120, min-fresh=30",
                CacheControl {
                    max_stale: Some(MaxStale::Seconds(120)),
                    min_fresh: Some(30),
                    ..Default::default()
                },
            ),
            (
                "max-age=abc, min-fresh=-5, max-stale=1x",
                CacheControl::default(),
            ),
            ("max-age", CacheControl::default()),
            (
                "max-age = 10",
                CacheControl {
                    max_age: Some(10),
                    ..Default::default()
                },
            ),
            ("No-Cache, MAX-AGE=5", CacheControl::default()),
            (
                "private, x-vendor=1, no-cache=\"Set-Cookie\"",
                CacheControl {
                    no_cache: true,
                    ..Default::default()
                },
            ),
            (
                "max-age=0",
                CacheControl {
                    max_age: Some(0),
                    ..Default::default()
                },
            ),
        ];

        for (value, expected) in &expectations {
            assert_eq!(CacheControl::parse(value), *expected, "parsing {:?}", value);
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let v = "no-cache, max-age=60, max-stale=5";
        assert_eq!(CacheControl::parse(v), CacheControl::parse(v));
    }
}
