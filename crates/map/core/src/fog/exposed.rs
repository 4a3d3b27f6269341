use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::Region;

static NOTHING: Region = Region::empty();

/// Identifier of a token that keeps its own exposure history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenId(pub u32);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token#{}", self.0)
    }
}

/// Everything ever revealed on one zone, globally and per token.
///
/// Histories only grow; the reset methods are the sole way to shrink them.
#[derive(Clone, Debug, Default)]
pub struct ExposedAreaTracker {
    zone: Region,
    tokens: BTreeMap<TokenId, Region>,
    revision: u64,
}

impl ExposedAreaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zone_history(&self) -> &Region {
        &self.zone
    }

    /// Exposure history of `token`; empty for tokens that never saw anything.
    pub fn token_history(&self, token: TokenId) -> &Region {
        self.tokens.get(&token).unwrap_or(&NOTHING)
    }

    pub fn tokens(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.tokens.keys().copied()
    }

    /// Bumped on every change, so callers can tell stale derived data apart.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Adds `area` to the zone-wide history. Returns whether anything new was revealed.
    pub fn expose_zone(&mut self, area: &Region) -> bool {
        if area.is_empty() || self.zone.contains_region(area) {
            return false;
        }
        self.zone.add(area);
        self.revision += 1;
        true
    }

    /// Adds `area` to the history of `token` only.
    pub fn expose_token(&mut self, token: TokenId, area: &Region) -> bool {
        if area.is_empty() {
            return false;
        }
        let history = self.tokens.entry(token).or_default();
        if history.contains_region(area) {
            return false;
        }
        history.add(area);
        self.revision += 1;
        true
    }

    /// Forgets the zone-wide history, and the token histories unless `global_only`.
    pub fn reset(&mut self, global_only: bool) {
        self.zone = Region::empty();
        if !global_only {
            self.tokens.clear();
        }
        self.revision += 1;
    }

    /// Forgets the histories of the given tokens.
    pub fn reset_tokens<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = TokenId>,
    {
        for token in tokens {
            if self.tokens.remove(&token).is_some() {
                self.revision += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};

    fn square(x: i32) -> Region {
        Region::from_rect(Rect::new(x, 0, 10, 10))
    }

    #[test]
    fn histories_grow_and_report_changes() {
        let mut tracker = ExposedAreaTracker::new();
        assert!(tracker.expose_zone(&square(0)));
        assert!(!tracker.expose_zone(&square(0)));
        assert!(tracker.expose_zone(&square(10)));
        assert_eq!(tracker.zone_history().area(), 200.0);
        assert_eq!(tracker.revision(), 2);
    }

    #[test]
    fn token_exposure_stays_with_the_token() {
        let mut tracker = ExposedAreaTracker::new();
        tracker.expose_token(TokenId(1), &square(0));
        assert!(tracker.zone_history().is_empty());
        assert!(tracker.token_history(TokenId(1)).contains(Point::new(5.0, 5.0)));
        assert!(tracker.token_history(TokenId(2)).is_empty());
    }

    #[test]
    fn resets() {
        let mut tracker = ExposedAreaTracker::new();
        tracker.expose_zone(&square(0));
        tracker.expose_token(TokenId(1), &square(20));
        tracker.expose_token(TokenId(2), &square(40));

        tracker.reset(true);
        assert!(tracker.zone_history().is_empty());
        assert_eq!(tracker.tokens().count(), 2);

        tracker.reset_tokens([TokenId(1)]);
        assert_eq!(tracker.tokens().collect::<Vec<_>>(), vec![TokenId(2)]);

        tracker.reset(false);
        assert_eq!(tracker.tokens().count(), 0);
    }
}
