//! Rating table owned by whoever runs the ranked benchmark. No process-wide state.

use std::collections::BTreeMap;

pub const DEFAULT_STARTING_RATING: i32 = 1800;

/// Post-match rating update `(yours, opponent's, your_win) -> (new yours, new opponent's)`.
pub trait RatingRule: Sync {
    fn update(&self, your_rating: i32, opponent_rating: i32, your_win: bool) -> (i32, i32);
}

/// Leaves both ratings untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnchangedRating;

impl RatingRule for UnchangedRating {
    fn update(&self, your_rating: i32, opponent_rating: i32, _your_win: bool) -> (i32, i32) {
        (your_rating, opponent_rating)
    }
}

#[derive(Debug, Clone)]
pub struct RankingContext {
    starting_rating: i32,
    ratings: BTreeMap<String, i32>,
}

impl Default for RankingContext {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_RATING)
    }
}

impl RankingContext {
    pub fn new(starting_rating: i32) -> Self {
        Self {
            starting_rating,
            ratings: BTreeMap::new(),
        }
    }

    /// Current rating, registering `name` at the starting rating on first sight.
    pub fn rating(&mut self, name: &str) -> i32 {
        *self
            .ratings
            .entry(name.to_string())
            .or_insert(self.starting_rating)
    }

    pub fn set_rating(&mut self, name: &str, rating: i32) {
        self.ratings.insert(name.to_string(), rating);
    }

    pub fn ratings(&self) -> &BTreeMap<String, i32> {
        &self.ratings
    }

    /// Applies `rule` to one decided match between `yours` and `opponent`.
    pub fn record_match(
        &mut self,
        rule: &dyn RatingRule,
        yours: &str,
        opponent: &str,
        your_win: bool,
    ) {
        let (your_rating, opponent_rating) =
            rule.update(self.rating(yours), self.rating(opponent), your_win);
        self.set_rating(yours, your_rating);
        self.set_rating(opponent, opponent_rating);
    }
}
