//! Rating configuration stored as a world resource.

use bevy_ecs::prelude::Resource;

use crate::error::RideError;

/// Lowest score of the conventional five-star scale.
pub const FIVE_STAR_MIN: i32 = 1;
/// Highest score of the conventional five-star scale.
pub const FIVE_STAR_MAX: i32 = 5;

/// Controls how scores are checked when a rating is recorded.
///
/// The default accepts any integer score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Resource)]
pub struct RatingConfig {
    /// Inclusive `(min, max)` bounds. `None` disables validation.
    pub score_bounds: Option<(i32, i32)>,
}

impl RatingConfig {
    /// Scores restricted to 1..=5.
    pub fn five_star() -> Self {
        Self::default().with_score_bounds(FIVE_STAR_MIN, FIVE_STAR_MAX)
    }

    pub fn with_score_bounds(mut self, min: i32, max: i32) -> Self {
        debug_assert!(min <= max, "score bounds must satisfy min <= max");
        self.score_bounds = Some((min, max));
        self
    }

    pub fn without_score_bounds(mut self) -> Self {
        self.score_bounds = None;
        self
    }

    pub fn check_score(&self, score: i32) -> Result<(), RideError> {
        match self.score_bounds {
            Some((min, max)) if !(min..=max).contains(&score) => {
                Err(RideError::ScoreOutOfRange { score, min, max })
            }
            _ => Ok(()),
        }
    }
}
