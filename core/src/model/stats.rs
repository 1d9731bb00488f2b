use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::rating::Rating;

/// Day of month -> rating. Only explicitly rated days have an entry.
pub type RatingMap = BTreeMap<u32, Rating>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingCounts {
    pub days_in_month: u32,
    /// Days with no entry at all.
    pub not_rated: u32,
    /// Days explicitly rated as neutral.
    pub explicit_neutral: u32,
    /// Indexed by score - 1.
    pub scores: [u32; 5],
}

impl RatingCounts {
    pub fn aggregate(marks: &RatingMap, days_in_month: u32) -> Self {
        let mut counts = Self {
            days_in_month,
            ..Self::default()
        };

        let mut rated_days = 0;
        for (&day, &rating) in marks {
            if day == 0 || day > days_in_month {
                continue;
            }
            rated_days += 1;
            if rating.is_neutral() {
                counts.explicit_neutral += 1;
            } else {
                counts.scores[usize::from(rating.score()) - 1] += 1;
            }
        }
        counts.not_rated = days_in_month - rated_days;
        counts
    }

    pub fn not_passed(&self) -> u32 {
        self.not_rated + self.explicit_neutral
    }

    pub fn count(&self, rating: Rating) -> u32 {
        if rating.is_neutral() {
            self.not_passed()
        } else {
            self.scores[usize::from(rating.score()) - 1]
        }
    }

    /// The six summary rows in display order: not passed, then scores 1..5.
    pub fn buckets(&self) -> [(Rating, u32); 6] {
        Rating::ALL.map(|r| (r, self.count(r)))
    }

    pub fn passed(&self) -> u32 {
        self.scores.iter().sum()
    }
}
