use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How a workout day went. `Unrated` is an explicit neutral choice, which is
/// different from a day that has no rating at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rating {
    Unrated,
    Score1,
    Score2,
    Score3,
    Score4,
    Score5,
}

/// Color of days that belong to the previous or next month.
pub const INACTIVE_COLOR: &str = "rgba(255,244,229,1)";

/// Swatches of the rating overlay, left to right, top row first.
pub const PICKER_ROWS: [[Rating; 3]; 2] = [
    [Rating::Unrated, Rating::Score1, Rating::Score2],
    [Rating::Score3, Rating::Score4, Rating::Score5],
];

impl Default for Rating {
    fn default() -> Self {
        Rating::Unrated
    }
}

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::Unrated,
        Rating::Score1,
        Rating::Score2,
        Rating::Score3,
        Rating::Score4,
        Rating::Score5,
    ];

    /// Color identifier, also used as the persisted value.
    pub fn color(self) -> &'static str {
        match self {
            Rating::Unrated => "rgba(234,216,192,1)",
            Rating::Score1 => "#FF6666",
            Rating::Score2 => "#FFB266",
            Rating::Score3 => "#FFFF66",
            Rating::Score4 => "#B2FF66",
            Rating::Score5 => "#66FF66",
        }
    }

    pub fn from_color(color: &str) -> Option<Rating> {
        Rating::ALL.into_iter().find(|r| r.color() == color)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Unrated => "Not passed",
            Rating::Score1 => "Very bad",
            Rating::Score2 => "Bad",
            Rating::Score3 => "Satisfactory",
            Rating::Score4 => "Good",
            Rating::Score5 => "Excellent",
        }
    }

    /// Text drawn on the overlay swatch. The neutral swatch is blank.
    pub fn swatch_label(self) -> &'static str {
        match self {
            Rating::Unrated => "",
            Rating::Score1 => "1",
            Rating::Score2 => "2",
            Rating::Score3 => "3",
            Rating::Score4 => "4",
            Rating::Score5 => "5",
        }
    }

    pub fn score(self) -> u8 {
        match self {
            Rating::Unrated => 0,
            Rating::Score1 => 1,
            Rating::Score2 => 2,
            Rating::Score3 => 3,
            Rating::Score4 => 4,
            Rating::Score5 => 5,
        }
    }

    pub fn from_score(score: u8) -> Option<Rating> {
        Rating::ALL.get(usize::from(score)).copied()
    }

    /// Counts toward "not passed" in the monthly summary.
    pub fn is_neutral(self) -> bool {
        self == Rating::Unrated
    }

    /// Splits a `#RRGGBB` or `rgba(r,g,b,a)` identifier into its RGB parts.
    pub fn rgb(self) -> (u8, u8, u8) {
        parse_rgb(self.color()).unwrap_or((0, 0, 0))
    }
}

pub fn parse_rgb(color: &str) -> Option<(u8, u8, u8)> {
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        return Some((r, g, b));
    }
    let inner = color.strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    Some((r, g, b))
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.color())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = String::deserialize(deserializer)?;
        Rating::from_color(&color)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown rating color: {}", color)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_identifiers_are_distinct() {
        for a in Rating::ALL {
            for b in Rating::ALL {
                if a != b {
                    assert_ne!(a.color(), b.color());
                }
            }
        }
    }

    #[test]
    fn test_from_color() {
        assert_eq!(Rating::from_color("#FF6666"), Some(Rating::Score1));
        assert_eq!(Rating::from_color("rgba(234,216,192,1)"), Some(Rating::Unrated));
        assert_eq!(Rating::from_color("#ff6666"), None);
        assert_eq!(Rating::from_color(INACTIVE_COLOR), None);
    }

    #[test]
    fn test_serde_uses_color() {
        let json = serde_json::to_string(&Rating::Score5).unwrap();
        assert_eq!(json, "\"#66FF66\"");
        let back: Rating = serde_json::from_str("\"#FFFF66\"").unwrap();
        assert_eq!(back, Rating::Score3);
        assert!(serde_json::from_str::<Rating>("\"blue\"").is_err());
    }

    #[test]
    fn test_picker_rows_cover_every_rating_once() {
        let flat: Vec<Rating> = PICKER_ROWS.iter().flatten().copied().collect();
        assert_eq!(flat, Rating::ALL.to_vec());
    }

    #[test]
    fn test_rgb() {
        assert_eq!(Rating::Score2.rgb(), (0xFF, 0xB2, 0x66));
        assert_eq!(Rating::Unrated.rgb(), (234, 216, 192));
        assert_eq!(parse_rgb(INACTIVE_COLOR), Some((255, 244, 229)));
        assert_eq!(parse_rgb("#12"), None);
    }

    #[test]
    fn test_only_unrated_is_neutral() {
        let neutral: Vec<Rating> = Rating::ALL.into_iter().filter(|r| r.is_neutral()).collect();
        assert_eq!(neutral, vec![Rating::Unrated]);
    }

    #[test]
    fn test_score_round_trip() {
        for r in Rating::ALL {
            assert_eq!(Rating::from_score(r.score()), Some(r));
        }
        assert_eq!(Rating::from_score(6), None);
    }
}
