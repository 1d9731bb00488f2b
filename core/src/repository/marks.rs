use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::Value;

use crate::model::calendar::DisplayMonth;
use crate::model::rating::Rating;
use crate::model::stats::RatingMap;
use crate::repository::traits::KeyValueStore;

pub const MARKS_KEY: &str = "@marks";

/// Store key for a month's ratings. The default month keeps the plain
/// `@marks` key; any other month gets `@marks:YYYY-MM`.
pub fn marks_key(month: DisplayMonth) -> String {
    if month == DisplayMonth::default() {
        MARKS_KEY.to_string()
    } else {
        format!("{}:{:04}-{:02}", MARKS_KEY, month.year, month.month0 + 1)
    }
}

/// Reads and writes the rating map as `{"<day>": "<color>"}` under one key.
pub struct MarksRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> MarksRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: MARKS_KEY.to_string(),
        }
    }

    pub fn for_month(store: S, month: DisplayMonth) -> Self {
        Self {
            store,
            key: marks_key(month),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails: anything unreadable comes back as an empty map.
    pub fn load(&self, days_in_month: u32) -> RatingMap {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => decode_marks(&raw, days_in_month),
            Ok(None) => RatingMap::new(),
            Err(err) => {
                tracing::warn!("Could not read {}: {:#}", self.key, err);
                RatingMap::new()
            }
        }
    }

    pub fn save(&self, marks: &RatingMap) -> Result<()> {
        self.store.set(&self.key, encode_marks(marks)?)
    }
}

pub fn encode_marks(marks: &RatingMap) -> Result<String> {
    let by_day: BTreeMap<String, &Rating> =
        marks.iter().map(|(day, r)| (day.to_string(), r)).collect();
    Ok(serde_json::to_string(&by_day)?)
}

/// Lenient decode. A value that is not a JSON object yields an empty map;
/// single entries with a bad day or an unknown color are dropped.
pub fn decode_marks(raw: &str, days_in_month: u32) -> RatingMap {
    let object = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            tracing::warn!("Stored marks are not an object ({}), starting empty", kind(&other));
            return RatingMap::new();
        }
        Err(err) => {
            tracing::warn!("Stored marks are not valid JSON: {}", err);
            return RatingMap::new();
        }
    };

    let mut marks = RatingMap::new();
    for (key, value) in object {
        let day = match key.trim().parse::<u32>() {
            Ok(day) if (1..=days_in_month).contains(&day) => day,
            _ => {
                tracing::warn!("Dropping mark for invalid day {:?}", key);
                continue;
            }
        };
        match value.as_str().and_then(Rating::from_color) {
            Some(rating) => {
                marks.insert(day, rating);
            }
            None => tracing::warn!("Dropping mark for day {} with unknown color {}", day, value),
        }
    }
    marks
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryKeyValueStore;

    #[test]
    fn test_encode_uses_day_keys_and_colors() {
        let marks: RatingMap = [(3, Rating::Score1), (12, Rating::Unrated)].into_iter().collect();
        let encoded = encode_marks(&marks).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["3"], "#FF6666");
        assert_eq!(value["12"], "rgba(234,216,192,1)");
    }

    #[test]
    fn test_decode_round_trip() {
        let marks: RatingMap = [(1, Rating::Score5), (30, Rating::Score2)].into_iter().collect();
        let encoded = encode_marks(&marks).unwrap();
        assert_eq!(decode_marks(&encoded, 30), marks);
    }

    #[test]
    fn test_decode_non_object_is_empty() {
        assert!(decode_marks("\"hello\"", 30).is_empty());
        assert!(decode_marks("[1,2,3]", 30).is_empty());
        assert!(decode_marks("null", 30).is_empty());
        assert!(decode_marks("{not json", 30).is_empty());
    }

    #[test]
    fn test_decode_drops_bad_entries() {
        let raw = r##"{"1":"#FF6666","31":"#FF6666","0":"#66FF66","x":"#66FF66","2":"blue","3":7}"##;
        let marks = decode_marks(raw, 30);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks.get(&1), Some(&Rating::Score1));
    }

    #[test]
    fn test_marks_key_per_month() {
        assert_eq!(marks_key(DisplayMonth::default()), "@marks");
        assert_eq!(marks_key(DisplayMonth { year: 2025, month0: 1 }), "@marks:2025-02");
        assert_eq!(marks_key(DisplayMonth { year: 2024, month0: 11 }), "@marks:2024-12");
    }

    #[test]
    fn test_months_do_not_share_ratings() {
        let store = MemoryKeyValueStore::new();
        let june = MarksRepository::for_month(&store, DisplayMonth::default());
        let feb = MarksRepository::for_month(&store, DisplayMonth { year: 2025, month0: 1 });
        let marks: RatingMap = [(30, Rating::Score4)].into_iter().collect();
        june.save(&marks).unwrap();

        assert!(feb.load(28).is_empty());
        feb.save(&[(1, Rating::Score1)].into_iter().collect()).unwrap();
        assert_eq!(june.load(30), marks);
    }

    #[test]
    fn test_repository_load_missing_key() {
        let repo = MarksRepository::new(MemoryKeyValueStore::new());
        assert!(repo.load(30).is_empty());
    }

    #[test]
    fn test_repository_save_then_load() {
        let repo = MarksRepository::new(MemoryKeyValueStore::new());
        let marks: RatingMap = [(7, Rating::Score4)].into_iter().collect();
        repo.save(&marks).unwrap();
        assert_eq!(repo.load(30), marks);
        assert_eq!(repo.store().write_count(), 1);
    }
}
