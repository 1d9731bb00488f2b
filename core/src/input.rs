use anyhow::{anyhow, Result};

use crate::model::rating::Rating;

/// Resolves `key` against `candidates`: exact match first, then a unique prefix.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown rating: '{}'", key)),
        _ => Err(anyhow!("Ambiguous rating: '{}' matches {:?}", key, matches)),
    }
}

/// Accepts a score (`0`..`5`), a color identifier, or a label or unique label
/// prefix, case-insensitive (`exc`, `very`, `not passed`).
pub fn parse_rating(input: &str) -> Result<Rating> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty rating"));
    }

    if let Ok(score) = input.parse::<u8>() {
        return Rating::from_score(score).ok_or_else(|| anyhow!("Score must be 0-5, got {}", score));
    }

    if let Some(rating) = Rating::from_color(input) {
        return Ok(rating);
    }

    let labels: Vec<String> = Rating::ALL.iter().map(|r| r.label().to_lowercase()).collect();
    let candidates: Vec<&str> = labels.iter().map(String::as_str).collect();
    let full = expand_key(&input.to_lowercase(), &candidates)?;

    Rating::ALL
        .into_iter()
        .find(|r| r.label().to_lowercase() == full)
        .ok_or_else(|| anyhow!("Unknown rating: '{}'", input))
}
