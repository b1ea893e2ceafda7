//! Reflection outcome canonicalization.
//!
//! The thumb-gesture <-> stored-outcome mapping lives here and nowhere
//! else; every other component goes through this module, which keeps the
//! two representations from drifting apart. `normalize` is also the single
//! repair point for values read back from storage.

use serde::{Deserialize, Serialize};

/// End-of-day verdict on the promise. Persisted as `positive`/`negative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "positive")]
    Kept,
    #[serde(rename = "negative")]
    Missed,
}

/// Two-valued reflection gesture. Persisted as `up`/`down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Thumb {
    Up,
    Down,
}

impl Outcome {
    /// Canonical gesture mapping: thumbs up = kept, thumbs down = missed.
    pub fn from_thumb(thumb: Thumb) -> Self {
        match thumb {
            Thumb::Up => Outcome::Kept,
            Thumb::Down => Outcome::Missed,
        }
    }

    /// Reverse mapping, for rendering a recorded outcome as a gesture.
    pub fn as_thumb(self) -> Thumb {
        match self {
            Outcome::Kept => Thumb::Up,
            Outcome::Missed => Thumb::Down,
        }
    }

    /// Stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Kept => "positive",
            Outcome::Missed => "negative",
        }
    }

    /// Short label for human-facing listings.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Kept => "Kept promise",
            Outcome::Missed => "Did not keep promise",
        }
    }
}

/// Parse a stored outcome string without side effects.
pub fn parse_outcome(raw: &str) -> Option<Outcome> {
    match raw {
        "positive" => Some(Outcome::Kept),
        "negative" => Some(Outcome::Missed),
        _ => None,
    }
}

/// True when `raw` is one of the two valid stored forms.
pub fn is_valid(raw: &str) -> bool {
    parse_outcome(raw).is_some()
}

/// Validate and canonicalize a value read back from storage.
///
/// Anything that is not a valid outcome is a data corruption: it is logged
/// and mapped to the pessimistic default, never propagated.
pub fn normalize(raw: &str) -> Outcome {
    match parse_outcome(raw) {
        Some(outcome) => outcome,
        None => {
            tracing::warn!("Invalid outcome value '{raw}', defaulting to negative");
            Outcome::Missed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn thumb_mapping_round_trips() {
        assert_eq!(Outcome::from_thumb(Thumb::Up), Outcome::Kept);
        assert_eq!(Outcome::from_thumb(Thumb::Down), Outcome::Missed);
        for outcome in [Outcome::Kept, Outcome::Missed] {
            assert_eq!(Outcome::from_thumb(outcome.as_thumb()), outcome);
        }
        for thumb in [Thumb::Up, Thumb::Down] {
            assert_eq!(Outcome::from_thumb(thumb).as_thumb(), thumb);
        }
    }

    #[test]
    fn wire_format_is_positive_negative() {
        assert_eq!(serde_json::to_string(&Outcome::Kept).unwrap(), "\"positive\"");
        assert_eq!(serde_json::to_string(&Outcome::Missed).unwrap(), "\"negative\"");
        assert_eq!(serde_json::to_string(&Thumb::Up).unwrap(), "\"up\"");
    }

    #[test]
    fn valid_values_pass_through_normalize() {
        assert_eq!(normalize("positive"), Outcome::Kept);
        assert_eq!(normalize("negative"), Outcome::Missed);
    }

    #[test]
    fn invalid_values_default_to_missed() {
        assert_eq!(normalize(""), Outcome::Missed);
        assert_eq!(normalize("POSITIVE"), Outcome::Missed);
        assert_eq!(normalize("maybe"), Outcome::Missed);
    }

    #[test]
    fn validity_predicate() {
        assert!(is_valid("positive"));
        assert!(is_valid("negative"));
        assert!(!is_valid("neutral"));
        assert!(!is_valid(""));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "\\PC*") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(once.as_str()), once);
        }
    }
}
