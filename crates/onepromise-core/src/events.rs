use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::CycleState;
use crate::outcome::Outcome;

/// Every state change in the daily cycle produces an Event.
/// Frontends poll for events; the CLI prints them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PromiseMade {
        day_key: String,
        text: String,
        at: DateTime<Utc>,
    },
    PromiseConfirmed {
        day_key: String,
        at: DateTime<Utc>,
    },
    ReflectionRecorded {
        day_key: String,
        outcome: Outcome,
        at: DateTime<Utc>,
    },
    /// Today's slot and ledger entry were discarded; the cycle starts over.
    TodayReset {
        day_key: String,
        at: DateTime<Utc>,
    },
    HistoryCleared {
        at: DateTime<Utc>,
    },
    LoggedOut {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: CycleState,
        day_key: String,
        promise: Option<String>,
        outcome: Option<Outcome>,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn events_serialize_with_type_tag() {
        let at = Utc.with_ymd_and_hms(2024, 3, 11, 9, 30, 0).unwrap();
        let event = Event::ReflectionRecorded {
            day_key: "2024-03-11".to_string(),
            outcome: Outcome::Kept,
            at,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ReflectionRecorded");
        assert_eq!(json["day_key"], "2024-03-11");
        assert_eq!(json["outcome"], "positive");
    }

    #[test]
    fn snapshot_round_trips() {
        let at = Utc.with_ymd_and_hms(2024, 3, 11, 9, 30, 0).unwrap();
        let event = Event::StateSnapshot {
            state: CycleState::Reflect,
            day_key: "2024-03-11".to_string(),
            promise: Some("Go for a walk".to_string()),
            outcome: None,
            at,
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        match back {
            Event::StateSnapshot { state, promise, .. } => {
                assert_eq!(state, CycleState::Reflect);
                assert_eq!(promise.as_deref(), Some("Go for a walk"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
