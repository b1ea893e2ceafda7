//! Staleness-checked store for the current logical day's promise and
//! reflection.
//!
//! Each record is tagged with the logical day it was written under. Every
//! read re-derives the current logical day and evicts the record when the
//! tags no longer match, so yesterday's promise can never leak into today.
//! Write failures surface as `StorageError`; read failures are absorbed,
//! logged, and reported as "absent".

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::day::{day_key_with_reset, RESET_HOUR};
use crate::error::{Result, StorageError, ValidationError};
use crate::outcome::Outcome;
use crate::storage::kv::KvStore;

const PROMISE_KEY: &str = "today_promise";
const PROMISE_DAY_KEY: &str = "today_promise_date";
const REFLECTION_KEY: &str = "today_reflection";
const REFLECTION_DAY_KEY: &str = "today_reflection_day";

/// The promise submitted for the current logical day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromiseRecord {
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// The reflection recorded for the current logical day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionRecord {
    pub outcome: Outcome,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Holds at most one promise and one reflection, both owned by the current
/// logical day.
pub struct TodaySlot<'a> {
    store: &'a dyn KvStore,
    reset_hour: u32,
}

impl<'a> TodaySlot<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self {
            store,
            reset_hour: RESET_HOUR,
        }
    }

    /// Override the reset hour (configuration hook; defaults to 06:00).
    pub fn with_reset_hour(mut self, reset_hour: u32) -> Self {
        self.reset_hour = reset_hour;
        self
    }

    fn current_day(&self, now: DateTime<Local>) -> String {
        day_key_with_reset(now.naive_local(), self.reset_hour)
    }

    /// Today's promise, or `None` when absent or stale.
    ///
    /// A record tagged with a different logical day is evicted before
    /// returning. Never fails: storage problems are logged and read as
    /// absent.
    pub fn promise(&self, now: DateTime<Local>) -> Option<PromiseRecord> {
        let today = self.current_day(now);
        let stored_day = match self.store.get(PROMISE_DAY_KEY) {
            Ok(day) => day,
            Err(e) => {
                tracing::error!("Failed to read promise day tag: {e}");
                return None;
            }
        };

        if stored_day.as_deref() != Some(today.as_str()) {
            self.evict_promise();
            return None;
        }

        let raw = match self.store.get(PROMISE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Failed to read promise record: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Corrupt promise record, treating as absent: {e}");
                None
            }
        }
    }

    /// Store a promise for the current logical day.
    ///
    /// The text is trimmed first; an empty result is rejected before
    /// anything is written.
    pub fn put_promise(&self, text: &str, now: DateTime<Local>) -> Result<PromiseRecord> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyPromise.into());
        }

        let record = PromiseRecord {
            text: trimmed.to_string(),
            created_at: now.with_timezone(&Utc),
        };
        let raw = serde_json::to_string(&record).map_err(StorageError::from)?;
        self.store.set(PROMISE_KEY, &raw)?;
        self.store.set(PROMISE_DAY_KEY, &self.current_day(now))?;
        Ok(record)
    }

    /// Today's reflection, staleness-checked with the same logical-day rule
    /// as the promise.
    pub fn reflection(&self, now: DateTime<Local>) -> Option<ReflectionRecord> {
        let today = self.current_day(now);
        let stored_day = match self.store.get(REFLECTION_DAY_KEY) {
            Ok(day) => day,
            Err(e) => {
                tracing::error!("Failed to read reflection day tag: {e}");
                return None;
            }
        };

        if stored_day.as_deref() != Some(today.as_str()) {
            self.evict_reflection();
            return None;
        }

        let raw = match self.store.get(REFLECTION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Failed to read reflection record: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Corrupt reflection record, treating as absent: {e}");
                None
            }
        }
    }

    /// Store a reflection for the current logical day.
    ///
    /// Write-once is not enforced here; the cycle engine guards against
    /// double submission.
    pub fn put_reflection(&self, outcome: Outcome, now: DateTime<Local>) -> Result<ReflectionRecord> {
        let record = ReflectionRecord {
            outcome,
            created_at: now.with_timezone(&Utc),
        };
        let raw = serde_json::to_string(&record).map_err(StorageError::from)?;
        self.store.set(REFLECTION_KEY, &raw)?;
        self.store.set(REFLECTION_DAY_KEY, &self.current_day(now))?;
        Ok(record)
    }

    /// Clear promise and reflection unconditionally (reset, logout).
    pub fn evict(&self) {
        self.evict_promise();
        self.evict_reflection();
    }

    fn evict_promise(&self) {
        for key in [PROMISE_KEY, PROMISE_DAY_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!("Failed to evict {key}: {e}");
            }
        }
    }

    fn evict_reflection(&self) {
        for key in [REFLECTION_KEY, REFLECTION_DAY_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!("Failed to evict {key}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKv;
    use chrono::TimeZone;

    fn local(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, hh, mm, 0).unwrap()
    }

    #[test]
    fn put_then_get_same_day() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv);
        let now = local(2026, 3, 10, 9, 0);

        slot.put_promise("  Drink more water  ", now).unwrap();
        let record = slot.promise(now).unwrap();
        assert_eq!(record.text, "Drink more water");
    }

    #[test]
    fn empty_text_is_rejected_before_writing() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv);
        let now = local(2026, 3, 10, 9, 0);

        assert!(slot.put_promise("   ", now).is_err());
        assert!(kv.get(PROMISE_KEY).unwrap().is_none());
        assert!(kv.get(PROMISE_DAY_KEY).unwrap().is_none());
    }

    #[test]
    fn stale_promise_is_evicted_on_read() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv);

        slot.put_promise("Go for a walk", local(2026, 3, 10, 23, 50))
            .unwrap();
        // 06:05 the next day is a new logical day.
        assert!(slot.promise(local(2026, 3, 11, 6, 5)).is_none());
        assert!(kv.get(PROMISE_KEY).unwrap().is_none());
        assert!(kv.get(PROMISE_DAY_KEY).unwrap().is_none());
    }

    #[test]
    fn promise_survives_past_midnight_until_reset_hour() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv);

        slot.put_promise("Stretch for 5 minutes", local(2026, 3, 10, 23, 50))
            .unwrap();
        // 00:30 is still the same logical day.
        let record = slot.promise(local(2026, 3, 11, 0, 30)).unwrap();
        assert_eq!(record.text, "Stretch for 5 minutes");
        // 05:59 as well.
        assert!(slot.promise(local(2026, 3, 11, 5, 59)).is_some());
        // 06:00 rolls over.
        assert!(slot.promise(local(2026, 3, 11, 6, 0)).is_none());
    }

    #[test]
    fn reflection_uses_the_same_boundary_rule() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv);

        slot.put_reflection(Outcome::Kept, local(2026, 3, 10, 22, 0))
            .unwrap();
        assert_eq!(
            slot.reflection(local(2026, 3, 11, 5, 59)).unwrap().outcome,
            Outcome::Kept
        );
        assert!(slot.reflection(local(2026, 3, 11, 6, 0)).is_none());
        assert!(kv.get(REFLECTION_KEY).unwrap().is_none());
    }

    #[test]
    fn evict_clears_both_records() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv);
        let now = local(2026, 3, 10, 12, 0);

        slot.put_promise("Tidy my desk", now).unwrap();
        slot.put_reflection(Outcome::Missed, now).unwrap();
        slot.evict();

        assert!(slot.promise(now).is_none());
        assert!(slot.reflection(now).is_none());
    }

    #[test]
    fn corrupt_record_reads_as_absent() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv);
        let now = local(2026, 3, 10, 12, 0);

        kv.set(PROMISE_DAY_KEY, "2026-03-10").unwrap();
        kv.set(PROMISE_KEY, "{not json").unwrap();
        assert!(slot.promise(now).is_none());
    }

    #[test]
    fn custom_reset_hour_moves_the_boundary() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv).with_reset_hour(4);

        slot.put_promise("Call granny", local(2026, 3, 10, 23, 50))
            .unwrap();
        assert!(slot.promise(local(2026, 3, 11, 3, 59)).is_some());
        assert!(slot.promise(local(2026, 3, 11, 4, 0)).is_none());
    }

    #[test]
    fn promise_and_reflection_wire_format() {
        let kv = MemoryKv::new();
        let slot = TodaySlot::new(&kv);
        let now = local(2026, 3, 10, 12, 0);

        slot.put_promise("Read 2 chapters of my book", now).unwrap();
        slot.put_reflection(Outcome::Kept, now).unwrap();

        let raw = kv.get(PROMISE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"text\""));
        assert!(raw.contains("\"createdAt\""));
        assert_eq!(kv.get(PROMISE_DAY_KEY).unwrap().unwrap(), "2026-03-10");

        let raw = kv.get(REFLECTION_KEY).unwrap().unwrap();
        assert!(raw.contains("\"outcome\":\"positive\""));
        assert_eq!(kv.get(REFLECTION_DAY_KEY).unwrap().unwrap(), "2026-03-10");
    }
}
