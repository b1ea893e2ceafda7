//! Durable journal ledger: one entry per logical day.
//!
//! The ledger is a JSON array under a single key. Writes are
//! read-then-write: `upsert` locates the existing entry for the day and
//! replaces it in place rather than appending, which is what keeps the
//! one-entry-per-day invariant. A one-time repair pass heals entries whose
//! outcome predates the normalizer being the single source of truth.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::day::{day_key_with_reset, week_range, RESET_HOUR};
use crate::error::{Result, StorageError};
use crate::outcome::{self, Outcome};
use crate::storage::kv::KvStore;

const HISTORY_KEY: &str = "journal_history";
const REPAIR_MARKER_KEY: &str = "journal_repair_v1";

/// Persisted shape. `outcome` stays a raw string here so that legacy
/// invalid values survive deserialization long enough to be repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(rename = "dayKey")]
    day_key: String,
    date: DateTime<Utc>,
    promise: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<String>,
}

/// One journal row, with the outcome already canonicalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "dayKey")]
    pub day_key: String,
    pub date: DateTime<Utc>,
    pub promise: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl HistoryEntry {
    fn from_stored(stored: StoredEntry) -> Self {
        Self {
            day_key: stored.day_key,
            date: stored.date,
            promise: stored.promise,
            outcome: stored.outcome.as_deref().map(outcome::normalize),
        }
    }
}

/// Kept/made counts over the current calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekSummary {
    pub made: usize,
    pub kept: usize,
}

impl WeekSummary {
    /// The weekly banner line.
    pub fn headline(&self) -> String {
        let noun = if self.made == 1 { "promise" } else { "promises" };
        format!(
            "You kept {} out of {} {} this week.",
            self.kept, self.made, noun
        )
    }
}

/// Journal ledger over the key-value store.
pub struct HistoryLedger<'a> {
    store: &'a dyn KvStore,
    reset_hour: u32,
}

impl<'a> HistoryLedger<'a> {
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

    /// Raw entries in stored order. Read failures (storage or parse) are
    /// absorbed: logged and read as an empty ledger.
    fn load_entries(&self) -> Vec<StoredEntry> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read journal history: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Corrupt journal history, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    fn save_entries(&self, entries: &[StoredEntry]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(HISTORY_KEY, &raw)
    }

    /// All entries, most recent first by `date`.
    pub fn list_all(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .load_entries()
            .into_iter()
            .map(HistoryEntry::from_stored)
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Entries whose `date` falls inside the Monday-Sunday calendar week
    /// containing `now`, in stored order.
    pub fn list_current_week(&self, now: DateTime<Local>) -> Vec<HistoryEntry> {
        let (start, end) = week_range(now.naive_local());
        self.load_entries()
            .into_iter()
            .filter(|entry| {
                let local = entry.date.with_timezone(&Local).naive_local();
                local >= start && local <= end
            })
            .map(HistoryEntry::from_stored)
            .collect()
    }

    /// Insert or replace the entry for the current logical day.
    ///
    /// An existing entry is replaced in place, keeping its position; the
    /// replacement carries `now` as its `date`.
    pub fn upsert(
        &self,
        promise: &str,
        outcome: Option<Outcome>,
        now: DateTime<Local>,
    ) -> Result<HistoryEntry, StorageError> {
        let day_key = self.current_day(now);
        let mut entries = self.load_entries();

        let entry = StoredEntry {
            day_key: day_key.clone(),
            date: now.with_timezone(&Utc),
            promise: promise.to_string(),
            outcome: outcome.map(|o| o.as_str().to_string()),
        };

        match entries.iter().position(|e| e.day_key == day_key) {
            Some(index) => entries[index] = entry.clone(),
            None => entries.push(entry.clone()),
        }

        self.save_entries(&entries)?;
        Ok(HistoryEntry::from_stored(entry))
    }

    /// Record the outcome on the current logical day's entry.
    ///
    /// Returns `false` (after logging) when no entry exists for today: an
    /// outcome cannot be recorded before a promise. The entry's `date` is
    /// left untouched.
    pub fn set_outcome(&self, outcome: Outcome, now: DateTime<Local>) -> Result<bool, StorageError> {
        let day_key = self.current_day(now);
        let mut entries = self.load_entries();

        let Some(entry) = entries.iter_mut().find(|e| e.day_key == day_key) else {
            tracing::error!("No journal entry for {day_key} to record an outcome on");
            return Ok(false);
        };
        entry.outcome = Some(outcome.as_str().to_string());

        self.save_entries(&entries)?;
        Ok(true)
    }

    /// Delete the entry (if any) for the current logical day.
    pub fn remove_today(&self, now: DateTime<Local>) -> Result<(), StorageError> {
        let day_key = self.current_day(now);
        let mut entries = self.load_entries();
        entries.retain(|e| e.day_key != day_key);
        self.save_entries(&entries)
    }

    /// Delete the whole ledger and the repair marker.
    pub fn clear_all(&self) -> Result<(), StorageError> {
        self.store.remove(HISTORY_KEY)?;
        self.store.remove(REPAIR_MARKER_KEY)
    }

    /// One-time repair pass over legacy entries.
    ///
    /// Rewrites any present-but-invalid outcome through the normalizer and
    /// then sets the repair marker, so later calls are no-ops. The marker
    /// is set even when nothing needed repair; it is not set when the pass
    /// fails, so the next call retries. Returns the number of repaired
    /// entries.
    pub fn repair_once(&self) -> Result<usize, StorageError> {
        match self.store.get(REPAIR_MARKER_KEY) {
            Ok(Some(done)) if done == "true" => return Ok(0),
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Failed to read repair marker: {e}");
                return Ok(0);
            }
        }

        let mut entries = self.load_entries();
        let mut repaired = 0usize;

        for entry in entries.iter_mut() {
            if let Some(raw) = &entry.outcome {
                if !outcome::is_valid(raw) {
                    tracing::warn!(
                        "Repairing invalid outcome for entry {}: {raw}",
                        entry.day_key
                    );
                    entry.outcome = Some(outcome::normalize(raw).as_str().to_string());
                    repaired += 1;
                }
            }
        }

        if repaired > 0 {
            tracing::info!("Repaired {repaired} journal entries with invalid outcomes");
            self.save_entries(&entries)?;
        }

        self.store.set(REPAIR_MARKER_KEY, "true")?;
        Ok(repaired)
    }

    /// Kept/made counts for the calendar week containing `now`.
    pub fn week_summary(&self, now: DateTime<Local>) -> WeekSummary {
        let entries = self.list_current_week(now);
        let made = entries.len();
        let kept = entries
            .iter()
            .filter(|e| e.outcome == Some(Outcome::Kept))
            .count();
        WeekSummary { made, kept }
    }
}
