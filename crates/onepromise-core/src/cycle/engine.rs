//! Daily cycle state machine.
//!
//! The cycle is storage-backed: every command writes through the today
//! slot and the history ledger, and `resume()` rederives the state from
//! whatever those stores hold. The machine keeps nothing that cannot be
//! rebuilt from storage after a restart.
//!
//! ## State Transitions
//!
//! ```text
//! Create -> Confirm -> Reflect -> Rest
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CycleEngine::new(&store);
//! engine.resume(Local::now());
//! engine.submit("Read ten pages", Local::now())?;
//! ```

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::day;
use crate::error::Result;
use crate::events::Event;
use crate::outcome::{Outcome, Thumb};
use crate::session::PostLogoutFlag;
use crate::storage::{HistoryLedger, KvStore, TodaySlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleState {
    /// No promise yet for the current logical day.
    Create,
    /// Promise written, waiting for the user to acknowledge it.
    Confirm,
    /// Promise stands; the day's outcome has not been recorded.
    Reflect,
    /// Outcome recorded. Nothing left to do until the next reset.
    Rest,
}

impl CycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleState::Create => "create",
            CycleState::Confirm => "confirm",
            CycleState::Reflect => "reflect",
            CycleState::Rest => "rest",
        }
    }
}

/// Storage-backed engine for the one-promise-a-day cycle.
///
/// Commands return `Some(Event)` when they change something and `None`
/// when ignored. State is never trusted across restarts; call
/// `resume()` after constructing to sync with storage.
pub struct CycleEngine<'a> {
    slot: TodaySlot<'a>,
    ledger: HistoryLedger<'a>,
    state: CycleState,
    reset_hour: u32,
}

impl<'a> CycleEngine<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self {
            slot: TodaySlot::new(store),
            ledger: HistoryLedger::new(store),
            state: CycleState::Create,
            reset_hour: day::RESET_HOUR,
        }
    }

    pub fn with_reset_hour(mut self, reset_hour: u32) -> Self {
        self.reset_hour = reset_hour;
        self.slot = self.slot.with_reset_hour(reset_hour);
        self.ledger = self.ledger.with_reset_hour(reset_hour);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Day key for `now` under this engine's reset hour.
    pub fn current_day(&self, now: DateTime<Local>) -> String {
        day::day_key_with_reset(now.naive_local(), self.reset_hour)
    }

    pub fn ledger(&self) -> &HistoryLedger<'a> {
        &self.ledger
    }

    pub fn slot(&self) -> &TodaySlot<'a> {
        &self.slot
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Local>) -> Event {
        Event::StateSnapshot {
            state: self.state,
            day_key: self.current_day(now),
            promise: self.slot.promise(now).map(|r| r.text),
            outcome: self.slot.reflection(now).map(|r| r.outcome),
            at: now.with_timezone(&Utc),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Rederive the state from storage.
    ///
    /// A stored reflection means the day is done; a stored promise
    /// without one means the outcome is still open. `Confirm` is a
    /// transient screen and is never restored.
    pub fn resume(&mut self, now: DateTime<Local>) -> CycleState {
        self.state = if self.slot.reflection(now).is_some() {
            CycleState::Rest
        } else if self.slot.promise(now).is_some() {
            CycleState::Reflect
        } else {
            CycleState::Create
        };
        self.state
    }

    /// Record today's promise and open its ledger entry.
    pub fn submit(&mut self, text: &str, now: DateTime<Local>) -> Result<Option<Event>> {
        match self.state {
            CycleState::Create => {
                let record = self.slot.put_promise(text, now)?;
                self.ledger.upsert(&record.text, None, now)?;
                self.state = CycleState::Confirm;
                Ok(Some(Event::PromiseMade {
                    day_key: self.current_day(now),
                    text: record.text,
                    at: now.with_timezone(&Utc),
                }))
            }
            _ => {
                tracing::warn!("Ignoring promise submission in {:?} state", self.state);
                Ok(None)
            }
        }
    }

    /// Acknowledge the freshly made promise.
    pub fn confirm(&mut self, now: DateTime<Local>) -> Option<Event> {
        match self.state {
            CycleState::Confirm => {
                self.state = CycleState::Reflect;
                Some(Event::PromiseConfirmed {
                    day_key: self.current_day(now),
                    at: now.with_timezone(&Utc),
                })
            }
            _ => None,
        }
    }

    /// Record the day's outcome. The first stored reflection wins; a
    /// second attempt for the same day changes nothing.
    pub fn reflect(&mut self, thumb: Thumb, now: DateTime<Local>) -> Result<Option<Event>> {
        if self.state != CycleState::Reflect {
            tracing::warn!("Ignoring reflection in {:?} state", self.state);
            return Ok(None);
        }
        if self.slot.reflection(now).is_some() {
            tracing::warn!(
                "Reflection already recorded for {}; keeping the first one",
                self.current_day(now)
            );
            self.state = CycleState::Rest;
            return Ok(None);
        }

        let outcome = Outcome::from_thumb(thumb);
        self.slot.put_reflection(outcome, now)?;
        self.ledger.set_outcome(outcome, now)?;
        self.state = CycleState::Rest;
        Ok(Some(Event::ReflectionRecorded {
            day_key: self.current_day(now),
            outcome,
            at: now.with_timezone(&Utc),
        }))
    }

    /// Throw away today's promise, reflection and ledger entry.
    pub fn reset_today(&mut self, now: DateTime<Local>) -> Result<Option<Event>> {
        self.slot.evict();
        self.ledger.remove_today(now)?;
        self.state = CycleState::Create;
        Ok(Some(Event::TodayReset {
            day_key: self.current_day(now),
            at: now.with_timezone(&Utc),
        }))
    }

    /// Clear everything the account owns and mark the session so the
    /// next screen can greet the user as returning.
    pub fn logout(
        &mut self,
        session: &PostLogoutFlag<'_>,
        now: DateTime<Local>,
    ) -> Result<Option<Event>> {
        self.slot.evict();
        self.ledger.clear_all()?;
        session.set()?;
        self.state = CycleState::Create;
        Ok(Some(Event::LoggedOut {
            at: now.with_timezone(&Utc),
        }))
    }
}
