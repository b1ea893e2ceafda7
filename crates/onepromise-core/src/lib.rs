//! # One Promise Core Library
//!
//! Core business logic for the One Promise daily journal: make one
//! promise a day, reflect on it in the evening, keep the history. All
//! operations are available through the standalone CLI binary; any GUI
//! is a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Day keys**: the app day rolls over at 06:00, not midnight. Every
//!   record is filed under a `YYYY-MM-DD` logical-day key
//! - **Storage**: SQLite-backed key-value store holding today's slot,
//!   the journal ledger and small flags; TOML-based configuration
//! - **Cycle**: a storage-backed state machine (Create, Confirm,
//!   Reflect, Rest) that rederives its state from persisted data
//! - **Side systems**: notification permission guard, post-logout
//!   session flag, rotating promise suggestions
//!
//! ## Key Components
//!
//! - [`CycleEngine`]: daily cycle state machine
//! - [`TodaySlot`] / [`HistoryLedger`]: persistence for today and the past
//! - [`Database`]: SQLite key-value backend
//! - [`Config`]: application configuration management

pub mod cycle;
pub mod day;
pub mod error;
pub mod events;
pub mod identity;
pub mod notify;
pub mod outcome;
pub mod session;
pub mod storage;
pub mod suggestions;

pub use cycle::{CycleEngine, CycleState};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use identity::{IdentityProvider, LocalIdentity, LoginStatus};
pub use notify::{Decision, NotificationPlatform, PermissionGate, PermissionState};
pub use outcome::{Outcome, Thumb};
pub use session::PostLogoutFlag;
pub use storage::{
    Config, Database, HistoryEntry, HistoryLedger, KvStore, MemoryKv, TodaySlot, WeekSummary,
};
