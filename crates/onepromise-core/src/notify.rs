//! Notification permission tracking.
//!
//! Asking for notification permission is allowed exactly once per
//! install. The guard flag records that the question was answered, not
//! what the answer was; a denied prompt is still a completed prompt.
//! Only a prompt that never finished (platform error) leaves the flag
//! unset so a later launch can retry.

use crate::error::StorageError;
use crate::storage::KvStore;

pub const PERMISSION_FLAG_KEY: &str = "notificationPermissionRequested";

/// Answer the platform holds for notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied,
    /// The platform has never asked the user.
    Undecided,
}

/// Where the one-time permission request stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Never asked, or the last attempt never completed.
    Unrequested,
    /// The prompt errored out; retry on a later launch.
    AttemptedFailed,
    /// The question was answered, one way or the other.
    Satisfied,
}

impl PermissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionState::Unrequested => "unrequested",
            PermissionState::AttemptedFailed => "attempted-failed",
            PermissionState::Satisfied => "satisfied",
        }
    }
}

/// Platform surface for notification permission.
pub trait NotificationPlatform: Send + Sync {
    /// The decision the platform already holds, without prompting.
    fn current_decision(&self) -> Decision;

    /// Show the permission prompt and wait for the user's answer.
    fn request(&mut self) -> Result<Decision, Box<dyn std::error::Error>>;
}

/// Guard around the one-time permission request.
pub struct PermissionGate<'a> {
    store: &'a dyn KvStore,
}

impl<'a> PermissionGate<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    /// State as recorded in storage. Reading never fails; a broken
    /// store reads as unrequested.
    pub fn state(&self) -> PermissionState {
        match self.store.get(PERMISSION_FLAG_KEY) {
            Ok(Some(_)) => PermissionState::Satisfied,
            Ok(None) => PermissionState::Unrequested,
            Err(err) => {
                tracing::error!("Failed to read notification permission flag: {err}");
                PermissionState::Unrequested
            }
        }
    }

    /// Run the request once.
    ///
    /// A platform that already holds a decision satisfies the guard
    /// without prompting. The flag is written only after the prompt
    /// completed; an errored prompt reports `AttemptedFailed` and
    /// leaves the flag unset.
    pub fn attempt_once(
        &self,
        platform: &mut dyn NotificationPlatform,
    ) -> Result<PermissionState, StorageError> {
        if self.state() == PermissionState::Satisfied {
            return Ok(PermissionState::Satisfied);
        }

        match platform.current_decision() {
            Decision::Granted | Decision::Denied => {
                self.store.set(PERMISSION_FLAG_KEY, "true")?;
                Ok(PermissionState::Satisfied)
            }
            Decision::Undecided => match platform.request() {
                Ok(_) => {
                    self.store.set(PERMISSION_FLAG_KEY, "true")?;
                    Ok(PermissionState::Satisfied)
                }
                Err(err) => {
                    tracing::warn!("Notification permission request failed: {err}");
                    Ok(PermissionState::AttemptedFailed)
                }
            },
        }
    }

    /// Forget that the question was ever asked.
    pub fn reset(&self) -> Result<(), StorageError> {
        self.store.remove(PERMISSION_FLAG_KEY)
    }
}
