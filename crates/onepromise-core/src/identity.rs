//! Identity seam.
//!
//! The cycle itself never inspects who is signed in; it only needs a
//! provider it can clear on logout. The shipped provider is a local
//! profile stored next to the journal. Remote providers implement the
//! same trait.

use crate::error::ValidationError;
use crate::storage::KvStore;

const IDENTITY_KEY: &str = "identity_profile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Idle,
    LoggingIn,
    Success,
    Failed,
}

impl LoginStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginStatus::Idle => "idle",
            LoginStatus::LoggingIn => "logging-in",
            LoginStatus::Success => "success",
            LoginStatus::Failed => "failed",
        }
    }
}

/// Every identity backend implements this trait.
pub trait IdentityProvider {
    /// Handle of the signed-in user, if any.
    fn current_identity(&self) -> Option<String>;

    /// Sign in under the given handle.
    fn login(&mut self, handle: &str) -> Result<(), Box<dyn std::error::Error>>;

    /// Remove the stored identity.
    fn clear(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Where the last sign-in attempt stands.
    fn status(&self) -> LoginStatus;
}

/// Identity provider backed by the local key-value store.
pub struct LocalIdentity<'a> {
    store: &'a dyn KvStore,
    status: LoginStatus,
}

impl<'a> LocalIdentity<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        let status = match store.get(IDENTITY_KEY) {
            Ok(Some(_)) => LoginStatus::Success,
            Ok(None) => LoginStatus::Idle,
            Err(err) => {
                tracing::error!("Failed to read stored identity: {err}");
                LoginStatus::Idle
            }
        };
        Self { store, status }
    }
}

impl IdentityProvider for LocalIdentity<'_> {
    fn current_identity(&self) -> Option<String> {
        match self.store.get(IDENTITY_KEY) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!("Failed to read stored identity: {err}");
                None
            }
        }
    }

    fn login(&mut self, handle: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.status = LoginStatus::LoggingIn;

        let handle = handle.trim();
        if handle.is_empty() {
            self.status = LoginStatus::Failed;
            return Err(ValidationError::InvalidValue {
                field: "handle".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }

        if let Err(err) = self.store.set(IDENTITY_KEY, handle) {
            self.status = LoginStatus::Failed;
            return Err(err.into());
        }
        self.status = LoginStatus::Success;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.store.remove(IDENTITY_KEY)?;
        self.status = LoginStatus::Idle;
        Ok(())
    }

    fn status(&self) -> LoginStatus {
        self.status
    }
}
