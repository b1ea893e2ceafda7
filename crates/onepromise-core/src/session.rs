//! Session-scoped flags.
//!
//! These live in whatever store the caller hands in, typically an
//! in-memory one so they vanish when the process exits.

use crate::error::StorageError;
use crate::storage::KvStore;

pub const POST_LOGOUT_KEY: &str = "one-promise-post-logout";

/// One-shot marker set during logout and consumed by the next screen
/// that wants to greet the user differently.
pub struct PostLogoutFlag<'a> {
    store: &'a dyn KvStore,
}

impl<'a> PostLogoutFlag<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    pub fn set(&self) -> Result<(), StorageError> {
        self.store.set(POST_LOGOUT_KEY, "1")
    }

    /// Read and clear the flag. Reading never fails; a broken store
    /// reads as "not set".
    pub fn consume(&self) -> bool {
        let present = match self.store.get(POST_LOGOUT_KEY) {
            Ok(value) => value.is_some(),
            Err(err) => {
                tracing::error!("Failed to read post-logout flag: {err}");
                return false;
            }
        };
        if present {
            if let Err(err) = self.store.remove(POST_LOGOUT_KEY) {
                tracing::error!("Failed to clear post-logout flag: {err}");
            }
        }
        present
    }
}
