//! Per-store record of the most recent operation failure.
//!
//! Stores surface every failure to the caller as a typed error; in addition
//! they keep the message of the latest one so a display layer can show it
//! without threading results around. The record is cleared at the start of
//! each operation.

use std::fmt::Display;
use std::sync::RwLock;

/// Message of the most recent failed operation, if any.
#[derive(Debug, Default)]
pub struct LastError(RwLock<Option<String>>);

impl LastError {
    /// Create an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self(RwLock::new(None))
    }

    /// Clear the record.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.0.write() {
            *slot = None;
        }
    }

    /// Record a failure message.
    pub fn record(&self, err: &dyn Display) {
        if let Ok(mut slot) = self.0.write() {
            *slot = Some(err.to_string());
        }
    }

    /// The recorded message, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.0.read().ok().and_then(|slot| slot.clone())
    }
}
