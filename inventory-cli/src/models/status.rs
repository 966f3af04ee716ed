//! Local synchronization status of an item

use std::fmt;

pub const CREATED_MESSAGE: &str = "Successfully created the item.";
pub const CREATE_FAILED_MESSAGE: &str = "Item creation failed.";

/// Outcome of the most recent create attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Created,
    Error,
}

impl SyncState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local-only tag recording how the last create request for an item went.
/// Never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStatus {
    pub state: SyncState,
    pub message: String,
}

impl SyncStatus {
    pub fn new(state: SyncState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }

    pub fn created() -> Self {
        Self::new(SyncState::Created, CREATED_MESSAGE)
    }

    pub fn error() -> Self {
        Self::new(SyncState::Error, CREATE_FAILED_MESSAGE)
    }

    pub fn is_error(&self) -> bool {
        self.state == SyncState::Error
    }
}
