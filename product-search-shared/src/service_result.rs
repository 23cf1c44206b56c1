//! Response envelope used for failed requests.

use serde::{Deserialize, Serialize};

/// Outcome recorded in a [`ServiceResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    #[default]
    Success,
    Error,
}

/// Envelope wrapping either a successful payload or an error message.
///
/// Serialized with PascalCase keys: `{"Message", "ProcessState", "ProcessResult"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceResult<T = ()> {
    pub message: Option<String>,
    pub process_state: ProcessState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_result: Option<T>,
}

impl<T> Default for ServiceResult<T> {
    fn default() -> Self {
        Self {
            message: None,
            process_state: ProcessState::Success,
            process_result: None,
        }
    }
}

impl<T> ServiceResult<T> {
    /// A successful result carrying `payload`.
    pub fn success(payload: T) -> Self {
        Self {
            process_result: Some(payload),
            ..Default::default()
        }
    }

    /// An error result whose message is the error's description.
    pub fn error(error: &dyn std::error::Error) -> Self {
        Self::error_message(error.to_string())
    }

    /// An error result with an explicit message.
    pub fn error_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            process_state: ProcessState::Error,
            process_result: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.process_state == ProcessState::Success
    }
}
