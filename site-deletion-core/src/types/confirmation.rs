//! Confirmation prompt state

use serde::{Deserialize, Serialize};

/// Typed confirmation for one open prompt
///
/// `is_confirmed` is derived: an exact, byte-for-byte comparison. No trimming,
/// no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationState {
    expected_value: String,
    entered_value: String,
}

impl ConfirmationState {
    /// Fresh state with nothing entered yet.
    pub fn new(expected_value: impl Into<String>) -> Self {
        Self {
            expected_value: expected_value.into(),
            entered_value: String::new(),
        }
    }

    /// Replace the entered text and return the new `is_confirmed` value.
    pub fn set_entered(&mut self, entered_value: impl Into<String>) -> bool {
        self.entered_value = entered_value.into();
        self.is_confirmed()
    }

    pub fn is_confirmed(&self) -> bool {
        self.entered_value == self.expected_value
    }

    pub fn expected_value(&self) -> &str {
        &self.expected_value
    }

    pub fn entered_value(&self) -> &str {
        &self.entered_value
    }
}

/// Lifecycle phase of a confirmation gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatePhase {
    Idle,
    Open,
    Cancelled,
    Confirmed,
}
