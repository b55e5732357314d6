//! Destructive-action confirmation gate
//!
//! `Idle -> Open -> {Cancelled | Confirmed}`. A cancelled gate may be opened
//! again with a fresh state; a confirmed gate is spent.

use crate::error::{CoreError, CoreResult};
use crate::types::{ConfirmationState, GatePhase, Site};

/// Permission to delete one site, produced by a confirmed gate.
///
/// Not `Clone`: one confirmation yields exactly one deletion call.
#[derive(Debug)]
pub struct DeleteIntent {
    site: Site,
}

impl DeleteIntent {
    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn into_site(self) -> Site {
        self.site
    }
}

/// Confirmation gate for one destructive action
#[derive(Debug)]
pub struct ConfirmationGate {
    phase: GatePhase,
    site: Option<Site>,
    state: Option<ConfirmationState>,
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: GatePhase::Idle,
            site: None,
            state: None,
        }
    }

    /// Open the prompt for `site`, expecting its display URL.
    pub fn open(&mut self, site: Site) -> CoreResult<()> {
        let expected = site.display_url();
        self.open_with(site, expected)
    }

    /// Open the prompt with an explicit expected value.
    ///
    /// # Errors
    /// * `NotEligible` - the site does not support deletion
    /// * `ValidationError` - the expected value is empty
    /// * `ConfirmationError` - the gate is already open or was confirmed
    pub fn open_with(&mut self, site: Site, expected_value: impl Into<String>) -> CoreResult<()> {
        match self.phase {
            GatePhase::Idle | GatePhase::Cancelled => {}
            GatePhase::Open => {
                return Err(CoreError::ConfirmationError(
                    "Confirmation prompt is already open".to_string(),
                ))
            }
            GatePhase::Confirmed => {
                return Err(CoreError::ConfirmationError(
                    "Confirmation gate was already used".to_string(),
                ))
            }
        }

        if !site.supports_delete() {
            return Err(CoreError::NotEligible(site.id));
        }

        let expected_value = expected_value.into();
        if expected_value.is_empty() {
            return Err(CoreError::ValidationError(
                "Expected confirmation value cannot be empty".to_string(),
            ));
        }

        log::debug!("Opening delete confirmation for site {}", site.id);
        self.state = Some(ConfirmationState::new(expected_value));
        self.site = Some(site);
        self.phase = GatePhase::Open;
        Ok(())
    }

    /// Replace the entered text; returns the new `is_confirmed` value.
    pub fn update_input(&mut self, entered_value: impl Into<String>) -> CoreResult<bool> {
        if self.phase != GatePhase::Open {
            return Err(self.not_open());
        }
        let Some(state) = self.state.as_mut() else {
            return Err(self.not_open());
        };
        Ok(state.set_entered(entered_value))
    }

    /// Whether the entered text matches exactly. `false` unless open.
    pub fn is_confirmed(&self) -> bool {
        self.phase == GatePhase::Open
            && self
                .state
                .as_ref()
                .is_some_and(ConfirmationState::is_confirmed)
    }

    /// Whether the destructive control should be enabled.
    pub fn is_action_enabled(&self) -> bool {
        self.is_confirmed()
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Current confirmation state while the prompt is open.
    pub fn state(&self) -> Option<&ConfirmationState> {
        self.state.as_ref()
    }

    /// Close the prompt without side effects.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.phase != GatePhase::Open {
            return Err(self.not_open());
        }
        log::debug!("Delete confirmation cancelled");
        self.state = None;
        self.site = None;
        self.phase = GatePhase::Cancelled;
        Ok(())
    }

    /// Accept the prompt and hand out the single delete intent.
    ///
    /// Fails without changing phase when the input does not match.
    pub fn confirm(&mut self) -> CoreResult<DeleteIntent> {
        if self.phase != GatePhase::Open {
            return Err(self.not_open());
        }
        if !self.is_confirmed() {
            return Err(CoreError::ConfirmationError(
                "Entered value does not match".to_string(),
            ));
        }

        let site = self.site.take().ok_or_else(|| self.not_open())?;
        self.state = None;
        self.phase = GatePhase::Confirmed;
        log::info!("Deletion of site {} confirmed", site.id);
        Ok(DeleteIntent { site })
    }

    fn not_open(&self) -> CoreError {
        CoreError::ConfirmationError(format!(
            "Confirmation prompt is not open (phase: {:?})",
            self.phase
        ))
    }
}
