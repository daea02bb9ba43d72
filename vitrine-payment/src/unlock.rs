use std::collections::HashMap;
use std::hash::Hash;

use vitrine_catalog::ProfileId;
use vitrine_shared::{AppError, AppResult, ErrorCode};

use crate::processor::{PaymentReceipt, PaymentResponse};

fn in_progress() -> AppError {
    AppError::new(ErrorCode::PaymentInProgress, "A payment for this profile is already being processed")
}

// --- Single profile flow ---

#[derive(Debug, Clone, PartialEq)]
pub enum UnlockStep {
    /// Card form shown, possibly with the last failure banner.
    Form,
    Processing,
    Unlocked(PaymentReceipt),
}

/// The unlock dialog of one profile: form, then processing, then revealed contact.
/// A failed charge goes back to the form with one error message.
#[derive(Debug, Clone)]
pub struct UnlockFlow {
    step: UnlockStep,
    error: Option<String>,
}

impl Default for UnlockFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl UnlockFlow {
    pub fn new() -> Self {
        Self {
            step: UnlockStep::Form,
            error: None,
        }
    }

    pub fn step(&self) -> &UnlockStep {
        &self.step
    }

    /// Banner left by the last failed charge.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn receipt(&self) -> Option<&PaymentReceipt> {
        match &self.step {
            UnlockStep::Unlocked(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Leave the form. Rejected while a charge is pending or once unlocked.
    pub fn begin(&mut self) -> AppResult<()> {
        match self.step {
            UnlockStep::Processing => Err(in_progress()),
            UnlockStep::Unlocked(_) => Err(AppError::bad_request("Contact details are already unlocked")),
            UnlockStep::Form => {
                self.step = UnlockStep::Processing;
                self.error = None;
                Ok(())
            }
        }
    }

    pub fn finish(&mut self, result: &AppResult<PaymentReceipt>) -> PaymentResponse {
        match result {
            Ok(receipt) => self.step = UnlockStep::Unlocked(receipt.clone()),
            Err(err) => {
                self.error = Some(err.to_string());
                self.step = UnlockStep::Form;
            }
        }
        PaymentResponse::from(result)
    }
}

// --- Per-viewer registry ---

/// One unlock flow per viewer and profile, for a service where the charge
/// runs outside the lock.
#[derive(Debug)]
pub struct Unlocks<V: Eq + Hash> {
    flows: HashMap<(V, ProfileId), UnlockFlow>,
}

impl<V: Eq + Hash> Default for Unlocks<V> {
    fn default() -> Self {
        Self { flows: HashMap::new() }
    }
}

impl<V: Eq + Hash + Clone> Unlocks<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a charge for the pair. An already unlocked pair hands back its
    /// receipt instead and nothing is charged; a pending one is rejected.
    pub fn begin(&mut self, viewer: &V, profile_id: ProfileId) -> AppResult<Option<PaymentReceipt>> {
        let flow = self.flows.entry((viewer.clone(), profile_id)).or_default();
        if let Some(receipt) = flow.receipt() {
            return Ok(Some(receipt.clone()));
        }
        flow.begin()?;
        Ok(None)
    }

    /// Settle a charge started by [`Unlocks::begin`]. A pair forgotten
    /// meanwhile stays forgotten.
    pub fn finish(&mut self, viewer: &V, profile_id: ProfileId, result: &AppResult<PaymentReceipt>) -> PaymentResponse {
        match self.flows.get_mut(&(viewer.clone(), profile_id)) {
            Some(flow) => flow.finish(result),
            None => PaymentResponse::from(result),
        }
    }

    pub fn flow(&self, viewer: &V, profile_id: ProfileId) -> Option<&UnlockFlow> {
        self.flows.get(&(viewer.clone(), profile_id))
    }

    pub fn receipt(&self, viewer: &V, profile_id: ProfileId) -> Option<&PaymentReceipt> {
        self.flow(viewer, profile_id).and_then(UnlockFlow::receipt)
    }

    pub fn forget_profile(&mut self, profile_id: ProfileId) {
        self.flows.retain(|(_, id), _| *id != profile_id);
    }
}
