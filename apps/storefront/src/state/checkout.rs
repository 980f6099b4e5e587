//! # Checkout State
//!
//! Runs checkout attempts against the bakery API through the pure
//! [`CheckoutMachine`].
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Checkout Attempt                               │
//! │                                                                         │
//! │  submit(token, form)                                                    │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  [lock] begin_submit ── refused? ──► Err (phase Idle + notice,          │
//! │     │                                    or unchanged when busy)        │
//! │     │ Submitting                                                        │
//! │  [unlock]                                                               │
//! │     ▼                                                                   │
//! │  gateway.submit_checkout(token, request).await                          │
//! │     │  Err(e) ──► CheckoutResult::failure(e.user_message())             │
//! │     ▼                                                                   │
//! │  [lock] resolve ──► Completed (cart cleared)                            │
//! │                 ──► AwaitingConfirmation (mpesa)                        │
//! │                 ──► Failed (cart kept)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No lock is held while the request is in flight. A second `submit` in
//! that window sees `Submitting` and is refused without touching the
//! network.

use std::sync::Mutex;

use tracing::{info, warn};
use yetta_client::CheckoutGateway;
use yetta_core::{CheckoutForm, CheckoutMachine, CheckoutResult};

use super::CartState;
use crate::error::ApiError;

/// Session-wide checkout machine.
#[derive(Debug, Default)]
pub struct CheckoutState {
    machine: Mutex<CheckoutMachine>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_machine<R>(&self, f: impl FnOnce(&mut CheckoutMachine) -> R) -> R {
        let mut machine = self.machine.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut machine)
    }

    /// Current phase and notice.
    pub fn snapshot(&self) -> CheckoutMachine {
        self.with_machine(|m| m.clone())
    }

    /// Validates, submits, and applies the outcome of one attempt.
    ///
    /// `token` is the shopper's bearer token, `None` when logged out.
    /// Returns the machine after the outcome is applied. Local refusals
    /// (logged out, missing phone, empty cart, already busy) are `Err` and
    /// nothing is sent.
    pub async fn submit<G: CheckoutGateway>(
        &self,
        gateway: &G,
        token: Option<String>,
        cart: &CartState,
        form: CheckoutForm,
    ) -> Result<CheckoutMachine, ApiError> {
        let request = self.with_machine(|m| {
            cart.with_cart(|c| m.begin_submit(&form, token.is_some(), c))
        })?;

        info!(
            method = %request.payment_method,
            items = request.items.len(),
            "Checkout submitted"
        );

        let token = token.unwrap_or_default();
        let outcome = match gateway.submit_checkout(&token, &request).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Checkout failed");
                CheckoutResult::failure(e.user_message())
            }
        };

        self.with_machine(|m| -> Result<CheckoutMachine, ApiError> {
            cart.with_cart_mut(|c| m.resolve(outcome, c).map(|_| ()))?;
            Ok(m.clone())
        })
    }

    /// Confirms the pending mpesa payment and clears the cart.
    pub fn confirm_payment(&self, cart: &CartState) -> Result<CheckoutMachine, ApiError> {
        self.with_machine(|m| -> Result<CheckoutMachine, ApiError> {
            cart.with_cart_mut(|c| m.confirm_payment(c).map(|_| ()))?;
            info!("Mpesa payment confirmed");
            Ok(m.clone())
        })
    }

    /// Forgets any attempt, e.g. on logout.
    pub fn reset(&self) {
        self.with_machine(CheckoutMachine::reset);
    }
}
