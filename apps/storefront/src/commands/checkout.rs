//! # Checkout Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout bank <account> ──► Completed, cart cleared                   │
//! │                                                                         │
//! │  checkout mpesa <phone> ───► AwaitingConfirmation                      │
//! │          │                                                              │
//! │          ▼ (shopper enters PIN on the phone)                            │
//! │  confirm ──────────────────► Completed { Paid }, cart cleared           │
//! │                                                                         │
//! │  status ───────────────────► current phase + last notice               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::StorefrontState;
use yetta_core::{CheckoutForm, CheckoutMachine, CheckoutPhase, Notice};

/// Checkout phase plus the message to show.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub phase: CheckoutPhase,
    pub notice: Option<Notice>,
}

impl From<CheckoutMachine> for CheckoutResponse {
    fn from(machine: CheckoutMachine) -> Self {
        CheckoutResponse {
            phase: machine.phase().clone(),
            notice: machine.notice().cloned(),
        }
    }
}

/// Pays for the cart.
pub async fn checkout(state: &StorefrontState, form: CheckoutForm) -> Result<CheckoutResponse, ApiError> {
    debug!(method = %form.payment_method, "checkout command");

    let token = state.require_token().ok();
    let machine = state
        .checkout
        .submit(&state.api, token, &state.cart, form)
        .await?;
    Ok(CheckoutResponse::from(machine))
}

/// Marks the pending mpesa payment as paid.
pub fn confirm_payment(state: &StorefrontState) -> Result<CheckoutResponse, ApiError> {
    debug!("confirm_payment command");
    state
        .checkout
        .confirm_payment(&state.cart)
        .map(CheckoutResponse::from)
}

pub fn checkout_status(state: &StorefrontState) -> CheckoutResponse {
    CheckoutResponse::from(state.checkout.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::state::tests::offline_state;
    use yetta_core::NoticeKind;

    #[tokio::test]
    async fn test_logged_out_checkout_is_refused_locally() {
        let state = offline_state();
        add_to_cart(&state, "seasonal-pie").unwrap();

        let err = checkout(&state, CheckoutForm::bank("0011")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let status = checkout_status(&state);
        assert_eq!(status.phase, CheckoutPhase::Idle);
        assert_eq!(status.notice.unwrap().kind, NoticeKind::Error);
        assert_eq!(state.cart.summary().item_count, 1);
    }

    #[tokio::test]
    async fn test_unreachable_api_fails_with_fallback() {
        let state = offline_state();
        state
            .auth
            .establish(crate::state::tests::auth_response(3600))
            .unwrap();
        add_to_cart(&state, "party-platter").unwrap();

        let response = checkout(&state, CheckoutForm::mpesa("254712345678")).await.unwrap();
        assert_eq!(
            response.phase,
            CheckoutPhase::Failed {
                message: "Checkout failed.".to_string()
            }
        );
        assert_eq!(state.cart.summary().item_count, 1);
    }

    #[test]
    fn test_confirm_without_payment() {
        let state = offline_state();
        assert_eq!(confirm_payment(&state).unwrap_err().code, ErrorCode::BusinessLogic);
    }
}
