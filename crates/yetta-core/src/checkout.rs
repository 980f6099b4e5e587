//! # Checkout State Machine
//!
//! The transitions of one checkout attempt, with the network call left to
//! the caller.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Phases                                   │
//! │                                                                         │
//! │            begin_submit()                                               │
//! │   Idle ───────────────────► Validating                                 │
//! │    ▲                            │                                       │
//! │    │ not logged in / no phone   │ ok                                    │
//! │    └────────────────────────────┤                                       │
//! │      (error notice, no API call)▼                                       │
//! │                            Submitting ◄── re-submit refused             │
//! │                                 │                                       │
//! │                   resolve(outcome, cart)                                │
//! │          ┌──────────────────────┼──────────────────────┐               │
//! │          ▼                      ▼                      ▼               │
//! │   AwaitingConfirmation      Completed               Failed             │
//! │   (mpesa, cart kept)    (bank, cart cleared)   (cart kept, message)    │
//! │          │                                             │               │
//! │          │ confirm_payment()                 retry ────┘               │
//! │          └──────────────────► Completed (cart cleared)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The app takes its in-flight guard before the API call and calls
//! [`CheckoutMachine::resolve`] once the call settles, success or failure.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::types::{CheckoutRequest, CheckoutResult, PaymentMethod};
use crate::validation::validate_phone_number;

/// Shown when the API rejects a checkout without a message.
pub const CHECKOUT_FAILED_FALLBACK: &str = "Checkout failed.";

/// Status shown when the API does not report one.
pub const DEFAULT_ORDER_STATUS: &str = "Processing";

/// Status of an mpesa order once the shopper confirms the PIN prompt.
pub const CONFIRMED_PAYMENT_STATUS: &str = "Paid";

// =============================================================================
// Checkout Form
// =============================================================================

/// What the shopper filled in before pressing "Pay Now".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutForm {
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub bank_account: String,
}

impl CheckoutForm {
    pub fn mpesa(phone_number: impl Into<String>) -> Self {
        CheckoutForm {
            payment_method: PaymentMethod::Mpesa,
            phone_number: phone_number.into(),
            bank_account: String::new(),
        }
    }

    pub fn bank(bank_account: impl Into<String>) -> Self {
        CheckoutForm {
            payment_method: PaymentMethod::Bank,
            phone_number: String::new(),
            bank_account: bank_account.into(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Builds the checkout request from the cart as it is right now.
///
/// Only the field matching the payment method is sent; the other is null.
pub fn build_request(form: &CheckoutForm, cart: &Cart) -> CheckoutRequest {
    let (phone_number, bank_account) = match form.payment_method {
        PaymentMethod::Mpesa => (non_empty(&form.phone_number), None),
        PaymentMethod::Bank => (None, non_empty(&form.bank_account)),
    };

    CheckoutRequest {
        payment_method: form.payment_method,
        phone_number,
        bank_account,
        items: cart.order_items(),
        total: cart.total().to_major_f64(),
    }
}

// =============================================================================
// Notice
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Error,
    Success,
    Info,
}

/// A user-visible message produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }
}

// =============================================================================
// Checkout Phase
// =============================================================================

/// Where the current checkout attempt stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CheckoutPhase {
    Idle,
    Validating,
    Submitting {
        payment_method: PaymentMethod,
        phone_number: Option<String>,
    },
    AwaitingConfirmation {
        phone_number: String,
        status: Option<String>,
    },
    Completed { status: String },
    Failed { message: String },
}

impl CheckoutPhase {
    /// Whether a new submission may start from this phase.
    pub fn accepts_submit(&self) -> bool {
        matches!(
            self,
            CheckoutPhase::Idle | CheckoutPhase::Completed { .. } | CheckoutPhase::Failed { .. }
        )
    }
}

impl Default for CheckoutPhase {
    fn default() -> Self {
        CheckoutPhase::Idle
    }
}

// =============================================================================
// Checkout Machine
// =============================================================================

/// Drives one shopper's checkout attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutMachine {
    phase: CheckoutPhase,
    notice: Option<Notice>,
}

impl CheckoutMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// The message from the last transition, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Validates the attempt and moves to `Submitting`.
    ///
    /// On success returns the request to send. On a validation failure the
    /// machine is back in `Idle` with an error notice and nothing must be
    /// sent. A refusal because a payment is still pending leaves the phase
    /// untouched.
    pub fn begin_submit(
        &mut self,
        form: &CheckoutForm,
        authenticated: bool,
        cart: &Cart,
    ) -> CoreResult<CheckoutRequest> {
        match &self.phase {
            CheckoutPhase::Submitting { .. } | CheckoutPhase::Validating => {
                return Err(CoreError::CheckoutInProgress);
            }
            CheckoutPhase::AwaitingConfirmation { phone_number, .. } => {
                let err = CoreError::AwaitingConfirmation {
                    phone_number: phone_number.clone(),
                };
                self.notice = Some(Notice::error(err.to_string()));
                return Err(err);
            }
            _ => {}
        }

        self.phase = CheckoutPhase::Validating;
        self.notice = None;

        if let Err(err) = Self::validate(form, authenticated, cart) {
            self.phase = CheckoutPhase::Idle;
            self.notice = Some(Notice::error(err.to_string()));
            return Err(err);
        }

        let request = build_request(form, cart);
        self.phase = CheckoutPhase::Submitting {
            payment_method: request.payment_method,
            phone_number: request.phone_number.clone(),
        };
        Ok(request)
    }

    fn validate(form: &CheckoutForm, authenticated: bool, cart: &Cart) -> CoreResult<()> {
        if !authenticated {
            return Err(CoreError::NotAuthenticated);
        }
        if form.payment_method == PaymentMethod::Mpesa {
            validate_phone_number(&form.phone_number)?;
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Ok(())
    }

    /// Applies the settled API outcome.
    ///
    /// Transport failures should be passed in as
    /// [`CheckoutResult::failure`] carrying the user-facing message.
    pub fn resolve(&mut self, outcome: CheckoutResult, cart: &mut Cart) -> CoreResult<&CheckoutPhase> {
        let (method, phone_number) = match &self.phase {
            CheckoutPhase::Submitting {
                payment_method,
                phone_number,
            } => (*payment_method, phone_number.clone().unwrap_or_default()),
            _ => return Err(CoreError::NoCheckoutInFlight),
        };

        if !outcome.success {
            let message = outcome
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| CHECKOUT_FAILED_FALLBACK.to_string());
            self.notice = Some(Notice::error(message.clone()));
            self.phase = CheckoutPhase::Failed { message };
            return Ok(&self.phase);
        }

        match method {
            PaymentMethod::Bank => {
                let status = outcome
                    .status
                    .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string());
                self.complete(status, cart);
            }
            PaymentMethod::Mpesa => {
                self.notice = Some(Notice::info(format!(
                    "An Mpesa Express prompt was sent to {}. Enter your PIN, then confirm the payment.",
                    phone_number
                )));
                self.phase = CheckoutPhase::AwaitingConfirmation {
                    phone_number,
                    status: outcome.status,
                };
            }
        }

        Ok(&self.phase)
    }

    /// Marks the pending mpesa payment as paid.
    ///
    /// Local stand-in for the shopper entering their PIN; nothing is polled
    /// or verified.
    pub fn confirm_payment(&mut self, cart: &mut Cart) -> CoreResult<&CheckoutPhase> {
        if !matches!(self.phase, CheckoutPhase::AwaitingConfirmation { .. }) {
            return Err(CoreError::NoPendingPayment);
        }
        self.complete(CONFIRMED_PAYMENT_STATUS.to_string(), cart);
        Ok(&self.phase)
    }

    fn complete(&mut self, status: String, cart: &mut Cart) {
        cart.clear();
        self.notice = Some(Notice::success(format!(
            "Order placed successfully! Status: {}",
            status
        )));
        self.phase = CheckoutPhase::Completed { status };
    }

    /// Drops any attempt and message, e.g. on logout.
    pub fn reset(&mut self) {
        self.phase = CheckoutPhase::Idle;
        self.notice = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Purchasable;

    fn cart_with_cake() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(Purchasable::menu_item(
            "seasonal-pie",
            "Seasonal Fruit Pie",
            Some(Money::from_cents(2500)),
            "/Frontend/images/seasonal_pie.jpg",
        ));
        cart.add_item(Purchasable::menu_item(
            "seasonal-pie",
            "Seasonal Fruit Pie",
            Some(Money::from_cents(2500)),
            "/Frontend/images/seasonal_pie.jpg",
        ));
        cart
    }

    fn paid(status: &str) -> CheckoutResult {
        CheckoutResult {
            success: true,
            status: Some(status.to_string()),
            message: Some("Checkout successful!".to_string()),
        }
    }

    #[test]
    fn test_logged_out_is_rejected_locally() {
        let mut machine = CheckoutMachine::new();
        let cart = cart_with_cake();

        let err = machine
            .begin_submit(&CheckoutForm::bank("123456789"), false, &cart)
            .unwrap_err();

        assert!(matches!(err, CoreError::NotAuthenticated));
        assert_eq!(machine.phase(), &CheckoutPhase::Idle);
        let notice = machine.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Please log in to complete your purchase.");
    }

    #[test]
    fn test_mpesa_without_phone_is_rejected() {
        let mut machine = CheckoutMachine::new();
        let cart = cart_with_cake();

        let err = machine
            .begin_submit(&CheckoutForm::mpesa("   "), true, &cart)
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(machine.phase(), &CheckoutPhase::Idle);
        assert_eq!(
            machine.notice().unwrap().text,
            "Please enter a valid Mpesa Express phone number."
        );
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let mut machine = CheckoutMachine::new();
        let err = machine
            .begin_submit(&CheckoutForm::bank("123456789"), true, &Cart::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert_eq!(machine.phase(), &CheckoutPhase::Idle);
    }

    #[test]
    fn test_request_matches_cart() {
        let mut machine = CheckoutMachine::new();
        let cart = cart_with_cake();

        let req = machine
            .begin_submit(&CheckoutForm::mpesa(" 254712345678 "), true, &cart)
            .unwrap();

        assert_eq!(req.payment_method, PaymentMethod::Mpesa);
        assert_eq!(req.phone_number.as_deref(), Some("254712345678"));
        assert!(req.bank_account.is_none());
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].quantity, 2);
        assert!((req.total - 50.0).abs() < f64::EPSILON);
        assert!(matches!(machine.phase(), CheckoutPhase::Submitting { .. }));
    }

    #[test]
    fn test_resubmit_while_submitting_is_refused() {
        let mut machine = CheckoutMachine::new();
        let cart = cart_with_cake();
        let form = CheckoutForm::bank("123456789");

        machine.begin_submit(&form, true, &cart).unwrap();
        let err = machine.begin_submit(&form, true, &cart).unwrap_err();

        assert!(matches!(err, CoreError::CheckoutInProgress));
        assert!(matches!(machine.phase(), CheckoutPhase::Submitting { .. }));
    }

    #[test]
    fn test_bank_success_completes_and_clears_cart() {
        let mut machine = CheckoutMachine::new();
        let mut cart = cart_with_cake();

        machine
            .begin_submit(&CheckoutForm::bank("123456789"), true, &cart)
            .unwrap();
        let phase = machine.resolve(paid("Paid"), &mut cart).unwrap().clone();

        assert_eq!(
            phase,
            CheckoutPhase::Completed {
                status: "Paid".to_string()
            }
        );
        assert!(cart.is_empty());
        assert_eq!(
            machine.notice().unwrap().text,
            "Order placed successfully! Status: Paid"
        );
    }

    #[test]
    fn test_bank_success_without_status_defaults_to_processing() {
        let mut machine = CheckoutMachine::new();
        let mut cart = cart_with_cake();

        machine
            .begin_submit(&CheckoutForm::bank("123456789"), true, &cart)
            .unwrap();
        let outcome = CheckoutResult {
            success: true,
            status: None,
            message: None,
        };
        machine.resolve(outcome, &mut cart).unwrap();

        assert_eq!(
            machine.notice().unwrap().text,
            "Order placed successfully! Status: Processing"
        );
    }

    #[test]
    fn test_mpesa_success_waits_for_confirmation() {
        let mut machine = CheckoutMachine::new();
        let mut cart = cart_with_cake();

        machine
            .begin_submit(&CheckoutForm::mpesa("254712345678"), true, &cart)
            .unwrap();
        machine
            .resolve(paid("Payment Initiated"), &mut cart)
            .unwrap();

        assert_eq!(
            machine.phase(),
            &CheckoutPhase::AwaitingConfirmation {
                phone_number: "254712345678".to_string(),
                status: Some("Payment Initiated".to_string()),
            }
        );
        assert_eq!(cart.item_count(), 2);
        assert!(machine.notice().unwrap().text.contains("254712345678"));

        // A second order cannot start until this one is confirmed
        let err = machine
            .begin_submit(&CheckoutForm::mpesa("254712345678"), true, &cart)
            .unwrap_err();
        assert!(matches!(err, CoreError::AwaitingConfirmation { .. }));

        machine.confirm_payment(&mut cart).unwrap();
        assert!(cart.is_empty());
        assert_eq!(
            machine.phase(),
            &CheckoutPhase::Completed {
                status: CONFIRMED_PAYMENT_STATUS.to_string()
            }
        );
        assert_eq!(machine.notice().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn test_failure_keeps_cart_and_uses_server_message() {
        let mut machine = CheckoutMachine::new();
        let mut cart = cart_with_cake();

        machine
            .begin_submit(&CheckoutForm::mpesa("0712"), true, &cart)
            .unwrap();
        machine
            .resolve(
                CheckoutResult::failure("Invalid Mpesa Express phone number format"),
                &mut cart,
            )
            .unwrap();

        assert_eq!(
            machine.phase(),
            &CheckoutPhase::Failed {
                message: "Invalid Mpesa Express phone number format".to_string()
            }
        );
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let mut machine = CheckoutMachine::new();
        let mut cart = cart_with_cake();

        machine
            .begin_submit(&CheckoutForm::bank("123456789"), true, &cart)
            .unwrap();
        let outcome = CheckoutResult {
            success: false,
            status: None,
            message: None,
        };
        machine.resolve(outcome, &mut cart).unwrap();

        assert_eq!(machine.notice().unwrap().text, CHECKOUT_FAILED_FALLBACK);
    }

    #[test]
    fn test_retry_after_failure_is_allowed() {
        let mut machine = CheckoutMachine::new();
        let mut cart = cart_with_cake();
        let form = CheckoutForm::bank("123456789");

        machine.begin_submit(&form, true, &cart).unwrap();
        machine
            .resolve(CheckoutResult::failure("Failed to save order"), &mut cart)
            .unwrap();

        assert!(machine.phase().accepts_submit());
        machine.begin_submit(&form, true, &cart).unwrap();
        machine.resolve(paid("Paid"), &mut cart).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_resolve_and_confirm_need_matching_phase() {
        let mut machine = CheckoutMachine::new();
        let mut cart = cart_with_cake();

        assert!(matches!(
            machine.resolve(paid("Paid"), &mut cart),
            Err(CoreError::NoCheckoutInFlight)
        ));
        assert!(matches!(
            machine.confirm_payment(&mut cart),
            Err(CoreError::NoPendingPayment)
        ));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut machine = CheckoutMachine::new();
        let cart = cart_with_cake();
        machine
            .begin_submit(&CheckoutForm::bank("123456789"), true, &cart)
            .unwrap();

        machine.reset();
        assert_eq!(machine.phase(), &CheckoutPhase::Idle);
        assert!(machine.notice().is_none());
    }
}
