//! # Domain Types
//!
//! Core domain types used throughout the Yetta storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OptionChoice   │   │ CustomCakeSpec  │   │   Purchasable   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  size, base     │──►│  id, title      │       │
//! │  │  label          │   │  frosting       │   │  price?         │       │
//! │  │  price (Money)  │   │  filling        │   │  details?       │       │
//! │  └─────────────────┘   │  toppings[]     │   └────────┬────────┘       │
//! │                        └─────────────────┘            │ Cart           │
//! │                                                       ▼                │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PaymentMethod   │   │ CheckoutRequest │   │ CheckoutResult  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Mpesa          │──►│  items[]        │──►│  success        │       │
//! │  │  Bank           │   │  total (f64)    │   │  status?        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Account records: PublicUser, AuthResponse, Order, Favorite            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Boundary
//! Everything the bakery API sends or receives prices in major units as JSON
//! numbers. Those fields are `f64` on the wire types below and converted with
//! [`Money::from_major_f64`] / [`Money::to_major_f64`] at the edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Option Choice
// =============================================================================

/// One selectable option of the cake builder (a size, a frosting, a topping).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionChoice {
    /// Stable id, e.g. `8inch` or `cream-cheese`.
    pub id: String,

    /// Display label, e.g. `8" Round (Serves 12-15)`.
    pub label: String,

    /// Surcharge for this option (never negative).
    pub price: Money,
}

impl OptionChoice {
    /// Creates an option choice.
    pub fn new(id: impl Into<String>, label: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            price,
        }
    }
}

// =============================================================================
// Custom Cake Spec
// =============================================================================

/// The full set of selections that describes one custom cake.
///
/// Toppings are kept in the order they were picked, with no duplicate ids.
/// Price does not depend on that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomCakeSpec {
    pub size: OptionChoice,
    pub base: OptionChoice,
    pub frosting: OptionChoice,
    pub filling: OptionChoice,
    pub toppings: Vec<OptionChoice>,
}

impl CustomCakeSpec {
    /// Price of the cake: every singular option once plus each topping.
    ///
    /// ```rust
    /// use yetta_core::configurator::OptionCatalog;
    ///
    /// let catalog = OptionCatalog::bakery();
    /// let spec = catalog.default_spec();
    /// assert_eq!(spec.price().to_string(), "30.00");
    /// ```
    pub fn price(&self) -> Money {
        self.size.price
            + self.base.price
            + self.frosting.price
            + self.filling.price
            + self.toppings.iter().map(|t| t.price).sum::<Money>()
    }

    /// Whether a topping with the given id is selected.
    pub fn has_topping(&self, topping_id: &str) -> bool {
        self.toppings.iter().any(|t| t.id == topping_id)
    }
}

// =============================================================================
// Purchasable
// =============================================================================

/// Anything that can be put into the cart: a menu item or a committed cake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchasable {
    /// Identity key in the cart.
    pub id: String,

    pub title: String,

    /// Unit price. Menu items without a price count as zero in totals.
    pub price: Option<Money>,

    pub image_src: String,

    pub description: Option<String>,

    /// True for items produced by the cake builder.
    pub is_custom: bool,

    /// Builder selections for custom items.
    pub details: Option<CustomCakeSpec>,
}

impl Purchasable {
    /// Creates a regular menu item.
    pub fn menu_item(
        id: impl Into<String>,
        title: impl Into<String>,
        price: Option<Money>,
        image_src: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image_src: image_src.into(),
            description: None,
            is_custom: false,
            details: None,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the shopper pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Mpesa Express: a PIN prompt is pushed to the shopper's phone.
    Mpesa,
    /// Direct bank payment.
    Bank,
}

impl PaymentMethod {
    /// Wire name of the method.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Mpesa => "mpesa",
            PaymentMethod::Bank => "bank",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mpesa" => Ok(PaymentMethod::Mpesa),
            "bank" => Ok(PaymentMethod::Bank),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["mpesa".to_string(), "bank".to_string()],
            }),
        }
    }
}

// =============================================================================
// Checkout Wire Types
// =============================================================================

/// One line of an order as the bakery API stores it.
///
/// Used both in the checkout request and in order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub item_id: String,
    pub title: String,
    pub quantity: u32,
    /// Unit price in major units.
    pub price: f64,
    pub image_src: String,
}

/// Body of `POST /api/cart/checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    pub phone_number: Option<String>,
    pub bank_account: Option<String>,
    pub items: Vec<OrderItem>,
    /// Σ price × quantity, computed in cents then converted.
    pub total: f64,
}

fn default_success() -> bool {
    true
}

/// Response of the checkout endpoint.
///
/// The API answers `{"message": "Checkout successful!", "status": "Paid"}`
/// on success without a `success` flag, so a missing flag means success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutResult {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CheckoutResult {
    /// A failed result carrying the message to show.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: None,
            message: Some(message.into()),
        }
    }
}

// =============================================================================
// Account Types
// =============================================================================

/// The user record the auth API exposes (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Successful login, signup, or Google credential exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// A placed order from the shopper's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub user_email: String,
    pub items: Vec<OrderItem>,
    /// Order total in major units.
    pub total: f64,
    /// "Processing", "Payment Initiated", "Paid", ...
    pub status: String,
    pub payment_method: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// The order total as Money.
    pub fn total_money(&self) -> Money {
        Money::from_major_f64(self.total)
    }
}

/// A favorited menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Favorite {
    pub item_id: String,
    pub item_title: String,
    pub item_image: String,
    /// Price in major units.
    pub item_price: f64,
}

impl Favorite {
    /// Builds a favorite record from anything that can go in the cart.
    pub fn from_purchasable(item: &Purchasable) -> Self {
        Self {
            item_id: item.id.clone(),
            item_title: item.title.clone(),
            item_image: item.image_src.clone(),
            item_price: item.price.unwrap_or_default().to_major_f64(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("mpesa".parse::<PaymentMethod>().unwrap(), PaymentMethod::Mpesa);
        assert_eq!(" Bank ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Bank);
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_wire_name() {
        let json = serde_json::to_string(&PaymentMethod::Mpesa).unwrap();
        assert_eq!(json, "\"mpesa\"");
        assert_eq!(PaymentMethod::Bank.to_string(), "bank");
    }

    #[test]
    fn test_checkout_result_defaults_to_success() {
        let result: CheckoutResult =
            serde_json::from_str(r#"{"message":"Checkout successful!","status":"Paid"}"#).unwrap();
        assert!(result.success);
        assert_eq!(result.status.as_deref(), Some("Paid"));

        let failed: CheckoutResult =
            serde_json::from_str(r#"{"success":false,"message":"Payment failed"}"#).unwrap();
        assert!(!failed.success);
    }

    #[test]
    fn test_checkout_request_shape() {
        let req = CheckoutRequest {
            payment_method: PaymentMethod::Bank,
            phone_number: None,
            bank_account: Some("123456789".to_string()),
            items: vec![OrderItem {
                item_id: "c1".to_string(),
                title: "Cinnamon Roll".to_string(),
                quantity: 2,
                price: 4.5,
                image_src: "/img/c1.jpg".to_string(),
            }],
            total: 9.0,
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["payment_method"], "bank");
        assert!(value["phone_number"].is_null());
        assert_eq!(value["items"][0]["item_id"], "c1");
        assert_eq!(value["total"], 9.0);
    }

    #[test]
    fn test_order_ignores_server_id() {
        let json = r#"{
            "_id": {"$oid": "65f0c0ffee"},
            "user_email": "amina@example.com",
            "items": [],
            "total": 42.0,
            "status": "Paid",
            "payment_method": "mpesa",
            "created_at": "2024-03-01T10:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.total_money().cents(), 4200);
    }

    #[test]
    fn test_favorite_from_purchasable_without_price() {
        let item = Purchasable::menu_item("d7", "Iced Latte", None, "/img/latte.jpg");
        let fav = Favorite::from_purchasable(&item);
        assert_eq!(fav.item_id, "d7");
        assert_eq!(fav.item_price, 0.0);
    }
}
