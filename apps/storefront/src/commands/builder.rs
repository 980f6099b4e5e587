//! # Cake Builder Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  builder ─────────► options per category, current picks, live price    │
//! │  select size 8inch ► replaces the size                                 │
//! │  topping drip ─────► adds drip, or removes it when already picked      │
//! │  add-cake ─────────► new cart line (fresh id), builder back to defaults│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use super::cart::CartResponse;
use crate::error::ApiError;
use crate::state::StorefrontState;
use yetta_core::configurator::describe;
use yetta_core::{CakeBuilder, CartLineItem, CustomCakeSpec, Money, OptionCategory, OptionChoice};

/// One category of the builder as the shopper sees it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub category: OptionCategory,
    pub options: Vec<OptionChoice>,
    /// Ids currently picked in this category.
    pub selected: Vec<String>,
}

/// The builder's current selections and price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderResponse {
    pub categories: Vec<CategoryView>,
    pub spec: CustomCakeSpec,
    pub description: String,
    pub price: Money,
}

impl From<&CakeBuilder> for BuilderResponse {
    fn from(builder: &CakeBuilder) -> Self {
        let spec = builder.spec();
        let categories = OptionCategory::ALL
            .iter()
            .map(|&category| {
                let selected = match category {
                    OptionCategory::Size => vec![spec.size.id.clone()],
                    OptionCategory::Base => vec![spec.base.id.clone()],
                    OptionCategory::Frosting => vec![spec.frosting.id.clone()],
                    OptionCategory::Filling => vec![spec.filling.id.clone()],
                    OptionCategory::Topping => spec.toppings.iter().map(|t| t.id.clone()).collect(),
                };
                CategoryView {
                    category,
                    options: builder.catalog().options(category).to_vec(),
                    selected,
                }
            })
            .collect();

        BuilderResponse {
            categories,
            spec: spec.clone(),
            description: describe(spec),
            price: builder.price(),
        }
    }
}

/// Result of adding the finished cake.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCakeResponse {
    pub line: CartLineItem,
    pub cart: CartResponse,
}

pub fn get_builder(state: &StorefrontState) -> BuilderResponse {
    state.builder.with_builder(|b| BuilderResponse::from(b))
}

/// Picks an option. For `topping` this toggles.
pub fn select_option(
    state: &StorefrontState,
    category: &str,
    option_id: &str,
) -> Result<BuilderResponse, ApiError> {
    debug!(category = %category, option_id = %option_id, "select_option command");

    let category: OptionCategory = category.parse()?;
    state.builder.with_builder_mut(|b| -> Result<BuilderResponse, ApiError> {
        b.select(category, option_id)?;
        Ok(BuilderResponse::from(&*b))
    })
}

/// Adds or removes a topping. Returns whether it is picked afterwards.
pub fn toggle_topping(
    state: &StorefrontState,
    topping_id: &str,
) -> Result<(bool, BuilderResponse), ApiError> {
    debug!(topping_id = %topping_id, "toggle_topping command");

    state.builder.with_builder_mut(|b| -> Result<(bool, BuilderResponse), ApiError> {
        let selected = b.toggle_topping(topping_id)?;
        Ok((selected, BuilderResponse::from(&*b)))
    })
}

/// Puts the current cake in the cart and resets the builder.
pub fn add_custom_cake(state: &StorefrontState) -> AddCakeResponse {
    let item = state.builder.with_builder_mut(CakeBuilder::commit);
    info!(id = %item.id, price = ?item.price, "Custom cake added to cart");

    let line = state.cart.add(item);
    AddCakeResponse {
        line,
        cart: super::cart::get_cart(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::tests::offline_state;

    #[test]
    fn test_default_builder_is_thirty() {
        let state = offline_state();
        let view = get_builder(&state);
        assert_eq!(state.config.format_currency(view.price), "Ksh. 30.00");
        assert_eq!(view.categories.len(), 5);
        assert_eq!(view.categories[0].selected, vec!["6inch".to_string()]);
        assert!(view.categories[4].selected.is_empty());
    }

    #[test]
    fn test_toppings_toggle_price() {
        let state = offline_state();

        toggle_topping(&state, "sprinkles").unwrap();
        let (picked, view) = toggle_topping(&state, "fresh-fruit").unwrap();
        assert!(picked);
        assert_eq!(view.price, Money::from_cents(4200));

        let view = select_option(&state, "toppings", "sprinkles").unwrap();
        assert!(!view.spec.has_topping("sprinkles"));
        assert_eq!(view.price, Money::from_cents(4000));
    }

    #[test]
    fn test_select_errors() {
        let state = offline_state();
        assert_eq!(
            select_option(&state, "flavour", "vanilla").unwrap_err().code,
            ErrorCode::ValidationError
        );
        let err = select_option(&state, "size", "12inch").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Unknown size option: 12inch");
    }

    #[test]
    fn test_add_cake_uses_fresh_ids_and_resets() {
        let state = offline_state();
        select_option(&state, "size", "8inch").unwrap();

        let first = add_custom_cake(&state);
        assert!(first.line.is_custom);
        assert_eq!(first.line.price, Some(Money::from_cents(4500)));
        assert_eq!(get_builder(&state).price, Money::from_cents(3000));

        let second = add_custom_cake(&state);
        assert_ne!(first.line.id, second.line.id);
        assert_eq!(second.cart.lines.len(), 2);
        assert_eq!(second.cart.summary.total, Money::from_cents(7500));
    }
}
