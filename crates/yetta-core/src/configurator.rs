//! # Custom Cake Configurator
//!
//! Pure pricing and selection logic for the "Build Your Own Cake" special.
//!
//! ## Builder Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cake Builder                                      │
//! │                                                                         │
//! │  OptionCatalog ──► CakeBuilder (current CustomCakeSpec)                │
//! │                        │                                                │
//! │   select(Size, "8inch")│  singular: replaces the previous choice        │
//! │   toggle_topping("drip")  multi:    adds, or removes if present         │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                  price() = size + base + frosting + filling + Σ toppings│
//! │                        │                                                │
//! │   commit() ────────────┴──► Purchasable { id: custom-cake-<uuid>, ... } │
//! │                             builder resets to defaults                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use yetta_core::configurator::{CakeBuilder, OptionCatalog};
//!
//! let mut builder = CakeBuilder::new(OptionCatalog::bakery());
//! assert_eq!(builder.price().to_string(), "30.00");
//!
//! builder.toggle_topping("sprinkles").unwrap();
//! builder.toggle_topping("fresh-fruit").unwrap();
//! assert_eq!(builder.price().to_string(), "42.00");
//!
//! builder.toggle_topping("sprinkles").unwrap();
//! assert_eq!(builder.price().to_string(), "40.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CustomCakeSpec, OptionChoice, Purchasable};

// =============================================================================
// Constants
// =============================================================================

/// Title of every committed custom cake.
pub const CUSTOM_CAKE_TITLE: &str = "Custom Cake Creation";

/// Image shown for committed custom cakes.
pub const CUSTOM_CAKE_IMAGE: &str = "/Frontend/images/custom_cake.jpg";

/// Prefix of custom cake line ids.
pub const CUSTOM_CAKE_ID_PREFIX: &str = "custom-cake-";

/// Filling id meaning "no filling".
pub const NO_FILLING_ID: &str = "none";

// =============================================================================
// Option Category
// =============================================================================

/// The independently selectable parts of a cake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OptionCategory {
    Size,
    Base,
    Frosting,
    Filling,
    Topping,
}

impl OptionCategory {
    /// All categories in display order.
    pub const ALL: [OptionCategory; 5] = [
        OptionCategory::Size,
        OptionCategory::Base,
        OptionCategory::Frosting,
        OptionCategory::Filling,
        OptionCategory::Topping,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OptionCategory::Size => "size",
            OptionCategory::Base => "base",
            OptionCategory::Frosting => "frosting",
            OptionCategory::Filling => "filling",
            OptionCategory::Topping => "topping",
        }
    }

    /// Whether at most one option of this category can be selected.
    pub const fn is_singular(&self) -> bool {
        !matches!(self, OptionCategory::Topping)
    }
}

impl fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "size" => Ok(OptionCategory::Size),
            "base" => Ok(OptionCategory::Base),
            "frosting" => Ok(OptionCategory::Frosting),
            "filling" => Ok(OptionCategory::Filling),
            "topping" | "toppings" => Ok(OptionCategory::Topping),
            _ => Err(ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: OptionCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Option Catalog
// =============================================================================

/// The options on offer in each category.
///
/// Every singular category must have at least one option; the first one is
/// the default selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionCatalog {
    pub sizes: Vec<OptionChoice>,
    pub bases: Vec<OptionChoice>,
    pub frostings: Vec<OptionChoice>,
    pub fillings: Vec<OptionChoice>,
    pub toppings: Vec<OptionChoice>,
}

fn choice(id: &str, label: &str, major: i64) -> OptionChoice {
    OptionChoice::new(id, label, Money::from_major_minor(major, 0))
}

impl OptionCatalog {
    /// The bakery's current cake options and prices.
    pub fn bakery() -> Self {
        OptionCatalog {
            sizes: vec![
                choice("6inch", "6\" Round (Serves 8-10)", 30),
                choice("8inch", "8\" Round (Serves 12-15)", 45),
                choice("10inch", "10\" Round (Serves 20-25)", 60),
            ],
            bases: vec![
                choice("vanilla", "Vanilla Bean", 0),
                choice("chocolate", "Rich Chocolate", 0),
                choice("red-velvet", "Red Velvet", 0),
                choice("lemon", "Lemon Zest", 0),
                choice("carrot", "Carrot Cake", 5),
            ],
            frostings: vec![
                choice("vanilla-bc", "Vanilla Buttercream", 0),
                choice("chocolate-ganache", "Chocolate Ganache", 0),
                choice("cream-cheese", "Cream Cheese", 0),
                choice("fondant", "Fondant Finish", 15),
            ],
            fillings: vec![
                choice(NO_FILLING_ID, "None", 0),
                choice("strawberry-jam", "Strawberry Jam", 5),
                choice("lemon-curd", "Lemon Curd", 5),
                choice("chocolate-mousse", "Chocolate Mousse", 8),
            ],
            toppings: vec![
                choice("sprinkles", "Rainbow Sprinkles", 2),
                choice("fresh-fruit", "Fresh Fruit", 10),
                choice("macarons", "Macarons (3pcs)", 12),
                choice("edible-flowers", "Edible Flowers", 8),
                choice("drip", "Chocolate Drip", 5),
            ],
        }
    }

    /// Options of one category.
    pub fn options(&self, category: OptionCategory) -> &[OptionChoice] {
        match category {
            OptionCategory::Size => &self.sizes,
            OptionCategory::Base => &self.bases,
            OptionCategory::Frosting => &self.frostings,
            OptionCategory::Filling => &self.fillings,
            OptionCategory::Topping => &self.toppings,
        }
    }

    /// Finds an option by id within a category.
    pub fn find(&self, category: OptionCategory, option_id: &str) -> CoreResult<&OptionChoice> {
        self.options(category)
            .iter()
            .find(|o| o.id == option_id)
            .ok_or_else(|| CoreError::UnknownOption {
                category: category.to_string(),
                option_id: option_id.to_string(),
            })
    }

    /// First option of each singular category, no toppings.
    ///
    /// A catalog with an empty singular category falls back to a free
    /// placeholder option so the builder always has a complete spec.
    pub fn default_spec(&self) -> CustomCakeSpec {
        let first = |category: OptionCategory| {
            self.options(category)
                .first()
                .cloned()
                .unwrap_or_else(|| OptionChoice::new(NO_FILLING_ID, "None", Money::zero()))
        };

        CustomCakeSpec {
            size: first(OptionCategory::Size),
            base: first(OptionCategory::Base),
            frosting: first(OptionCategory::Frosting),
            filling: first(OptionCategory::Filling),
            toppings: Vec::new(),
        }
    }
}

impl Default for OptionCatalog {
    fn default() -> Self {
        OptionCatalog::bakery()
    }
}

// =============================================================================
// Pricing & Description
// =============================================================================

/// Price of a cake spec. Deterministic and side-effect free.
pub fn custom_price(spec: &CustomCakeSpec) -> Money {
    spec.price()
}

/// Cart description of a cake: `"<size>, <base>, <frosting>, <filling> Filling"`.
///
/// The `none` filling reads as `"No Filling"`.
///
/// ```rust
/// use yetta_core::configurator::{describe, OptionCatalog};
///
/// let spec = OptionCatalog::bakery().default_spec();
/// assert_eq!(
///     describe(&spec),
///     "6\" Round (Serves 8-10), Vanilla Bean, Vanilla Buttercream, No Filling"
/// );
/// ```
pub fn describe(spec: &CustomCakeSpec) -> String {
    let filling = if spec.filling.id == NO_FILLING_ID {
        "No Filling".to_string()
    } else {
        format!("{} Filling", spec.filling.label)
    };

    format!(
        "{}, {}, {}, {}",
        spec.size.label, spec.base.label, spec.frosting.label, filling
    )
}

// =============================================================================
// Cake Builder
// =============================================================================

/// Holds the in-progress cake selections.
#[derive(Debug, Clone)]
pub struct CakeBuilder {
    catalog: OptionCatalog,
    spec: CustomCakeSpec,
}

impl CakeBuilder {
    /// Creates a builder with default selections.
    pub fn new(catalog: OptionCatalog) -> Self {
        let spec = catalog.default_spec();
        CakeBuilder { catalog, spec }
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    /// Current selections.
    pub fn spec(&self) -> &CustomCakeSpec {
        &self.spec
    }

    /// Current price.
    pub fn price(&self) -> Money {
        custom_price(&self.spec)
    }

    /// Selects an option by id.
    ///
    /// Singular categories replace the current choice. The topping category
    /// toggles, same as [`CakeBuilder::toggle_topping`].
    pub fn select(&mut self, category: OptionCategory, option_id: &str) -> CoreResult<()> {
        let option = self.catalog.find(category, option_id)?.clone();

        match category {
            OptionCategory::Size => self.spec.size = option,
            OptionCategory::Base => self.spec.base = option,
            OptionCategory::Frosting => self.spec.frosting = option,
            OptionCategory::Filling => self.spec.filling = option,
            OptionCategory::Topping => {
                self.toggle(option);
            }
        }

        Ok(())
    }

    /// Adds a topping, or removes it when already selected.
    ///
    /// Returns `true` when the topping is selected afterwards.
    pub fn toggle_topping(&mut self, topping_id: &str) -> CoreResult<bool> {
        let option = self.catalog.find(OptionCategory::Topping, topping_id)?.clone();
        Ok(self.toggle(option))
    }

    fn toggle(&mut self, option: OptionChoice) -> bool {
        if let Some(idx) = self.spec.toppings.iter().position(|t| t.id == option.id) {
            self.spec.toppings.remove(idx);
            false
        } else {
            self.spec.toppings.push(option);
            true
        }
    }

    /// Turns the current selections into a cart-ready item and resets.
    pub fn commit(&mut self) -> Purchasable {
        let spec = std::mem::replace(&mut self.spec, self.catalog.default_spec());
        custom_cake_item(spec)
    }
}

impl Default for CakeBuilder {
    fn default() -> Self {
        CakeBuilder::new(OptionCatalog::bakery())
    }
}

/// Builds the cart item for a finished cake spec with a fresh id.
pub fn custom_cake_item(spec: CustomCakeSpec) -> Purchasable {
    Purchasable {
        id: format!("{}{}", CUSTOM_CAKE_ID_PREFIX, Uuid::new_v4()),
        title: CUSTOM_CAKE_TITLE.to_string(),
        price: Some(custom_price(&spec)),
        image_src: CUSTOM_CAKE_IMAGE.to_string(),
        description: Some(describe(&spec)),
        is_custom: true,
        details: Some(spec),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_price() {
        let builder = CakeBuilder::default();
        assert_eq!(builder.price(), Money::from_cents(3000));
        assert!(builder.spec().toppings.is_empty());
    }

    #[test]
    fn test_toppings_add_and_remove() {
        let mut builder = CakeBuilder::default();

        assert!(builder.toggle_topping("sprinkles").unwrap());
        assert!(builder.toggle_topping("fresh-fruit").unwrap());
        assert_eq!(builder.price(), Money::from_cents(4200));

        assert!(!builder.toggle_topping("sprinkles").unwrap());
        assert_eq!(builder.price(), Money::from_cents(4000));
        assert!(!builder.spec().has_topping("sprinkles"));
    }

    #[test]
    fn test_toggle_twice_restores_spec() {
        let mut builder = CakeBuilder::default();
        builder.toggle_topping("drip").unwrap();
        let before = builder.spec().clone();

        builder.toggle_topping("macarons").unwrap();
        builder.toggle_topping("macarons").unwrap();

        assert_eq!(builder.spec(), &before);
    }

    #[test]
    fn test_singular_selection_replaces() {
        let mut builder = CakeBuilder::default();
        builder.select(OptionCategory::Size, "8inch").unwrap();
        builder.select(OptionCategory::Size, "10inch").unwrap();
        builder.select(OptionCategory::Frosting, "fondant").unwrap();

        // 60 + 0 + 15 + 0
        assert_eq!(builder.price(), Money::from_cents(7500));
        assert_eq!(builder.spec().size.id, "10inch");
    }

    #[test]
    fn test_select_topping_category_toggles() {
        let mut builder = CakeBuilder::default();
        builder.select(OptionCategory::Topping, "macarons").unwrap();
        assert!(builder.spec().has_topping("macarons"));

        builder.select(OptionCategory::Topping, "macarons").unwrap();
        assert!(builder.spec().toppings.is_empty());
    }

    #[test]
    fn test_topping_order_does_not_change_price() {
        let mut a = CakeBuilder::default();
        a.toggle_topping("drip").unwrap();
        a.toggle_topping("edible-flowers").unwrap();

        let mut b = CakeBuilder::default();
        b.toggle_topping("edible-flowers").unwrap();
        b.toggle_topping("drip").unwrap();

        assert_eq!(a.price(), b.price());
        assert_ne!(a.spec().toppings, b.spec().toppings);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut builder = CakeBuilder::default();
        let err = builder.select(OptionCategory::Base, "pistachio").unwrap_err();
        assert!(matches!(err, CoreError::UnknownOption { .. }));
        assert!(builder.toggle_topping("gold-leaf").is_err());
        assert_eq!(builder.price(), Money::from_cents(3000));
    }

    #[test]
    fn test_describe_with_filling() {
        let mut builder = CakeBuilder::default();
        builder.select(OptionCategory::Size, "8inch").unwrap();
        builder.select(OptionCategory::Base, "carrot").unwrap();
        builder.select(OptionCategory::Frosting, "cream-cheese").unwrap();
        builder.select(OptionCategory::Filling, "lemon-curd").unwrap();

        assert_eq!(
            describe(builder.spec()),
            "8\" Round (Serves 12-15), Carrot Cake, Cream Cheese, Lemon Curd Filling"
        );
    }

    #[test]
    fn test_commit_builds_item_and_resets() {
        let mut builder = CakeBuilder::default();
        builder.select(OptionCategory::Filling, "chocolate-mousse").unwrap();
        builder.toggle_topping("sprinkles").unwrap();

        let item = builder.commit();

        assert!(item.id.starts_with(CUSTOM_CAKE_ID_PREFIX));
        assert_eq!(item.title, CUSTOM_CAKE_TITLE);
        assert_eq!(item.image_src, CUSTOM_CAKE_IMAGE);
        assert!(item.is_custom);
        assert_eq!(item.price, Some(Money::from_cents(4000)));
        let details = item.details.as_ref().unwrap();
        assert_eq!(details.filling.id, "chocolate-mousse");
        assert!(details.has_topping("sprinkles"));

        assert_eq!(builder.spec(), &builder.catalog().default_spec());
        assert_eq!(builder.price(), Money::from_cents(3000));
    }

    #[test]
    fn test_commits_get_distinct_ids() {
        let mut builder = CakeBuilder::default();
        let first = builder.commit();
        let second = builder.commit();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Size".parse::<OptionCategory>().unwrap(), OptionCategory::Size);
        assert_eq!("toppings".parse::<OptionCategory>().unwrap(), OptionCategory::Topping);
        assert!("sauce".parse::<OptionCategory>().is_err());
        assert!(!OptionCategory::Topping.is_singular());
    }
}
