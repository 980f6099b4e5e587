//! # Specials Menu
//!
//! The fixed items the shopper can add by id. Custom cakes come from the
//! cake builder instead.

use yetta_core::{Money, Purchasable};

/// Advertised "from" price on the custom cake card.
pub const CUSTOM_CAKE_FROM_PRICE: Money = Money::from_major_minor(50, 0);

/// Today's specials.
pub fn specials() -> Vec<Purchasable> {
    vec![
        Purchasable::menu_item(
            "seasonal-pie",
            "Seasonal Fruit Pie",
            Some(Money::from_major_minor(25, 0)),
            "/Frontend/images/seasonal_pie.jpg",
        ),
        Purchasable::menu_item(
            "party-platter",
            "Party Platter",
            Some(Money::from_major_minor(45, 0)),
            "/Frontend/images/party_platter.jpg",
        ),
    ]
}

/// Looks up a specials item by id.
pub fn find(item_id: &str) -> Option<Purchasable> {
    specials().into_iter().find(|item| item.id == item_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_special() {
        let pie = find("seasonal-pie").unwrap();
        assert_eq!(pie.title, "Seasonal Fruit Pie");
        assert_eq!(pie.price, Some(Money::from_cents(2500)));
        assert!(!pie.is_custom);

        assert!(find("eclair").is_none());
    }
}
