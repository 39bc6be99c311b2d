use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Number of fractional digits prices are stored and echoed with
pub const PRICE_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "price_format")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

/// Validated partial update. `None` leaves the stored value untouched;
/// `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }

    /// Merge the supplied fields into `product`
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = normalize_price(price);
        }
    }
}

/// Round to the stored scale and pin the scale so "5" renders as "5.00"
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut price = price.round_dp(PRICE_SCALE);
    price.rescale(PRICE_SCALE);
    price
}

mod price_format {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::normalize_price(*price).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Product {
        Product {
            id: 7,
            name: "Desk lamp".to_string(),
            description: Some("Brass".to_string()),
            price: Decimal::from_str("5").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn price_serializes_with_two_fraction_digits() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["price"], "5.00");
        assert_eq!(value["id"], 7);
        assert_eq!(value["description"], "Brass");
    }

    #[test]
    fn product_survives_a_json_round_trip() {
        let product = sample();
        let text = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&text).unwrap();

        assert_eq!(back.id, product.id);
        assert_eq!(back.price, product.price);
        assert_eq!(back.price.to_string(), "5.00");
        assert_eq!(back.created_at, product.created_at);
    }

    #[test]
    fn changes_only_touch_supplied_fields() {
        let mut product = sample();
        ProductChanges {
            price: Some(Decimal::from_str("199.9").unwrap()),
            ..Default::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.name, "Desk lamp");
        assert_eq!(product.description.as_deref(), Some("Brass"));
        assert_eq!(product.price.to_string(), "199.90");
    }

    #[test]
    fn explicit_null_description_clears_it() {
        let mut product = sample();
        ProductChanges {
            description: Some(None),
            ..Default::default()
        }
        .apply_to(&mut product);

        assert!(product.description.is_none());
    }
}
