//! Catalog product record.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::validation::{ValidationError, check_length};

/// Kind of pottery a product is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Mug,
    Bowl,
    Plate,
    Vase,
}

impl ProductType {
    /// The wire and storage name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mug => "mug",
            Self::Bowl => "bowl",
            Self::Plate => "plate",
            Self::Vase => "vase",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog product.
///
/// Products are read-only over the API. They enter the store only through
/// startup seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub description: String,
    /// Serialized as a JSON number, not a string.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Absolute URL of the product photo.
    pub image: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    pub const NAME_LENGTH: (usize, usize) = (2, 120);
    pub const DESCRIPTION_LENGTH: (usize, usize) = (10, 2000);

    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("name", &self.name, Self::NAME_LENGTH.0, Self::NAME_LENGTH.1)?;
        check_length(
            "description",
            &self.description,
            Self::DESCRIPTION_LENGTH.0,
            Self::DESCRIPTION_LENGTH.1,
        )?;
        if self.price < Decimal::ZERO {
            return Err(ValidationError::Negative { field: "price" });
        }
        if Url::parse(&self.image).is_err() {
            return Err(ValidationError::InvalidUrl { field: "image" });
        }
        Ok(())
    }

    /// URL-friendly handle derived from the name: lowercased, spaces
    /// replaced with hyphens.
    ///
    /// ```
    /// # use rust_decimal::Decimal;
    /// # use urban_wheel_core::{Product, ProductType};
    /// let product = Product {
    ///     name: "Minimal Vase".to_string(),
    ///     description: "Tall vase.".to_string(),
    ///     price: Decimal::new(58, 0),
    ///     image: "https://example.com/vase.jpg".to_string(),
    ///     product_type: ProductType::Vase,
    ///     in_stock: true,
    /// };
    /// assert_eq!(product.slug(), "minimal-vase");
    /// ```
    #[must_use]
    pub fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mug() -> Product {
        Product {
            name: "Terracotta Mug".to_string(),
            description: "Hand-thrown terracotta mug.".to_string(),
            price: Decimal::new(280, 1),
            image: "https://images.example.com/mug.jpg".to_string(),
            product_type: ProductType::Mug,
            in_stock: true,
        }
    }

    #[test]
    fn test_product_type_names_match_wire_format() {
        for t in [ProductType::Mug, ProductType::Bowl, ProductType::Plate, ProductType::Vase] {
            assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
            assert_eq!(t.to_string(), t.as_str());
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(mug().validate().is_ok());
    }

    #[test]
    fn test_zero_price_allowed() {
        let product = Product {
            price: Decimal::ZERO,
            ..mug()
        };
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let product = Product {
            price: Decimal::new(-1, 0),
            ..mug()
        };
        assert_eq!(
            product.validate(),
            Err(ValidationError::Negative { field: "price" })
        );
    }

    #[test]
    fn test_short_description_rejected() {
        let product = Product {
            description: "Too short".to_string(),
            ..mug()
        };
        assert_eq!(product.validate().unwrap_err().field(), "description");
    }

    #[test]
    fn test_relative_image_rejected() {
        let product = Product {
            image: "/static/mug.jpg".to_string(),
            ..mug()
        };
        assert_eq!(product.validate().unwrap_err().field(), "image");
    }

    #[test]
    fn test_serializes_type_and_numeric_price() {
        let json = serde_json::to_value(mug()).unwrap();
        assert_eq!(json["type"], "mug");
        assert_eq!(json["price"], serde_json::json!(28.0));
        assert_eq!(json["in_stock"], true);
    }

    #[test]
    fn test_deserialize_defaults_in_stock() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "name": "Clay Bowl",
            "description": "Warm clay bowl for soups.",
            "price": 36,
            "image": "https://images.example.com/bowl.jpg",
            "type": "bowl"
        }))
        .unwrap();
        assert!(product.in_stock);
        assert_eq!(product.price, Decimal::new(36, 0));
    }

    #[test]
    fn test_slug() {
        assert_eq!(mug().slug(), "terracotta-mug");
    }
}
