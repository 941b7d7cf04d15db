//! Caller-supplied product fields, before validation.

use super::ProductError;
use crate::model::{Price, ProductDraft};

/// Product fields as a caller sent them.
///
/// `id` is ignored by create and required by update. `price` is in major units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInput {
    pub id: String,
    pub name: String,
    pub description: String,
    pub stock: i32,
    pub price: f64,
}

impl ProductInput {
    /// Checks required fields and converts the price.
    ///
    /// `stock` is passed through unchecked.
    pub fn into_draft(self) -> Result<ProductDraft, ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::InvalidArgument("name is required".to_string()));
        }
        let price = Price::from_major_lossy(self.price).ok_or_else(|| {
            ProductError::InvalidArgument(format!("price {} is not representable", self.price))
        })?;
        Ok(ProductDraft {
            name: self.name,
            description: self.description,
            stock: self.stock,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            id: String::new(),
            name: "Ipad Pro M1 11 Inch".to_string(),
            description: String::new(),
            stock: -4,
            price: 12_000_000.0,
        }
    }

    #[test]
    fn test_into_draft_keeps_fields() {
        let draft = input().into_draft().unwrap();
        assert_eq!(draft.name, "Ipad Pro M1 11 Inch");
        assert_eq!(draft.description, "");
        assert_eq!(draft.stock, -4);
        assert_eq!(draft.price, Price::from_minor_units(1_200_000_000));
    }

    #[test]
    fn test_into_draft_requires_name() {
        let blank = ProductInput {
            name: "   ".to_string(),
            ..input()
        };
        assert!(matches!(blank.into_draft(), Err(ProductError::InvalidArgument(_))));
    }

    #[test]
    fn test_into_draft_rejects_unrepresentable_price() {
        let huge = ProductInput {
            price: f64::from(1e20_f32),
            ..input()
        };
        assert!(matches!(huge.into_draft(), Err(ProductError::InvalidArgument(_))));
    }

    #[test]
    fn test_into_draft_rejects_nan_price() {
        let nan = ProductInput {
            price: f64::NAN,
            ..input()
        };
        assert!(matches!(nan.into_draft(), Err(ProductError::InvalidArgument(_))));
    }
}
