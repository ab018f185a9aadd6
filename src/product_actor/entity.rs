//! Entity trait implementation for the Product model type.

use super::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId};

impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    ///
    /// The name must be non-blank and the unit value a finite, non-negative amount.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name is required".into()));
        }
        if !params.unit_value.is_finite() || params.unit_value < 0.0 {
            return Err(ProductError::InvalidUnitValue(params.unit_value));
        }
        Ok(Self::new(
            id,
            params.name,
            params.description,
            params.unit_value,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, unit_value: f64) -> ProductCreate {
        ProductCreate {
            name: name.into(),
            description: "Description".into(),
            unit_value,
        }
    }

    #[test]
    fn test_valid_product() {
        let product = Product::from_create_params(ProductId(3), create("Product C", 7.5)).unwrap();
        assert_eq!(product.id, ProductId(3));
        assert_eq!(product.unit_value, 7.5);
    }

    #[test]
    fn test_free_product_is_allowed() {
        assert!(Product::from_create_params(ProductId(1), create("Sample", 0.0)).is_ok());
    }

    #[test]
    fn test_invalid_unit_values_are_rejected() {
        for value in [-1.0, f64::NAN, f64::INFINITY] {
            let result = Product::from_create_params(ProductId(1), create("Broken", value));
            assert!(matches!(result, Err(ProductError::InvalidUnitValue(_))));
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let result = Product::from_create_params(ProductId(1), create("", 1.0));
        assert_eq!(
            result,
            Err(ProductError::ValidationError("name is required".into()))
        );
    }
}
