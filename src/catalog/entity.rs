use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductUpdate};

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Product name required".to_string());
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err(format!("Invalid price: {}", price));
    }
    Ok(())
}

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Update = ProductUpdate;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a catalog product.
    ///
    /// # Errors
    /// Rejects a blank name or a negative / non-finite price, so the cart can
    /// trust every catalog record it is handed.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
        })
    }

    /// Updates the catalog record only. Line items already in a cart keep
    /// the name and price they were added with.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), String> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        Ok(())
    }
}
