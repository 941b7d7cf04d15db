use super::{Price, ProductId};

/// Represents a product in the catalog.
///
/// # Store Gateway
/// A `Product` is what a [`ProductStore`](crate::store::ProductStore) hands back from
/// `find_by_id`. Writes go the other way as a [`ProductDraft`]: the fields without an id,
/// because the id is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub stock: i32,
    pub price: Price,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the store
    /// * `draft` - Field values
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            stock: draft.stock,
            price: draft.price,
        }
    }

    /// The field values without the identifier.
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            stock: self.stock,
            price: self.price,
        }
    }
}

/// Field values for Product creation and replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub stock: i32,
    pub price: Price,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        stock: i32,
        price: Price,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            stock,
            price,
        }
    }
}
