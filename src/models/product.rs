use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Represents a product in the catalog.
#[derive(Clone, Debug)]
pub struct Product {
    /// The unique identifier for the product.
    pub id: Uuid,
    /// The product name.
    pub name: String,
    /// The product price. Non-negative.
    pub price: f64,
    /// The product description.
    pub description: String,
    /// The timestamp when the product was created. Immutable after insert.
    pub created_at: DateTime<Utc>,
}
