use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::product::Product,
    repositories::product as product_repo,
    state::AppState,
};

/// Lists all products, newest first.
///
/// Ordering is a server guarantee so every client renders the same view.
pub async fn list_products(state: &AppState) -> Result<Vec<Product>> {
    product_repo::list_products(&state.db).await
}

/// Creates a new product.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `name` - The product name.
/// * `price` - The product price.
/// * `description` - The product description.
///
/// # Returns
///
/// A `Result` containing the created `Product`.
pub async fn create_product(
    state: &AppState,
    name: String,
    price: f64,
    description: String,
) -> Result<Product> {
    let product_id = Uuid::new_v4();

    product_repo::create_product(&state.db, product_id, name, price, description).await
}

/// Updates an existing product, replacing its mutable fields.
///
/// # Returns
///
/// A `Result` containing the updated `Product`, or `AppError::NotFound` when
/// the id does not exist.
pub async fn update_product(
    state: &AppState,
    product_id: Uuid,
    name: String,
    price: f64,
    description: String,
) -> Result<Product> {
    product_repo::update_product(&state.db, product_id, name, price, description)
        .await?
        .ok_or(AppError::NotFound)
}

/// Deletes a product by id.
///
/// # Returns
///
/// A `Result<()>`, or `AppError::NotFound` when the id does not exist.
pub async fn delete_product(state: &AppState, product_id: Uuid) -> Result<()> {
    if !product_repo::delete_product(&state.db, product_id).await? {
        return Err(AppError::NotFound);
    }
    Ok(())
}
