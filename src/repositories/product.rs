use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::product::Product,
};

/// A helper function to map a `tokio_postgres::Row` to a `Product`.
fn row_to_product(row: &Row) -> Result<Product> {
    Ok(Product {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        name: row.try_get("name").map_err(|_| AppError::MissingData("name".to_string()))?,
        price: row.try_get("price").map_err(|_| AppError::MissingData("price".to_string()))?,
        description: row.try_get("description").map_err(|_| AppError::MissingData("description".to_string()))?,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
    })
}

/// Lists all products, newest first.
pub async fn list_products(pool: &Pool) -> Result<Vec<Product>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, name, price, description, created_at
            FROM products
            ORDER BY created_at DESC
            "#,
            &[],
        )
        .await?;
    rows.iter().map(row_to_product).collect()
}

/// Creates a new product in the database.
///
/// The creation timestamp is assigned by the database.
pub async fn create_product(
    pool: &Pool,
    id: Uuid,
    name: String,
    price: f64,
    description: String,
) -> Result<Product> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO products (id, name, price, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, description, created_at
            "#,
            &[&id, &name, &price, &description],
        )
        .await?;
    row_to_product(&row)
}

/// Updates an existing product.
///
/// Returns `None` when no row matches the id; `created_at` is never touched.
pub async fn update_product(
    pool: &Pool,
    id: Uuid,
    name: String,
    price: f64,
    description: String,
) -> Result<Option<Product>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            UPDATE products
            SET name = $1, price = $2, description = $3
            WHERE id = $4
            RETURNING id, name, price, description, created_at
            "#,
            &[&name, &price, &description, &id],
        )
        .await?;
    row.map(|r| row_to_product(&r)).transpose()
}

/// Deletes a product by id.
///
/// Returns `true` when a row was removed.
pub async fn delete_product(pool: &Pool, id: Uuid) -> Result<bool> {
    let client = pool.get().await?;
    let deleted = client
        .execute(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
            &[&id],
        )
        .await?;
    Ok(deleted > 0)
}
