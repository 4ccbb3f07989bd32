use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    models::product::Product,
    services::products as product_service,
    state::AppState,
};

/// The request payload for creating or updating a product.
#[derive(Deserialize, Debug)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    pub description: String,
}

fn product_json(product: &Product) -> sonic_rs::Value {
    sonic_rs::json!({
        "id": product.id.to_string(),
        "name": product.name,
        "price": product.price,
        "description": product.description,
        "created_at": product.created_at.to_rfc3339()
    })
}

fn validate_product(req: &ProductRequest) -> Result<()> {
    if req.name.trim().is_empty() || req.name.len() > 500 {
        return Err(AppError::Validation(
            "Product name must be between 1 and 500 characters".to_string(),
        ));
    }

    if !req.price.is_finite() || req.price < 0.0 {
        return Err(AppError::Validation(
            "Product price must be a non-negative number".to_string(),
        ));
    }

    Ok(())
}

/// Lists all products, newest first.
#[axum::debug_handler]
pub async fn list_products(State(state): State<AppState>) -> Result<Response> {
    let products = product_service::list_products(&state).await?;

    let products_json: Vec<_> = products.iter().map(product_json).collect();

    let response = sonic_rs::to_string(&products_json).unwrap();

    Ok((StatusCode::OK, response).into_response())
}

/// Creates a new product.
#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> Result<Response> {
    validate_product(&req)?;

    let product = product_service::create_product(
        &state,
        req.name,
        req.price,
        req.description,
    )
    .await?;

    tracing::info!("Product created: {}", product.id);

    let response = sonic_rs::to_string(&product_json(&product)).unwrap();

    Ok((StatusCode::OK, response).into_response())
}

/// Updates an existing product.
#[axum::debug_handler]
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<ProductRequest>,
) -> Result<Response> {
    validate_product(&req)?;

    let product = product_service::update_product(
        &state,
        product_id,
        req.name,
        req.price,
        req.description,
    )
    .await?;

    tracing::info!("Product updated: {}", product.id);

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "message": "Product updated successfully",
        "product": product_json(&product)
    }))
    .unwrap();

    Ok((StatusCode::OK, response).into_response())
}

/// Deletes a product.
#[axum::debug_handler]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Response> {
    product_service::delete_product(&state, product_id).await?;

    tracing::info!("Product deleted: {}", product_id);

    Ok((
        StatusCode::OK,
        r#"{"message":"Product deleted successfully"}"#,
    )
        .into_response())
}
