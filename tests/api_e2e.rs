use std::time::{SystemTime, UNIX_EPOCH};
use once_cell::sync::Lazy;
use serde_json::json;

// Shared test context
struct TestContext {
    client: reqwest::Client,
    base_url: String,
}

static BASE_URL: Lazy<String> = Lazy::new(|| {
    std::env::var("CATALOG_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
});

impl TestContext {
    fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.clone(),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_registration_and_login() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let email = format!("testuser_{}@example.com", timestamp);

        // Step 1: Registration
        let reg_response = context.client.post(format!("{}/register", context.base_url))
            .json(&json!({
                "username": "Test User",
                "email": email,
                "password": "SecurePass123"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(reg_response.status().as_u16(), 201, "Registration failed");
        let reg_body: Value = reg_response.json().await.unwrap();
        assert_eq!(reg_body["message"], "User registered successfully");
        assert_eq!(reg_body["user"]["email"], email.as_str());
        assert!(
            reg_body["user"].get("password").is_none(),
            "Password hash must not be exposed"
        );

        // Step 2: Duplicate registration is a conflict, not a server error
        let dup_response = context.client.post(format!("{}/register", context.base_url))
            .json(&json!({
                "username": "Test User",
                "email": email,
                "password": "SecurePass123"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(dup_response.status().as_u16(), 409, "Duplicate email should conflict");

        // Step 3: Login with the wrong password never yields a token
        let bad_login = context.client.post(format!("{}/login", context.base_url))
            .json(&json!({
                "email": email,
                "password": "WrongPass123"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(bad_login.status().as_u16(), 400, "Wrong password must be rejected");
        let bad_body: Value = bad_login.json().await.unwrap();
        assert!(bad_body.get("token").is_none());

        // Step 4: Login
        let login_response = context.client.post(format!("{}/login", context.base_url))
            .json(&json!({
                "email": email,
                "password": "SecurePass123"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(login_response.status().as_u16(), 200, "Login failed");
        let login_body: Value = login_response.json().await.unwrap();
        assert_eq!(login_body["user"]["email"], email.as_str());
        assert!(login_body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_product_crud_roundtrip() {
        let context = TestContext::new();

        // Create
        let create_response = context.client.post(format!("{}/products", context.base_url))
            .json(&json!({
                "name": "Widget",
                "price": 9.99,
                "description": "test"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(create_response.status().as_u16(), 200, "Create failed");
        let created: Value = create_response.json().await.unwrap();
        let product_id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["name"], "Widget");
        assert_eq!(created["price"], 9.99);
        assert_eq!(created["description"], "test");
        assert!(created["created_at"].as_str().is_some());

        // List includes the new record
        let list_response = context.client.get(format!("{}/products", context.base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(list_response.status().as_u16(), 200);
        let listed: Vec<Value> = list_response.json().await.unwrap();
        assert!(listed.iter().any(|p| p["id"] == product_id.as_str()));

        // Update
        let update_response = context.client.put(format!("{}/products/{}", context.base_url, product_id))
            .json(&json!({
                "name": "Widget Mk2",
                "price": 12.50,
                "description": "updated"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(update_response.status().as_u16(), 200, "Update failed");
        let update_body: Value = update_response.json().await.unwrap();
        assert_eq!(update_body["message"], "Product updated successfully");
        assert_eq!(update_body["product"]["name"], "Widget Mk2");
        assert_eq!(update_body["product"]["created_at"], created["created_at"]);

        // Delete
        let delete_response = context.client.delete(format!("{}/products/{}", context.base_url, product_id))
            .send()
            .await
            .unwrap();

        assert_eq!(delete_response.status().as_u16(), 200, "Delete failed");

        // List no longer contains the record
        let list_after: Vec<Value> = context.client.get(format!("{}/products", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(list_after.iter().all(|p| p["id"] != product_id.as_str()));
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_missing_product_is_not_found() {
        let context = TestContext::new();
        let missing_id = "00000000-0000-0000-0000-000000000000";

        let update_response = context.client.put(format!("{}/products/{}", context.base_url, missing_id))
            .json(&json!({
                "name": "Ghost",
                "price": 1.0,
                "description": "does not exist"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(update_response.status().as_u16(), 404);

        let delete_response = context.client.delete(format!("{}/products/{}", context.base_url, missing_id))
            .send()
            .await
            .unwrap();

        assert_eq!(delete_response.status().as_u16(), 404);
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_listing_is_newest_first() {
        let context = TestContext::new();

        for name in ["ordering-a", "ordering-b"] {
            let response = context.client.post(format!("{}/products", context.base_url))
                .json(&json!({
                    "name": name,
                    "price": 1.0,
                    "description": "ordering probe"
                }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), 200);
        }

        let listed: Vec<Value> = context.client.get(format!("{}/products", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let pos_a = listed.iter().position(|p| p["name"] == "ordering-a");
        let pos_b = listed.iter().position(|p| p["name"] == "ordering-b");
        match (pos_a, pos_b) {
            (Some(a), Some(b)) => assert!(b < a, "newer product must come first"),
            _ => panic!("ordering probes missing from listing"),
        }
    }
}
