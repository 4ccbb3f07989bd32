use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::token::Claims;

/// Issues a signed session token for a user.
///
/// The token embeds the user id and expires `Config::token_ttl_secs` after
/// issuance (one hour by default).
///
/// # Arguments
///
/// * `user_id` - The ID of the user the token is issued for.
/// * `config` - The application's configuration, holding the signing secret.
///
/// # Returns
///
/// A `Result` containing the encoded token.
pub fn issue(user_id: Uuid, config: &Config) -> Result<String> {
    let now = Utc::now();
    let expires_at = now + Duration::seconds(config.token_ttl_secs);

    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.token_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token signing error: {}", e)))
}

/// Verifies a session token and extracts its claims.
///
/// Signature and expiry are the only validity criteria; no server-side
/// session state exists.
///
/// # Arguments
///
/// * `token` - The encoded token to verify.
/// * `config` - The application's configuration, holding the signing secret.
///
/// # Returns
///
/// A `Result` containing the token's `Claims`.
pub fn verify(token: &str, config: &Config) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.token_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeroize::Zeroizing;

    fn test_config(secret: &str) -> Config {
        Config {
            database_url: "postgres://localhost/unused".to_string(),
            listen_port: 0,
            token_secret: Zeroizing::new(secret.to_string()),
            token_ttl_secs: 3600,
        }
    }

    #[test]
    fn issued_token_carries_user_id_and_hour_expiry() {
        let config = test_config("unit-test-secret");
        let user_id = Uuid::new_v4();

        let token = issue(user_id, &config).unwrap();
        let claims = verify(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 3600);

        let now = Utc::now().timestamp();
        assert!((claims.exp - now - 3600).abs() <= 5);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config("unit-test-secret");
        let token = issue(Uuid::new_v4(), &config).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert!(verify(&tampered, &config).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = test_config("unit-test-secret");
        let other = test_config("a-different-secret");

        let token = issue(Uuid::new_v4(), &other).unwrap();
        assert!(verify(&token, &config).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config("unit-test-secret");
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.token_secret.as_bytes()),
        )
        .unwrap();

        assert!(verify(&token, &config).is_err());
    }
}
