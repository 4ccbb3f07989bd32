use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::repositories::user as user_repo;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use deadpool_postgres::Pool;
use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;
use zeroize::Zeroize;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 1;

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the hashed password in PHC string format.
fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Internal(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Internal(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    Ok(password_hash)
}

/// Verifies a password against a stored hash.
///
/// The digest comparison inside the verifier is constant-time; callers must
/// never compare hashes with plain string equality.
///
/// # Arguments
///
/// * `password` - The password to verify.
/// * `hash` - The hash to verify against.
///
/// # Returns
///
/// A `Result` containing `true` if the password is valid, `false` otherwise.
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Hash parse error: {}", e)))?;
    let argon2 = Argon2::default();
    let result = argon2
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    Ok(result)
}

/// Registers a new user with a hashed password.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `username` - The user's display name.
/// * `email` - The user's email address, used as the login key.
/// * `password` - The plaintext password to hash and store.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn register(
    db: &Pool,
    username: String,
    email: String,
    password: String,
) -> Result<User> {
    tracing::debug!("Registering user: {}", email);
    let hashed_password = hash_password(&password)?;
    let user_id = Uuid::new_v4();

    let user = user_repo::create_user(db, user_id, username, email, hashed_password).await?;

    tracing::info!("User created with ID: {}", user.id);
    Ok(user)
}

/// Authenticates a user by email and password.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `email` - The email to look up.
/// * `password` - The password to verify.
///
/// # Returns
///
/// A `Result` containing the authenticated `User`.
pub async fn login(db: &Pool, email: String, password: String) -> Result<User> {
    tracing::debug!("Authenticating user: {}", email);

    let user = user_repo::find_by_email(db, &email)
        .await?
        .ok_or_else(|| AppError::Authentication("User not found".to_string()))?;

    if !verify_password(&password, &user.password)? {
        return Err(AppError::Authentication("Incorrect password".to_string()));
    }

    tracing::info!("User authenticated: {}", user.id);

    Ok(user)
}
