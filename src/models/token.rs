use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in a signed session token.
///
/// Tokens are stateless: nothing is persisted server-side, validity relies
/// solely on the signature and the `exp` timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the user this token belongs to.
    pub sub: Uuid,
    /// Unix timestamp of issuance.
    pub iat: i64,
    /// Unix timestamp of expiry.
    pub exp: i64,
}
