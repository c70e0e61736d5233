use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

/// The signed-in user. Views only branch on whether one is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
}

impl From<Claims> for User {
    fn from(claims: Claims) -> Self {
        User { id: claims.sub }
    }
}
