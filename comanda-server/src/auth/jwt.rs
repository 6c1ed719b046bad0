//! JWT issuing and verification (HS256 bearer tokens)

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| "comanda-dev-secret".into()),
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Token claims
///
/// `sub` is the employee id; the restaurant scope and role ride along so
/// handlers never need a second lookup to scope queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub display_name: String,
    pub restaurant_id: String,
    pub role: String,
    /// Expiry, Unix seconds
    pub exp: i64,
    /// Issued at, Unix seconds
    pub iat: i64,
}

/// Stateless JWT service
#[derive(Debug, Clone)]
pub struct JwtService {
    config: JwtConfig,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Issue a token for an authenticated employee
    pub fn issue(
        &self,
        employee_id: &str,
        username: &str,
        display_name: &str,
        restaurant_id: &str,
        role: &str,
    ) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: employee_id.to_string(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            restaurant_id: restaurant_id.to_string(),
            role: role.to_string(),
            exp: (now + chrono::Duration::hours(self.config.ttl_hours)).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a bearer token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
    }
}
