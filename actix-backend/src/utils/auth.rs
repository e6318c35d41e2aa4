use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::error::ApiError;
use crate::models::{Claims, UserData};

pub fn check_password_strength(password: &str) -> Option<&'static str> {
    if password.len() < 8 {
        Some("Password must be at least 8 characters long")
    } else if !password.chars().any(|c| c.is_uppercase()) {
        Some("Password must include at least one uppercase letter")
    } else if !password.chars().any(|c| c.is_lowercase()) {
        Some("Password must include at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_numeric()) {
        Some("Password must include at least one number")
    } else {
        None
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// A malformed hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

pub fn issue_token(user_id: i64, secret: &str, ttl: Duration) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = Utc::now() + ttl;
    let claims = Claims { exp: exp.timestamp() as usize, user: UserData { id: user_id } };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
}

/// Credentials carried by an `Authorization` header.
#[derive(Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Basic { username: String, password: String },
}

impl Credentials {
    /// `Ok(None)` for schemes other than Bearer and Basic; such requests stay anonymous.
    pub fn parse(header: &str) -> Result<Option<Credentials>, ApiError> {
        let (scheme, value) = header.trim().split_once(' ').unwrap_or((header.trim(), ""));
        let value = value.trim();

        if scheme.eq_ignore_ascii_case("bearer") {
            if value.is_empty() || value.contains(' ') {
                return Err(ApiError::AuthenticationFailed(
                    "Invalid token header. Token string should not contain spaces.".into(),
                ));
            }
            return Ok(Some(Credentials::Bearer(value.to_string())));
        }

        if scheme.eq_ignore_ascii_case("basic") {
            let invalid = || {
                ApiError::AuthenticationFailed(
                    "Invalid basic header. Credentials not correctly base64 encoded.".into(),
                )
            };
            let decoded = STANDARD.decode(value).map_err(|_| invalid())?;
            let decoded = String::from_utf8(decoded).map_err(|_| invalid())?;
            let (username, password) = decoded.split_once(':').ok_or_else(invalid)?;
            return Ok(Some(Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            }));
        }

        Ok(None)
    }
}
