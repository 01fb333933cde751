//! Access tokens for the catalog API
//!
//! # Architecture
//!
//! - `POST /login` compares a username/password pair against one operator
//!   identity and, on match, issues an HS256 JWT
//! - Every `/api/*` request carries `Authorization: Bearer <token>`
//! - A token is either valid or not; there are no roles or scopes
//! - The signing key is supplied at startup (never compiled in); when none is
//!   configured a random key is generated per process
//!
//! # Pure Functions
//!
//! No HTTP framework dependencies here. The axum middleware lives in
//! `libris-api`.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

// ========================================
// Error Types
// ========================================

/// Authentication error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuthError {
    /// Username/password pair does not match the operator identity
    InvalidCredentials,

    /// Authorization header absent
    MissingToken,

    /// Header present but not `Bearer <token>`
    InvalidFormat,

    /// Signature or structure check failed
    InvalidToken(String),

    /// `exp` claim is in the past
    Expired,

    /// Signing failed while issuing
    Encoding(String),
}

impl std::fmt::Display for ApiAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiAuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiAuthError::MissingToken => write!(f, "Missing bearer token"),
            ApiAuthError::InvalidFormat => {
                write!(f, "Invalid authorization header (expected 'Bearer <token>')")
            }
            ApiAuthError::InvalidToken(err) => write!(f, "Invalid token: {}", err),
            ApiAuthError::Expired => write!(f, "Token has expired"),
            ApiAuthError::Encoding(err) => write!(f, "Token encoding failed: {}", err),
        }
    }
}

impl std::error::Error for ApiAuthError {}

// ========================================
// Claims and Credentials
// ========================================

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Operator username
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: u64,
    /// Expiration (Unix seconds)
    pub exp: u64,
}

/// The single operator identity allowed to log in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCredentials {
    pub username: String,
    pub password: String,
}

impl OperatorCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

// ========================================
// Token Service
// ========================================

/// Issues and verifies bearer tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    operator: OperatorCredentials,
    ttl_secs: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("operator", &self.operator.username)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], operator: OperatorCredentials, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            operator,
            ttl_secs,
        }
    }

    /// Check the submitted pair and issue a signed token on match
    pub fn login(&self, username: &str, password: &str) -> Result<String, ApiAuthError> {
        if !self.operator.matches(username, password) {
            return Err(ApiAuthError::InvalidCredentials);
        }
        self.issue(username)
    }

    /// Sign a token for `subject` valid for the configured TTL
    pub fn issue(&self, subject: &str) -> Result<String, ApiAuthError> {
        let now = unix_now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, ApiAuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiAuthError::Encoding(e.to_string()))
    }

    /// Verify signature and claims
    pub fn verify(&self, token: &str) -> Result<Claims, ApiAuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ApiAuthError::Expired,
                _ => ApiAuthError::InvalidToken(e.to_string()),
            })
    }

    /// Verify the raw value of an `Authorization` header
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, ApiAuthError> {
        let token = extract_bearer(header)?;
        self.verify(token)
    }
}

/// Pull the token out of `Bearer <token>`
pub fn extract_bearer(header: Option<&str>) -> Result<&str, ApiAuthError> {
    let value = header.ok_or(ApiAuthError::MissingToken)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ApiAuthError::InvalidFormat)?
        .trim();
    if token.is_empty() {
        return Err(ApiAuthError::InvalidFormat);
    }
    Ok(token)
}

/// Random signing key for processes started without one
pub fn generate_secret() -> Vec<u8> {
    use rand::RngCore;

    let mut secret = vec![0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ========================================
// Tests
// ========================================
