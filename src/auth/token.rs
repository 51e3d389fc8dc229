use crate::error::AppError;
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distinguishes short-lived access tokens from refresh tokens so one can
/// never be used in place of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Represents the claims encoded within a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: i32,
    /// The user's login name (email).
    pub name: String,
    pub kind: TokenKind,
    /// Security stamp of the user at issue time.
    pub stamp: String,
    /// Unique token id.
    pub jti: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Access/refresh pair returned by login and refresh.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub token_type: String,
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub refresh_token: String,
}

/// Issues and verifies HS256 tokens with a fixed secret and lifetimes.
///
/// Constructed once at startup from `Config` and shared through `web::Data`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Fails when a lifetime does not fit in a `chrono::Duration`.
    pub fn new(
        secret: &str,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Result<Self, AppError> {
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: ttl_from_secs("access", access_ttl_secs)?,
            refresh_ttl: ttl_from_secs("refresh", refresh_ttl_secs)?,
        })
    }

    /// Issues a fresh access/refresh pair for `user`.
    pub fn issue(&self, user: &User) -> Result<AccessTokenResponse, AppError> {
        Ok(AccessTokenResponse {
            token_type: "Bearer".to_string(),
            access_token: self.generate(user, TokenKind::Access)?,
            expires_in: self.access_ttl.num_seconds(),
            refresh_token: self.generate(user, TokenKind::Refresh)?,
        })
    }

    pub fn generate(&self, user: &User, kind: TokenKind) -> Result<String, AppError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::InternalServerError("Token lifetime overflow".into()))?;

        let claims = Claims {
            sub: user.id,
            name: user.email.clone(),
            kind,
            stamp: user.security_stamp.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry, and that the token is of the expected kind.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?
        .claims;

        if claims.kind != expected {
            return Err(AppError::Unauthorized("Invalid token: wrong token type".into()));
        }
        Ok(claims)
    }
}

fn ttl_from_secs(kind: &str, secs: i64) -> Result<Duration, AppError> {
    Duration::try_seconds(secs).ok_or_else(|| {
        AppError::InternalServerError(format!("{} token lifetime {}s is out of range", kind, secs))
    })
}
