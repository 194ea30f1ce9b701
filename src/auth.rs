// ABOUTME: JWT issue, verification, and refresh for the token auth fields
// ABOUTME: HS256 tokens with a sliding expiry bounded by a refresh window from the original issue time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Token Authentication
//!
//! Tokens carry the username and an `orig_iat` claim. Refreshing keeps
//! `orig_iat` and moves `exp` forward, so a session can be extended until
//! `orig_iat + refresh_expiry` and no further.

use crate::config::AuthConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use recipe_core::constants::{error_messages, service_names};
use recipe_core::models::User;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// `JWT` validation error with detailed information
///
/// `Display` yields the message shown to clients; the variant fields are
/// for logs.
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
    /// Token is valid but its session can no longer be extended
    RefreshExpired {
        /// End of the refresh window
        refresh_expired_at: DateTime<Utc>,
    },
}

impl fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired { .. } => f.write_str(error_messages::SIGNATURE_EXPIRED),
            Self::TokenInvalid { .. } | Self::TokenMalformed { .. } => {
                f.write_str(error_messages::INVALID_SIGNATURE)
            }
            Self::RefreshExpired { .. } => f.write_str(error_messages::REFRESH_EXPIRED),
        }
    }
}

impl std::error::Error for JwtValidationError {}

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// Login name
    pub username: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Issue time of the first token in this refresh chain
    pub orig_iat: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
    /// Unique token id
    pub jti: String,
}

/// Claims exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    /// Login name
    pub username: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issue time of the first token in this refresh chain
    pub orig_iat: i64,
}

impl From<&Claims> for TokenPayload {
    fn from(claims: &Claims) -> Self {
        Self {
            username: claims.username.clone(),
            exp: claims.exp,
            orig_iat: claims.orig_iat,
        }
    }
}

/// A freshly signed token with the data returned by `tokenAuth` and `refreshToken`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    /// Encoded `JWT`
    pub token: String,
    /// Client-visible claims
    pub payload: TokenPayload,
    /// Unix timestamp after which the chain cannot be refreshed
    pub refresh_expires_in: i64,
}

/// Authentication manager for `JWT` tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: Duration,
    refresh_expiry: Duration,
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("token_expiry", &self.token_expiry)
            .field("refresh_expiry", &self.refresh_expiry)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Create a manager signing with `secret`
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_seconds: i64, refresh_expiry_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry: Duration::seconds(token_expiry_seconds),
            refresh_expiry: Duration::seconds(refresh_expiry_seconds),
        }
    }

    /// Create a manager from configuration, generating a secret when none is set
    ///
    /// # Errors
    ///
    /// Returns an error if the system RNG fails while generating a secret
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let manager = if let Some(secret) = &config.jwt_secret {
            Self::new(
                secret.as_bytes(),
                config.jwt_expiry_seconds,
                config.refresh_expiry_seconds,
            )
        } else {
            tracing::warn!("JWT_SECRET not set; generated an ephemeral signing secret");
            let secret = generate_jwt_secret()?;
            Self::new(
                &secret,
                config.jwt_expiry_seconds,
                config.refresh_expiry_seconds,
            )
        };
        Ok(manager)
    }

    /// Issue a new token chain for `user`
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> Result<IssuedToken> {
        let now = Utc::now();
        self.issue(user.id.to_string(), user.username.clone(), now.timestamp(), now)
    }

    /// Issue the next token of an existing chain, keeping `orig_iat`
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn reissue(&self, claims: &Claims) -> Result<IssuedToken> {
        self.issue(
            claims.sub.clone(),
            claims.username.clone(),
            claims.orig_iat,
            Utc::now(),
        )
    }

    fn issue(
        &self,
        sub: String,
        username: String,
        orig_iat: i64,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken> {
        let claims = Claims {
            sub,
            username,
            iat: now.timestamp(),
            exp: (now + self.token_expiry).timestamp(),
            orig_iat,
            aud: service_names::TOKEN_AUDIENCE.to_owned(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to encode JWT")?;

        Ok(IssuedToken {
            token,
            payload: TokenPayload::from(&claims),
            refresh_expires_in: orig_iat + self.refresh_expiry.num_seconds(),
        })
    }

    /// Decode and check a token, including expiry
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is malformed, has a bad
    /// signature or audience, or has expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;
        Self::check_token_expiry(&claims, Utc::now())?;
        Ok(claims)
    }

    /// Verify a token and return its client-visible payload
    ///
    /// # Errors
    ///
    /// Same as [`AuthManager::validate_token`]
    pub fn verify(&self, token: &str) -> Result<TokenPayload, JwtValidationError> {
        self.validate_token(token).map(|claims| TokenPayload::from(&claims))
    }

    /// Check that a token may be exchanged for a renewed one
    ///
    /// # Errors
    ///
    /// Returns [`JwtValidationError::RefreshExpired`] once the refresh window
    /// has closed, or any [`AuthManager::validate_token`] error
    pub fn validate_refresh(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.validate_token(token)?;
        let refresh_limit = claims.orig_iat + self.refresh_expiry.num_seconds();
        if Utc::now().timestamp() > refresh_limit {
            let refresh_expired_at =
                DateTime::from_timestamp(refresh_limit, 0).unwrap_or_else(Utc::now);
            tracing::debug!(
                user = %claims.username,
                refresh_expired_at = %refresh_expired_at.to_rfc3339(),
                "Refresh window closed"
            );
            return Err(JwtValidationError::RefreshExpired { refresh_expired_at });
        }
        Ok(claims)
    }

    /// Decode HS256 claims without expiration validation
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_audience(&[service_names::TOKEN_AUDIENCE]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    fn check_token_expiry(claims: &Claims, current_time: DateTime<Utc>) -> Result<(), JwtValidationError> {
        if current_time.timestamp() > claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            tracing::debug!(
                user = %claims.username,
                expired_at = %expired_at.to_rfc3339(),
                "JWT token expired"
            );
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }
        Ok(())
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::debug!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Generate a random `JWT` secret
///
/// # Errors
///
/// Returns an error if the system RNG fails
pub fn generate_jwt_secret() -> Result<[u8; 64]> {
    use ring::rand::{SecureRandom, SystemRandom};

    let rng = SystemRandom::new();
    let mut secret = [0u8; 64];

    rng.fill(&mut secret).map_err(|e| {
        tracing::error!("Failed to generate JWT secret: {}", e);
        anyhow::anyhow!("System RNG failure - cannot generate JWT secret")
    })?;

    Ok(secret)
}
