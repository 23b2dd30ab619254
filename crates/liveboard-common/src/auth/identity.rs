//! Bearer-token identity verification
//!
//! The identity provider signs an HS256 token carrying the caller's subject id, display
//! name, and picture. Verifying it yields the `Actor` the engine trusts.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use liveboard_core::Actor;
use serde::{Deserialize, Serialize};

use crate::config::IdentityConfig;
use crate::error::AppError;

/// Claims carried by an identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (provider user id)
    pub sub: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl IdentityClaims {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// The verified identity triple
    #[must_use]
    pub fn into_actor(self) -> Actor {
        Actor {
            user_id: self.sub,
            display_name: self.name,
            picture_url: self.picture,
        }
    }
}

/// Validates identity tokens and, for tests and local tooling, issues them
#[derive(Clone)]
pub struct IdentityVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    #[must_use]
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    #[must_use]
    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(&config.secret, config.leeway_secs)
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// `TokenExpired` for an expired token, `InvalidToken` for anything else that fails
    /// verification or carries an empty subject.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AppError> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::InvalidToken);
        }
        Ok(data.claims)
    }

    /// Verify a token and return the caller's identity
    ///
    /// # Errors
    /// See [`IdentityVerifier::verify`].
    pub fn actor(&self, token: &str) -> Result<Actor, AppError> {
        self.verify(token).map(IdentityClaims::into_actor)
    }

    /// Sign a token for `actor`, valid for `ttl`
    ///
    /// # Errors
    /// Returns an internal error if encoding fails
    pub fn issue(&self, actor: &Actor, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = IdentityClaims {
            sub: actor.user_id.clone(),
            name: actor.display_name.clone(),
            picture: actor.picture_url.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode identity token")))
    }
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}
