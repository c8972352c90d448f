//! Verification of identity-provider access tokens.
//!
//! Tokens are HS256-signed JWTs issued by the external identity provider
//! with a shared secret. The API never issues tokens to end users;
//! [`generate_access_token`] exists so tests and local tooling can mint
//! tokens of the same shape.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use taskboard_core::roles::Role;

use crate::config::{parse_or, ConfigError};

/// Provider-specific profile data carried in the token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Application role name; absent for freshly signed-up users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// JWT claims read from every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the provider's user identifier.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::from_claim(self.user_metadata.role.as_deref())
    }
}

/// Configuration for token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Required `aud` claim. `None` disables the audience check.
    pub audience: Option<String>,
    /// Lifetime of locally minted tokens, in minutes.
    pub expiry_mins: i64,
}

const DEFAULT_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load token settings.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_AUDIENCE`    | no       | unset   |
    /// | `JWT_EXPIRY_MINS` | no       | `60`    |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let audience = lookup("JWT_AUDIENCE").filter(|s| !s.is_empty());
        let expiry_mins = parse_or(lookup, "JWT_EXPIRY_MINS", DEFAULT_EXPIRY_MINS)?;

        Ok(Self {
            secret,
            audience,
            expiry_mins,
        })
    }
}

/// Mint an HS256 token for `subject` carrying `role` in its user metadata.
pub fn generate_access_token(
    subject: &str,
    email: Option<&str>,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: subject.to_string(),
        email: email.map(str::to_string),
        user_metadata: UserMetadata {
            role: Some(role.as_str().to_string()),
            full_name: None,
        },
        aud: config.audience.clone(),
        exp: now + config.expiry_mins * 60,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature and expiry, plus the audience when one is configured.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    match &config.audience {
        Some(aud) => validation.set_audience(&[aud]),
        None => validation.validate_aud = false,
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
