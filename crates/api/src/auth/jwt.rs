//! HS256 bearer-token issuance and verification.
//!
//! Tokens carry a [`Claims`] payload with the subject identity (`id`) and an
//! absolute expiry (`exp`, Unix seconds). They are stateless: nothing is
//! stored server-side and a token stops being accepted only when it expires.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the user's identity.
    pub id: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Failure issuing or verifying a token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The signing secret or expiry window is unusable.
    #[error("Invalid token configuration: {0}")]
    Config(String),

    #[error("Error signing JWT token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Bad signature, expired, or structurally malformed.
    #[error("Invalid or expired token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 60).
    pub expiry_mins: i64,
}

/// Default token expiry in minutes.
pub const DEFAULT_EXPIRY_MINS: i64 = 60;

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_mins", &self.expiry_mins)
            .finish()
    }
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var       | Required | Default |
    /// |---------------|----------|---------|
    /// | `JWT_SECRET`  | **yes**  | --      |
    /// | `JWT_EXPIRES` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or if `JWT_EXPIRES` is not
    /// a positive integer. Both are startup misconfigurations.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins = match std::env::var("JWT_EXPIRES") {
            Ok(raw) => parse_expiry_mins(&raw).unwrap_or_else(|e| panic!("JWT_EXPIRES: {e}")),
            Err(_) => DEFAULT_EXPIRY_MINS,
        };

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Parse a token lifetime given as an integer number of minutes.
pub fn parse_expiry_mins(raw: &str) -> Result<i64, TokenError> {
    let mins: i64 = raw
        .trim()
        .parse()
        .map_err(|e| TokenError::Config(format!("expiry '{raw}' is not an integer: {e}")))?;
    expiry_secs(mins)?;
    Ok(mins)
}

/// Convert a lifetime in minutes to seconds, rejecting non-positive values
/// and values whose seconds do not fit an `i64`.
fn expiry_secs(mins: i64) -> Result<i64, TokenError> {
    if mins <= 0 {
        return Err(TokenError::Config(format!(
            "expiry must be a positive number of minutes, got {mins}"
        )));
    }
    mins.checked_mul(60)
        .ok_or_else(|| TokenError::Config(format!("expiry of {mins} minutes is too large")))
}

// ---------------------------------------------------------------------------
// Issuer
// ---------------------------------------------------------------------------

/// Issues bearer tokens at login and verifies them on protected routes.
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `subject_id`, valid for the configured window.
    fn issue(&self, subject_id: &str) -> Result<String, TokenError>;

    /// Verify a token and return its subject identity.
    fn verify(&self, token: &str) -> Result<String, TokenError>;
}

/// [`TokenIssuer`] backed by `jsonwebtoken` with HS256.
///
/// Holds only read-only keys, so one instance is shared by all requests.
#[derive(Clone)]
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_secs: i64,
}

// Manual impl so key material never ends up in debug output.
impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}

impl JwtIssuer {
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::Config("signing secret must not be empty".into()));
        }
        let expiry_secs = expiry_secs(config.expiry_mins)?;
        if chrono::Utc::now().timestamp().checked_add(expiry_secs).is_none() {
            return Err(TokenError::Config(format!(
                "expiry of {} minutes overflows the token timestamp",
                config.expiry_mins
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is rejected the second `exp` passes.
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiry_secs,
        })
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expiry_secs
    }

    fn issue_at(&self, subject_id: &str, now: i64) -> Result<String, TokenError> {
        let exp = now.checked_add(self.expiry_secs).ok_or_else(|| {
            TokenError::Config(format!(
                "expiry of {} seconds overflows the token timestamp",
                self.expiry_secs
            ))
        })?;
        let claims = Claims {
            id: subject_id.to_string(),
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, subject_id: &str) -> Result<String, TokenError> {
        self.issue_at(subject_id, chrono::Utc::now().timestamp())
    }

    fn verify(&self, token: &str) -> Result<String, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Invalid)?;
        Ok(token_data.claims.id)
    }
}
