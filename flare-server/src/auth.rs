use flare_core::{Claim, SignalError};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Turns a bearer token into an identity claim. Injected into the
/// upgrade path so tests can swap in their own issuer.
pub trait ClaimsValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<Claim, SignalError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    tenant: String,
    room: String,
    key: String,
    exp: u64,
}

/// HS256 validation against a shared secret.
pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl ClaimsValidator for JwtValidator {
    fn validate(&self, token: &str) -> Result<Claim, SignalError> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation)
            .map_err(|e| SignalError::Auth(format!("token rejected: {e}")))?;

        let claim = Claim {
            tenant: data.claims.tenant.as_str().into(),
            room: data.claims.room.as_str().into(),
            key: data.claims.key.as_str().into(),
        };
        claim.validate()?;
        Ok(claim)
    }
}
