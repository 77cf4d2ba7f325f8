//! Ghost Admin API token generation
//!
//! Every outbound request is authenticated with a short-lived HS256 JWT
//! minted from the admin API key. Tokens are never cached; each dispatch
//! mints a fresh one and discards it after the request.

use crate::config::{AdminApiKey, API_VERSION};
use crate::error::AppError;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Token validity window required by the Ghost Admin API
const TOKEN_TTL_SECS: u64 = 300;

/// JWT claim set expected by Ghost
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iat: u64,
    pub exp: u64,
    pub aud: String,
}

/// Mint a signed token for one Admin API call
///
/// Header carries the key id as `kid`; the signing key is the hex-decoded
/// secret half of the admin key. Hex or signing failures surface as
/// `AppError::Signing`, never a panic.
pub fn sign_token(key: &AdminApiKey) -> Result<String, AppError> {
    let iat = Utc::now().timestamp() as u64;
    let claims = TokenClaims {
        iat,
        exp: iat + TOKEN_TTL_SECS,
        aud: format!("/{}/admin/", API_VERSION),
    };

    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(key.id.clone());

    let secret_bytes =
        hex::decode(&key.secret).map_err(|e| AppError::Signing(e.to_string()))?;

    let token = encode(&header, &claims, &EncodingKey::from_secret(&secret_bytes))?;
    Ok(token)
}
