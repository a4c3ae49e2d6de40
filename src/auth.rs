//! Login and bearer-token identity.
//!
//! Tokens are `<claims>.<signature>`, both base64url without padding. The
//! signature is HMAC-SHA256 over the encoded claims with the server secret.
//! Tokens carry no expiry and cannot be revoked.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::core::errors::ApiError;
use crate::core::helpers::{bearer_token, verify_password};
use crate::models::models::{LoginResponse, TokenClaims, User};
use crate::state::AppContext;

type HmacSha256 = Hmac<Sha256>;

const INVALID_TOKEN: &str = "token missing or invalid";
const INVALID_CREDENTIALS: &str = "invalid username or password";

#[derive(Debug, Clone)]
pub struct TokenSigner {
    secret: Arc<[u8]>,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }

    fn mac(&self) -> anyhow::Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| anyhow::anyhow!("invalid signing key: {}", e))
    }

    pub fn issue(&self, claims: &TokenClaims) -> anyhow::Result<String> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{}.{}", payload, signature))
    }

    /// Returns `None` for malformed tokens and bad signatures alike.
    pub fn verify(&self, token: &str) -> Option<TokenClaims> {
        let (payload, signature) = token.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let claims = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&claims).ok()
    }
}

/// Resolve the acting user from an `Authorization` header value.
///
/// Fails when the header is missing, the token does not verify, or the user it
/// names no longer exists.
pub fn authenticate(ctx: &AppContext, authorization: Option<&str>) -> Result<User, ApiError> {
    let Some(token) = bearer_token(authorization) else {
        tracing::debug!("missing or malformed authorization header");
        return Err(ApiError::unauthorized(INVALID_TOKEN));
    };

    let Some(claims) = ctx.tokens.verify(token) else {
        tracing::debug!("token failed verification");
        return Err(ApiError::unauthorized(INVALID_TOKEN));
    };

    match ctx.users().get(&claims.id)? {
        Some(user) => Ok(user),
        None => {
            tracing::debug!(user_id = %claims.id, "token names an unknown user");
            Err(ApiError::unauthorized(INVALID_TOKEN))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub fn login_user(ctx: &AppContext, creds: LoginRequest) -> Result<LoginResponse, ApiError> {
    let username = creds.username.unwrap_or_default();
    let password = creds.password.unwrap_or_default();

    let user = match ctx.users().find_by_username(&username)? {
        Some(user) if verify_password(&password, &user.password_hash) => user,
        _ => {
            tracing::info!(username = %username, "login rejected");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let token = ctx.tokens.issue(&TokenClaims {
        username: user.username.clone(),
        id: user.id.clone(),
    })?;

    tracing::info!(user_id = %user.id, "login succeeded");

    Ok(LoginResponse {
        token,
        username: user.username,
        name: user.name,
        id: user.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, seed_user};

    fn claims() -> TokenClaims {
        TokenClaims {
            username: "Lucy".to_string(),
            id: "2f1c3a7e-1d7b-4d8e-9a55-0d1c7a1b2c3d".to_string(),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let signer = TokenSigner::new(b"secret");
        let token = signer.issue(&claims()).unwrap();
        assert_eq!(signer.verify(&token), Some(claims()));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = TokenSigner::new(b"secret").issue(&claims()).unwrap();
        assert_eq!(TokenSigner::new(b"other").verify(&token), None);
    }

    #[test]
    fn tampered_claims_are_rejected() {
        let signer = TokenSigner::new(b"secret");
        let token = signer.issue(&claims()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();

        let forged = TokenClaims {
            username: "Mallory".to_string(),
            ..claims()
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        assert_eq!(signer.verify(&format!("{}.{}", forged_payload, signature)), None);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let signer = TokenSigner::new(b"secret");
        assert_eq!(signer.verify(""), None);
        assert_eq!(signer.verify("no-dot-here"), None);
        assert_eq!(signer.verify("a.b.c"), None);
        assert_eq!(signer.verify("!!!.???"), None);
    }

    #[test]
    fn authenticate_resolves_the_token_user() {
        let ctx = context();
        let lucy = seed_user(&ctx, "Lucy", "password");
        let token = ctx
            .tokens
            .issue(&TokenClaims {
                username: lucy.username.clone(),
                id: lucy.id.clone(),
            })
            .unwrap();

        let user = authenticate(&ctx, Some(&format!("Bearer {}", token))).unwrap();
        assert_eq!(user.id, lucy.id);
    }

    #[test]
    fn authenticate_rejects_missing_and_stale_tokens() {
        let ctx = context();
        assert!(matches!(authenticate(&ctx, None), Err(ApiError::Unauthorized(_))));
        assert!(matches!(
            authenticate(&ctx, Some("Bearer nonsense")),
            Err(ApiError::Unauthorized(_))
        ));

        // well-signed, but the user was never stored
        let token = ctx.tokens.issue(&claims()).unwrap();
        assert!(matches!(
            authenticate(&ctx, Some(&format!("Bearer {}", token))),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn login_issues_a_token_for_valid_credentials() {
        let ctx = context();
        let lucy = seed_user(&ctx, "Lucy", "password");

        let resp = login_user(
            &ctx,
            LoginRequest {
                username: Some("Lucy".to_string()),
                password: Some("password".to_string()),
            },
        )
        .unwrap();

        assert_eq!(resp.id, lucy.id);
        assert_eq!(resp.username, "Lucy");
        let claims = ctx.tokens.verify(&resp.token).unwrap();
        assert_eq!(claims.id, lucy.id);
        assert_eq!(claims.username, "Lucy");
    }

    #[test]
    fn login_does_not_distinguish_unknown_user_from_wrong_password() {
        let ctx = context();
        seed_user(&ctx, "Lucy", "password");

        let wrong_password = login_user(
            &ctx,
            LoginRequest {
                username: Some("Lucy".to_string()),
                password: Some("hunter2".to_string()),
            },
        )
        .unwrap_err();
        let unknown_user = login_user(
            &ctx,
            LoginRequest {
                username: Some("Nobody".to_string()),
                password: Some("password".to_string()),
            },
        )
        .unwrap_err();

        assert_eq!(wrong_password.status(), unknown_user.status());
        assert_eq!(wrong_password.public_message(), unknown_user.public_message());
        assert!(matches!(wrong_password, ApiError::Unauthorized(_)));
    }
}
