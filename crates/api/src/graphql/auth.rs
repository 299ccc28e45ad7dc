use base64::prelude::*;
use ed25519_dalek::{
    Signature, SignatureError, SigningKey, Verifier, VerifyingKey, ed25519::signature::Signer,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// How long an operator session stays valid before a fresh login is needed.
const SESSION_VALIDITY_DAYS: i64 = 7;
const SESSION_AUDIENCE: &str = "nexus-admin";

/// Verifies the operator credential. The secret is either an argon2 PHC
/// hash (`ADMIN_PASSWORD_HASH`) or, for small deployments, the plain value
/// (`ADMIN_PASSWORD`). With neither set the console cannot be logged into.
#[derive(Clone)]
pub struct Authenticator {
    password_hash: Option<String>,
    password: Option<String>,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Incorrect administrator password")]
    InvalidCredential,
    #[error("Administrator login is not configured on this deployment")]
    NotConfigured,
    #[error("Stored administrator password hash is invalid")]
    BadStoredHash,
}

impl Authenticator {
    pub fn from_env() -> Self {
        Self {
            password_hash: std::env::var("ADMIN_PASSWORD_HASH").ok(),
            password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some() || self.password.is_some()
    }

    pub fn verify(&self, credential: &str) -> Result<(), AuthError> {
        if let Some(hash) = &self.password_hash {
            use argon2::{Argon2, PasswordVerifier};
            let parsed = argon2::PasswordHash::new(hash).map_err(|_| AuthError::BadStoredHash)?;
            return Argon2::default()
                .verify_password(credential.as_bytes(), &parsed)
                .map_err(|_| AuthError::InvalidCredential);
        }
        match &self.password {
            Some(password) if credential == password => Ok(()),
            Some(_) => Err(AuthError::InvalidCredential),
            None => Err(AuthError::NotConfigured),
        }
    }
}

/// Claims carried by a session token. `sid` identifies the session for
/// logging; there is no per-user identity behind it.
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionClaims {
    pub sid: Uuid,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            sid: Uuid::now_v7(),
            aud: SESSION_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::days(SESSION_VALIDITY_DAYS)).timestamp(),
        }
    }

    pub fn is_valid_now(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        self.aud == SESSION_AUDIENCE && self.iat <= now && now <= self.exp
    }
}

impl Default for SessionClaims {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid session token format")]
    InvalidFormat,
    #[error("Base64 decoding error: {0}")]
    Base64DecodingError(#[from] base64::DecodeError),
    #[error("Invalid session token signature: {0}")]
    InvalidSignature(#[from] SignatureError),
    #[error("Session token parsing error: {0}")]
    ParsingError(#[from] serde_json::Error),
    #[error("Session token is not valid at the current time")]
    InvalidTime,
}

/// Tokens are `base64url(claims).base64url(signature)`, signed with the
/// process ed25519 key over the claims segment.
pub fn issue_session_token(
    claims: &SessionClaims,
    signing_key: &SigningKey,
) -> Result<String, TokenError> {
    let claims_segment = BASE64_URL_SAFE.encode(serde_json::to_vec(claims)?);
    let signature: Signature = signing_key
        .try_sign(claims_segment.as_bytes())
        .map_err(TokenError::InvalidSignature)?;
    let signature_segment = BASE64_URL_SAFE.encode(signature.to_bytes());
    Ok(format!("{claims_segment}.{signature_segment}"))
}

pub fn verify_session_token(
    token: &str,
    verifying_key: &VerifyingKey,
) -> Result<SessionClaims, TokenError> {
    let (claims_segment, signature_segment) =
        token.split_once('.').ok_or(TokenError::InvalidFormat)?;
    if signature_segment.contains('.') {
        return Err(TokenError::InvalidFormat);
    }

    let signature_bytes = BASE64_URL_SAFE.decode(signature_segment)?;
    let signature = Signature::from_slice(&signature_bytes)?;
    verifying_key.verify(claims_segment.as_bytes(), &signature)?;

    let claims: SessionClaims = serde_json::from_slice(&BASE64_URL_SAFE.decode(claims_segment)?)?;
    if !claims.is_valid_now() {
        return Err(TokenError::InvalidTime);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn test_session_token_round_trip() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = VerifyingKey::from(&signing_key);

        let claims = SessionClaims::new();
        let token = issue_session_token(&claims, &signing_key).expect("Failed to issue token");
        let parsed = verify_session_token(&token, &verifying_key).expect("Failed to verify token");

        assert_eq!(parsed.sid, claims.sid);
        assert_eq!(parsed.aud, SESSION_AUDIENCE);
    }

    #[test]
    fn test_session_token_wrong_key_is_rejected() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let other_verifying_key = VerifyingKey::from(&SigningKey::generate(&mut OsRng));

        let token =
            issue_session_token(&SessionClaims::new(), &signing_key).expect("Failed to issue token");
        let result = verify_session_token(&token, &other_verifying_key);
        assert!(matches!(result, Err(TokenError::InvalidSignature(_))));
    }

    #[test]
    fn test_expired_session_token_is_rejected() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = VerifyingKey::from(&signing_key);

        let mut claims = SessionClaims::new();
        claims.exp = claims.iat - 1;
        let token = issue_session_token(&claims, &signing_key).expect("Failed to issue token");
        let result = verify_session_token(&token, &verifying_key);
        assert!(matches!(result, Err(TokenError::InvalidTime)));
    }

    #[test]
    fn test_mangled_token_is_rejected() {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = VerifyingKey::from(&signing_key);

        assert!(matches!(
            verify_session_token("no-dot-here", &verifying_key),
            Err(TokenError::InvalidFormat)
        ));

        let token =
            issue_session_token(&SessionClaims::new(), &signing_key).expect("Failed to issue token");
        let mangled = format!("{token}AAAA");
        assert!(verify_session_token(&mangled, &verifying_key).is_err());
    }

    #[test]
    fn test_authenticator_plain_password() {
        let auth = Authenticator {
            password_hash: None,
            password: Some("hunter2".to_string()),
        };
        assert!(auth.verify("hunter2").is_ok());
        assert!(matches!(
            auth.verify("wrong"),
            Err(AuthError::InvalidCredential)
        ));
    }

    #[test]
    fn test_authenticator_argon2_hash() {
        use argon2::password_hash::{PasswordHasher, SaltString};
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2::Argon2::default()
            .hash_password(b"hunter2", &salt)
            .expect("Failed to hash password")
            .to_string();

        let auth = Authenticator {
            password_hash: Some(hash),
            password: None,
        };
        assert!(auth.verify("hunter2").is_ok());
        assert!(matches!(
            auth.verify("wrong"),
            Err(AuthError::InvalidCredential)
        ));
    }

    #[test]
    fn test_unconfigured_authenticator_rejects_everything() {
        let auth = Authenticator {
            password_hash: None,
            password: None,
        };
        assert!(matches!(auth.verify(""), Err(AuthError::NotConfigured)));
        assert!(!auth.is_configured());
    }
}
