use std::sync::LazyLock;

use altcha_lib_rs::ChallengeOptions;
use chrono::Utc;

/// Proof-of-work gate in front of the public join form. Altcha is used when
/// a secret is configured; otherwise submissions pass through unchecked.
static CAPTCHA_SECRET: LazyLock<Option<String>> =
    LazyLock::new(|| std::env::var("ALTCHA_SECRET_KEY").ok());

pub fn is_enabled() -> bool {
    CAPTCHA_SECRET.is_some()
}

#[derive(juniper::GraphQLObject)]
pub struct CaptchaChallenge {
    pub enabled: bool,
    /// Serialized challenge payload for the altcha widget; empty when the
    /// gate is disabled.
    pub challenge: String,
}

pub fn get_challenge() -> juniper::FieldResult<CaptchaChallenge> {
    let Some(ref secret_key) = *CAPTCHA_SECRET else {
        return Ok(CaptchaChallenge {
            enabled: false,
            challenge: String::new(),
        });
    };
    let challenge = altcha_lib_rs::create_challenge(ChallengeOptions {
        hmac_key: secret_key,
        expires: Some(Utc::now() + chrono::Duration::minutes(5)),
        ..Default::default()
    })?;
    Ok(CaptchaChallenge {
        enabled: true,
        challenge: serde_json::to_string(&challenge)?,
    })
}

/// Verify a solved challenge. Always true when the gate is disabled.
pub fn verify_solution(solution: Option<&str>) -> bool {
    let Some(ref secret_key) = *CAPTCHA_SECRET else {
        return true;
    };
    let Some(solution) = solution else {
        return false;
    };
    let result = altcha_lib_rs::verify_json_solution(solution, secret_key, true);
    if let Err(e) = &result {
        tracing::warn!("altcha verification failed: {e}");
    }
    result.is_ok()
}
