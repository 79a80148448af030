use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{auth::claims::Claims, config::JwtConfig, state::AppState};

/// Why a token was rejected. Logged, never shown to the client.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token signature mismatch")]
    BadSignature,
    #[error("token rejected: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Invalid(e),
        }
    }
}

/// Identity proven by a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::from_secs((config.ttl_minutes.max(0) as u64) * 60),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> anyhow::Result<String> {
        self.issue_at(user_id, email, OffsetDateTime::now_utc())
    }

    pub fn issue_at(&self, user_id: Uuid, email: &str, now: OffsetDateTime) -> anyhow::Result<String> {
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<TokenSubject, TokenError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    /// Checks signature, issuer and audience, then expiry against `now`.
    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<TokenSubject, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        if now.unix_timestamp() >= data.claims.exp as i64 {
            return Err(TokenError::Expired);
        }
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(TokenSubject {
            user_id: data.claims.sub,
            email: data.claims.email,
        })
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::new(&state.config.jwt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 60,
        })
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, "curator@pathos.local").expect("issue");
        let subject = keys.verify(&token).expect("verify");
        assert_eq!(subject.user_id, user_id);
        assert_eq!(subject.email, "curator@pathos.local");
    }

    #[test]
    fn expiry_is_enforced_at_verification() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let issued = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("valid timestamp");
        let horizon = TimeDuration::seconds(keys.ttl.as_secs() as i64);
        let token = keys
            .issue_at(Uuid::new_v4(), "a@b.co", issued)
            .expect("issue");

        let just_before = issued + horizon - TimeDuration::seconds(1);
        assert!(keys.verify_at(&token, just_before).is_ok());

        let just_after = issued + horizon + TimeDuration::seconds(1);
        assert!(matches!(
            keys.verify_at(&token, just_after),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn stale_token_is_rejected_by_wall_clock() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let issued = OffsetDateTime::now_utc() - TimeDuration::hours(2);
        let token = keys.issue_at(Uuid::new_v4(), "a@b.co", issued).expect("issue");
        assert!(matches!(keys.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn verify_rejects_other_secret() {
        let good = make_keys("secret-one", "iss", "aud");
        let bad = make_keys("secret-two", "iss", "aud");
        let token = good.issue(Uuid::new_v4(), "a@b.co").expect("issue");
        assert!(matches!(bad.verify(&token), Err(TokenError::BadSignature)));
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.issue(Uuid::new_v4(), "a@b.co").expect("issue");
        let other = keys.issue(Uuid::new_v4(), "evil@b.co").expect("issue");
        let mut parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        assert!(keys.verify(&parts.join(".")).is_err());
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys("same-secret", "good-iss", "good-aud");
        let bad = make_keys("same-secret", "bad-iss", "bad-aud");
        let token = good.issue(Uuid::new_v4(), "a@b.co").expect("issue");
        assert!(matches!(bad.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret", "iss", "aud");
        assert!(keys.verify("not.a.token").is_err());
        assert!(keys.verify("").is_err());
    }
}
