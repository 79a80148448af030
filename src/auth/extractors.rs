use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{jwt::JwtKeys, repo_types::User, services::authorize_curator},
    errors::AppError,
    state::AppState,
};

/// Authentication step: a valid bearer token, resolved to the identity it
/// carries. Says nothing about permissions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Read Authorization header
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AppError::Unauthorized("No token provided"))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized("No token provided"))?;

        let keys = JwtKeys::from_ref(state);
        let subject = keys.verify(token).map_err(|e| {
            warn!(reason = %e, "token rejected");
            AppError::Unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser {
            id: subject.user_id,
            email: subject.email,
        })
    }
}

/// Authorization step: the authenticated user, reloaded from the user store
/// and required to hold the curator flag there.
#[derive(Debug, Clone)]
pub struct Curator(pub User);

#[async_trait]
impl FromRequestParts<AppState> for Curator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let user = authorize_curator(state.users.as_ref(), &auth).await?;
        Ok(Curator(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Request};

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut req = Request::builder().uri("/api/me");
        if let Some(value) = auth {
            req = req.header(header::AUTHORIZATION, value);
        }
        req.body(()).expect("request").into_parts().0
    }

    #[tokio::test]
    async fn bearer_token_resolves_identity() {
        let state = AppState::fake();
        let id = Uuid::new_v4();
        let token = JwtKeys::from_ref(&state)
            .issue(id, "viewer@pathos.local")
            .expect("issue");

        let mut parts = parts_with(Some(&format!("Bearer {token}")));
        let auth = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("authenticated");
        assert_eq!(auth.id, id);
        assert_eq!(auth.email, "viewer@pathos.local");
    }

    #[tokio::test]
    async fn missing_or_malformed_header_is_unauthorized() {
        let state = AppState::fake();
        for value in [None, Some("Bearer "), Some("Basic dXNlcjpwdw=="), Some("Bearer nope")] {
            let mut parts = parts_with(value);
            assert!(matches!(
                AuthUser::from_request_parts(&mut parts, &state).await,
                Err(AppError::Unauthorized(_))
            ));
        }
    }
}
