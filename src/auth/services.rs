use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::UserStore,
        repo_types::User,
    },
    config::CuratorSeed,
    errors::{AppError, StoreError},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trims the email and checks both fields are present and well-formed.
fn credentials(email: Option<String>, password: Option<String>) -> Result<(String, String), AppError> {
    let email = email.map(|e| e.trim().to_string()).unwrap_or_default();
    let password = password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Email and password required".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    Ok((email, password))
}

fn respond(keys: &JwtKeys, user: User) -> Result<AuthResponse, AppError> {
    let token = keys.issue(user.id, &user.email)?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

pub async fn register(
    users: &dyn UserStore,
    keys: &JwtKeys,
    payload: RegisterRequest,
) -> Result<AuthResponse, AppError> {
    let (email, password) = credentials(payload.email, payload.password)?;
    let hash = hash_password(&password)?;

    let user = users.create(&email, &hash).await.map_err(|e| {
        if matches!(e, StoreError::DuplicateEmail) {
            warn!(email = %email, "email already registered");
        }
        AppError::from(e)
    })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    respond(keys, user)
}

pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    payload: LoginRequest,
) -> Result<AuthResponse, AppError> {
    let (email, password) = credentials(payload.email, payload.password)?;

    let Some(user) = users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized("Invalid credentials"));
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials"));
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    respond(keys, user)
}

pub async fn me(users: &dyn UserStore, auth: &AuthUser) -> Result<PublicUser, AppError> {
    let user = users
        .find_by_id(auth.id)
        .await?
        .ok_or(AppError::Unauthorized("User not found"))?;
    Ok(user.into())
}

/// Re-reads the user from the store; the token's claims are not trusted for
/// the role, so a demotion applies on the next request.
pub async fn authorize_curator(users: &dyn UserStore, auth: &AuthUser) -> Result<User, AppError> {
    match users.find_by_id(auth.id).await? {
        Some(user) if user.is_curator => Ok(user),
        Some(_) => {
            warn!(user_id = %auth.id, "curator access denied");
            Err(AppError::Forbidden)
        }
        None => {
            warn!(user_id = %auth.id, "token subject no longer exists");
            Err(AppError::Forbidden)
        }
    }
}

/// Creates the configured curator account if missing and sets its curator
/// flag. An existing password is left as is.
pub async fn ensure_curator(users: &dyn UserStore, seed: &CuratorSeed) -> anyhow::Result<User> {
    if users.find_by_email(&seed.email).await?.is_none() {
        let hash = hash_password(&seed.password)?;
        match users.create(&seed.email, &hash).await {
            Ok(_) | Err(StoreError::DuplicateEmail) => {}
            Err(e) => return Err(e.into()),
        }
    }
    let user = users.set_curator(&seed.email, true).await?;
    info!(user_id = %user.id, email = %user.email, "curator account ensured");
    Ok(user)
}
