use chrono::{Duration, Utc};
use entity::user::{Role, User};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SESSION_COOKIE: &str = "workforce_session";

/// Every directory account shares this demo password; there are no secrets
/// to store or hash.
pub const DEMO_PASSWORD: &str = "password123";

static DIRECTORY: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        User {
            id: "1".into(),
            email: "employee@test.com".into(),
            name: "John Smith".into(),
            role: Role::Employee,
        },
        User {
            id: "2".into(),
            email: "manager@test.com".into(),
            name: "Sarah Johnson".into(),
            role: Role::Manager,
        },
        User {
            id: "3".into(),
            email: "hr@test.com".into(),
            name: "Mike Wilson".into(),
            role: Role::Hr,
        },
    ]
});

/// The static user directory. Accounts are never created or removed at
/// runtime.
pub fn directory() -> &'static [User] {
    &DIRECTORY
}

pub fn find_by_id(id: &str) -> Option<&'static User> {
    DIRECTORY.iter().find(|user| user.id == id)
}

pub fn find_by_email(email: &str) -> Option<&'static User> {
    let needle = email.trim().to_lowercase();
    DIRECTORY.iter().find(|user| user.email == needle)
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
}

impl AuthConfig {
    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.jwt_secret.as_bytes())
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.jwt_secret.as_bytes())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Immutable descriptor of the authenticated user, injected into every
/// request. Resolvers read this from context data; nothing consults ambient
/// globals.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl Viewer {
    pub fn of(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role.level() >= role.level()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no account found for that email")]
    UnknownUser,
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Linear scan of the directory: case-insensitive email, the constant demo
/// password, and (when the login form sends one) a matching role. An unknown
/// email is reported distinctly from a bad password or role.
pub fn authenticate(
    email: &str,
    password: &str,
    role: Option<Role>,
) -> Result<&'static User, AuthError> {
    let user = find_by_email(email).ok_or(AuthError::UnknownUser)?;
    if password != DEMO_PASSWORD {
        return Err(AuthError::InvalidCredentials);
    }
    if let Some(expected) = role {
        if expected != user.role {
            return Err(AuthError::InvalidCredentials);
        }
    }
    Ok(user)
}

pub fn issue_token(
    user_id: &str,
    config: &AuthConfig,
) -> jsonwebtoken::errors::Result<String> {
    let now = Utc::now();
    let exp = now
        .checked_add_signed(Duration::minutes(config.session_ttl_minutes))
        .unwrap_or(now)
        .timestamp() as usize;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp,
        iat: now.timestamp() as usize,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &config.encoding_key())
}

pub fn decode_token(
    token: &str,
    config: &AuthConfig,
) -> jsonwebtoken::errors::Result<SessionClaims> {
    jsonwebtoken::decode::<SessionClaims>(token, &config.decoding_key(), &Validation::default())
        .map(|data| data.claims)
}
