use async_graphql::{Context, Enum, Object, SimpleObject, ID};
use entity::user::{Role, User};

use crate::auth::{self, AuthError, SESSION_COOKIE};

use super::{auth_config, error_with_code, viewer};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "Role")]
pub enum RoleKind {
    Employee,
    Manager,
    #[graphql(name = "HR")]
    Hr,
}

impl From<Role> for RoleKind {
    fn from(value: Role) -> Self {
        match value {
            Role::Employee => RoleKind::Employee,
            Role::Manager => RoleKind::Manager,
            Role::Hr => RoleKind::Hr,
        }
    }
}

impl From<RoleKind> for Role {
    fn from(value: RoleKind) -> Self {
        match value {
            RoleKind::Employee => Role::Employee,
            RoleKind::Manager => Role::Manager,
            RoleKind::Hr => Role::Hr,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "User")]
pub struct UserNode {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub role: RoleKind,
}

impl From<&User> for UserNode {
    fn from(user: &User) -> Self {
        Self {
            id: ID::from(user.id.clone()),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.into(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct MePayload {
    pub user: UserNode,
}

#[derive(Clone, Debug, SimpleObject, Default)]
pub struct AuthPayload {
    pub ok: bool,
    pub user: Option<UserNode>,
    pub error: Option<String>,
}

pub(super) fn me(ctx: &Context<'_>) -> async_graphql::Result<MePayload> {
    let current = viewer(ctx)?;
    let user = auth::find_by_id(&current.id)
        .ok_or_else(|| error_with_code("UNAUTHENTICATED", "Login required"))?;
    Ok(MePayload {
        user: UserNode::from(user),
    })
}

pub(super) fn users(ctx: &Context<'_>) -> async_graphql::Result<Vec<UserNode>> {
    viewer(ctx)?;
    Ok(auth::directory().iter().map(UserNode::from).collect())
}

pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Mock login: linear scan of the static directory against the shared
    /// demo password. Succeeding issues a session cookie, the one value that
    /// survives a reload.
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        role: Option<RoleKind>,
    ) -> async_graphql::Result<AuthPayload> {
        let auth = auth_config(ctx)?;
        match auth::authenticate(&email, &password, role.map(Role::from)) {
            Ok(user) => {
                let token = auth::issue_token(&user.id, &auth)
                    .map_err(|_| error_with_code("INTERNAL", "Failed to issue session token"))?;
                append_session_cookie(ctx, &token, auth.session_ttl_minutes);
                Ok(AuthPayload {
                    ok: true,
                    user: Some(UserNode::from(user)),
                    error: None,
                })
            }
            Err(AuthError::UnknownUser) => Ok(AuthPayload {
                ok: false,
                user: None,
                error: Some("No account found for that email".into()),
            }),
            Err(AuthError::InvalidCredentials) => Ok(AuthPayload {
                ok: false,
                user: None,
                error: Some("Invalid credentials".into()),
            }),
        }
    }

    async fn logout(&self, ctx: &Context<'_>) -> async_graphql::Result<bool> {
        append_session_cookie(ctx, "", -1);
        Ok(true)
    }
}

fn append_session_cookie(ctx: &Context<'_>, token: &str, ttl_minutes: i64) {
    let max_age = (ttl_minutes.max(0) * 60).to_string();
    let cookie = if ttl_minutes < 0 {
        format!(
            "{}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE
        )
    } else {
        format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, token, max_age
        )
    };
    ctx.append_http_header("Set-Cookie", cookie);
}
