//! Role-based authorization.
//!
//! Routers whose every route is admin-only take [`require_admin`] as a
//! `route_layer`. Mixed routers use the [`RequireAdmin`] extractor on the
//! handlers that write.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use tuitionhub_core::AppError;
use tuitionhub_models::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub(crate) fn check_role(user: &AuthUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if allowed.contains(&user.role()) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {}",
            allowed,
            user.role()
        )))
    }
}

pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_role(&auth_user, allowed)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, &[UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// An [`AuthUser`] known to be an admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin() {
            return Err(AppError::forbidden(
                "Access denied. Administrator privileges required.".to_string(),
            ));
        }

        Ok(RequireAdmin(auth_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuitionhub_auth::Claims;
    use uuid::Uuid;

    fn user(role: UserRole) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            email: "user@example.com".to_string(),
            role,
            exp: 9_999_999_999,
            iat: 1_234_567_890,
        })
    }

    #[test]
    fn test_admin_passes_admin_check() {
        assert!(check_role(&user(UserRole::Admin), &[UserRole::Admin]).is_ok());
    }

    #[test]
    fn test_student_is_forbidden() {
        let err = check_role(&user(UserRole::Student), &[UserRole::Admin]).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[test]
    fn test_multiple_allowed_roles() {
        let allowed = [UserRole::Admin, UserRole::Student];
        assert!(check_role(&user(UserRole::Student), &allowed).is_ok());
    }
}
