use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, warn};

use crate::app::AppState;
use crate::auth::validate_jwt;
use crate::permissions::PermissionProfile;

/// Permission profile of the caller, if one could be resolved.
///
/// Always present in request extensions behind [`resolve_profile_middleware`];
/// `None` means anonymous and is handled by the scoper's null-profile policy.
#[derive(Clone, Debug, Default)]
pub struct ResolvedProfile(pub Option<PermissionProfile>);

/// Resolves the bearer token to a permission profile. Never rejects a request.
pub async fn resolve_profile_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let profile = resolve_profile(&state, &headers).await;
    request.extensions_mut().insert(ResolvedProfile(profile));
    next.run(request).await
}

async fn resolve_profile(state: &AppState, headers: &HeaderMap) -> Option<PermissionProfile> {
    let token = match extract_jwt_from_headers(headers) {
        Ok(token) => token,
        Err(reason) => {
            debug!(reason, "no usable bearer token");
            return None;
        }
    };

    let claims = match validate_jwt(&token, &state.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("rejected bearer token: {}", e);
            return None;
        }
    };

    let row = match state.store.find_user_permissions(&claims.id).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            debug!(user_id = %claims.id, "token user not found");
            return None;
        }
        Err(e) => {
            error!(user_id = %claims.id, "failed to load permissions: {}", e);
            return None;
        }
    };

    if !row.is_active() {
        debug!(user_id = %claims.id, "token user is inactive");
        return None;
    }

    match row.into_profile() {
        Ok(profile) => {
            debug!(
                user_id = %claims.id,
                role = profile.role.as_str(),
                executors = profile.authorized_executors.len(),
                "resolved permission profile"
            );
            Some(profile)
        }
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
