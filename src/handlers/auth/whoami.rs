// handlers/auth/whoami.rs - GET /api/auth/whoami handler

use axum::extract::Extension;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ResolvedProfile};
use crate::permissions::PermissionProfile;

/// GET /api/auth/whoami - Permission profile behind the bearer token
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "data": {
///     "role": "gerente",
///     "paginas_autorizadas": ["dashboard_agenda"],
///     "executantes_autorizados": ["Ana"]
///   }
/// }
/// ```
pub async fn whoami_get(
    Extension(ResolvedProfile(profile)): Extension<ResolvedProfile>,
) -> ApiResult<PermissionProfile> {
    let profile = profile.ok_or_else(|| ApiError::unauthorized("Authentication required"))?;
    Ok(ApiResponse::success(profile))
}
