use axum::extract::{Extension, Path, Query, State};

use crate::agenda::{count_by_dimension, AgendaFilters, AgendaPlan, Dimension, DimensionChart};
use crate::app::AppState;
use crate::error::ApiError;
use crate::filter::fields;
use crate::middleware::{ApiResponse, ApiResult, ResolvedProfile};

/// GET /api/agenda/grafico/:dimensao - Distinct tasks per value of one column
///
/// `dimensao` is one of `status`, `executante`, `tipo`, `complexidade` or `pasta`.
pub async fn grafico_get(
    Path(dimensao): Path<String>,
    State(state): State<AppState>,
    Extension(ResolvedProfile(profile)): Extension<ResolvedProfile>,
    Query(filters): Query<AgendaFilters>,
) -> ApiResult<DimensionChart> {
    let dimension = Dimension::from_path(&dimensao)
        .ok_or_else(|| ApiError::not_found(format!("Unknown chart dimension '{}'", dimensao)))?;

    let today = state.clock.today();
    let plan = AgendaPlan::build(today, &filters, state.caller(profile.as_ref()))?;
    let rows = plan
        .fetch(state.store.as_ref(), today, &[fields::ID, dimension.column()])
        .await?;

    Ok(ApiResponse::success(count_by_dimension(&rows, dimension)))
}
