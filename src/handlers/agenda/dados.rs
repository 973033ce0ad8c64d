use axum::extract::{Extension, Query, State};

use crate::agenda::{AgendaFilters, AgendaPlan, PageInfo, TaskPage};
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, ResolvedProfile};

/// GET /api/agenda/dados - Paginated task listing, newest first
pub async fn dados_get(
    State(state): State<AppState>,
    Extension(ResolvedProfile(profile)): Extension<ResolvedProfile>,
    Query(filters): Query<AgendaFilters>,
) -> ApiResult<TaskPage> {
    let today = state.clock.today();
    let plan = AgendaPlan::build(today, &filters, state.caller(profile.as_ref()))?;
    let pagination = filters.pagination(state.default_limit, state.max_limit);

    let (dados, total) = plan.fetch_page(state.store.as_ref(), today, pagination).await?;

    Ok(ApiResponse::success(TaskPage {
        dados,
        paginacao: PageInfo::new(total, pagination),
    }))
}
