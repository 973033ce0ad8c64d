use axum::extract::{Extension, Query, State};

use crate::agenda::{collect_metrics, AgendaFilters, AgendaMetrics, AgendaPlan};
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, ResolvedProfile};

/// GET /api/agenda/metricas - Headline counters for the dashboard cards
///
/// Honours the dropdown and date filters except the deadline pair.
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "data": { "compromissos": 3, "tarefas": 7, "hoje": 3, "fatal": 1 }
/// }
/// ```
pub async fn metricas_get(
    State(state): State<AppState>,
    Extension(ResolvedProfile(profile)): Extension<ResolvedProfile>,
    Query(filters): Query<AgendaFilters>,
) -> ApiResult<AgendaMetrics> {
    let plan = AgendaPlan::build_for_metrics(&filters, state.caller(profile.as_ref()))?;
    let metrics = collect_metrics(state.store.as_ref(), state.clock.today(), &plan.predicate).await?;
    Ok(ApiResponse::success(metrics))
}
