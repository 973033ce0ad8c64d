use axum::extract::{Extension, Query, State};

use crate::agenda::{summarize_buckets, AgendaFilters, AgendaPlan, BucketSummary};
use crate::app::AppState;
use crate::filter::fields;
use crate::middleware::{ApiResponse, ApiResult, ResolvedProfile};

/// GET /api/agenda/semaforo-fatal - Distinct tasks per deadline bucket
///
/// Honours every filter except `prazoFatalFrom`/`prazoFatalTo`, which the
/// dashboard derives from the bucket the user clicks.
pub async fn semaforo_get(
    State(state): State<AppState>,
    Extension(ResolvedProfile(profile)): Extension<ResolvedProfile>,
    Query(filters): Query<AgendaFilters>,
) -> ApiResult<BucketSummary> {
    let today = state.clock.today();
    let plan = AgendaPlan::build_for_summary(&filters, state.caller(profile.as_ref()))?;

    let rows = plan
        .fetch(state.store.as_ref(), today, &[fields::ID, fields::DEADLINE])
        .await?;

    Ok(ApiResponse::success(summarize_buckets(today, &rows)))
}
