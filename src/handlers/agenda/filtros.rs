use axum::extract::{Extension, State};

use crate::agenda::{DateRanges, FilterOptions};
use crate::app::AppState;
use crate::filter::{fields, Predicate};
use crate::middleware::{ApiResponse, ApiResult, ResolvedProfile};
use crate::permissions::scope_with;

/// GET /api/agenda/filtros - Dropdown values and date spans visible to the caller
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "data": {
///     "executantes": ["Ana"],
///     "status": ["Cumprido", "Pendente"],
///     "complexidades": ["Alta"],
///     "tipos": ["Prazo"],
///     "pastas": ["P-100"],
///     "ranges": {
///       "dataInicio": { "min": "2025-06-02", "max": "2025-06-10" },
///       "conclusaoPrevista": { "min": null, "max": null },
///       "conclusaoEfetiva": { "min": null, "max": null },
///       "prazoFatal": { "min": "2025-06-09", "max": "2025-12-31" }
///     }
///   }
/// }
/// ```
pub async fn filtros_get(
    State(state): State<AppState>,
    Extension(ResolvedProfile(profile)): Extension<ResolvedProfile>,
) -> ApiResult<FilterOptions> {
    let scoped = scope_with(profile.as_ref(), Predicate::new(), state.anonymous);
    let store = state.store.as_ref();

    let (executantes, status, complexidades, tipos, pastas) = tokio::try_join!(
        store.distinct_values(fields::EXECUTOR, &scoped),
        store.distinct_values(fields::STATUS, &scoped),
        store.distinct_values(fields::LABEL, &scoped),
        store.distinct_values(fields::SUBTYPE, &scoped),
        store.distinct_values(fields::FOLDER, &scoped),
    )?;

    let (data_inicio, conclusao_prevista, conclusao_efetiva, prazo_fatal) = tokio::try_join!(
        store.date_bounds(fields::START_DATE, &scoped),
        store.date_bounds(fields::EXPECTED_END_DATE, &scoped),
        store.date_bounds(fields::ACTUAL_END_DATE, &scoped),
        store.date_bounds(fields::DEADLINE, &scoped),
    )?;

    Ok(ApiResponse::success(FilterOptions {
        executantes,
        status,
        complexidades,
        tipos,
        pastas,
        ranges: DateRanges { data_inicio, conclusao_prevista, conclusao_efetiva, prazo_fatal },
    }))
}
