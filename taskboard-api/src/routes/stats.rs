/// Summary report endpoint
///
/// Computes the account/task aggregate counts fresh on every call.
///
/// # Endpoint
///
/// ```text
/// GET /stats
/// ```
///
/// # Response
///
/// ```json
/// {
///   "totalUsers": 1,
///   "totalTasks": 10,
///   "completedTasks": 3,
///   "pendingTasks": 7,
///   "completionRate": 30
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use taskboard_shared::models::stats::Stats;

/// GET /stats handler
///
/// The counts are gathered concurrently with no shared snapshot, so
/// under concurrent writes they are best-effort consistent.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    let stats = Stats::collect(&state.db).await?;
    Ok(Json(stats))
}
