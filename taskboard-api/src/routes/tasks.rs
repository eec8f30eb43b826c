/// Task endpoints
///
/// CRUD over the `/tasks` resource plus filtered listings. Every task
/// payload embeds the reduced owner view (id, name, email), never the
/// full account. A task referencing a missing owner on creation is a
/// validation failure, since the referenced id came from the caller.
///
/// # Endpoints
///
/// ```text
/// GET    /tasks               200 array, ?ownerId= & ?completed=true|false
/// POST   /tasks               201 created task    400 validation/unknown owner
/// GET    /tasks/:id           200 task            404 not found
/// PUT    /tasks/:id           200 updated task    404 not found
/// DELETE /tasks/:id           200 confirmation    404 not found
/// ```

use crate::{app::AppState, error::ApiError, routes::DeleteResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::task::{CreateTask, Task, TaskFilter, TaskWithOwner, UpdateTask};
use validator::Validate;

/// Query parameters for task listings
///
/// Both filters are optional and conjunctive. `completed` is tri-state:
/// absent means no constraint, which is distinct from false.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// Only tasks owned by this account
    pub owner_id: Option<i64>,

    /// Only tasks with this completion state ("true"/"false")
    pub completed: Option<bool>,
}

impl From<ListTasksQuery> for TaskFilter {
    fn from(query: ListTasksQuery) -> Self {
        TaskFilter {
            owner_id: query.owner_id,
            completed: query.completed,
        }
    }
}

/// Create task request
///
/// Required fields arrive as options so absence maps to a 400 with a
/// clear message instead of a body-rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub owner_id: Option<i64>,
}

/// Update task request
///
/// The owner is not mutable through this endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub completed: Option<bool>,
}

/// GET /tasks
///
/// Lists tasks matching the supplied filters, newest first.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<TaskWithOwner>>, ApiError> {
    let tasks = Task::list(&state.db, query.into()).await?;
    Ok(Json(tasks))
}

/// GET /tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskWithOwner>, ApiError> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;

    Ok(Json(task))
}

/// POST /tasks
///
/// Requires `title` and `ownerId`; the owner must exist.
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskWithOwner>), ApiError> {
    request.validate()?;

    let title = request
        .title
        .ok_or_else(|| ApiError::BadRequest("title is required".to_string()))?;
    let owner_id = request
        .owner_id
        .ok_or_else(|| ApiError::BadRequest("ownerId is required".to_string()))?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title,
            description: request.description,
            owner_id,
        },
    )
    .await?;

    tracing::info!(task_id = task.id, owner_id = task.owner_id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/:id
///
/// Partial update; only supplied fields change.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<TaskWithOwner>, ApiError> {
    request.validate()?;

    let update = UpdateTask {
        title: request.title,
        description: request.description,
        completed: request.completed,
    };

    let task = Task::update(&state.db, id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task {} not found", id)))?;

    tracing::info!(task_id = task.id, completed = task.completed, "Task updated");

    Ok(Json(task))
}

/// DELETE /tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = Task::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Task {} not found", id)));
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(Json(DeleteResponse {
        message: format!("Task {} deleted", id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_validation() {
        let valid = CreateTaskRequest {
            title: Some("Write spec".to_string()),
            description: None,
            owner_id: Some(1),
        };
        assert!(valid.validate().is_ok());

        // Empty title
        let empty_title = CreateTaskRequest {
            title: Some("".to_string()),
            description: None,
            owner_id: Some(1),
        };
        assert!(empty_title.validate().is_err());

        // Title too long
        let long_title = CreateTaskRequest {
            title: Some("a".repeat(256)),
            description: None,
            owner_id: Some(1),
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_list_query_maps_to_filter() {
        let query = ListTasksQuery {
            owner_id: Some(7),
            completed: Some(true),
        };

        let filter: TaskFilter = query.into();
        assert_eq!(filter.owner_id, Some(7));
        assert_eq!(filter.completed, Some(true));

        let empty: TaskFilter = ListTasksQuery::default().into();
        assert!(empty.owner_id.is_none());
        assert!(empty.completed.is_none());
    }

    #[test]
    fn test_list_query_parses_tri_state_completed() {
        let unset: ListTasksQuery = serde_urlencoded::from_str("").unwrap();
        assert!(unset.completed.is_none());

        let done: ListTasksQuery = serde_urlencoded::from_str("completed=true").unwrap();
        assert_eq!(done.completed, Some(true));

        let pending: ListTasksQuery =
            serde_urlencoded::from_str("ownerId=3&completed=false").unwrap();
        assert_eq!(pending.owner_id, Some(3));
        assert_eq!(pending.completed, Some(false));
    }
}
