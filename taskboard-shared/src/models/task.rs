/// Task model and database operations
///
/// Tasks are work items owned by accounts. Every task must reference an
/// existing account at creation time; the foreign key is the standing
/// guarantee and the application-level owner check only provides a
/// faster, clearer failure. Listings are always ordered newest-first by
/// creation time.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     owner_id BIGINT NOT NULL REFERENCES accounts(id) ON DELETE RESTRICT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT tasks_title_not_blank CHECK (length(trim(title)) > 0)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{Task, CreateTask, TaskFilter};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Write spec".to_string(),
///     description: None,
///     owner_id: 1,
/// }).await?;
/// println!("Created task {} for {}", task.id, task.owner.name);
///
/// // Completed tasks for one owner
/// let done = Task::list(&pool, TaskFilter {
///     owner_id: Some(1),
///     completed: Some(true),
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;

use crate::models::account::Account;

/// Errors from task repository operations
#[derive(Debug, Error)]
pub enum TaskError {
    /// The referenced owner account does not exist
    ///
    /// Raised by the pre-insert check, or classified from the foreign
    /// key violation when the owner disappears between check and insert.
    #[error("account {0} does not exist")]
    UnknownOwner(i64),

    /// Any other store failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Task model as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID, generated on creation, immutable
    pub id: i64,

    /// Short human-readable title, never empty
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Whether the task is done (defaults to false on creation)
    pub completed: bool,

    /// Owning account ID
    pub owner_id: i64,

    /// Set once at creation; the sole sort key for listings
    pub created_at: DateTime<Utc>,
}

/// Reduced read-only view of a task's owner
///
/// A fixed projection (id, name, email), kept as a separate type from
/// [`Account`] so fields added to the full entity later never leak into
/// task payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOwner {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Account> for TaskOwner {
    fn from(account: Account) -> Self {
        TaskOwner {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

/// Task read view with the reduced owner projection embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithOwner {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,

    /// Reduced owner view, never the full account
    pub owner: TaskOwner,
}

/// Joined row shape for task + owner queries
#[derive(Debug, sqlx::FromRow)]
struct TaskWithOwnerRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
    owner_id: i64,
    created_at: DateTime<Utc>,
    owner_name: String,
    owner_email: String,
}

impl From<TaskWithOwnerRow> for TaskWithOwner {
    fn from(row: TaskWithOwnerRow) -> Self {
        TaskWithOwner {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
            owner_id: row.owner_id,
            created_at: row.created_at,
            owner: TaskOwner {
                id: row.owner_id,
                name: row.owner_name,
                email: row.owner_email,
            },
        }
    }
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// Input for updating a task
///
/// All fields are optional; only non-None fields are updated. The owner
/// is not mutable through updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTask {
    /// True when no field is set, making the update a no-op
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Conjunctive filter for task listings
///
/// Each field, when present, must match exactly; absent fields impose no
/// constraint. Both fields absent selects every task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    /// Only tasks owned by this account
    pub owner_id: Option<i64>,

    /// Only tasks with this completion state
    ///
    /// Tri-state: None is distinct from Some(false).
    pub completed: Option<bool>,
}

const TASK_WITH_OWNER_SELECT: &str = r#"
    SELECT t.id, t.title, t.description, t.completed, t.owner_id, t.created_at,
           a.name AS owner_name, a.email AS owner_email
    FROM tasks t
    JOIN accounts a ON a.id = t.owner_id
"#;

impl Task {
    /// Creates a new task for an existing account
    ///
    /// Assigns `created_at` and leaves `completed` false. The owner is
    /// checked before the insert for a clear error message; the foreign
    /// key still backstops the race where the owner is deleted between
    /// check and insert, and that violation classifies the same way.
    ///
    /// # Errors
    ///
    /// - [`TaskError::UnknownOwner`] if `owner_id` matches no account
    /// - [`TaskError::Database`] for any other store failure
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<TaskWithOwner, TaskError> {
        let owner = Account::find_by_id(pool, data.owner_id)
            .await?
            .ok_or(TaskError::UnknownOwner(data.owner_id))?;

        let inserted = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed, owner_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await
        .map_err(|e| classify_owner_fk(e, data.owner_id))?;

        Ok(TaskWithOwner {
            id: inserted.id,
            title: inserted.title,
            description: inserted.description,
            completed: inserted.completed,
            owner_id: inserted.owner_id,
            created_at: inserted.created_at,
            owner: TaskOwner::from(owner),
        })
    }

    /// Finds a task by ID with its reduced owner view
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<TaskWithOwner>, sqlx::Error> {
        let query = format!("{} WHERE t.id = $1", TASK_WITH_OWNER_SELECT);

        let row = sqlx::query_as::<_, TaskWithOwnerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(TaskWithOwner::from))
    }

    /// Lists tasks matching the filter, newest first
    ///
    /// Filters combine conjunctively; an empty filter returns all tasks.
    pub async fn list(pool: &PgPool, filter: TaskFilter) -> Result<Vec<TaskWithOwner>, sqlx::Error> {
        // Build the conjunctive predicate from whichever filters are set
        let mut query = String::from(TASK_WITH_OWNER_SELECT);
        let mut conditions = Vec::new();
        let mut bind_count = 0;

        if filter.owner_id.is_some() {
            bind_count += 1;
            conditions.push(format!("t.owner_id = ${}", bind_count));
        }
        if filter.completed.is_some() {
            bind_count += 1;
            conditions.push(format!("t.completed = ${}", bind_count));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY t.created_at DESC");

        let mut q = sqlx::query_as::<_, TaskWithOwnerRow>(&query);

        if let Some(owner_id) = filter.owner_id {
            q = q.bind(owner_id);
        }
        if let Some(completed) = filter.completed {
            q = q.bind(completed);
        }

        let rows = q.fetch_all(pool).await?;

        Ok(rows.into_iter().map(TaskWithOwner::from).collect())
    }

    /// Lists the plain tasks owned by one account, newest first
    ///
    /// Used for embedding into account reads, where the owner view would
    /// be redundant.
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, owner_id, created_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task
    ///
    /// Only non-None fields are updated; the owner and creation time are
    /// never touched. An empty update is a no-op returning the current
    /// row. Returns None if the task does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<TaskWithOwner>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET");
        let mut bind_count = 1;
        let mut assignments = Vec::new();

        if data.title.is_some() {
            bind_count += 1;
            assignments.push(format!(" title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            assignments.push(format!(" description = ${}", bind_count));
        }
        if data.completed.is_some() {
            bind_count += 1;
            assignments.push(format!(" completed = ${}", bind_count));
        }

        query.push_str(&assignments.join(","));
        query.push_str(" WHERE id = $1 RETURNING id");

        let mut q = sqlx::query_as::<_, (i64,)>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(completed) = data.completed {
            q = q.bind(completed);
        }

        let Some((updated_id,)) = q.fetch_optional(pool).await? else {
            return Ok(None);
        };

        Self::find_by_id(pool, updated_id).await
    }

    /// Deletes a task by ID
    ///
    /// Returns true if the task was deleted, false if it didn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of tasks
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts completed tasks
    pub async fn count_completed(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE completed")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

/// Maps a foreign key violation on tasks.owner_id to UnknownOwner
fn classify_owner_fk(err: sqlx::Error, owner_id: i64) -> TaskError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err
            .constraint()
            .is_some_and(|c| c.contains("owner_id"))
        {
            return TaskError::UnknownOwner(owner_id);
        }
    }
    TaskError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_filter_default_is_unconstrained() {
        let filter = TaskFilter::default();
        assert!(filter.owner_id.is_none());
        assert!(filter.completed.is_none());
    }

    #[test]
    fn test_task_filter_tri_state_completed() {
        // Unset is distinct from both true and false
        let unset = TaskFilter::default();
        let pending = TaskFilter {
            completed: Some(false),
            ..Default::default()
        };
        assert!(unset.completed.is_none());
        assert_eq!(pending.completed, Some(false));
    }

    #[test]
    fn test_update_task_is_empty() {
        assert!(UpdateTask::default().is_empty());

        let update = UpdateTask {
            completed: Some(true),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_task_with_owner_from_row() {
        let row = TaskWithOwnerRow {
            id: 3,
            title: "Write spec".to_string(),
            description: None,
            completed: false,
            owner_id: 1,
            created_at: Utc::now(),
            owner_name: "Ana".to_string(),
            owner_email: "ana@example.com".to_string(),
        };

        let task = TaskWithOwner::from(row);
        assert_eq!(task.owner.id, task.owner_id);
        assert_eq!(task.owner.name, "Ana");
        assert_eq!(task.owner.email, "ana@example.com");
    }

    #[test]
    fn test_task_with_owner_serializes_reduced_owner() {
        let task = TaskWithOwner {
            id: 3,
            title: "Write spec".to_string(),
            description: Some("first draft".to_string()),
            completed: false,
            owner_id: 1,
            created_at: Utc::now(),
            owner: TaskOwner {
                id: 1,
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
            },
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["ownerId"], 1);
        assert_eq!(json["owner"]["name"], "Ana");
        // The reduced view carries exactly id, name, email
        assert_eq!(json["owner"].as_object().unwrap().len(), 3);
        assert!(json["owner"].get("createdAt").is_none());
    }

    #[test]
    fn test_unknown_owner_error_display() {
        let err = TaskError::UnknownOwner(999);
        assert_eq!(err.to_string(), "account 999 does not exist");
    }

    // Integration tests for database operations are in tests/model_tests.rs
}
