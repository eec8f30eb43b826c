/// Account model and database operations
///
/// Accounts own tasks. Email addresses are globally unique; the unique
/// index is the enforcement point and violations are classified from the
/// store error, not pre-checked.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT accounts_name_not_blank CHECK (length(trim(name)) > 0)
/// );
///
/// CREATE UNIQUE INDEX accounts_email_key ON accounts (email);
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::account::{Account, CreateAccount};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let account = Account::create(&pool, CreateAccount {
///     name: "Ana".to_string(),
///     email: "ana@example.com".to_string(),
/// }).await?;
/// println!("Created account: {}", account.id);
///
/// // Read it back with its tasks embedded
/// let found = Account::find_by_id_with_tasks(&pool, account.id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::task::Task;

/// Account model representing a task owner
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID, generated on creation, immutable
    pub id: i64,

    /// Display name, never empty
    pub name: String,

    /// Email address, unique across all accounts
    pub email: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Account read view with its tasks embedded
///
/// Tasks are ordered newest-first by creation time, the same ordering
/// the task listings use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithTasks {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,

    /// Tasks owned by this account, newest first
    pub tasks: Vec<Task>,
}

impl AccountWithTasks {
    /// Combines an account with an already-ordered task list
    pub fn new(account: Account, tasks: Vec<Task>) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            created_at: account.created_at,
            tasks,
        }
    }
}

/// Input for creating a new account
///
/// Both fields are required and must be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
}

/// Input for updating an existing account
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccount {
    /// New display name
    pub name: Option<String>,

    /// New email address (must not collide with another account)
    pub email: Option<String>,
}

impl UpdateAccount {
    /// True when no field is set, making the update a no-op
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl Account {
    /// Creates a new account
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateAccount) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .fetch_one(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by ID
    ///
    /// Returns the account if found, None otherwise.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by ID with its tasks embedded
    ///
    /// Tasks are ordered by creation time descending.
    pub async fn find_by_id_with_tasks(
        pool: &PgPool,
        id: i64,
    ) -> Result<Option<AccountWithTasks>, sqlx::Error> {
        let Some(account) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let tasks = Task::list_by_owner(pool, account.id).await?;

        Ok(Some(AccountWithTasks::new(account, tasks)))
    }

    /// Lists every account with its tasks embedded
    ///
    /// Accounts are ordered by creation date (newest first). Tasks are
    /// fetched in a single pass and grouped by owner, preserving the
    /// newest-first task ordering within each account.
    pub async fn list_all_with_tasks(pool: &PgPool) -> Result<Vec<AccountWithTasks>, sqlx::Error> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, created_at
            FROM accounts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, owner_id, created_at
            FROM tasks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        let mut by_owner: HashMap<i64, Vec<Task>> = HashMap::new();
        for task in tasks {
            by_owner.entry(task.owner_id).or_default().push(task);
        }

        Ok(accounts
            .into_iter()
            .map(|account| {
                let tasks = by_owner.remove(&account.id).unwrap_or_default();
                AccountWithTasks::new(account, tasks)
            })
            .collect())
    }

    /// Updates an existing account
    ///
    /// Only non-None fields in `data` are updated. An empty update is a
    /// no-op that returns the current row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The new email already belongs to another account
    /// - Database connection fails
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateAccount,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE accounts SET");
        let mut bind_count = 1;
        let mut assignments = Vec::new();

        if data.name.is_some() {
            bind_count += 1;
            assignments.push(format!(" name = ${}", bind_count));
        }
        if data.email.is_some() {
            bind_count += 1;
            assignments.push(format!(" email = ${}", bind_count));
        }

        query.push_str(&assignments.join(","));
        query.push_str(" WHERE id = $1 RETURNING id, name, email, created_at");

        let mut q = sqlx::query_as::<_, Account>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }

        let account = q.fetch_optional(pool).await?;

        Ok(account)
    }

    /// Deletes an account by ID
    ///
    /// The foreign key from tasks is declared ON DELETE RESTRICT, so an
    /// account that still owns tasks cannot be deleted; the constraint
    /// violation is surfaced to the caller.
    ///
    /// Returns true if the account was deleted, false if it didn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of accounts
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_account_struct() {
        let create = CreateAccount {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        };

        assert_eq!(create.name, "Ana");
        assert_eq!(create.email, "ana@example.com");
    }

    #[test]
    fn test_update_account_default_is_empty() {
        let update = UpdateAccount::default();
        assert!(update.name.is_none());
        assert!(update.email.is_none());
        assert!(update.is_empty());

        let update = UpdateAccount {
            name: Some("Bea".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_account_serializes_camel_case() {
        let account = Account {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"email\":\"ana@example.com\""));
    }

    #[test]
    fn test_account_with_tasks_embeds_task_list() {
        let account = Account {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            created_at: Utc::now(),
        };

        let with_tasks = AccountWithTasks::new(account, Vec::new());
        let json = serde_json::to_string(&with_tasks).unwrap();
        assert!(json.contains("\"tasks\":[]"));
    }

    // Integration tests for database operations are in tests/model_tests.rs
}
