/// Common test utilities for integration tests
///
/// Shared infrastructure for driving the full router in-process:
/// - Test database setup (migrations run on connect)
/// - App construction with real state
/// - Helpers to issue JSON requests and read JSON responses
/// - Test account/task fixtures with unique emails per run

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::db::migrations::run_migrations;
use taskboard_shared::models::account::{Account, CreateAccount};
use taskboard_shared::models::task::{CreateTask, Task, TaskWithOwner};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing the app and its backing database
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Issues a request and returns status plus parsed JSON body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Removes an account and everything it owns
    pub async fn cleanup_account(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM tasks WHERE owner_id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Account::delete(&self.db, id).await?;
        Ok(())
    }
}

/// Returns an email no other test run will have used
pub fn unique_email(tag: &str) -> String {
    format!("{}-{}@example.com", tag, Uuid::new_v4())
}

/// Creates an account directly through the model layer
pub async fn create_test_account(ctx: &TestContext, name: &str) -> anyhow::Result<Account> {
    let account = Account::create(
        &ctx.db,
        CreateAccount {
            name: name.to_string(),
            email: unique_email(name),
        },
    )
    .await?;

    Ok(account)
}

/// Creates a task directly through the model layer
pub async fn create_test_task(
    ctx: &TestContext,
    title: &str,
    owner_id: i64,
) -> anyhow::Result<TaskWithOwner> {
    let task = Task::create(
        &ctx.db,
        CreateTask {
            title: title.to_string(),
            description: None,
            owner_id,
        },
    )
    .await?;

    Ok(task)
}
