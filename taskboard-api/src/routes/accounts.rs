/// Account endpoints
///
/// CRUD over the `/users` resource. Accounts are returned with their
/// tasks embedded on reads; creation and update validate caller input
/// before touching the store and classify store failures (duplicate
/// email, restricted delete) into the error taxonomy.
///
/// # Endpoints
///
/// ```text
/// GET    /users        200 array of accounts
/// POST   /users        201 created account        400 validation/conflict
/// GET    /users/:id    200 account with tasks     404 not found
/// PUT    /users/:id    200 updated account        404 not found, 400 conflict
/// DELETE /users/:id    200 confirmation           404 not found, 400 conflict
/// ```

use crate::{app::AppState, error::ApiError, routes::DeleteResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::account::{
    Account, AccountWithTasks, CreateAccount, UpdateAccount,
};
use validator::Validate;

/// Create account request
///
/// Required fields arrive as options so absence maps to a 400 with a
/// clear message instead of a body-rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

/// Update account request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

/// GET /users
///
/// Lists every account with its tasks embedded.
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountWithTasks>>, ApiError> {
    let accounts = Account::list_all_with_tasks(&state.db).await?;
    Ok(Json(accounts))
}

/// GET /users/:id
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountWithTasks>, ApiError> {
    let account = Account::find_by_id_with_tasks(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Account {} not found", id)))?;

    Ok(Json(account))
}

/// POST /users
///
/// Requires `name` and `email`; a duplicate email is a conflict.
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountWithTasks>), ApiError> {
    request.validate()?;

    let name = request
        .name
        .ok_or_else(|| ApiError::BadRequest("name is required".to_string()))?;
    let email = request
        .email
        .ok_or_else(|| ApiError::BadRequest("email is required".to_string()))?;

    let account = Account::create(&state.db, CreateAccount { name, email }).await?;

    tracing::info!(account_id = account.id, "Account created");

    // A fresh account owns nothing yet
    let body = AccountWithTasks::new(account, Vec::new());

    Ok((StatusCode::CREATED, Json(body)))
}

/// PUT /users/:id
///
/// Partial update; only supplied fields change.
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<Account>, ApiError> {
    request.validate()?;

    let update = UpdateAccount {
        name: request.name,
        email: request.email,
    };

    let account = Account::update(&state.db, id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Account {} not found", id)))?;

    tracing::info!(account_id = account.id, "Account updated");

    Ok(Json(account))
}

/// DELETE /users/:id
///
/// Fails with a conflict while the account still owns tasks (the
/// RESTRICT foreign key rejects the delete rather than orphaning them).
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = Account::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound(format!("Account {} not found", id)));
    }

    tracing::info!(account_id = id, "Account deleted");

    Ok(Json(DeleteResponse {
        message: format!("Account {} deleted", id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_account_request_validation() {
        let valid = CreateAccountRequest {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
        };
        assert!(valid.validate().is_ok());

        // Empty name
        let invalid_name = CreateAccountRequest {
            name: Some("".to_string()),
            email: Some("ana@example.com".to_string()),
        };
        assert!(invalid_name.validate().is_err());

        // Malformed email
        let invalid_email = CreateAccountRequest {
            name: Some("Ana".to_string()),
            email: Some("not-an-email".to_string()),
        };
        assert!(invalid_email.validate().is_err());

        // Absent fields pass validation; presence is checked in the handler
        let missing = CreateAccountRequest {
            name: None,
            email: None,
        };
        assert!(missing.validate().is_ok());
    }

    #[test]
    fn test_update_account_request_partial() {
        let name_only = UpdateAccountRequest {
            name: Some("Bea".to_string()),
            ..Default::default()
        };
        assert!(name_only.validate().is_ok());

        let bad_email = UpdateAccountRequest {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());
    }
}
