/// Database models for Taskboard
///
/// This module contains the data-access layer: each model owns the CRUD
/// operations and integrity rules for its table.
///
/// # Models
///
/// - `account`: Accounts that own tasks; enforces email uniqueness
/// - `task`: Work items owned by accounts; referential checks and filtered listings
/// - `stats`: Derived summary report over both tables
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
/// let account = Account::create(
///     &pool,
///     CreateAccount {
///         name: "Ana".to_string(),
///         email: "ana@example.com".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod stats;
pub mod task;
