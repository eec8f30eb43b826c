/// Summary statistics over accounts and tasks
///
/// The report is computed fresh on every call, never cached. The counts
/// are independent read-only aggregates, so they run concurrently; there
/// is no shared snapshot, and under concurrent writes the numbers may
/// disagree by in-flight rows. That tolerance is accepted.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::stats::Stats;
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let stats = Stats::collect(&pool).await?;
/// println!("{}% of {} tasks done", stats.completion_rate, stats.total_tasks);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::{account::Account, task::Task};

/// Summary report over the whole store
///
/// Accounts surface as "users" on the wire, matching the transport's
/// resource naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Total number of accounts
    pub total_users: i64,

    /// Total number of tasks
    pub total_tasks: i64,

    /// Tasks marked completed
    pub completed_tasks: i64,

    /// Tasks not yet completed (always total - completed)
    pub pending_tasks: i64,

    /// Integer percentage of completed tasks, 0 when there are no tasks
    pub completion_rate: i64,
}

impl Stats {
    /// Collects the summary as of the moment of the call
    ///
    /// The three underlying counts run concurrently; pending and the
    /// completion rate are derived from them, which keeps
    /// `pending = total - completed` exact even without a snapshot.
    pub async fn collect(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let (total_users, total_tasks, completed_tasks) = tokio::try_join!(
            Account::count(pool),
            Task::count(pool),
            Task::count_completed(pool),
        )?;

        Ok(Stats {
            total_users,
            total_tasks,
            completed_tasks,
            pending_tasks: total_tasks - completed_tasks,
            completion_rate: completion_rate(completed_tasks, total_tasks),
        })
    }
}

/// Completed tasks as a rounded integer percentage of the total
///
/// Defined as 0 when there are no tasks at all.
pub fn completion_rate(completed: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i64
}
