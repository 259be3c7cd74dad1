mod chart;
mod columns;
mod config;
mod dashboard;
mod errors;
mod metrics;
mod models;
mod store;

pub use chart::{merge_chart_series, ChartPoint};
pub use columns::{
    expense_columns, project_columns, task_columns, ColumnKind, ColumnSpec,
    EXPENSE_KIND_OPTIONS, PROJECT_STATUS_OPTIONS, TASK_PRIORITY_OPTIONS,
};
pub use config::{AppConfig, DATA_DIR_ENV};
pub use dashboard::{DashboardCore, DashboardSnapshot};
pub use errors::{AppError, AppResult};
pub use metrics::{compute_metrics, DashboardMetrics, MetricReading, WINDOW_DAYS};
pub use models::{
    ensure_non_empty, parse_date_lenient, Expense, ExpenseKind, Project, ProjectStatus, Task,
    TaskPriority,
};
pub use store::{SqliteStore, TableStore};

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

pub fn init_tracing(log_dir: &Path) -> AppResult<()> {
    std::fs::create_dir_all(log_dir).map_err(|error| AppError::Io(error.to_string()))?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "homeboard.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| AppError::Internal(error.to_string()))
}
