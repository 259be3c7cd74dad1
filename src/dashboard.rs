use crate::chart::{merge_chart_series, ChartPoint};
use crate::errors::AppResult;
use crate::metrics::{compute_metrics, DashboardMetrics};
use crate::models::{ensure_non_empty, Expense, Project, Task};
use crate::store::TableStore;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// Everything one refresh cycle hands to the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub expenses: Vec<Expense>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub metrics: DashboardMetrics,
    pub chart: Vec<ChartPoint>,
    pub diagnostics: Vec<String>,
}

pub struct DashboardCore {
    store: Arc<dyn TableStore>,
}

impl DashboardCore {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// One synchronous pass: load, default-fill, compute metrics, derive the
    /// chart series. A failed load degrades to an empty collection with a
    /// diagnostic line; it never aborts the refresh. Placeholder rows
    /// participate in the metrics and the chart, as edited rows would.
    pub fn refresh(&self, today: NaiveDate) -> DashboardSnapshot {
        let mut diagnostics = Vec::new();

        let expenses = match self.store.load_expenses() {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(error = %error, table = "expenses", "table load failed");
                diagnostics.push(format!("Failed to load expenses: {error}"));
                Vec::new()
            }
        };
        let projects = match self.store.load_projects() {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(error = %error, table = "projects", "table load failed");
                diagnostics.push(format!("Failed to load projects: {error}"));
                Vec::new()
            }
        };
        let tasks = match self.store.load_tasks() {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(error = %error, table = "tasks", "table load failed");
                diagnostics.push(format!("Failed to load tasks: {error}"));
                Vec::new()
            }
        };

        let expenses = ensure_non_empty(expenses, || Expense::placeholder(today));
        let projects = ensure_non_empty(projects, || Project::placeholder(today));
        let tasks = ensure_non_empty(tasks, Task::placeholder);

        let metrics = compute_metrics(&expenses, &projects, today);
        let chart = merge_chart_series(&expenses, &projects);

        DashboardSnapshot {
            expenses,
            projects,
            tasks,
            metrics,
            chart,
            diagnostics,
        }
    }

    // Saves replace the whole table. Errors propagate: a failed save is the
    // fatal outcome of that interaction and leaves the other tables alone.

    pub fn save_expenses(&self, records: &[Expense]) -> AppResult<()> {
        self.store.save_expenses(records)
    }

    pub fn save_projects(&self, records: &[Project]) -> AppResult<()> {
        self.store.save_projects(records)
    }

    pub fn save_tasks(&self, records: &[Task]) -> AppResult<()> {
        self.store.save_tasks(records)
    }
}
