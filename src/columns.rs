use serde::Serialize;

pub const PROJECT_STATUS_OPTIONS: &[&str] = &["pre-start", "working", "done"];
pub const EXPENSE_KIND_OPTIONS: &[&str] = &["one-time", "monthly"];
pub const TASK_PRIORITY_OPTIONS: &[&str] = &["low", "medium", "urgent"];

/// Presentation hint for one column. Metadata only — nothing here affects
/// stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ColumnKind {
    Text,
    Link,
    Date,
    Currency,
    Select { options: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub field: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

const fn column(field: &'static str, title: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { field, title, kind }
}

pub fn expense_columns() -> &'static [ColumnSpec] {
    const COLUMNS: &[ColumnSpec] = &[
        column("name", "Name", ColumnKind::Text),
        column("web", "Web", ColumnKind::Link),
        column("date", "Date", ColumnKind::Date),
        column("type", "Type", ColumnKind::Select { options: EXPENSE_KIND_OPTIONS }),
        column("price", "Price", ColumnKind::Currency),
        column("comment", "Comment", ColumnKind::Text),
    ];
    COLUMNS
}

pub fn project_columns() -> &'static [ColumnSpec] {
    const COLUMNS: &[ColumnSpec] = &[
        column("name", "Name", ColumnKind::Text),
        column("client", "Client", ColumnKind::Text),
        column("status", "Status", ColumnKind::Select { options: PROJECT_STATUS_OPTIONS }),
        column("type", "Type", ColumnKind::Text),
        column("deadline", "Deadline", ColumnKind::Date),
        column("price", "Price", ColumnKind::Currency),
        column("comments", "Comments", ColumnKind::Text),
        column("effort", "Effort (%)", ColumnKind::Text),
        column("time", "Time", ColumnKind::Text),
    ];
    COLUMNS
}

pub fn task_columns() -> &'static [ColumnSpec] {
    const COLUMNS: &[ColumnSpec] = &[
        column("task", "Task", ColumnKind::Text),
        column("notes", "Notes", ColumnKind::Text),
        column("website", "Website", ColumnKind::Link),
        column("priority", "Priority", ColumnKind::Select { options: TASK_PRIORITY_OPTIONS }),
    ];
    COLUMNS
}
