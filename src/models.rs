use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseKind {
    OneTime,
    Monthly,
}

impl ExpenseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneTime => "one-time",
            Self::Monthly => "monthly",
        }
    }

    /// Accepts `"one"`, the form older stores wrote for one-time expenses.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "monthly" => Self::Monthly,
            "one-time" | "one" => Self::OneTime,
            _ => Self::OneTime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    PreStart,
    Working,
    Done,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreStart => "pre-start",
            Self::Working => "working",
            Self::Done => "done",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "pre-start" => Self::PreStart,
            "working" => Self::Working,
            "done" => Self::Done,
            _ => Self::PreStart,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskPriority {
    Low,
    Medium,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "urgent" => Self::Urgent,
            _ => Self::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub name: String,
    pub web: String,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: ExpenseKind,
    pub price: i64,
    pub comment: String,
}

impl Expense {
    pub fn placeholder(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            web: String::new(),
            date: Some(today),
            kind: ExpenseKind::OneTime,
            price: 0,
            comment: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    #[serde(rename = "type")]
    pub kind: String,
    pub deadline: Option<NaiveDate>,
    pub price: i64,
    pub comments: String,
    /// Free text, e.g. `"75%"`. Parsed defensively in the metrics engine.
    pub effort: String,
    /// Free text, e.g. `"12h"` or `"3d"`.
    pub time: String,
}

impl Project {
    pub fn placeholder(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            client: String::new(),
            status: ProjectStatus::PreStart,
            kind: String::new(),
            deadline: Some(today),
            price: 0,
            comments: String::new(),
            effort: "0%".to_string(),
            time: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task: String,
    pub notes: String,
    pub website: String,
    pub priority: TaskPriority,
}

impl Task {
    pub fn placeholder() -> Self {
        Self {
            task: String::new(),
            notes: String::new(),
            website: String::new(),
            priority: TaskPriority::Medium,
        }
    }
}

/// Returns the input unchanged when non-empty, otherwise a single placeholder
/// row so the editing surface always has something to start from.
pub fn ensure_non_empty<T>(records: Vec<T>, placeholder: impl FnOnce() -> T) -> Vec<T> {
    if records.is_empty() {
        vec![placeholder()]
    } else {
        records
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Lenient date coercion: anything unparseable becomes `None`, the missing
/// sentinel, which compares false against both window bounds downstream.
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    None
}
