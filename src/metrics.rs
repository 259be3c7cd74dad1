use crate::models::{Expense, Project};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

pub const WINDOW_DAYS: i64 = 30;

/// One summary figure: the current-window aggregate and the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricReading {
    pub current: f64,
    pub previous: f64,
}

impl MetricReading {
    /// `None` whenever the previous-window aggregate is exactly zero,
    /// including the zero-to-zero case — "no change" stays indistinguishable
    /// from "undefined" here, a documented limitation of the contract.
    pub fn delta_percent(&self) -> Option<f64> {
        if self.previous == 0.0 {
            None
        } else {
            Some(round_to_tenth(
                (self.current - self.previous) / self.previous * 100.0,
            ))
        }
    }

    pub fn delta_label(&self) -> String {
        match self.delta_percent() {
            Some(percent) => format!("{percent:.1}%"),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub income: MetricReading,
    pub expenses: MetricReading,
    pub productivity: MetricReading,
    pub project_count: MetricReading,
}

pub fn compute_metrics(
    expenses: &[Expense],
    projects: &[Project],
    today: NaiveDate,
) -> DashboardMetrics {
    let window_start = today - Duration::days(WINDOW_DAYS);

    let (current_expenses, previous_expenses) =
        split_window(expenses, |record| record.date, window_start);
    let (current_projects, previous_projects) =
        split_window(projects, |record| record.deadline, window_start);

    let income = MetricReading {
        current: sum_prices(&current_projects, |record| record.price),
        previous: sum_prices(&previous_projects, |record| record.price),
    };
    let expense_totals = MetricReading {
        current: sum_prices(&current_expenses, |record| record.price),
        previous: sum_prices(&previous_expenses, |record| record.price),
    };
    let productivity = MetricReading {
        current: current_projects.iter().map(|record| productivity_score(record)).sum(),
        previous: previous_projects.iter().map(|record| productivity_score(record)).sum(),
    };
    let project_count = MetricReading {
        current: current_projects.len() as f64,
        previous: previous_projects.len() as f64,
    };

    DashboardMetrics {
        income,
        expenses: expense_totals,
        productivity,
        project_count,
    }
}

/// Buckets records into (current, previous) by their date. The window start
/// itself is current; records with a missing date land in neither bucket.
fn split_window<T>(
    records: &[T],
    date_of: impl Fn(&T) -> Option<NaiveDate>,
    window_start: NaiveDate,
) -> (Vec<&T>, Vec<&T>) {
    let mut current = Vec::new();
    let mut previous = Vec::new();
    for record in records {
        match date_of(record) {
            Some(date) if date >= window_start => current.push(record),
            Some(_) => previous.push(record),
            None => {}
        }
    }
    (current, previous)
}

fn sum_prices<T>(records: &[&T], price_of: impl Fn(&T) -> i64) -> f64 {
    records.iter().map(|record| price_of(record)).sum::<i64>() as f64
}

/// Price-weighted, effort-weighted, time-normalized score. Any parse failure
/// zeroes the whole row rather than raising, as does a zero-hour duration.
pub fn productivity_score(project: &Project) -> f64 {
    let Some(effort) = parse_effort_fraction(&project.effort) else {
        return 0.0;
    };
    let Some(hours) = parse_time_hours(&project.time) else {
        return 0.0;
    };
    if hours == 0.0 {
        return 0.0;
    }
    project.price as f64 * effort / hours
}

fn parse_effort_fraction(raw: &str) -> Option<f64> {
    let text = raw.trim();
    let text = text.strip_suffix('%').unwrap_or(text);
    text.trim().parse::<f64>().ok().map(|percent| percent / 100.0)
}

/// `"12h"` is hours, `"3d"` is days (24h each), anything without either unit
/// letter counts as a single hour.
fn parse_time_hours(raw: &str) -> Option<f64> {
    if raw.contains('h') {
        raw.replace('h', "").trim().parse::<f64>().ok()
    } else if raw.contains('d') {
        raw.replace('d', "")
            .trim()
            .parse::<f64>()
            .ok()
            .map(|days| days * 24.0)
    } else {
        Some(1.0)
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
