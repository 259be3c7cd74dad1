use crate::models::{Expense, Project};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the merged two-series chart. `time: None` is the shared
/// missing-date key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub time: Option<NaiveDate>,
    pub expenses: i64,
    pub projects: i64,
}

/// Full outer join of (date, price) from expenses and (deadline, price) from
/// projects, keyed on the date. Unmatched cells fill with 0 and prices on the
/// same key sum together, which folds every missing-date row from either
/// collection into one shared trailing point.
pub fn merge_chart_series(expenses: &[Expense], projects: &[Project]) -> Vec<ChartPoint> {
    let mut dated: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    let mut missing: Option<(i64, i64)> = None;

    for record in expenses {
        match record.date {
            Some(date) => dated.entry(date).or_default().0 += record.price,
            None => missing.get_or_insert((0, 0)).0 += record.price,
        }
    }
    for record in projects {
        match record.deadline {
            Some(date) => dated.entry(date).or_default().1 += record.price,
            None => missing.get_or_insert((0, 0)).1 += record.price,
        }
    }

    let mut series: Vec<ChartPoint> = dated
        .into_iter()
        .map(|(time, (expense_total, project_total))| ChartPoint {
            time: Some(time),
            expenses: expense_total,
            projects: project_total,
        })
        .collect();
    if let Some((expense_total, project_total)) = missing {
        series.push(ChartPoint {
            time: None,
            expenses: expense_total,
            projects: project_total,
        });
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseKind, ProjectStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn expense(on: Option<NaiveDate>, price: i64) -> Expense {
        Expense {
            name: String::new(),
            web: String::new(),
            date: on,
            kind: ExpenseKind::OneTime,
            price,
            comment: String::new(),
        }
    }

    fn project(deadline: Option<NaiveDate>, price: i64) -> Project {
        Project {
            name: String::new(),
            client: String::new(),
            status: ProjectStatus::PreStart,
            kind: String::new(),
            deadline,
            price,
            comments: String::new(),
            effort: "0%".to_string(),
            time: String::new(),
        }
    }

    #[test]
    fn outer_join_fills_unmatched_cells_with_zero() {
        let expenses = vec![expense(Some(date(2024, 1, 1)), 100)];
        let projects = vec![
            project(Some(date(2024, 1, 1)), 50),
            project(Some(date(2024, 1, 2)), 30),
        ];

        let merged = merge_chart_series(&expenses, &projects);
        assert_eq!(
            merged,
            vec![
                ChartPoint {
                    time: Some(date(2024, 1, 1)),
                    expenses: 100,
                    projects: 50,
                },
                ChartPoint {
                    time: Some(date(2024, 1, 2)),
                    expenses: 0,
                    projects: 30,
                },
            ]
        );
    }

    #[test]
    fn series_sorts_ascending_by_time() {
        let expenses = vec![
            expense(Some(date(2024, 3, 9)), 1),
            expense(Some(date(2024, 1, 2)), 2),
            expense(Some(date(2024, 2, 5)), 3),
        ];

        let merged = merge_chart_series(&expenses, &[]);
        let times: Vec<_> = merged.iter().map(|point| point.time).collect();
        assert_eq!(
            times,
            vec![
                Some(date(2024, 1, 2)),
                Some(date(2024, 2, 5)),
                Some(date(2024, 3, 9)),
            ]
        );
    }

    #[test]
    fn duplicate_keys_sum_within_a_series() {
        let expenses = vec![
            expense(Some(date(2024, 1, 1)), 10),
            expense(Some(date(2024, 1, 1)), 15),
        ];

        let merged = merge_chart_series(&expenses, &[]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].expenses, 25);
        assert_eq!(merged[0].projects, 0);
    }

    #[test]
    fn missing_dates_share_one_trailing_point() {
        let expenses = vec![expense(None, 40), expense(Some(date(2024, 1, 1)), 5)];
        let projects = vec![project(None, 60)];

        let merged = merge_chart_series(&expenses, &projects);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].time, Some(date(2024, 1, 1)));
        assert_eq!(
            merged[1],
            ChartPoint {
                time: None,
                expenses: 40,
                projects: 60,
            }
        );
    }

    #[test]
    fn empty_inputs_produce_an_empty_series() {
        assert!(merge_chart_series(&[], &[]).is_empty());
    }
}
