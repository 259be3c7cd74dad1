use crate::errors::{AppError, AppResult};
use crate::models::{parse_date_lenient, Expense, ExpenseKind, Project, ProjectStatus, Task, TaskPriority};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Load/save boundary for the three collections. Saves replace the whole
/// table; the record identity column stays behind this trait.
pub trait TableStore: Send + Sync {
    fn load_expenses(&self) -> AppResult<Vec<Expense>>;
    fn load_projects(&self) -> AppResult<Vec<Project>>;
    fn load_tasks(&self) -> AppResult<Vec<Task>>;
    fn save_expenses(&self, records: &[Expense]) -> AppResult<()>;
    fn save_projects(&self, records: &[Project]) -> AppResult<()>;
    fn save_tasks(&self, records: &[Task]) -> AppResult<()>;
}

#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| AppError::Io(err.to_string()))?;
        }
        let conn = Connection::open(path).map_err(AppError::from)?;
        conn.execute_batch(SCHEMA_SQL).map_err(AppError::from)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl TableStore for SqliteStore {
    fn load_expenses(&self) -> AppResult<Vec<Expense>> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let mut statement = conn.prepare(
            "SELECT name, web, date, type, price, comment FROM expenses ORDER BY id",
        )?;
        let rows = statement
            .query_map([], |row| {
                Ok(Expense {
                    name: row.get(0)?,
                    web: row.get(1)?,
                    date: parse_stored_date(row.get::<_, Option<String>>(2)?),
                    kind: ExpenseKind::parse(&row.get::<_, String>(3)?),
                    price: row.get(4)?,
                    comment: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn load_projects(&self) -> AppResult<Vec<Project>> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let mut statement = conn.prepare(
            "SELECT name, client, status, type, deadline, price, comments, effort, time
             FROM projects ORDER BY id",
        )?;
        let rows = statement
            .query_map([], |row| {
                Ok(Project {
                    name: row.get(0)?,
                    client: row.get(1)?,
                    status: ProjectStatus::parse(&row.get::<_, String>(2)?),
                    kind: row.get(3)?,
                    deadline: parse_stored_date(row.get::<_, Option<String>>(4)?),
                    price: row.get(5)?,
                    comments: row.get(6)?,
                    effort: row.get(7)?,
                    time: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn load_tasks(&self) -> AppResult<Vec<Task>> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        let mut statement =
            conn.prepare("SELECT task, notes, website, priority FROM tasks ORDER BY id")?;
        let rows = statement
            .query_map([], |row| {
                Ok(Task {
                    task: row.get(0)?,
                    notes: row.get(1)?,
                    website: row.get(2)?,
                    priority: TaskPriority::parse(&row.get::<_, String>(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // Saves are delete-all-then-insert-all, the only write primitive the
    // store contract offers. There is no wrapping transaction: a crash
    // mid-save can leave the table partially written. Statement failures
    // propagate, so a partial write never reports success.

    fn save_expenses(&self, records: &[Expense]) -> AppResult<()> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        conn.execute("DELETE FROM expenses", [])?;
        for record in records {
            conn.execute(
                "INSERT INTO expenses (name, web, date, type, price, comment)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.name,
                    record.web,
                    record.date.map(canonical_date),
                    record.kind.as_str(),
                    record.price,
                    record.comment,
                ],
            )?;
        }
        Ok(())
    }

    fn save_projects(&self, records: &[Project]) -> AppResult<()> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        conn.execute("DELETE FROM projects", [])?;
        for record in records {
            conn.execute(
                "INSERT INTO projects (name, client, status, type, deadline, price, comments, effort, time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.name,
                    record.client,
                    record.status.as_str(),
                    record.kind,
                    record.deadline.map(canonical_date),
                    record.price,
                    record.comments,
                    record.effort,
                    record.time,
                ],
            )?;
        }
        Ok(())
    }

    fn save_tasks(&self, records: &[Task]) -> AppResult<()> {
        let conn = self.conn.lock().map_err(|_| AppError::Internal("database mutex poisoned".to_string()))?;
        conn.execute("DELETE FROM tasks", [])?;
        for record in records {
            conn.execute(
                "INSERT INTO tasks (task, notes, website, priority) VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.task,
                    record.notes,
                    record.website,
                    record.priority.as_str(),
                ],
            )?;
        }
        Ok(())
    }
}

fn canonical_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_stored_date(raw: Option<String>) -> Option<NaiveDate> {
    raw.as_deref().and_then(parse_date_lenient)
}

#[cfg(test)]
mod tests {
    use super::{SqliteStore, TableStore};
    use crate::models::{Expense, ExpenseKind, Project, ProjectStatus, Task, TaskPriority};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn open_store(dir: &tempfile::TempDir) -> SqliteStore {
        SqliteStore::new(&dir.path().join("homeboard.sqlite3")).expect("store")
    }

    #[test]
    fn fresh_store_loads_empty_collections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        assert!(store.load_expenses().expect("load expenses").is_empty());
        assert!(store.load_projects().expect("load projects").is_empty());
        assert!(store.load_tasks().expect("load tasks").is_empty());
    }

    #[test]
    fn expenses_round_trip_field_for_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        let rows = vec![
            Expense {
                name: "hosting".to_string(),
                web: "https://example.com".to_string(),
                date: Some(date(2024, 1, 15)),
                kind: ExpenseKind::Monthly,
                price: 24,
                comment: "vps".to_string(),
            },
            Expense {
                name: "domain".to_string(),
                web: String::new(),
                date: None,
                kind: ExpenseKind::OneTime,
                price: 12,
                comment: String::new(),
            },
        ];
        store.save_expenses(&rows).expect("save expenses");

        let loaded = store.load_expenses().expect("load expenses");
        assert_eq!(loaded, rows);
    }

    #[test]
    fn projects_round_trip_including_missing_deadline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        let rows = vec![Project {
            name: "relaunch".to_string(),
            client: "acme".to_string(),
            status: ProjectStatus::Working,
            kind: "web".to_string(),
            deadline: None,
            price: 4800,
            comments: "phase 2".to_string(),
            effort: "75%".to_string(),
            time: "12h".to_string(),
        }];
        store.save_projects(&rows).expect("save projects");

        let loaded = store.load_projects().expect("load projects");
        assert_eq!(loaded, rows);
    }

    #[test]
    fn second_save_fully_replaces_the_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        let first = vec![
            Task {
                task: "invoice acme".to_string(),
                notes: String::new(),
                website: String::new(),
                priority: TaskPriority::Urgent,
            },
            Task {
                task: "renew domain".to_string(),
                notes: String::new(),
                website: String::new(),
                priority: TaskPriority::Low,
            },
        ];
        store.save_tasks(&first).expect("first save");

        let second = vec![Task {
            task: "archive old projects".to_string(),
            notes: "after backup".to_string(),
            website: String::new(),
            priority: TaskPriority::Medium,
        }];
        store.save_tasks(&second).expect("second save");

        let loaded = store.load_tasks().expect("load tasks");
        assert_eq!(loaded, second);
    }

    #[test]
    fn load_preserves_insert_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        let rows: Vec<Expense> = (0..5u32)
            .map(|index| Expense {
                name: format!("expense-{index}"),
                web: String::new(),
                date: Some(date(2024, 2, 1 + index)),
                kind: ExpenseKind::OneTime,
                price: i64::from(index),
                comment: String::new(),
            })
            .collect();
        store.save_expenses(&rows).expect("save expenses");

        let loaded = store.load_expenses().expect("load expenses");
        let names: Vec<&str> = loaded.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["expense-0", "expense-1", "expense-2", "expense-3", "expense-4"]
        );
    }

    #[test]
    fn unparseable_stored_date_coerces_to_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        store.save_expenses(&[]).expect("clear");
        {
            let conn = store.conn.lock().expect("db lock");
            conn.execute(
                "INSERT INTO expenses (name, web, date, type, price, comment)
                 VALUES ('legacy', '', 'not-a-date', 'one', 7, '')",
                [],
            )
            .expect("insert raw row");
        }

        let loaded = store.load_expenses().expect("load expenses");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].date, None);
        assert_eq!(loaded[0].kind, ExpenseKind::OneTime);
        assert_eq!(loaded[0].price, 7);
    }
}
