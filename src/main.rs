use anyhow::Context;
use homeboard::{AppConfig, DashboardCore, DashboardSnapshot, SqliteStore};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("resolve data directory")?;
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("create data directory {}", config.data_dir.display()))?;
    if let Err(error) = homeboard::init_tracing(&config.log_dir) {
        eprintln!("logging unavailable: {error}");
    }

    let store = SqliteStore::new(&config.db_path)
        .with_context(|| format!("open table store at {}", config.db_path.display()))?;
    let core = DashboardCore::new(Arc::new(store));

    let today = chrono::Local::now().date_naive();
    let snapshot = core.refresh(today);

    if std::env::args().any(|arg| arg == "--json") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_snapshot(&snapshot, today);
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot, today: chrono::NaiveDate) {
    println!("Dashboard overview — {today}");
    for line in &snapshot.diagnostics {
        println!("  ! {line}");
    }
    println!();

    let metrics = &snapshot.metrics;
    println!(
        "  Income (30d)     ${:<12} {}",
        metrics.income.current, metrics.income.delta_label()
    );
    println!(
        "  Expenses (30d)   ${:<12} {}",
        metrics.expenses.current, metrics.expenses.delta_label()
    );
    println!(
        "  Productivity     {:<13.1} {}",
        metrics.productivity.current, metrics.productivity.delta_label()
    );
    println!(
        "  Project count    {:<13} {}",
        metrics.project_count.current, metrics.project_count.delta_label()
    );
    println!();

    println!(
        "  {} expense rows, {} project rows, {} task rows",
        snapshot.expenses.len(),
        snapshot.projects.len(),
        snapshot.tasks.len()
    );
    println!();

    println!("  Time        Expenses  Projects");
    for point in &snapshot.chart {
        let time = point
            .time
            .map(|date| date.to_string())
            .unwrap_or_else(|| "(no date)".to_string());
        println!("  {time:<11} {:>8}  {:>8}", point.expenses, point.projects);
    }
}
