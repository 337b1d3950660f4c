//! The `flashdeck stats` command and shared statistics tables.

use anyhow::Result;
use comfy_table::Table;

use flashdeck_core::model::GlobalStats;
use flashdeck_core::statistics::SessionSummary;

use super::StoreTarget;

pub fn execute(target: &StoreTarget, json: bool) -> Result<()> {
    let store = target.open()?;
    let stats = store.get_global_stats()?;

    if json {
        let value = serde_json::json!({
            "total_sessions": stats.total_sessions,
            "total_correct": stats.total_correct,
            "total_incorrect": stats.total_incorrect,
            "total_reviewed": stats.total_reviewed,
            "success_rate": stats.success_rate(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_global(&stats);
    }
    Ok(())
}

/// Print lifetime totals as a table.
pub fn print_global(stats: &GlobalStats) {
    let mut table = Table::new();
    table.set_header(vec!["Lifetime", "Value"]);
    table.add_row(vec!["Sessions".to_string(), stats.total_sessions.to_string()]);
    table.add_row(vec!["Correct".to_string(), stats.total_correct.to_string()]);
    table.add_row(vec!["Incorrect".to_string(), stats.total_incorrect.to_string()]);
    table.add_row(vec!["Reviewed".to_string(), stats.total_reviewed.to_string()]);
    table.add_row(vec![
        "Success rate".to_string(),
        format!("{:.2}%", stats.success_rate()),
    ]);
    println!("{table}");
}

/// Render a session summary as a table.
pub fn session_table(summary: &SessionSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Session", "Value"]);
    table.add_row(vec![
        "Time spent".to_string(),
        format!("{:.2} minutes", summary.elapsed_minutes()),
    ]);
    table.add_row(vec!["Reviewed".to_string(), summary.reviewed.to_string()]);
    table.add_row(vec!["Correct".to_string(), summary.correct.to_string()]);
    table.add_row(vec!["Incorrect".to_string(), summary.incorrect.to_string()]);
    table.add_row(vec![
        "Success rate".to_string(),
        format!("{:.2}%", summary.success_rate),
    ]);
    table
}
