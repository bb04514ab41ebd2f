//! Weekly aggregation: the report matrix, the chart series and the dashboard
//! counters.
//!
//! Everything in this module is a pure function over already-loaded state
//! (tasks and a [`CompletionLedger`]); nothing here talks to a store. The
//! result types serialize to plain structured data, which is what export
//! collaborators (document rendering and the like) consume.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::CompletionLedger;
use crate::task::Task;

/// The status of one (task, day) cell of the week matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CellStatus {
    /// The task was due that day and a completion exists
    Done,
    /// The task was due that day and no completion exists
    Pending,
    /// The task is not scheduled that day, whatever the ledger holds
    NotScheduled,
}

/// One cell of the week matrix
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub status: CellStatus,
}

/// One row of the week matrix: a task and its cells, in date order
#[derive(Clone, Debug, Serialize)]
pub struct WeekRow<'a> {
    pub task: &'a Task,
    pub cells: Vec<WeekCell>,
}

/// One point of the daily chart series
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DayTally {
    pub date: NaiveDate,
    pub count: usize,
}

/// The dashboard counters
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_tasks: usize,
    pub completed_today: usize,
    /// Percentage of tasks completed today, 0 when there is no task at all
    pub completion_rate: f64,
}

/// Build the task-by-day status grid: one row per task, one cell per date of
/// `dates`, in the given order.
///
/// A day the task is not due on yields [`CellStatus::NotScheduled`] even if
/// the ledger somehow holds a completion for it
pub fn week_matrix<'a>(
    tasks: &[&'a Task],
    ledger: &CompletionLedger,
    dates: &[NaiveDate],
) -> Vec<WeekRow<'a>> {
    tasks
        .iter()
        .map(|task| {
            let cells = dates
                .iter()
                .map(|date| {
                    let status = if task.is_due(*date) == false {
                        CellStatus::NotScheduled
                    } else if ledger.is_completed(task.id(), *date) {
                        CellStatus::Done
                    } else {
                        CellStatus::Pending
                    };
                    WeekCell { date: *date, status }
                })
                .collect();
            WeekRow { task, cells }
        })
        .collect()
}

/// Count completions per day, across all tasks, in the order of `dates`.
/// The dashboard chart asks for a trailing 7-day window ending today, oldest
/// day first
pub fn daily_series(ledger: &CompletionLedger, dates: &[NaiveDate]) -> Vec<DayTally> {
    dates
        .iter()
        .map(|date| DayTally { date: *date, count: ledger.count_on(*date) })
        .collect()
}

/// The dashboard counters for `today`.
///
/// `completed_today` counts every completion bucketed to `today`, whether or
/// not its task is still due today: a task completed this morning keeps
/// counting even if its recurrence was edited since
pub fn dashboard_stats(tasks: &[&Task], ledger: &CompletionLedger, today: NaiveDate) -> DashboardStats {
    let total_tasks = tasks.len();
    let completed_today = ledger.count_on(today);
    let completion_rate = if total_tasks == 0 {
        0.0
    } else {
        completed_today as f64 / total_tasks as f64 * 100.0
    };

    DashboardStats { total_tasks, completed_today, completion_rate }
}
