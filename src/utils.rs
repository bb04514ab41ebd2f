//! Some utility functions

use std::io::{stdin, stdout, Read, Write};

use chrono::NaiveDate;

use crate::calendar::weekday_of;
use crate::report::{CellStatus, DayTally, WeekRow};
use crate::session::DueTask;

/// A debug utility that pretty-prints the tasks due on a day
pub fn print_due_list(date: NaiveDate, due: &[DueTask]) {
    println!("DUE {}", date);
    for entry in due {
        let mark = if entry.completed { "✓" } else { " " };
        println!("    [{}] {}\t{}", mark, entry.task.name(), entry.task.id());
    }
}

/// A debug utility that pretty-prints a week grid
pub fn print_week_matrix(rows: &[WeekRow]) {
    let first_row = match rows.first() {
        None => return,
        Some(row) => row,
    };

    let mut header = format!("{:<24}", "");
    for cell in &first_row.cells {
        header.push_str(&format!(" {} ", weekday_of(cell.date).abbrev()));
    }
    println!("{}", header);

    for row in rows {
        let mut line = format!("{:<24}", row.task.name());
        for cell in &row.cells {
            let glyph = match cell.status {
                CellStatus::Done => "✓",
                CellStatus::Pending => "○",
                CellStatus::NotScheduled => "-",
            };
            line.push_str(&format!("  {}  ", glyph));
        }
        println!("{}", line);
    }
}

/// A debug utility that pretty-prints how many completions each day got
pub fn print_daily_series(series: &[DayTally]) {
    for tally in series {
        println!("    {} {:>2} {}", tally.date, tally.count, "#".repeat(tally.count));
    }
}

/// Wait for the user to press enter
pub fn pause() {
    let mut stdout = stdout();
    stdout.write_all(b"Press Enter to continue...").unwrap();
    stdout.flush().unwrap();
    stdin().read_exact(&mut [0]).unwrap();
}
