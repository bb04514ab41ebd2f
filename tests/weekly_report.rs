mod scenarios;

use taskmaster::cache::Cache;
use taskmaster::report::CellStatus;
use taskmaster::settings::CalendarSettings;
use taskmaster::{Completion, CompletionId, DayRange, OwnerId, Session, Task, TaskId, WeekdaySet};

use scenarios::{date, instant};


#[tokio::test]
async fn the_week_grid_follows_the_schedule() {
    let _ = env_logger::builder().is_test(true).try_init();

    let fixture = scenarios::fixed_week_session().await;
    let rows = fixture.session.week_matrix();

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.cells.len() == 7));

    // Rows come in task order, newest first
    assert_eq!(rows[0].task.id(), fixture.journal);
    assert_eq!(rows[1].task.id(), fixture.read);
    assert_eq!(rows[2].task.id(), fixture.jog);

    use CellStatus::{Done, NotScheduled, Pending};

    let jog: Vec<CellStatus> = rows[2].cells.iter().map(|cell| cell.status).collect();
    assert_eq!(jog, vec![Pending, Pending, Done, Pending, Pending, Done, Pending]);

    let read: Vec<CellStatus> = rows[1].cells.iter().map(|cell| cell.status).collect();
    assert_eq!(read, vec![NotScheduled, Pending, Done, NotScheduled, NotScheduled, Pending, NotScheduled]);

    let journal: Vec<CellStatus> = rows[0].cells.iter().map(|cell| cell.status).collect();
    assert_eq!(journal, vec![NotScheduled, NotScheduled, Done, NotScheduled, NotScheduled, NotScheduled, Pending]);

    // Cells carry the dates of the window, in order
    let dates: Vec<_> = rows[0].cells.iter().map(|cell| cell.date).collect();
    assert_eq!(dates, fixture.session.window().days());
}

#[tokio::test]
async fn completions_per_day_follow_the_records() {
    let _ = env_logger::builder().is_test(true).try_init();

    let fixture = scenarios::fixed_week_session().await;
    let series = fixture.session.daily_series();

    let counts: Vec<usize> = series.iter().map(|tally| tally.count).collect();
    assert_eq!(counts, vec![0, 0, 3, 0, 0, 1, 0]);

    assert_eq!(series[0].date, date(2024, 1, 7));
    assert_eq!(series[6].date, date(2024, 1, 13));
}

#[tokio::test]
async fn the_due_list_follows_the_weekday() {
    let _ = env_logger::builder().is_test(true).try_init();

    let fixture = scenarios::fixed_week_session().await;

    // Tuesday the 9th: all three tasks are due, and all were completed
    let tuesday = fixture.session.due_on(date(2024, 1, 9));
    assert_eq!(tuesday.len(), 3);
    assert!(tuesday.iter().all(|due| due.completed));

    // Wednesday the 10th: only the daily "Jog" is due, and it was not done
    let wednesday = fixture.session.due_on(date(2024, 1, 10));
    assert_eq!(wednesday.len(), 1);
    assert_eq!(wednesday[0].task.id(), fixture.jog);
    assert!(wednesday[0].completed == false);
}

#[tokio::test]
async fn the_window_keeps_its_edge_days() {
    let _ = env_logger::builder().is_test(true).try_init();

    let settings = CalendarSettings::utc();
    let owner = OwnerId::random();
    let window = DayRange::new(date(2024, 1, 7), date(2024, 1, 13));

    let mut cache = Cache::in_memory(settings.day_reference());
    let task = Task::new_with_parameters(
        TaskId::random(), owner, "Jog".to_string(),
        WeekdaySet::all(), instant(date(2024, 1, 1), 8));
    let task_id = task.id();
    cache.add_task(task);

    // The first instant of the window, the last hour of it, and the first
    // instant past it
    cache.add_completion(Completion::new_with_parameters(
        CompletionId::random(), task_id, owner, instant(date(2024, 1, 7), 0)));
    cache.add_completion(Completion::new_with_parameters(
        CompletionId::random(), task_id, owner, instant(date(2024, 1, 13), 23)));
    cache.add_completion(Completion::new_with_parameters(
        CompletionId::random(), task_id, owner, instant(date(2024, 1, 14), 0)));

    let session = Session::open(cache, owner, settings, window).await.unwrap();

    assert_eq!(session.ledger().len(), 2);
    assert!(session.ledger().is_completed(task_id, date(2024, 1, 7)));
    assert!(session.ledger().is_completed(task_id, date(2024, 1, 13)));
    assert!(session.ledger().is_completed(task_id, date(2024, 1, 14)) == false);
}

#[tokio::test]
async fn moving_the_window_reloads_its_completions() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut fixture = scenarios::fixed_week_session().await;
    assert_eq!(fixture.session.ledger().len(), 4);

    let next_week = DayRange::new(date(2024, 1, 14), date(2024, 1, 20));
    fixture.session.set_window(next_week).await.unwrap();
    assert_eq!(fixture.session.window(), next_week);
    assert!(fixture.session.ledger().is_empty());

    let counts: Vec<usize> = fixture.session.daily_series().iter().map(|tally| tally.count).collect();
    assert_eq!(counts, vec![0; 7]);

    fixture.session.set_window(DayRange::new(date(2024, 1, 7), date(2024, 1, 13))).await.unwrap();
    assert_eq!(fixture.session.ledger().len(), 4);
}

#[tokio::test]
async fn dashboard_stats_reflect_the_current_day() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut fixture = scenarios::today_session().await;
    let today = fixture.session.today();

    let before = fixture.session.dashboard_stats();
    assert_eq!(before.total_tasks, 1);
    assert_eq!(before.completed_today, 0);
    assert_eq!(before.completion_rate, 0.0);

    fixture.session.toggle(fixture.task, today).await.unwrap();

    let after = fixture.session.dashboard_stats();
    assert_eq!(after.completed_today, 1);
    assert!((after.completion_rate - 100.0).abs() < f64::EPSILON);
}
