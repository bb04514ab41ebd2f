mod scenarios;

use chrono::Duration;

use taskmaster::traits::TaskStore;
use taskmaster::{Error, TaskId, TaskPatch, Weekday, WeekdaySet};


#[tokio::test]
async fn task_crud_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut fixture = scenarios::today_session().await;

    let id = fixture.session
        .create_task("  Water the plants  ", WeekdaySet::MONDAY | WeekdaySet::THURSDAY)
        .await.unwrap();
    assert_eq!(fixture.session.task(id).unwrap().name(), "Water the plants");

    fixture.session.update_task(id, TaskPatch::rename("Water every plant")).await.unwrap();
    assert_eq!(fixture.session.task(id).unwrap().name(), "Water every plant");

    fixture.session.update_task(id, TaskPatch::reschedule(WeekdaySet::from(Weekday::Friday))).await.unwrap();
    assert_eq!(fixture.session.task(id).unwrap().recurrence(), WeekdaySet::from(Weekday::Friday));

    // The store saw all of it: a reload brings the same task back
    fixture.session.reload().await.unwrap();
    let task = fixture.session.task(id).unwrap();
    assert_eq!(task.name(), "Water every plant");
    assert_eq!(task.recurrence(), WeekdaySet::from(Weekday::Friday));

    fixture.session.delete_task(id).await.unwrap();
    assert!(fixture.session.task(id).is_none());
    fixture.session.reload().await.unwrap();
    assert!(fixture.session.task(id).is_none());
}

#[tokio::test]
async fn validation_happens_before_the_store_is_touched() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut fixture = scenarios::today_session().await;

    // Arm the store to fail the next creation. Validation errors must
    // surface before that failure gets a chance to fire
    fixture.mock.lock().unwrap().create_task_behaviour = (0, 1);

    let empty = fixture.session.create_task("   ", WeekdaySet::all()).await.unwrap_err();
    assert!(matches!(empty, Error::EmptyName));

    let no_days = fixture.session.create_task("Read", WeekdaySet::empty()).await.unwrap_err();
    assert!(matches!(no_days, Error::EmptyRecurrence));

    // A valid request does reach the store, and hits the armed failure
    let stored = fixture.session.create_task("Read", WeekdaySet::all()).await.unwrap_err();
    assert!(stored.is_persistence());

    fixture.session.create_task("Read", WeekdaySet::all()).await.unwrap();
}

#[tokio::test]
async fn updates_validate_like_creations() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut fixture = scenarios::today_session().await;

    let err = fixture.session.update_task(fixture.task, TaskPatch::rename("  ")).await.unwrap_err();
    assert!(matches!(err, Error::EmptyName));

    let err = fixture.session.update_task(fixture.task, TaskPatch::reschedule(WeekdaySet::empty())).await.unwrap_err();
    assert!(matches!(err, Error::EmptyRecurrence));

    let err = fixture.session.update_task(TaskId::random(), TaskPatch::rename("Jog")).await.unwrap_err();
    assert!(err.is_not_found());

    // None of it changed the stored task
    assert_eq!(fixture.session.task(fixture.task).unwrap().name(), "Stretch");
    assert_eq!(fixture.session.task(fixture.task).unwrap().recurrence(), WeekdaySet::all());
}

#[tokio::test]
async fn deleting_a_task_drops_its_completions() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut fixture = scenarios::trailing_week_session().await;
    let yesterday = fixture.session.today() - Duration::days(1);
    assert!(fixture.session.ledger().is_completed(fixture.task, yesterday));

    fixture.session.delete_task(fixture.task).await.unwrap();
    assert!(fixture.session.task(fixture.task).is_none());
    assert!(fixture.session.ledger().is_empty());

    // The store dropped the records too
    let stored = fixture.session.store()
        .fetch_completions(fixture.session.owner(), fixture.session.window())
        .await.unwrap();
    assert!(stored.is_empty());

    // And a reload agrees
    fixture.session.reload().await.unwrap();
    assert!(fixture.session.tasks().is_empty());
    assert!(fixture.session.ledger().is_empty());
}

#[tokio::test]
async fn tasks_come_back_newest_first() {
    let _ = env_logger::builder().is_test(true).try_init();

    let fixture = scenarios::fixed_week_session().await;
    let ordered: Vec<TaskId> = fixture.session.tasks().iter().map(|task| task.id()).collect();
    assert_eq!(ordered, vec![fixture.journal, fixture.read, fixture.jog]);
}

#[tokio::test]
async fn a_failed_reload_keeps_the_snapshot() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut fixture = scenarios::trailing_week_session().await;
    let yesterday = fixture.session.today() - Duration::days(1);

    fixture.mock.lock().unwrap().fetch_completions_behaviour = (0, 1);
    let err = fixture.session.reload().await.unwrap_err();
    assert!(err.is_persistence());

    // The snapshot still holds what was loaded before
    assert!(fixture.session.ledger().is_completed(fixture.task, yesterday));
    assert_eq!(fixture.session.tasks().len(), 1);
}
