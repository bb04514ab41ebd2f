//! Seeded stores and sessions the integration tests work on
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use taskmaster::cache::Cache;
use taskmaster::mock_behaviour::MockBehaviour;
use taskmaster::settings::{CalendarSettings, DayReference};
use taskmaster::{Completion, CompletionId, DayRange, OwnerId, Session, Task, TaskId, WeekdaySet};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A timestamp `hours` into `day`, in the UTC reference frame
pub fn instant(day: NaiveDate, hours: i64) -> DateTime<Utc> {
    DayReference::Utc.day_start(day) + Duration::hours(hours)
}


/// A session over a mockable store that holds a single, everyday task
pub struct LiveFixture {
    pub session: Session<Cache>,
    pub task: TaskId,
    /// Shared handle on the store's behaviour, to make it fail on purpose
    pub mock: Arc<Mutex<MockBehaviour>>,
}

/// One everyday task, nothing completed yet, the current week as the window
pub async fn today_session() -> LiveFixture {
    let settings = CalendarSettings::utc();
    let owner = OwnerId::random();
    let window = settings.week_of(settings.today());

    let mock = Arc::new(Mutex::new(MockBehaviour::new()));
    let mut cache = Cache::in_memory(settings.day_reference());
    cache.set_mock_behaviour(Some(Arc::clone(&mock)));

    let task = Task::new(owner, "Stretch".to_string(), WeekdaySet::all());
    let task_id = task.id();
    cache.add_task(task);

    let session = Session::open(cache, owner, settings, window).await.unwrap();
    LiveFixture { session, task: task_id, mock }
}

/// One everyday task, completed yesterday, the last seven days as the window
pub async fn trailing_week_session() -> LiveFixture {
    let settings = CalendarSettings::utc();
    let owner = OwnerId::random();
    let today = settings.today();
    let window = DayRange::trailing(today, 7);

    let mock = Arc::new(Mutex::new(MockBehaviour::new()));
    let mut cache = Cache::in_memory(settings.day_reference());
    cache.set_mock_behaviour(Some(Arc::clone(&mock)));

    let task = Task::new(owner, "Stretch".to_string(), WeekdaySet::all());
    let task_id = task.id();
    cache.add_completion(Completion::new_with_parameters(
        CompletionId::random(), task_id, owner, instant(today - Duration::days(1), 9)));
    cache.add_task(task);

    let session = Session::open(cache, owner, settings, window).await.unwrap();
    LiveFixture { session, task: task_id, mock }
}


/// A session over the week of 2024-01-07, and the ids of its seeded tasks
pub struct WeekFixture {
    pub session: Session<Cache>,
    pub jog: TaskId,
    pub read: TaskId,
    pub journal: TaskId,
}

/// A session over the week of Sunday 2024-01-07, seeded with:
/// * "Jog", repeating every day, created first
/// * "Read", repeating Monday, Tuesday and Friday
/// * "Journal", repeating Tuesday and Saturday, created last
///
/// All three tasks were completed on Tuesday the 9th, only "Jog" on Friday the 12th
pub async fn fixed_week_session() -> WeekFixture {
    let settings = CalendarSettings::utc();
    let owner = OwnerId::random();
    let window = DayRange::new(date(2024, 1, 7), date(2024, 1, 13));

    let mut cache = Cache::in_memory(settings.day_reference());

    let jog = Task::new_with_parameters(
        TaskId::random(), owner, "Jog".to_string(),
        WeekdaySet::all(), instant(date(2024, 1, 1), 8));
    let read = Task::new_with_parameters(
        TaskId::random(), owner, "Read".to_string(),
        WeekdaySet::MONDAY | WeekdaySet::TUESDAY | WeekdaySet::FRIDAY, instant(date(2024, 1, 2), 8));
    let journal = Task::new_with_parameters(
        TaskId::random(), owner, "Journal".to_string(),
        WeekdaySet::TUESDAY | WeekdaySet::SATURDAY, instant(date(2024, 1, 3), 8));

    let tuesday = date(2024, 1, 9);
    let friday = date(2024, 1, 12);
    for task in vec![&jog, &read, &journal] {
        cache.add_completion(Completion::new_with_parameters(
            CompletionId::random(), task.id(), owner, instant(tuesday, 7)));
    }
    cache.add_completion(Completion::new_with_parameters(
        CompletionId::random(), jog.id(), owner, instant(friday, 18)));

    let (jog_id, read_id, journal_id) = (jog.id(), read.id(), journal.id());
    cache.add_task(jog);
    cache.add_task(read);
    cache.add_task(journal);

    let session = Session::open(cache, owner, settings, window).await.unwrap();
    WeekFixture { session, jog: jog_id, read: read_id, journal: journal_id }
}
