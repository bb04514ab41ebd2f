//! Helpers shared by the demo binaries

use chrono::Duration;

use taskmaster::cache::Cache;
use taskmaster::settings::CalendarSettings;
use taskmaster::{Completion, CompletionId, OwnerId, Session, Task, Weekday, WeekdaySet};

/// Build a session over an in-memory store, seeded with a few tasks and with
/// completions spread over the current week
pub async fn demo_session() -> Session<Cache> {
    let settings = CalendarSettings::new();
    let owner = OwnerId::random();
    let mut cache = Cache::in_memory(settings.day_reference());

    let today = settings.today();
    let week = settings.week_of(today);

    let stretch = Task::new(owner, "Stretch".to_string(), WeekdaySet::all());
    let water = Task::new(owner, "Water the plants".to_string(),
                          WeekdaySet::MONDAY | WeekdaySet::THURSDAY);
    let review = Task::new(owner, "Review the week".to_string(),
                           WeekdaySet::from(Weekday::Friday));

    // "Stretch" was dutifully done every day of the week so far
    for date in week.days() {
        if date >= today {
            break;
        }
        let instant = settings.day_reference().day_start(date) + Duration::hours(9);
        cache.add_completion(Completion::new_with_parameters(
            CompletionId::random(), stretch.id(), owner, instant));
    }

    cache.add_task(stretch);
    cache.add_task(water);
    cache.add_task(review);

    Session::open_current_week(cache, owner, settings).await.unwrap()
}
