//! This module drives one user's recurring tasks over a window of days
//!
//! It is also the place where completion toggling is decided

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::calendar::DayRange;
use crate::completion::Completion;
use crate::error::Error;
use crate::ledger::CompletionLedger;
use crate::report::{self, DashboardStats, DayTally, WeekRow};
use crate::settings::CalendarSettings;
use crate::task::{normalize_name, OwnerId, Task, TaskId, TaskPatch};
use crate::traits::TaskStore;
use crate::weekday::WeekdaySet;


/// What a [`Session::toggle`] ended up doing
#[derive(Clone, Debug)]
pub enum Toggle {
    /// The day had no completion for this task, so one was recorded
    Added(Completion),
    /// The day was already completed, so the record was removed
    Removed(Completion),
}

impl Toggle {
    pub fn is_added(&self) -> bool {
        match self {
            Toggle::Added(_) => true,
            Toggle::Removed(_) => false,
        }
    }

    /// The completion this toggle added or removed
    pub fn completion(&self) -> &Completion {
        match self {
            Toggle::Added(completion) => completion,
            Toggle::Removed(completion) => completion,
        }
    }
}


/// A change a session has applied and persisted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskEvent {
    /// A completion was recorded
    CompletionAdded { task: TaskId, date: NaiveDate },
    /// A completion was removed
    CompletionRemoved { task: TaskId, date: NaiveDate },
}

impl Display for TaskEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskEvent::CompletionAdded { task, date } => write!(f, "task {} marked done on {}", task, date),
            TaskEvent::CompletionRemoved { task, date } => write!(f, "task {} unmarked on {}", task, date),
        }
    }
}


/// See [`event_channel`]
pub type EventSender = tokio::sync::mpsc::UnboundedSender<TaskEvent>;
/// See [`event_channel`]
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<TaskEvent>;

/// Create an event channel, that can be used to follow the changes a session applies
pub fn event_channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}


/// A task scheduled on a given day, and whether it was completed that day
#[derive(Clone, Debug)]
pub struct DueTask<'a> {
    pub task: &'a Task,
    pub completed: bool,
}


/// A snapshot of one owner's tasks, and of their completions over a window of
/// days, backed by a [`TaskStore`].
///
/// All content is browsed in memory. Every change goes through the store
/// first (this may trigger a server round-trip, that can be a long process,
/// or that can even fail, e.g. in case of a remote server), and the snapshot
/// is only updated once the store has accepted the change
#[derive(Debug)]
pub struct Session<S: TaskStore> {
    store: S,
    owner: OwnerId,
    settings: CalendarSettings,
    window: DayRange,

    tasks: HashMap<TaskId, Task>,
    ledger: CompletionLedger,

    events: Option<EventSender>,
}

impl<S: TaskStore> Session<S> {
    /// Open a session on `window`, loading its content from the store
    pub async fn open(store: S, owner: OwnerId, settings: CalendarSettings, window: DayRange) -> Result<Self, Error> {
        let mut session = Self {
            store,
            owner,
            settings,
            window,
            tasks: HashMap::new(),
            ledger: CompletionLedger::new(settings.day_reference()),
            events: None,
        };
        session.reload().await?;
        Ok(session)
    }

    /// Open a session on the week that contains the current day
    pub async fn open_current_week(store: S, owner: OwnerId, settings: CalendarSettings) -> Result<Self, Error> {
        let window = settings.week_of(settings.today());
        Self::open(store, owner, settings, window).await
    }

    /// Fetch the tasks and the completions of the window again.
    ///
    /// On error, the current snapshot is left as it was
    pub async fn reload(&mut self) -> Result<(), Error> {
        let tasks = self.store.fetch_tasks(self.owner).await?;
        let completions = self.store.fetch_completions(self.owner, self.window).await?;
        log::debug!("Loaded {} tasks and {} completions between {} and {}",
                    tasks.len(), completions.len(), self.window.first(), self.window.last());

        self.tasks = tasks.into_iter().map(|task| (task.id(), task)).collect();
        self.ledger = CompletionLedger::from_records(self.settings.day_reference(), completions);
        Ok(())
    }

    /// Move the session to another day window, loading the completions of these days.
    ///
    /// On error, the session stays on its current window
    pub async fn set_window(&mut self, window: DayRange) -> Result<(), Error> {
        let completions = self.store.fetch_completions(self.owner, window).await?;
        self.window = window;
        self.ledger = CompletionLedger::from_records(self.settings.day_reference(), completions);
        Ok(())
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// The window of days this session has loaded completions for
    pub fn window(&self) -> DayRange {
        self.window
    }

    /// The current calendar day under this session's settings
    pub fn today(&self) -> NaiveDate {
        self.settings.today()
    }

    /// Returns the underlying store.
    ///
    /// Apart from tests, there are very few (if any) reasons to access it directly
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// The loaded tasks, most recently created first
    pub fn tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by(|a, b| b.created_at().cmp(a.created_at()).then_with(|| a.id().cmp(&b.id())));
        tasks
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    /// Ask the session to report every change it applies to this channel
    pub fn set_event_sender(&mut self, sender: EventSender) {
        self.events = Some(sender);
    }

    /// The tasks scheduled on `date`, and whether each of them was completed that day
    pub fn due_on(&self, date: NaiveDate) -> Vec<DueTask<'_>> {
        self.tasks()
            .into_iter()
            .filter(|task| task.is_due(date))
            .map(|task| DueTask {
                task,
                completed: self.ledger.is_completed(task.id(), date),
            })
            .collect()
    }

    /// Create a task and add it to the session.
    ///
    /// The name is trimmed, and the task must repeat on at least one weekday
    pub async fn create_task(&mut self, name: &str, recurrence: WeekdaySet) -> Result<TaskId, Error> {
        let name = normalize_name(name)?;
        if recurrence.is_empty() {
            return Err(Error::EmptyRecurrence);
        }

        let task = self.store.create_task(self.owner, &name, recurrence).await?;
        let id = task.id();
        log::info!("Created task {} ({:?})", id, task.name());
        self.tasks.insert(id, task);
        Ok(id)
    }

    /// Update the name or the recurrence of a task.
    ///
    /// The same validations as in [`create_task`](Session::create_task) apply
    pub async fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<(), Error> {
        if self.tasks.contains_key(&id) == false {
            return Err(Error::TaskNotFound(id));
        }

        let patch = TaskPatch {
            name: patch.name.map(|name| normalize_name(&name)).transpose()?,
            recurrence: patch.recurrence,
        };
        if patch.recurrence.map_or(false, |recurrence| recurrence.is_empty()) {
            return Err(Error::EmptyRecurrence);
        }

        self.store.update_task(id, &patch).await?;
        if let Some(task) = self.tasks.get_mut(&id) {
            task.apply(&patch);
        }
        Ok(())
    }

    /// Delete a task and every completion that references it
    pub async fn delete_task(&mut self, id: TaskId) -> Result<(), Error> {
        if self.tasks.contains_key(&id) == false {
            return Err(Error::TaskNotFound(id));
        }

        self.store.delete_task(id).await?;
        self.tasks.remove(&id);
        let removed = self.ledger.remove_task(id);
        log::info!("Deleted task {} and {} of its completions", id, removed);
        Ok(())
    }

    /// Flip the completion state of `task` on `date`.
    ///
    /// When the day has no completion yet, one is recorded; when it has one,
    /// the record is deleted. Either way the store is updated first, and the
    /// in-memory state only changes once the store call has succeeded.
    ///
    /// New completions are timestamped by the store, so they can only be
    /// recorded on the current day. Removals work on any day of the window
    pub async fn toggle(&mut self, task: TaskId, date: NaiveDate) -> Result<Toggle, Error> {
        if self.tasks.contains_key(&task) == false {
            return Err(Error::TaskNotFound(task));
        }
        if self.window.contains(date) == false {
            return Err(Error::OutsideWindow {
                date,
                first: self.window.first(),
                last: self.window.last(),
            });
        }

        let existing = self.ledger.get(task, date).map(|record| record.id());
        match existing {
            Some(id) => {
                self.store.delete_completion(id).await?;
                match self.ledger.remove(task, date) {
                    None => Err(Error::CompletionNotFound(id)),
                    Some(record) => {
                        log::debug!("Unmarked task {} on {}", task, date);
                        self.emit(TaskEvent::CompletionRemoved { task, date });
                        Ok(Toggle::Removed(record))
                    },
                }
            },
            None => {
                let today = self.settings.today();
                if date != today {
                    return Err(Error::NotToday { date, today });
                }

                let record = self.store.insert_completion(self.owner, task).await?;
                let day = record.day_key(self.settings.day_reference());
                if day != date {
                    log::warn!("Completion {} came back dated {}, expected {}", record.id(), day, date);
                }
                self.ledger.insert(record.clone());
                log::debug!("Marked task {} done on {}", task, day);
                self.emit(TaskEvent::CompletionAdded { task, date: day });
                Ok(Toggle::Added(record))
            },
        }
    }

    /// The week grid of every loaded task over the days of the window
    pub fn week_matrix(&self) -> Vec<WeekRow<'_>> {
        report::week_matrix(&self.tasks(), &self.ledger, &self.window.days())
    }

    /// How many completions were recorded on each day of the window
    pub fn daily_series(&self) -> Vec<DayTally> {
        report::daily_series(&self.ledger, &self.window.days())
    }

    /// The headline numbers of the current day
    pub fn dashboard_stats(&self) -> DashboardStats {
        report::dashboard_stats(&self.tasks(), &self.ledger, self.today())
    }

    /// Send an event to the listener (if any)
    fn emit(&self, event: TaskEvent) {
        self.events
            .as_ref()
            .map(|sender| {
                sender.send(event)
            });
    }
}
