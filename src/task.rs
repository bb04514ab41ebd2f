//! Recurring tasks

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::calendar;
use crate::error::Error;
use crate::weekday::WeekdaySet;

/// The identifier of a [`Task`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId {
    content: Uuid,
}
impl TaskId {
    /// Generate a random TaskId
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.content
    }
}
impl From<Uuid> for TaskId {
    fn from(uuid: Uuid) -> Self {
        Self { content: uuid }
    }
}
impl FromStr for TaskId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let u: Uuid = s.parse()?;
        Ok(Self::from(u))
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}
/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let u = Uuid::deserialize(deserializer)?;
        Ok(TaskId { content: u })
    }
}

/// The identifier of the user owning a task.
/// The crate treats it as opaque: it is handed to the store as-is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnerId {
    content: Uuid,
}
impl OwnerId {
    /// Generate a random OwnerId
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.content
    }
}
impl From<Uuid> for OwnerId {
    fn from(uuid: Uuid) -> Self {
        Self { content: uuid }
    }
}
impl FromStr for OwnerId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let u: Uuid = s.parse()?;
        Ok(Self::from(u))
    }
}
impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}
/// Used to support serde
impl Serialize for OwnerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for OwnerId {
    fn deserialize<D>(deserializer: D) -> Result<OwnerId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let u = Uuid::deserialize(deserializer)?;
        Ok(OwnerId { content: u })
    }
}

/// A recurring task.
///
/// Whether the task is "due" on some date is never stored: it is computed by
/// [`Task::is_due`] from the recurrence set, so editing the recurrence
/// immediately changes which days the task shows up on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The task identifier, assigned when the task is first persisted
    id: TaskId,

    /// The user this task belongs to
    #[serde(rename = "user_id")]
    owner: OwnerId,

    /// The display name of the task
    name: String,

    /// The weekdays this task is due on
    #[serde(rename = "repeat_days")]
    recurrence: WeekdaySet,

    /// The time this task was created, assigned by the store
    created_at: DateTime<Utc>,
}

impl Task {
    /// Create a brand new Task that is not in a store yet.
    /// This will pick a new (random) task ID and stamp the creation date
    pub fn new(owner: OwnerId, name: String, recurrence: WeekdaySet) -> Self {
        Self::new_with_parameters(TaskId::random(), owner, name, recurrence, Utc::now())
    }

    /// Create a new Task instance, that may exist in a store already
    pub fn new_with_parameters(
        id: TaskId,
        owner: OwnerId,
        name: String,
        recurrence: WeekdaySet,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self { id, owner, name, recurrence, created_at }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }
    pub fn owner(&self) -> OwnerId {
        self.owner
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn recurrence(&self) -> WeekdaySet {
        self.recurrence
    }
    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    /// Whether this task is scheduled on `date`, that is whether the weekday
    /// of `date` belongs to the recurrence set.
    /// A task with an empty recurrence is never due
    pub fn is_due(&self, date: NaiveDate) -> bool {
        self.recurrence.contains_day(calendar::weekday_of(date))
    }

    /// Rename the task
    pub fn set_name(&mut self, new_name: String) {
        self.name = new_name;
    }

    /// Replace the weekdays the task repeats on
    pub fn set_recurrence(&mut self, new_recurrence: WeekdaySet) {
        self.recurrence = new_recurrence;
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(name) = &patch.name {
            self.set_name(name.clone());
        }
        if let Some(recurrence) = patch.recurrence {
            self.set_recurrence(recurrence);
        }
    }
}

/// A partial update to a task. Fields left to `None` keep their current value
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "repeat_days", skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<WeekdaySet>,
}

impl TaskPatch {
    /// A patch that only renames
    pub fn rename<S: ToString>(name: S) -> Self {
        Self { name: Some(name.to_string()), recurrence: None }
    }

    /// A patch that only changes the recurrence
    pub fn reschedule(recurrence: WeekdaySet) -> Self {
        Self { name: None, recurrence: Some(recurrence) }
    }
}

/// Check a name against the naming policy (non-empty once trimmed), and
/// return the trimmed name that will actually be saved
pub fn normalize_name(name: &str) -> Result<String, Error> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(trimmed.to_string())
}
