//! Completion records, the proof that a task was done on a given day

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::settings::DayReference;
use crate::task::{OwnerId, TaskId};

/// The identifier of a [`Completion`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompletionId {
    content: Uuid,
}
impl CompletionId {
    /// Generate a random CompletionId
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.content
    }
}
impl From<Uuid> for CompletionId {
    fn from(uuid: Uuid) -> Self {
        Self { content: uuid }
    }
}
impl FromStr for CompletionId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let u: Uuid = s.parse()?;
        Ok(Self::from(u))
    }
}
impl Display for CompletionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}
/// Used to support serde
impl Serialize for CompletionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for CompletionId {
    fn deserialize<D>(deserializer: D) -> Result<CompletionId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let u = Uuid::deserialize(deserializer)?;
        Ok(CompletionId { content: u })
    }
}

/// A record that a task was marked done.
///
/// The calendar day a completion belongs to is not stored: it is derived from
/// `completed_at` through [`DayReference::day_key`], so the same record always
/// lands on the same day no matter where it is inspected. Completions are
/// never mutated. Un-marking a task deletes its record, and marking it again
/// inserts a fresh one
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// The record identifier, assigned when the record is first persisted
    id: CompletionId,

    /// The task this record marks done
    #[serde(rename = "task_id")]
    task: TaskId,

    /// The user this record belongs to
    #[serde(rename = "user_id")]
    owner: OwnerId,

    /// The time the task was marked done, assigned by the store
    completed_at: DateTime<Utc>,
}

impl Completion {
    /// Create a brand new Completion stamped with the current time.
    /// This will pick a new (random) record ID
    pub fn new(task: TaskId, owner: OwnerId) -> Self {
        Self::new_with_parameters(CompletionId::random(), task, owner, Utc::now())
    }

    /// Create a new Completion instance, that may exist in a store already
    pub fn new_with_parameters(
        id: CompletionId,
        task: TaskId,
        owner: OwnerId,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self { id, task, owner, completed_at }
    }

    pub fn id(&self) -> CompletionId {
        self.id
    }
    pub fn task(&self) -> TaskId {
        self.task
    }
    pub fn owner(&self) -> OwnerId {
        self.owner
    }
    pub fn completed_at(&self) -> &DateTime<Utc> {
        &self.completed_at
    }

    /// The calendar day this record belongs to, under the given reference frame
    pub fn day_key(&self, reference: DayReference) -> NaiveDate {
        reference.day_key(self.completed_at)
    }
}
