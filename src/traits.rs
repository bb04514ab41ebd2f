//! The persistence contract between sessions and their backing stores

use async_trait::async_trait;

use crate::calendar::DayRange;
use crate::completion::{Completion, CompletionId};
use crate::error::Error;
use crate::task::{OwnerId, Task, TaskId, TaskPatch};
use crate::weekday::WeekdaySet;

/// The operations a store must provide to back a [`Session`](crate::Session).
///
/// [`Cache`](crate::cache::Cache) implements it over a local file,
/// [`Client`](crate::client::Client) over a remote REST backend. Reads take
/// `&self`; every mutation takes `&mut self` and must leave the store
/// unchanged whenever it reports an error.
#[async_trait]
pub trait TaskStore {
    /// Returns every task belonging to `owner`.
    /// This may trigger a server round-trip (that can be a long process, or that can even fail, e.g. in case of a remote server)
    async fn fetch_tasks(&self, owner: OwnerId) -> Result<Vec<Task>, Error>;

    /// Returns every completion of `owner` whose calendar day falls within `window`, both bounds included
    async fn fetch_completions(&self, owner: OwnerId, window: DayRange) -> Result<Vec<Completion>, Error>;

    /// Records that `task` was done right now.
    /// The store assigns the id and the timestamp, and returns the created record
    async fn insert_completion(&mut self, owner: OwnerId, task: TaskId) -> Result<Completion, Error>;

    /// Removes a single completion record
    async fn delete_completion(&mut self, id: CompletionId) -> Result<(), Error>;

    /// Creates a task owned by `owner` and returns it, with its assigned id and creation date
    async fn create_task(&mut self, owner: OwnerId, name: &str, recurrence: WeekdaySet) -> Result<Task, Error>;

    /// Applies `patch` to an existing task
    async fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Result<(), Error>;

    /// Deletes a task, together with every completion that references it
    async fn delete_task(&mut self, id: TaskId) -> Result<(), Error>;
}
