//! This module provides a local, file-backed store of tasks and completions

use std::path::PathBuf;
use std::path::Path;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use async_trait::async_trait;

use crate::traits::TaskStore;
use crate::calendar::DayRange;
use crate::completion::{Completion, CompletionId};
use crate::error::Error;
use crate::mock_behaviour::MockBehaviour;
use crate::settings::DayReference;
use crate::task::{OwnerId, Task, TaskId, TaskPatch};
use crate::weekday::WeekdaySet;


/// A [`TaskStore`] that keeps its rows in a local file.
///
/// This is also the store tests run against. It can be told to fail on
/// purpose, see [`set_mock_behaviour`](Cache::set_mock_behaviour)
#[derive(Debug)]
pub struct Cache {
    backing_file: Option<PathBuf>,
    day_reference: DayReference,
    data: CachedData,

    /// In tests, we may add forced errors to this object
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    tasks: HashMap<TaskId, Task>,
    completions: HashMap<CompletionId, Completion>,
}

impl PartialEq for Cache {
    fn eq(&self, other: &Self) -> bool {
        self.backing_file == other.backing_file
            && self.day_reference == other.day_reference
            && self.data == other.data
    }
}

impl Cache {
    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path, day_reference: DayReference) -> Result<Self, Error> {
        let file = std::fs::File::open(path)
            .map_err(|err| Error::persistence("open", format!("cache file {:?}", path), err))?;
        let data = serde_json::from_reader(file)
            .map_err(|err| Error::persistence("parse", format!("cache file {:?}", path), err))?;

        Ok(Self {
            backing_file: Some(PathBuf::from(path)),
            day_reference,
            data,
            mock_behaviour: None,
        })
    }

    /// Initialize an empty cache that will be saved to `path`
    pub fn new(path: &Path, day_reference: DayReference) -> Self {
        Self {
            backing_file: Some(PathBuf::from(path)),
            day_reference,
            data: CachedData::default(),
            mock_behaviour: None,
        }
    }

    /// Initialize an empty cache that lives in memory only
    pub fn in_memory(day_reference: DayReference) -> Self {
        Self {
            backing_file: None,
            day_reference,
            data: CachedData::default(),
            mock_behaviour: None,
        }
    }

    pub fn day_reference(&self) -> DayReference {
        self.day_reference
    }

    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    /// Store the current Cache to its backing file, if it has one
    ///
    /// Note that this is automatically performed when the object is destroyed
    pub fn save_to_file(&self) -> Result<(), Error> {
        let path = match &self.backing_file {
            None => return Ok(()),
            Some(path) => path,
        };

        let file = std::fs::File::create(path)
            .map_err(|err| Error::persistence("create", format!("cache file {:?}", path), err))?;
        serde_json::to_writer(file, &self.data)
            .map_err(|err| Error::persistence("write", format!("cache file {:?}", path), err))?;

        Ok(())
    }

    /// Add a task, e.g. to seed a store for a test
    pub fn add_task(&mut self, task: Task) {
        self.data.tasks.insert(task.id(), task);
    }

    /// Add a completion, e.g. to seed a store for a test.
    ///
    /// There is no per-day bookkeeping here. Like a real backend, the cache
    /// happily stores two completions of the same task on the same day
    pub fn add_completion(&mut self, completion: Completion) {
        self.data.completions.insert(completion.id(), completion);
    }

    fn check_mock<F>(&self, check: F) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Box<dyn std::error::Error + Send + Sync>>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(mock) => check(&mut mock.lock().unwrap()),
        }
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        if let Err(err) = self.save_to_file() {
            log::error!("Unable to automatically save the cache: {}", err);
        }
    }
}

#[async_trait]
impl TaskStore for Cache {
    async fn fetch_tasks(&self, owner: OwnerId) -> Result<Vec<Task>, Error> {
        self.check_mock(|mock| mock.can_fetch_tasks())
            .map_err(|err| Error::persistence("fetch", format!("tasks of {}", owner), err))?;

        Ok(self.data.tasks.values()
            .filter(|task| task.owner() == owner)
            .cloned()
            .collect())
    }

    async fn fetch_completions(&self, owner: OwnerId, window: DayRange) -> Result<Vec<Completion>, Error> {
        self.check_mock(|mock| mock.can_fetch_completions())
            .map_err(|err| Error::persistence("fetch", format!("completions of {}", owner), err))?;

        Ok(self.data.completions.values()
            .filter(|completion| completion.owner() == owner)
            .filter(|completion| window.contains(completion.day_key(self.day_reference)))
            .cloned()
            .collect())
    }

    async fn insert_completion(&mut self, owner: OwnerId, task: TaskId) -> Result<Completion, Error> {
        self.check_mock(|mock| mock.can_insert_completion())
            .map_err(|err| Error::persistence("insert", format!("a completion of task {}", task), err))?;

        if self.data.tasks.contains_key(&task) == false {
            return Err(Error::TaskNotFound(task));
        }

        let completion = Completion::new(task, owner);
        self.data.completions.insert(completion.id(), completion.clone());
        Ok(completion)
    }

    async fn delete_completion(&mut self, id: CompletionId) -> Result<(), Error> {
        self.check_mock(|mock| mock.can_delete_completion())
            .map_err(|err| Error::persistence("delete", format!("completion {}", id), err))?;

        match self.data.completions.remove(&id) {
            None => Err(Error::CompletionNotFound(id)),
            Some(_) => Ok(()),
        }
    }

    async fn create_task(&mut self, owner: OwnerId, name: &str, recurrence: WeekdaySet) -> Result<Task, Error> {
        self.check_mock(|mock| mock.can_create_task())
            .map_err(|err| Error::persistence("create", format!("task {:?}", name), err))?;

        let task = Task::new(owner, name.to_string(), recurrence);
        self.data.tasks.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Result<(), Error> {
        self.check_mock(|mock| mock.can_update_task())
            .map_err(|err| Error::persistence("update", format!("task {}", id), err))?;

        match self.data.tasks.get_mut(&id) {
            None => Err(Error::TaskNotFound(id)),
            Some(task) => {
                task.apply(patch);
                Ok(())
            },
        }
    }

    async fn delete_task(&mut self, id: TaskId) -> Result<(), Error> {
        self.check_mock(|mock| mock.can_delete_task())
            .map_err(|err| Error::persistence("delete", format!("task {}", id), err))?;

        if self.data.tasks.remove(&id).is_none() {
            return Err(Error::TaskNotFound(id));
        }

        // Completions referencing this task go with it
        let before = self.data.completions.len();
        self.data.completions.retain(|_, completion| completion.task() != id);
        log::debug!("Removed {} completions of deleted task {}", before - self.data.completions.len(), id);

        Ok(())
    }
}
