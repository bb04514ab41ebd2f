//! This module provides a client to connect to a PostgREST task backend

use async_trait::async_trait;
use chrono::{Duration, SecondsFormat};
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::traits::TaskStore;
use crate::calendar::DayRange;
use crate::completion::{Completion, CompletionId};
use crate::error::Error;
use crate::settings::DayReference;
use crate::task::{OwnerId, Task, TaskId, TaskPatch};
use crate::weekday::WeekdaySet;


static TASKS_TABLE: &str = "tasks";
static COMPLETIONS_TABLE: &str = "task_completions";


/// A [`TaskStore`] that fetches its rows from a remote Postgres backend,
/// through its PostgREST layer.
///
/// Every operation is a plain HTTP round-trip. The backend assigns row ids
/// and completion timestamps, so the rows this client hands back are the
/// rows as the server stored them
pub struct Client {
    tasks_endpoint: Url,
    completions_endpoint: Url,
    api_key: String,
    bearer_token: String,
    day_reference: DayReference,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>, T: ToString, U: ToString>(base_url: S, api_key: T, bearer_token: U, day_reference: DayReference) -> Result<Self, Error> {
        let base = Url::parse(base_url.as_ref())
            .map_err(|source| Error::InvalidBaseUrl { url: base_url.as_ref().to_string(), source })?;
        let tasks_endpoint = base.join(&format!("/rest/v1/{}", TASKS_TABLE))
            .map_err(|source| Error::InvalidBaseUrl { url: base_url.as_ref().to_string(), source })?;
        let completions_endpoint = base.join(&format!("/rest/v1/{}", COMPLETIONS_TABLE))
            .map_err(|source| Error::InvalidBaseUrl { url: base_url.as_ref().to_string(), source })?;

        Ok(Self {
            tasks_endpoint,
            completions_endpoint,
            api_key: api_key.to_string(),
            bearer_token: bearer_token.to_string(),
            day_reference,
            http: reqwest::Client::new(),
        })
    }

    pub fn day_reference(&self) -> DayReference {
        self.day_reference
    }

    fn request(&self, method: Method, url: &Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url.clone())
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.bearer_token)
    }
}

/// Send a request and parse the rows the backend answers with
async fn expect_rows<T>(request: reqwest::RequestBuilder, operation: &'static str, entity: String) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    let response = request.send().await
        .and_then(|response| response.error_for_status())
        .map_err(|err| Error::persistence(operation, entity.clone(), err))?;

    response.json().await
        .map_err(|err| Error::persistence(operation, entity, err))
}

/// Send a request, only caring about whether the backend accepted it
async fn expect_success(request: reqwest::RequestBuilder, operation: &'static str, entity: String) -> Result<(), Error> {
    request.send().await
        .and_then(|response| response.error_for_status())
        .map_err(|err| Error::persistence(operation, entity, err))?;

    Ok(())
}

#[async_trait]
impl TaskStore for Client {
    async fn fetch_tasks(&self, owner: OwnerId) -> Result<Vec<Task>, Error> {
        log::debug!("GET {}", self.tasks_endpoint);
        let request = self.request(Method::GET, &self.tasks_endpoint)
            .query(&[
                ("select", String::from("*")),
                ("user_id", format!("eq.{}", owner)),
                ("order", String::from("created_at.desc")),
            ]);

        expect_rows(request, "fetch", format!("tasks of {}", owner)).await
    }

    async fn fetch_completions(&self, owner: OwnerId, window: DayRange) -> Result<Vec<Completion>, Error> {
        // The window is a range of days, the column stores instants. Its
        // inclusive last day becomes an exclusive bound on the next midnight
        let since = self.day_reference.day_start(window.first());
        let until = self.day_reference.day_start(window.last() + Duration::days(1));

        log::debug!("GET {}", self.completions_endpoint);
        let request = self.request(Method::GET, &self.completions_endpoint)
            .query(&[
                ("select", String::from("*")),
                ("user_id", format!("eq.{}", owner)),
                ("completed_at", format!("gte.{}", since.to_rfc3339_opts(SecondsFormat::Millis, true))),
                ("completed_at", format!("lt.{}", until.to_rfc3339_opts(SecondsFormat::Millis, true))),
            ]);

        expect_rows(request, "fetch", format!("completions of {}", owner)).await
    }

    async fn insert_completion(&mut self, owner: OwnerId, task: TaskId) -> Result<Completion, Error> {
        let entity = format!("a completion of task {}", task);

        log::debug!("POST {}", self.completions_endpoint);
        let request = self.request(Method::POST, &self.completions_endpoint)
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({
                "task_id": task,
                "user_id": owner,
            }));

        let mut rows: Vec<Completion> = expect_rows(request, "insert", entity.clone()).await?;
        match rows.pop() {
            None => Err(Error::persistence("insert", entity, "the backend returned no row")),
            Some(completion) => Ok(completion),
        }
    }

    /// Deleting a completion the backend no longer has is not an error:
    /// the filter simply matches no row
    async fn delete_completion(&mut self, id: CompletionId) -> Result<(), Error> {
        log::debug!("DELETE {}", self.completions_endpoint);
        let request = self.request(Method::DELETE, &self.completions_endpoint)
            .query(&[("id", format!("eq.{}", id))]);

        expect_success(request, "delete", format!("completion {}", id)).await
    }

    async fn create_task(&mut self, owner: OwnerId, name: &str, recurrence: WeekdaySet) -> Result<Task, Error> {
        let entity = format!("task {:?}", name);

        log::debug!("POST {}", self.tasks_endpoint);
        let request = self.request(Method::POST, &self.tasks_endpoint)
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({
                "user_id": owner,
                "name": name,
                "repeat_days": recurrence,
            }));

        let mut rows: Vec<Task> = expect_rows(request, "create", entity.clone()).await?;
        match rows.pop() {
            None => Err(Error::persistence("create", entity, "the backend returned no row")),
            Some(task) => Ok(task),
        }
    }

    async fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Result<(), Error> {
        log::debug!("PATCH {}", self.tasks_endpoint);
        let request = self.request(Method::PATCH, &self.tasks_endpoint)
            .query(&[("id", format!("eq.{}", id))])
            .json(patch);

        expect_success(request, "update", format!("task {}", id)).await
    }

    async fn delete_task(&mut self, id: TaskId) -> Result<(), Error> {
        // Completions first: the task row is only removed once nothing references it
        log::debug!("DELETE {}", self.completions_endpoint);
        let request = self.request(Method::DELETE, &self.completions_endpoint)
            .query(&[("task_id", format!("eq.{}", id))]);
        expect_success(request, "delete", format!("completions of task {}", id)).await?;

        log::debug!("DELETE {}", self.tasks_endpoint);
        let request = self.request(Method::DELETE, &self.tasks_endpoint)
            .query(&[("id", format!("eq.{}", id))]);
        expect_success(request, "delete", format!("task {}", id)).await
    }
}
