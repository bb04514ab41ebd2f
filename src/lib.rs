//! This crate provides a way to manage recurring tasks and their day-by-day completions.
//!
//! A [`Task`] repeats on a set of weekdays. Completing it on a given day is recorded as a
//! [`Completion`], at most one per task and per day. A [`Session`] loads the tasks of one
//! user, and the completions of a window of days, from a [`TaskStore`](traits::TaskStore); it
//! creates, updates, deletes and toggles through that store, and only updates what it holds
//! in memory once the store has accepted the change.
//!
//! Two stores are provided: a [`Client`](client::Client) that speaks to a hosted Postgres
//! backend through its PostgREST layer, and a file-backed [`Cache`](cache::Cache), that
//! doubles as the mockable store the tests run against.
//!
//! The [`report`] module turns a loaded session into the weekly grid, the per-day tallies
//! and the headline numbers a dashboard displays.

pub mod traits;

pub mod calendar;
pub use calendar::DayRange;
mod weekday;
pub use weekday::{Weekday, WeekdaySet};
mod task;
pub use task::{OwnerId, Task, TaskId, TaskPatch};
mod completion;
pub use completion::{Completion, CompletionId};
mod ledger;
pub use ledger::CompletionLedger;
mod error;
pub use error::Error;
pub mod report;
pub mod session;
pub use session::Session;

pub mod client;
pub mod cache;
pub mod mock_behaviour;

pub mod settings;
pub mod utils;
