//! The in-memory set of loaded completion records

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::completion::Completion;
use crate::settings::DayReference;
use crate::task::TaskId;

/// The completions a session has loaded, keyed by `(task, calendar day)`.
///
/// A ledger holds one fetched day window, not full history. Its keying is
/// what upholds the "at most one completion per task and day" rule in memory:
/// a store that was somehow fed duplicates will see them skipped (and logged)
/// when the ledger is built.
#[derive(Clone, Debug)]
pub struct CompletionLedger {
    day_reference: DayReference,
    records: HashMap<(TaskId, NaiveDate), Completion>,
}

impl CompletionLedger {
    /// An empty ledger
    pub fn new(day_reference: DayReference) -> Self {
        Self { day_reference, records: HashMap::new() }
    }

    /// Build a ledger from freshly fetched records.
    /// When two records land on the same (task, day) pair, the first one is
    /// kept and the duplicate is dropped with a warning
    pub fn from_records(day_reference: DayReference, records: Vec<Completion>) -> Self {
        let mut ledger = Self::new(day_reference);
        for record in records {
            let day = record.day_key(day_reference);
            if let Some(kept) = ledger.records.get(&(record.task(), day)) {
                log::warn!(
                    "Two completions of task {} on {}: keeping {}, dropping {}",
                    record.task(),
                    day,
                    kept.id(),
                    record.id()
                );
                continue;
            }
            ledger.insert(record);
        }
        ledger
    }

    pub fn day_reference(&self) -> DayReference {
        self.day_reference
    }

    /// Whether `task` is marked done on `date`
    pub fn is_completed(&self, task: TaskId, date: NaiveDate) -> bool {
        self.records.contains_key(&(task, date))
    }

    /// The record marking `task` done on `date`, if any
    pub fn get(&self, task: TaskId, date: NaiveDate) -> Option<&Completion> {
        self.records.get(&(task, date))
    }

    /// How many completions are recorded on `date`, across all tasks
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.records.keys().filter(|(_, day)| *day == date).count()
    }

    /// Every loaded record, in no particular order
    pub fn records(&self) -> impl Iterator<Item = &Completion> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File a record under the day derived from its timestamp.
    /// An existing record for that (task, day) is replaced
    pub(crate) fn insert(&mut self, record: Completion) -> Option<Completion> {
        let day = record.day_key(self.day_reference);
        self.records.insert((record.task(), day), record)
    }

    /// Take the record marking `task` done on `date` out of the ledger
    pub(crate) fn remove(&mut self, task: TaskId, date: NaiveDate) -> Option<Completion> {
        self.records.remove(&(task, date))
    }

    /// Drop every record of `task`, returning how many there were
    pub(crate) fn remove_task(&mut self, task: TaskId) -> usize {
        let before = self.records.len();
        self.records.retain(|(record_task, _), _| *record_task != task);
        before - self.records.len()
    }
}
