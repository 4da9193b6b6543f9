//! The in-memory task registry.
//!
//! Insertion-ordered, duplicate-rejecting, never re-sorted. Indices are
//! zero-based here; the command layer owns the 1-based user numbering and
//! validates it, but every operation still answers out-of-range input with
//! an error instead of panicking.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, TaskError};
use crate::task::Task;

#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> TaskList {
        TaskList::default()
    }

    /// Rebuilds a registry from saved task lines, skipping blank ones.
    /// Duplicates are not re-checked on load; the file is trusted to have
    /// been written by [`TaskList::to_records`].
    pub fn from_records<I, S>(lines: I, now: NaiveDateTime) -> Result<TaskList>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tasks = Vec::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            tasks.push(Task::from_record(line, now)?);
        }
        Ok(TaskList { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Appends a task and returns the new count. A task equal to one already
    /// in the list is rejected.
    pub fn add(&mut self, task: Task) -> Result<usize> {
        if self.tasks.contains(&task) {
            return Err(TaskError::DuplicateTask);
        }
        self.tasks.push(task);
        Ok(self.tasks.len())
    }

    pub fn mark(&mut self, index: usize) -> Result<&Task> {
        let task = self.task_mut(index)?;
        task.set_done();
        Ok(&self.tasks[index])
    }

    pub fn unmark(&mut self, index: usize) -> Result<&Task> {
        let task = self.task_mut(index)?;
        task.set_undone();
        Ok(&self.tasks[index])
    }

    /// Removes and returns the task at `index`. Later tasks shift down; their
    /// user-facing numbers change accordingly.
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        if index >= self.tasks.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.tasks.remove(index))
    }

    /// The ordered subsequence of tasks matching `predicate`. The first
    /// predicate failure aborts the whole filter; no task is silently
    /// skipped.
    pub fn filter<P>(&self, mut predicate: P) -> Result<Vec<&Task>>
    where
        P: FnMut(&Task) -> Result<bool>,
    {
        let mut found = Vec::new();
        for task in &self.tasks {
            if predicate(task)? {
                found.push(task);
            }
        }
        Ok(found)
    }

    /// Tasks whose rendered text contains `keyword`.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.to_string().contains(keyword))
            .collect()
    }

    /// Tasks due strictly before the instant named by `text`.
    pub fn due_before(&self, text: &str, today: NaiveDate) -> Result<Vec<&Task>> {
        self.filter(|task| task.is_before(text, today))
    }

    /// Tasks due strictly after the instant named by `text`.
    pub fn due_after(&self, text: &str, today: NaiveDate) -> Result<Vec<&Task>> {
        self.filter(|task| task.is_after(text, today))
    }

    pub fn to_records(&self) -> Vec<String> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task> {
        let count = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(TaskError::IndexOutOfRange {
                index: index + 1,
                count,
            })
    }

    fn out_of_range(&self, index: usize) -> TaskError {
        TaskError::IndexOutOfRange {
            index: index + 1,
            count: self.tasks.len(),
        }
    }
}
