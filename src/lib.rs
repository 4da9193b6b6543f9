//! Taskmate - a console personal task assistant.
//!
//! Users manage three kinds of tasks (plain to-dos, deadlines, events) with
//! short textual commands; dates and times may be written in many loose
//! formats and are resolved into unambiguous instants.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Console layer**: the `ui` module plus the binary's command loop
//! - **Domain layer**: `datetime`, `task`, `tasklist`, `parser` - temporal
//!   resolution, task construction, and ordering queries
//! - **Persistence layer**: `storage` (task lines) and `prefs` (TOML)
//!
//! # Example
//!
//! ```no_run
//! use taskmate::{Outcome, TaskMate};
//!
//! let mut app = TaskMate::new("data/tasks.txt", "data/preferences.toml");
//! match app.execute("todo read book") {
//!     Outcome::Reply(message) => println!("{message}"),
//!     Outcome::Exit => {}
//! }
//! ```

pub mod datetime;
pub mod error;
pub mod parser;
pub mod prefs;
pub mod storage;
pub mod task;
pub mod tasklist;
pub mod ui;

use std::path::{Path, PathBuf};

// Re-export commonly used types
pub use crate::error::{Result, TaskError};
pub use crate::parser::{Command, parse_command, parse_task_number};
pub use crate::prefs::Preferences;
pub use crate::storage::Storage;
pub use crate::task::Task;
pub use crate::tasklist::TaskList;

const HELP: &str = "I'm sorry, but I don't know what that means.
The following commands are supported:
    You can add a task by typing:
    - todo (description)
    - deadline (description) /by (deadline)
    - event (description) /from (start) /to (end)
    List the existing tasks by typing 'list'.
    Mark a task as done by typing 'mark (task number)'.
    Mark a task as not done by typing 'unmark (task number)'.
    Delete a task by typing 'delete (task number)'.
    Search tasks by typing 'find (keyword)'.
    Show tasks before a certain date and/or time by typing 'show before (date) (time)'.
    Show tasks after a certain date and/or time by typing 'show after (date) (time)'.
    Set your name by typing 'set name (name)'.
    Exit the program by typing 'bye'.";

/// Result of executing one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Message to show the user; the session continues. May be empty, in
    /// which case there is nothing to show.
    Reply(String),
    /// The user asked to leave.
    Exit,
}

/// The assistant: owns the task registry, preferences, and their stores,
/// and turns command lines into replies.
///
/// The engine underneath never prints and never formats errors; this handler
/// renders every error kind as user-facing text.
pub struct TaskMate {
    tasks: TaskList,
    prefs: Preferences,
    storage: Storage,
    prefs_path: PathBuf,
    startup_notice: Option<String>,
}

impl TaskMate {
    /// Creates the assistant, loading saved tasks and preferences.
    ///
    /// Loading never fails the whole program: unreadable or corrupt saved
    /// state falls back to an empty list, and the complaint is kept for
    /// [`TaskMate::startup_notice`].
    pub fn new(data_path: impl AsRef<Path>, prefs_path: impl AsRef<Path>) -> TaskMate {
        let storage = Storage::new(data_path);
        let mut startup_notice = None;
        let tasks = match storage.load() {
            Ok(lines) => match TaskList::from_records(&lines, datetime::local_now()) {
                Ok(list) => list,
                Err(err) => {
                    log::warn!("saved tasks rejected: {err}");
                    startup_notice = Some(
                        "Could not load saved tasks. Saved tasks could be corrupted.".to_string(),
                    );
                    TaskList::new()
                }
            },
            Err(err) => {
                log::warn!("reading saved tasks failed: {err}");
                startup_notice = Some("Could not load saved tasks.".to_string());
                TaskList::new()
            }
        };
        let prefs_path = prefs_path.as_ref().to_path_buf();
        let prefs = match Preferences::load(&prefs_path) {
            Ok(prefs) => prefs,
            Err(err) => {
                log::warn!("reading preferences failed: {err}");
                Preferences::default()
            }
        };
        TaskMate {
            tasks,
            prefs,
            storage,
            prefs_path,
            startup_notice,
        }
    }

    /// Complaint from loading saved state, if any.
    pub fn startup_notice(&self) -> Option<&str> {
        self.startup_notice.as_deref()
    }

    pub fn greeting(&self) -> String {
        let hello = if self.prefs.name.is_empty() {
            "Hello!".to_string()
        } else {
            format!("Hello, {}!", self.prefs.name)
        };
        format!("{hello} I'm Taskmate, your personal task manager.\nWhat can I do for you?")
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Executes one input line.
    pub fn execute(&mut self, input: &str) -> Outcome {
        match parse_command(input) {
            Command::Empty => reply("Please enter a command."),
            Command::Exit => Outcome::Exit,
            // Only meaningful as an answer to the save-retry prompt
            Command::Confirm(_) => reply(""),
            Command::List => reply(self.list_tasks()),
            Command::Find { keyword } => reply(self.find_tasks(&keyword)),
            Command::Mark { number } => reply(self.toggle_task(&number, true)),
            Command::Unmark { number } => reply(self.toggle_task(&number, false)),
            Command::Delete { number } => reply(self.delete_task(&number)),
            Command::ShowBefore { when } => reply(self.show_tasks(&when, false)),
            Command::ShowAfter { when } => reply(self.show_tasks(&when, true)),
            Command::AddTodo { body } => reply(self.add_task(Task::todo(&body))),
            Command::AddDeadline { body } => {
                reply(self.add_task(Task::deadline(&body, datetime::local_now())))
            }
            Command::AddEvent { body } => {
                reply(self.add_task(Task::event(&body, datetime::local_now())))
            }
            Command::Set { args } => reply(self.set_preference(&args)),
            Command::Invalid => reply(HELP),
        }
    }

    /// Persists the task list to its store.
    pub fn save(&self) -> anyhow::Result<()> {
        self.storage.save(&self.tasks.to_records())
    }

    fn add_task(&mut self, task: Result<Task>) -> String {
        let task = match task {
            Ok(task) => task,
            Err(err) => return describe(&err),
        };
        let rendered = task.to_string();
        match self.tasks.add(task) {
            Ok(count) => format!(
                "Got it. I've added this task:\n  {rendered}\nNow you have {count} task{} in the list.",
                plural(count)
            ),
            Err(err) => describe(&err),
        }
    }

    fn list_tasks(&self) -> String {
        if self.tasks.is_empty() {
            return "There are no tasks in your list.".to_string();
        }
        let found: Vec<&Task> = self.tasks.iter().collect();
        numbered("Here are the tasks in your list:", &found)
    }

    fn find_tasks(&self, keyword: &str) -> String {
        let found = self.tasks.find(keyword);
        if found.is_empty() {
            format!("There are no tasks with the keyword '{keyword}'.")
        } else {
            numbered(
                &format!("Here are the tasks with the keyword '{keyword}':"),
                &found,
            )
        }
    }

    fn toggle_task(&mut self, number: &str, done: bool) -> String {
        let index = match parse_task_number(number, self.tasks.len()) {
            Ok(index) => index,
            Err(err) => return describe(&err),
        };
        let result = if done {
            self.tasks.mark(index)
        } else {
            self.tasks.unmark(index)
        };
        match result {
            Ok(task) if done => format!("Nice! I've marked this task as done:\n  {task}"),
            Ok(task) => format!("OK, I've marked this task as not done yet:\n  {task}"),
            Err(err) => describe(&err),
        }
    }

    fn delete_task(&mut self, number: &str) -> String {
        let index = match parse_task_number(number, self.tasks.len()) {
            Ok(index) => index,
            Err(err) => return describe(&err),
        };
        match self.tasks.remove(index) {
            Ok(task) => {
                let count = self.tasks.len();
                format!(
                    "Noted. I've removed this task:\n  {task}\nNow you have {count} task{} in the list.",
                    plural(count)
                )
            }
            Err(err) => describe(&err),
        }
    }

    fn show_tasks(&self, when: &str, after: bool) -> String {
        let today = datetime::local_now().date();
        let relation = if after { "after" } else { "before" };
        let result = if after {
            self.tasks.due_after(when, today)
        } else {
            self.tasks.due_before(when, today)
        };
        match result {
            Ok(found) if found.is_empty() => format!("There are no tasks {relation} {when}."),
            Ok(found) => numbered(&format!("Here are the tasks {relation} {when}:"), &found),
            Err(err) => describe(&err),
        }
    }

    fn set_preference(&mut self, args: &str) -> String {
        let Some((option, value)) = args.split_once(' ') else {
            return "Invalid input! Please enter the command in the format: set [preference] [value]"
                .to_string();
        };
        match option.trim() {
            "name" => {
                self.prefs.name = value.trim().to_string();
                if let Err(err) = self.prefs.save(&self.prefs_path) {
                    log::warn!("saving preferences failed: {err}");
                    return "Could not save your preferences.".to_string();
                }
                format!("Name successfully set to {}", self.prefs.name)
            }
            other => format!("Invalid preference! '{other}' cannot be set in text mode."),
        }
    }
}

fn reply(message: impl Into<String>) -> Outcome {
    Outcome::Reply(message.into())
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn numbered(header: &str, tasks: &[&Task]) -> String {
    let mut out = header.to_string();
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format!("\n{}. {task}", i + 1));
    }
    out
}

// Renders an error kind as user-facing text; the format hints mirror what
// the engine actually accepts.
fn describe(err: &TaskError) -> String {
    match err {
        TaskError::EmptyDescription => "The description of a task cannot be empty.".to_string(),
        TaskError::MalformedDeadline => {
            "A deadline task must be a task followed with '/by (deadline)'.".to_string()
        }
        TaskError::MalformedEvent => {
            "An event task must be a task followed with '/from (start) /to (end)'.".to_string()
        }
        TaskError::PastDeadline => "The deadline has already passed.".to_string(),
        TaskError::InvalidEventOrdering => {
            "The start date and time must be before the end date and time.".to_string()
        }
        TaskError::UnparseableDate(text) => {
            format!("I couldn't read '{text}' as a date. The date format should be 'dd/mm/yy'.")
        }
        TaskError::UnparseableTime(text) => {
            format!("I couldn't read '{text}' as a time. The time format should be 'hh:mm'.")
        }
        TaskError::DuplicateTask => "This task already exists in the list.".to_string(),
        TaskError::IndexOutOfRange { count, .. } => format!(
            "Please specify a valid task number.\nYou only have {count} task{} in total.",
            plural(*count)
        ),
        TaskError::CorruptRecord(_) => "Possible corruption in saved tasks.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fresh_app(dir: &TempDir) -> TaskMate {
        TaskMate::new(
            dir.path().join("tasks.txt"),
            dir.path().join("preferences.toml"),
        )
    }

    #[test]
    fn test_add_and_list() {
        let dir = TempDir::new().unwrap();
        let mut app = fresh_app(&dir);

        let Outcome::Reply(message) = app.execute("todo read book") else {
            panic!("expected a reply");
        };
        assert!(message.contains("Got it. I've added this task:"));
        assert!(message.contains("Now you have 1 task in the list."));

        let Outcome::Reply(listing) = app.execute("list") else {
            panic!("expected a reply");
        };
        assert!(listing.contains("1. [T][ ] read book"));
    }

    #[test]
    fn test_duplicate_add_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut app = fresh_app(&dir);
        app.execute("todo read book");
        let Outcome::Reply(message) = app.execute("todo read book") else {
            panic!("expected a reply");
        };
        assert_eq!(message, "This task already exists in the list.");
        assert_eq!(app.tasks().len(), 1);
    }

    #[test]
    fn test_invalid_task_number_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut app = fresh_app(&dir);
        let Outcome::Reply(message) = app.execute("mark 5") else {
            panic!("expected a reply");
        };
        assert!(message.contains("Please specify a valid task number."));
    }

    #[test]
    fn test_bye_exits() {
        let dir = TempDir::new().unwrap();
        let mut app = fresh_app(&dir);
        assert_eq!(app.execute("bye"), Outcome::Exit);
    }

    #[test]
    fn test_set_name_persists_and_greets() {
        let dir = TempDir::new().unwrap();
        let mut app = fresh_app(&dir);
        let Outcome::Reply(message) = app.execute("set name Alice") else {
            panic!("expected a reply");
        };
        assert_eq!(message, "Name successfully set to Alice");

        let again = fresh_app(&dir);
        assert!(again.greeting().starts_with("Hello, Alice!"));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut app = fresh_app(&dir);
        app.execute("todo read book");
        app.execute("deadline return book /by 2099-08-24 1800");
        app.execute("mark 1");
        app.save().unwrap();

        let again = fresh_app(&dir);
        assert!(again.startup_notice().is_none());
        assert_eq!(again.tasks().len(), 2);
        assert!(again.tasks().get(0).unwrap().is_done());
        assert_eq!(
            again.tasks().get(1).unwrap().to_record(),
            "D | 0 | return book /by 2099-08-24 1800"
        );
    }

    #[test]
    fn test_corrupt_store_falls_back_to_empty_list() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tasks.txt"), "garbage line\n").unwrap();
        let app = fresh_app(&dir);
        assert_eq!(
            app.startup_notice(),
            Some("Could not load saved tasks. Saved tasks could be corrupted.")
        );
        assert!(app.tasks().is_empty());
    }
}
