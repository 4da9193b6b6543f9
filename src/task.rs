//! The three task kinds and their shared contract.
//!
//! A task is born fully validated: the constructors either return a complete
//! task or a classified error, and the only mutation a live task accepts is
//! toggling its done flag. Raw when-texts are kept verbatim alongside the
//! resolved instants so a saved task line round-trips losslessly.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::datetime::{self, Resolved};
use crate::error::{Result, TaskError};

const DATE_DISPLAY: &str = "%A, %-d %B %Y";
const TIME_DISPLAY: &str = "%-I:%M %P";

/// A task of one of the three supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Todo(Todo),
    Deadline(Deadline),
    Event(Event),
}

impl Task {
    /// Builds a plain to-do task from its description body.
    pub fn todo(body: &str) -> Result<Task> {
        Ok(Task::Todo(Todo::new(body)?))
    }

    /// Builds a deadline task from `"<description> /by <when>"`.
    ///
    /// `now` is the resolution instant: a deadline that already lies strictly
    /// before it is rejected with [`TaskError::PastDeadline`]. The check runs
    /// at creation only; reloading a saved deadline does not repeat it.
    pub fn deadline(body: &str, now: NaiveDateTime) -> Result<Task> {
        let deadline = Deadline::parse(body)?;
        if deadline.by_instant() < now {
            return Err(TaskError::PastDeadline);
        }
        Ok(Task::Deadline(deadline))
    }

    /// Builds an event task from `"<description> /from <start> /to <end>"`.
    ///
    /// `now` supplies "today" for start halves given as a bare time of day.
    pub fn event(body: &str, now: NaiveDateTime) -> Result<Task> {
        Ok(Task::Event(Event::new(body, now)?))
    }

    /// Rebuilds a task from one line of the saved-task file,
    /// `"<T|D|E> | <0|1> | <body>"`.
    pub fn from_record(line: &str, now: NaiveDateTime) -> Result<Task> {
        let parts: Vec<&str> = line.split(" | ").collect();
        if parts.len() != 3 {
            return Err(TaskError::CorruptRecord(line.to_string()));
        }
        let mut task = match parts[0] {
            "T" => Task::Todo(Todo::new(parts[2])?),
            "D" => Task::Deadline(Deadline::parse(parts[2])?),
            "E" => Task::Event(Event::new(parts[2], now)?),
            _ => return Err(TaskError::CorruptRecord(line.to_string())),
        };
        match parts[1] {
            "0" => {}
            "1" => task.set_done(),
            _ => return Err(TaskError::CorruptRecord(line.to_string())),
        }
        Ok(task)
    }

    /// The saved-task file line for this task, with the when-texts exactly as
    /// the user spelled them.
    pub fn to_record(&self) -> String {
        let done = if self.is_done() { "1" } else { "0" };
        match self {
            Task::Todo(t) => format!("T | {done} | {}", t.description),
            Task::Deadline(d) => format!("D | {done} | {} /by {}", d.description, d.by_raw),
            Task::Event(e) => format!(
                "E | {done} | {} /from {} /to {}",
                e.description, e.start_raw, e.end_raw
            ),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Task::Todo(t) => &t.description,
            Task::Deadline(d) => &d.description,
            Task::Event(e) => &e.description,
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            Task::Todo(t) => t.done,
            Task::Deadline(d) => d.done,
            Task::Event(e) => e.done,
        }
    }

    pub fn set_done(&mut self) {
        *self.done_mut() = true;
    }

    pub fn set_undone(&mut self) {
        *self.done_mut() = false;
    }

    fn done_mut(&mut self) -> &mut bool {
        match self {
            Task::Todo(t) => &mut t.done,
            Task::Deadline(d) => &mut d.done,
            Task::Event(e) => &mut e.done,
        }
    }

    /// Whether this task is due strictly before the instant named by `text`.
    ///
    /// The text resolves through the same tiered fallback the constructors
    /// use; a bare date compares at date granularity. To-dos have no instant
    /// and answer `false` without looking at the text. Deadlines anchor on
    /// their due instant; events anchor on their start for both `is_before`
    /// and `is_after`: an event counts as due when it begins, not when it
    /// ends.
    pub fn is_before(&self, text: &str, today: NaiveDate) -> Result<bool> {
        let anchor = match self.anchor() {
            Some(anchor) => anchor,
            None => return Ok(false),
        };
        Ok(match datetime::resolve_query(text, today)? {
            Resolved::Date(date) => anchor.date() < date,
            Resolved::Instant(instant) => anchor < instant,
        })
    }

    /// Whether this task is due strictly after the instant named by `text`.
    /// Same resolution and anchoring rules as [`Task::is_before`].
    pub fn is_after(&self, text: &str, today: NaiveDate) -> Result<bool> {
        let anchor = match self.anchor() {
            Some(anchor) => anchor,
            None => return Ok(false),
        };
        Ok(match datetime::resolve_query(text, today)? {
            Resolved::Date(date) => anchor.date() > date,
            Resolved::Instant(instant) => anchor > instant,
        })
    }

    fn anchor(&self) -> Option<NaiveDateTime> {
        match self {
            Task::Todo(_) => None,
            Task::Deadline(d) => Some(d.by_instant()),
            Task::Event(e) => Some(e.start),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.is_done() { "X" } else { " " };
        match self {
            Task::Todo(t) => write!(f, "[T][{icon}] {}", t.description),
            Task::Deadline(d) => {
                write!(f, "[D][{icon}] {} (by: {})", d.description, d.by_display)
            }
            Task::Event(e) => write!(f, "[E][{icon}] {} ({})", e.description, e.span_display),
        }
    }
}

/// A task with a description and nothing else.
#[derive(Debug, Clone)]
pub struct Todo {
    description: String,
    done: bool,
}

impl Todo {
    fn new(body: &str) -> Result<Todo> {
        let description = body.trim().to_string();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        Ok(Todo {
            description,
            done: false,
        })
    }
}

impl PartialEq for Todo {
    fn eq(&self, other: &Todo) -> bool {
        self.description == other.description
    }
}

/// A task that must be finished by a given instant.
#[derive(Debug, Clone)]
pub struct Deadline {
    description: String,
    done: bool,
    by_date: NaiveDate,
    by_time: Option<NaiveTime>,
    by_raw: String,
    by_display: String,
}

impl Deadline {
    // Parses without the past-deadline check; the storage reload path comes
    // through here so historical lines keep loading.
    fn parse(body: &str) -> Result<Deadline> {
        let parts: Vec<&str> = body.split(" /by ").collect();
        if parts.len() != 2 {
            return Err(TaskError::MalformedDeadline);
        }
        let description = parts[0].trim().to_string();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        let when = parts[1].trim();
        let (by_date, by_time) = match when.split_once(' ') {
            None => (datetime::parse_date(when)?, None),
            Some((date_part, time_part)) => (
                datetime::parse_date(date_part)?,
                Some(datetime::parse_time(time_part.trim())?),
            ),
        };
        let mut by_display = by_date.format(DATE_DISPLAY).to_string();
        if let Some(time) = by_time {
            by_display = format!("{by_display}, {}", time.format(TIME_DISPLAY));
        }
        Ok(Deadline {
            description,
            done: false,
            by_date,
            by_time,
            by_raw: when.to_string(),
            by_display,
        })
    }

    /// The due instant; a date-only deadline is due at the end of that day.
    pub fn by_instant(&self) -> NaiveDateTime {
        self.by_date
            .and_time(self.by_time.unwrap_or_else(datetime::end_of_day))
    }
}

impl PartialEq for Deadline {
    fn eq(&self, other: &Deadline) -> bool {
        // Resolved instants, never raw spelling: "24/08/21" and "2021-08-24"
        // name the same deadline.
        self.description == other.description && self.by_instant() == other.by_instant()
    }
}

/// A task spanning a start and an end instant.
#[derive(Debug, Clone)]
pub struct Event {
    description: String,
    done: bool,
    start: NaiveDateTime,
    end: NaiveDateTime,
    start_raw: String,
    end_raw: String,
    span_display: String,
}

impl Event {
    fn new(body: &str, now: NaiveDateTime) -> Result<Event> {
        let parts: Vec<&str> = body.split(" /from ").collect();
        if parts.len() != 2 {
            return Err(TaskError::MalformedEvent);
        }
        let description = parts[0].trim().to_string();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        let halves: Vec<&str> = parts[1].split(" /to ").collect();
        if halves.len() != 2 {
            return Err(TaskError::MalformedEvent);
        }
        let start_raw = halves[0].trim();
        let end_raw = halves[1].trim();
        // A start given as a bare date begins at midnight; an end given as a
        // bare time stays on the start's day, and a bare end date closes at
        // end of day.
        let start = datetime::resolve_instant(start_raw, now.date(), NaiveTime::MIN)?;
        let end = datetime::resolve_instant(end_raw, start.date(), datetime::end_of_day())?;
        if start > end {
            return Err(TaskError::InvalidEventOrdering);
        }
        let span_display = format!(
            "from {}, {} to {}, {}",
            start.format(DATE_DISPLAY),
            start.format(TIME_DISPLAY),
            end.format(DATE_DISPLAY),
            end.format(TIME_DISPLAY),
        );
        Ok(Event {
            description,
            done: false,
            start,
            end,
            start_raw: start_raw.to_string(),
            end_raw: end_raw.to_string(),
            span_display,
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Event) -> bool {
        self.description == other.description
            && self.start == other.start
            && self.end == other.end
    }
}
