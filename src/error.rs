use thiserror::Error;

/// Every failure the task engine can report.
///
/// The engine only classifies; rendering a kind as user-facing text is the
/// console layer's job. Callers branch on the variant, never on message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("the description of a task cannot be empty")]
    EmptyDescription,

    #[error("a deadline task must be a task followed with '/by (deadline)'")]
    MalformedDeadline,

    #[error("an event task must be a task followed with '/from (start) /to (end)'")]
    MalformedEvent,

    #[error("the deadline has already passed")]
    PastDeadline,

    #[error("the start date and time must be before the end date and time")]
    InvalidEventOrdering,

    #[error("unable to parse date: {0}")]
    UnparseableDate(String),

    #[error("unable to parse time: {0}")]
    UnparseableTime(String),

    #[error("this task already exists in the list")]
    DuplicateTask,

    #[error("task number {index} is out of range (you have {count} task(s))")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("corrupt task record: {0}")]
    CorruptRecord(String),
}

pub type Result<T> = std::result::Result<T, TaskError>;
