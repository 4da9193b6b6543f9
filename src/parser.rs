//! Classification of raw input lines into command intents.
//!
//! The verb is matched case-insensitively; the argument payload keeps the
//! user's original spelling because when-texts are stored verbatim.

use crate::error::{Result, TaskError};

/// The closed set of command intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Exit,
    /// An answer to the save-retry prompt; ignored elsewhere.
    Confirm(bool),
    List,
    Find { keyword: String },
    Mark { number: String },
    Unmark { number: String },
    Delete { number: String },
    ShowBefore { when: String },
    ShowAfter { when: String },
    AddTodo { body: String },
    AddDeadline { body: String },
    AddEvent { body: String },
    Set { args: String },
    Invalid,
}

/// Maps a raw input line to its command intent and argument payload.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let lower = input.to_lowercase();
    let rest = |verb: &str| input.get(verb.len()..).unwrap_or("").trim().to_string();

    if lower.is_empty() {
        Command::Empty
    } else if lower == "bye" {
        Command::Exit
    } else if lower == "y" || lower == "yes" {
        Command::Confirm(true)
    } else if lower == "n" || lower == "no" {
        Command::Confirm(false)
    } else if lower == "list" {
        Command::List
    } else if lower.starts_with("find") {
        Command::Find {
            keyword: rest("find"),
        }
    } else if lower.starts_with("unmark") {
        Command::Unmark {
            number: rest("unmark"),
        }
    } else if lower.starts_with("mark") {
        Command::Mark {
            number: rest("mark"),
        }
    } else if lower.starts_with("delete") {
        Command::Delete {
            number: rest("delete"),
        }
    } else if lower.starts_with("show before") {
        Command::ShowBefore {
            when: rest("show before"),
        }
    } else if lower.starts_with("show after") {
        Command::ShowAfter {
            when: rest("show after"),
        }
    } else if lower.starts_with("todo") {
        Command::AddTodo { body: rest("todo") }
    } else if lower.starts_with("deadline") {
        Command::AddDeadline {
            body: rest("deadline"),
        }
    } else if lower.starts_with("event") {
        Command::AddEvent {
            body: rest("event"),
        }
    } else if lower.starts_with("set") {
        Command::Set { args: rest("set") }
    } else {
        Command::Invalid
    }
}

/// Parses a 1-based task number and validates it against the current count,
/// returning the zero-based index. Anything that is not a number in
/// `1..=count` is out of range.
pub fn parse_task_number(text: &str, count: usize) -> Result<usize> {
    let number: usize = text.trim().parse().unwrap_or(0);
    if number == 0 || number > count {
        return Err(TaskError::IndexOutOfRange {
            index: number,
            count,
        });
    }
    Ok(number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_intent_classifies() {
        assert_eq!(parse_command("  "), Command::Empty);
        assert_eq!(parse_command("BYE"), Command::Exit);
        assert_eq!(parse_command("y"), Command::Confirm(true));
        assert_eq!(parse_command("NO"), Command::Confirm(false));
        assert_eq!(parse_command("list"), Command::List);
        assert_eq!(
            parse_command("find Book"),
            Command::Find {
                keyword: "Book".into()
            }
        );
        assert_eq!(
            parse_command("mark 2"),
            Command::Mark { number: "2".into() }
        );
        assert_eq!(
            parse_command("unmark 2"),
            Command::Unmark { number: "2".into() }
        );
        assert_eq!(
            parse_command("delete 2"),
            Command::Delete { number: "2".into() }
        );
        assert_eq!(
            parse_command("show before 2021-08-24 18:00"),
            Command::ShowBefore {
                when: "2021-08-24 18:00".into()
            }
        );
        assert_eq!(
            parse_command("show after 6pm"),
            Command::ShowAfter { when: "6pm".into() }
        );
        assert_eq!(
            parse_command("todo read book"),
            Command::AddTodo {
                body: "read book".into()
            }
        );
        assert_eq!(
            parse_command("Deadline x /by 24/08/21"),
            Command::AddDeadline {
                body: "x /by 24/08/21".into()
            }
        );
        assert_eq!(
            parse_command("event x /from 6pm /to 7pm"),
            Command::AddEvent {
                body: "x /from 6pm /to 7pm".into()
            }
        );
        assert_eq!(
            parse_command("set name Alice"),
            Command::Set {
                args: "name Alice".into()
            }
        );
        assert_eq!(parse_command("blah"), Command::Invalid);
    }

    #[test]
    fn test_payload_keeps_original_case() {
        assert_eq!(
            parse_command("FIND Book"),
            Command::Find {
                keyword: "Book".into()
            }
        );
    }

    #[test]
    fn test_task_numbers() {
        assert_eq!(parse_task_number("2", 3), Ok(1));
        assert_eq!(
            parse_task_number("0", 3),
            Err(TaskError::IndexOutOfRange { index: 0, count: 3 })
        );
        assert_eq!(
            parse_task_number("4", 3),
            Err(TaskError::IndexOutOfRange { index: 4, count: 3 })
        );
        assert_eq!(
            parse_task_number("two", 3),
            Err(TaskError::IndexOutOfRange { index: 0, count: 3 })
        );
    }
}
