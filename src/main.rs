//! Taskmate - console entry point.
//!
//! Reads command lines from stdin, hands them to the `taskmate` library, and
//! prints the replies. On exit the task list is saved, with a retry prompt
//! when saving fails.

use anyhow::Result;
use clap::Parser;
use flexi_logger::{FileSpec, Logger};
use taskmate::ui::TextUi;
use taskmate::{Command, Outcome, TaskMate, parse_command};

/// Taskmate - personal task tracking from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task data file
    #[arg(long, default_value = "data/tasks.txt")]
    file: String,

    /// Path to the user preferences file
    #[arg(long, default_value = "data/preferences.toml")]
    preferences: String,

    /// Directory for log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _logger = match &args.log_dir {
        Some(dir) => Some(
            Logger::try_with_env_or_str("info")?
                .log_to_file(FileSpec::default().directory(dir))
                .start()?,
        ),
        None => None,
    };

    let mut ui = TextUi::new();
    let mut app = TaskMate::new(&args.file, &args.preferences);

    if let Some(notice) = app.startup_notice() {
        ui.show_error(notice);
    }
    ui.show_message(&app.greeting());

    loop {
        let Some(line) = ui.read_command() else {
            break;
        };
        match app.execute(&line) {
            Outcome::Reply(message) if message.is_empty() => {}
            Outcome::Reply(message) => ui.show_message(&message),
            Outcome::Exit => break,
        }
    }

    ui.show_message("Saving your tasks...");
    loop {
        match app.save() {
            Ok(()) => {
                ui.show_message("Tasks saved successfully.");
                break;
            }
            Err(err) => {
                log::error!("saving tasks failed: {err}");
                ui.show_error("Could not save tasks. Try again? (Y/N)");
                match ui.read_command().as_deref().map(parse_command) {
                    Some(Command::Confirm(true)) => continue,
                    _ => {
                        ui.show_message("Exiting without saving...");
                        break;
                    }
                }
            }
        }
    }
    ui.show_message("Bye. Hope to see you again soon!");
    Ok(())
}
