//! Console input and output.
//!
//! Everything the user sees goes through here; the engine itself never
//! prints. Messages are framed with a divider line the way a chat window
//! separates turns.

use std::io::{self, BufRead, Write};

const DIVIDER: &str = "--------------------------------------------";

#[derive(Default)]
pub struct TextUi;

impl TextUi {
    pub fn new() -> TextUi {
        TextUi
    }

    /// Reads the next input line; `None` on end of input.
    pub fn read_command(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end().to_string()),
        }
    }

    pub fn show_message(&self, message: &str) {
        println!("{DIVIDER}");
        println!("{message}");
        println!("{DIVIDER}");
        let _ = io::stdout().flush();
    }

    pub fn show_error(&self, message: &str) {
        self.show_message(message);
    }
}
