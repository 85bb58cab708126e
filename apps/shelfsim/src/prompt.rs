//! Line-based prompts on stdin.

use shelfsim_core::ShelfError;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads answers from stdin one line at a time.
pub struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for Prompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `question` and read one trimmed line. `None` on end of input.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>, ShelfError> {
        show(question)?;
        let line = self
            .lines
            .next_line()
            .await
            .map_err(|e| ShelfError::Io(format!("Read stdin: {}", e)))?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Like `ask`, but gives up after `timeout`. A timeout reads as `None`.
    pub async fn ask_within(
        &mut self,
        question: &str,
        timeout: Option<Duration>,
    ) -> Result<Option<String>, ShelfError> {
        let Some(limit) = timeout else {
            return self.ask(question).await;
        };
        match tokio::time::timeout(limit, self.ask(question)).await {
            Ok(answer) => answer,
            Err(_) => {
                println!();
                tracing::warn!(seconds = limit.as_secs(), "Prompt timed out");
                Ok(None)
            }
        }
    }

    /// Ask a yes/no question until the answer parses. End of input or a
    /// timeout answers "no".
    pub async fn confirm(
        &mut self,
        question: &str,
        timeout: Option<Duration>,
    ) -> Result<bool, ShelfError> {
        loop {
            let Some(answer) = self.ask_within(question, timeout).await? else {
                return Ok(false);
            };
            match parse_yes_no(&answer) {
                Some(yes) => return Ok(yes),
                None => println!("Please answer yes or no."),
            }
        }
    }
}

fn show(question: &str) -> Result<(), ShelfError> {
    print!("{}", question);
    std::io::stdout()
        .flush()
        .map_err(|e| ShelfError::Io(format!("Flush stdout: {}", e)))
}

/// Parse `y`/`yes`/`n`/`no`, case-insensitively.
#[must_use]
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
