//! Line-oriented terminal I/O and the confirmation dialog.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use inventory_core::Confirm;

#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `prompt` and read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for Console<R, W> {
    /// Only an explicit `y` or `yes` confirms. End of input or a read error
    /// counts as declining.
    fn confirm(&mut self, prompt: &str) -> bool {
        match self.read_line(&format!("{prompt} [y/N] ")) {
            Ok(Some(answer)) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(error) => {
                tracing::warn!(%error, "confirmation prompt failed");
                false
            }
        }
    }
}
