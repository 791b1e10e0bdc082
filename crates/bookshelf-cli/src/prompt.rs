//! Interactive prompts
//!
//! Fills in values that were not given on the command line by asking on
//! stdin. Reader and writer are generic so handlers can be driven from
//! tests with scripted input.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Line-oriented prompt over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, Box<dyn Write>> {
    /// Prompt on the terminal
    ///
    /// Prompt text goes to stderr when stdout carries machine-readable output.
    pub fn stdio(prompt_on_stderr: bool) -> Self {
        let output: Box<dyn Write> = if prompt_on_stderr {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        Self::new(io::stdin().lock(), output)
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for a line of input, returning it trimmed
    ///
    /// End of input reads as an empty answer.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(line.trim().to_string())
    }

    /// Consume the prompter, returning everything written to it
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Use the given value, or ask for one
    pub fn value_or_ask(&mut self, value: Option<String>, label: &str) -> Result<String> {
        match value {
            Some(v) => Ok(v.trim().to_string()),
            None => self.ask(label),
        }
    }

    /// Use the given year, or ask for one
    pub fn year_or_ask(&mut self, value: Option<i32>, label: &str) -> Result<i32> {
        match value {
            Some(year) => Ok(year),
            None => parse_year(&self.ask(label)?),
        }
    }
}

/// Parse a year answer; blank means 0
pub fn parse_year(input: &str) -> Result<i32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .with_context(|| format!("Invalid year: '{}'", trimmed))
}
