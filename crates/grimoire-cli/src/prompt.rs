//! Interactive prompts on the terminal

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use grimoire_core::confirm::{ConfirmationRequest, Confirmer};

/// Asks on a line-oriented reader/writer pair (stdin/stdout in the binary)
pub struct LineConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmer for LineConfirmer<R, W> {
    fn confirm(&mut self, request: &ConfirmationRequest) -> bool {
        let _ = writeln!(self.output, "{}", request.title);
        let _ = writeln!(self.output, "{}", request.description);
        let _ = write!(self.output, "{}? [y/N] ", request.confirm_label);
        let _ = self.output.flush();

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Read a selection for `count` numbered suggestions from `input`
pub fn ask_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    count: usize,
) -> Result<Vec<usize>> {
    write!(output, "Add which? (e.g. 1,3 / all / none) ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read selection")?;
    parse_selection(&line, count)
}

/// Parse "all", "none", or 1-based numbers separated by commas or spaces.
///
/// Returns zero-based indices, sorted and without duplicates.
pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "" | "none" => return Ok(Vec::new()),
        "all" => return Ok((0..count).collect()),
        _ => {}
    }

    let mut indices = Vec::new();
    for part in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
    {
        let number: usize = part
            .parse()
            .with_context(|| format!("Not a suggestion number: {}", part))?;
        if number == 0 || number > count {
            bail!("Suggestion {} is out of range (1-{})", number, count);
        }
        indices.push(number - 1);
    }
    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}
