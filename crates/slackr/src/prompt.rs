// SPDX-FileCopyrightText: 2026 Slackr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive yes/no confirmation before destructive runs.

use std::io::{self, BufRead, Write};

use slackr_core::SlackrError;

/// Asks `question` until the answer is yes/y or no/n (any case).
///
/// End of input counts as "no".
pub fn confirm_with<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    loop {
        write!(output, "{question} (yes/no) ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => writeln!(output, "Please answer yes or no.")?,
        }
    }
}

/// [`confirm_with`] on the process's stdin and stderr.
pub fn confirm(question: &str) -> Result<bool, SlackrError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stderr();
    confirm_with(question, &mut input, &mut output)
        .map_err(|e| SlackrError::Internal(format!("failed to read confirmation: {e}")))
}
