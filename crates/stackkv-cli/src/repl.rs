//! Line runner: reads commands, writes replies
//!
//! Used for both piped/file input and interactive sessions. Stops at `END`
//! or end of input, whichever comes first.

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};

use crate::command::Command;
use crate::error::ParseError;
use crate::session::{Reply, Session};

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed (including END)
    pub commands: usize,
    /// Lines rejected by the parser
    pub errors: usize,
    /// Stopped because of END rather than end of input
    pub ended: bool,
}

/// Run every line of `input` through `session`, writing replies to `output`.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    session: &mut Session,
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();
    let prompt = session.config().prompt.clone();
    let report_errors = session.config().report_errors;

    let mut buf = Vec::new();
    loop {
        if let Some(prompt) = &prompt {
            write!(output, "{}", prompt).context("Failed to write prompt")?;
            output.flush().context("Failed to flush output")?;
        }

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read input line")?;
        if read == 0 {
            // Leave the terminal on a fresh line after the last prompt
            if prompt.is_some() {
                writeln!(output).context("Failed to write reply")?;
            }
            break;
        }

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => Command::parse(line.trim_end_matches(['\n', '\r'])),
            Err(_) => Err(ParseError::InvalidUtf8),
        };
        let command = match parsed {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                summary.errors += 1;
                let line = String::from_utf8_lossy(&buf);
                debug!(line = %line.trim_end(), error = %e, "rejected input line");
                if report_errors {
                    writeln!(output, "ERROR: {}", e).context("Failed to write reply")?;
                }
                continue;
            }
        };

        let name = command.name();
        let reply = session.execute(command);
        summary.commands += 1;
        debug!(command = name, reply = ?reply, depth = session.store().depth(), "executed");

        if let Some(text) = session.render(&reply) {
            writeln!(output, "{}", text).context("Failed to write reply")?;
        }
        if reply == Reply::End {
            summary.ended = true;
            break;
        }
    }

    output.flush().context("Failed to flush output")?;
    info!(
        commands = summary.commands,
        errors = summary.errors,
        ended = summary.ended,
        open_transactions = session.store().depth(),
        "session finished"
    );
    Ok(summary)
}
