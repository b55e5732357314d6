//! Interactive confirmation prompt

use std::io::{self, BufRead, Write};

/// Ask the user to retype `expected` and return what they typed.
///
/// Only the line terminator is stripped; spaces and case are kept so the
/// comparison stays exact.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    expected: &str,
) -> io::Result<String> {
    writeln!(output, "This permanently deletes the site and all of its content.")?;
    write!(output, "Type {expected} to confirm: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let typed = line.strip_suffix('\n').unwrap_or(&line);
    let typed = typed.strip_suffix('\r').unwrap_or(typed);
    Ok(typed.to_string())
}
