//! Stdout writers; everything else (logs, errors) goes to stderr

use std::io::{self, Write};

/// Writes a JSON document followed by a newline
pub fn print_json(s: &str) -> io::Result<()> {
    write_line(s)
}

/// Writes one line of plain output
pub fn print_text(s: &str) -> io::Result<()> {
    write_line(s)
}

fn write_line(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")?;
    out.flush()
}
