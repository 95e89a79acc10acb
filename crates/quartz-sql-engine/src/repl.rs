//! The interactive line loop around the lexer → parser → database
//! pipeline.
//!
//! Generic over its input and output streams so tests can drive a whole
//! session in memory; the binary passes locked stdin/stdout.

use std::io::{self, BufRead, Write};

use quartz_sql_core::parse_query;
use tracing::debug;

use crate::database::Database;
use crate::error::Result;
use crate::table::Table;

/// The per-statement prompt.
pub const PROMPT: &str = "quartz> ";

/// Runs one statement against a database: lex, parse, execute.
///
/// # Errors
///
/// Returns the first front-end or engine error; the database is
/// unchanged when an error is returned.
pub fn run_statement(db: &mut Database, line: &str) -> Result<Option<Table>> {
    let plan = parse_query(line)?;
    db.execute(plan)
}

/// Runs the interactive loop until `exit` or end of input.
///
/// Statement errors print their message and the loop continues; only I/O
/// failures on the streams end the session early.
///
/// # Errors
///
/// Returns any I/O error raised by the input or output stream.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    let mut db = Database::new();

    writeln!(output, "Quartz SQL in-memory engine. Type exit to quit.")?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line == "exit" {
            debug!("session closed by exit");
            break;
        }

        match run_statement(&mut db, &line) {
            Ok(Some(table)) => writeln!(output, "{table}")?,
            Ok(None) => {}
            Err(error) => writeln!(output, "{error}")?,
        }

        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    Ok(())
}
