//! Terminal line mode.
//!
//! Reads a line, hands it to the dispatcher, repeats. Printing is silent;
//! only errors and non-printing replies (like `help`) are echoed back.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::dispatch::Dispatcher;

pub const BANNER: &str = "\
+--------------------------------------+
|        Thermal Typer                 |
|--------------------------------------|
|  type    ->  prints                  |
|  !name   ->  shortcut                |
|  cut     ->  cut paper               |
|  help    ->  list shortcuts          |
|  exit    ->  quit                    |
+--------------------------------------+
";

const PROMPT: &str = "> ";

/// Run the prompt loop until `exit`/`quit` or end of input.
pub fn run_line_mode<R, W>(dispatcher: &Dispatcher, input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", BANNER)?;
    writeln!(output, "Press Enter to print each line.")?;
    writeln!(output)?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            writeln!(output, "Exiting.")?;
            return Ok(());
        };
        let line = line?;

        let result = dispatcher.dispatch(&line);
        debug!(printed = result.printed, error = result.error, "line dispatched");

        if result.is_exit {
            writeln!(output, "Goodbye!")?;
            return Ok(());
        }

        if result.error || (!result.printed && !result.message.is_empty()) {
            for message_line in result.message.lines() {
                writeln!(output, "  {}", message_line)?;
            }
        }
    }
}
