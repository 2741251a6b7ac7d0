//! Ask before touching the database.
//!

use std::io::{BufRead, Write};

use eyre::Result;

/// Ask `question` until we get a clear y/Y/n/N.  End of input is a no.
///
pub fn confirm<R, W>(input: &mut R, output: &mut W, question: &str) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{} [y/n] ", question)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        match line.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => continue,
        }
    }
}
