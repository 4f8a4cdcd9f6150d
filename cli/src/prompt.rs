//! Line-oriented input for the interactive menu.
//!
//! Numeric and date prompts keep asking until the input parses. When input
//! runs out every prompt returns [`io::ErrorKind::UnexpectedEof`], which the
//! menu treats as the end of the session.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

const YES: &[&str] = &["s", "si", "sí", "y", "yes"];

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer the menu prints to.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `label` and reads one trimmed line. Bytes that are not UTF-8
    /// become U+FFFD.
    pub fn line(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(String::from_utf8_lossy(&buf).trim().to_string())
    }

    pub fn int(&mut self, label: &str) -> io::Result<i64> {
        loop {
            match self.line(label)?.parse() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "Enter a valid number")?,
            }
        }
    }

    /// Like [`int`](Self::int), but a blank answer means `0`.
    pub fn optional_int(&mut self, label: &str) -> io::Result<i64> {
        loop {
            let raw = self.line(label)?;
            if raw.is_empty() {
                return Ok(0);
            }
            match raw.parse() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "Enter a valid number")?,
            }
        }
    }

    pub fn float(&mut self, label: &str) -> io::Result<f64> {
        loop {
            match self.line(label)?.parse() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "Enter a valid number")?,
            }
        }
    }

    /// Reads a `YYYY-MM-DD` date.
    pub fn date(&mut self, label: &str) -> io::Result<NaiveDate> {
        loop {
            match NaiveDate::parse_from_str(&self.line(label)?, "%Y-%m-%d") {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "Invalid format, use YYYY-MM-DD")?,
            }
        }
    }

    /// Yes/no question; anything but an explicit yes is a no.
    pub fn confirm(&mut self, label: &str) -> io::Result<bool> {
        let answer = self.line(label)?.to_lowercase();
        Ok(YES.contains(&answer.as_str()))
    }
}
