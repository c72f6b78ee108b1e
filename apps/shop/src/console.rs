//! # Console
//!
//! Line-oriented prompting over any reader/writer pair, plus the text blocks
//! the shop prints (aisle directory, shelf, welcome).
//!
//! ```text
//! *-*-*-*-*-*-*-*-*-*-* Aisles! *-*-*-*-*-*-*-*-*-*-*
//! 	 1.  Dairy Products!
//! 	 2.  Fruits!
//! *-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*-*
//! ```
//!
//! Input is read asynchronously so a waiting prompt never blocks the
//! runtime. Tests drive it with a byte slice for input and a `Vec<u8>` for
//! output.

use std::fmt::Display;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use grocer_core::session::SHELF_NUMBER_OFFSET;
use grocer_core::validation::parse_bounded_int;
use grocer_core::{AisleLayout, ShelfListing};

/// Banner text in the middle of the aisle directory.
const AISLE_BANNER: &str = " Aisles! ";

/// Nominal banner width the decorations are sized from.
const BANNER_WIDTH: usize = 30;

// =============================================================================
// Console
// =============================================================================

/// A prompt-and-answer console.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: AsyncBufRead + Unpin, W: Write> Console<R, W> {
    /// Wraps an input and an output stream.
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Prints one line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Prints an empty line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Shows `prompt` and reads one line without its line ending.
    ///
    /// Returns `None` once the input is exhausted.
    pub async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            // Keep the transcript readable when input is piped
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Asks until the answer is an integer within `min..=max`.
    ///
    /// Rejected answers are reported and the prompt is shown again. Returns
    /// `None` once the input is exhausted.
    pub async fn prompt_int(
        &mut self,
        prompt: &str,
        min: i64,
        max: i64,
    ) -> io::Result<Option<i64>> {
        loop {
            let Some(answer) = self.ask(prompt).await? else {
                return Ok(None);
            };

            match parse_bounded_int(&answer, min, max) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    self.say(format!(">>\t{}", e))?;
                    self.blank()?;
                }
            }
        }
    }

    /// Borrows the output stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Gives back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

// =============================================================================
// Text Blocks
// =============================================================================

/// `*-` repeated `pairs` times, closed with a final `*`.
pub fn decoration(pairs: usize) -> String {
    let mut line = "*-".repeat(pairs);
    line.push('*');
    line
}

/// The aisle directory with its decorated banner.
pub fn aisle_directory(layout: &AisleLayout) -> String {
    let per_side = (BANNER_WIDTH - AISLE_BANNER.len()) / 2;

    let mut out = format!(
        "{}{}{}\n",
        decoration(per_side),
        AISLE_BANNER,
        decoration(per_side)
    );
    for (number, description) in layout {
        out.push_str(&format!("\t {}.  {}\n", number, description));
    }
    out.push_str(&decoration(per_side * 2 + AISLE_BANNER.len() / 2));
    out
}

/// The numbered shelf, starting at 1.
pub fn shelf_listing(shelf: &[ShelfListing]) -> String {
    shelf
        .iter()
        .enumerate()
        .map(|(index, listing)| format!("{}   {}", index + SHELF_NUMBER_OFFSET, listing))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Greeting printed once at startup.
pub fn welcome(store_name: &str) -> String {
    format!("Welcome to {}!\nEnjoy the selection...", store_name)
}

// =============================================================================
// Unit Tests
// =============================================================================
