use std::io::{self, Stdout, Write};

use colored::Colorize;
use supports_color::Stream;

use crate::terminal::{LineStyle, Response};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Where responses end up. Styling is only applied when the terminal is
/// known to support colors.
pub struct Console<W: Write> {
    out: W,
    colored: bool,
}

impl Console<Stdout> {
    pub fn stdout() -> Self {
        let colored = supports_color::on(Stream::Stdout).is_some();
        Self::new(io::stdout(), colored)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        if self.colored {
            write!(self.out, "{}", prompt.green().bold())?;
        } else {
            write!(self.out, "{prompt}")?;
        }
        self.out.flush()
    }

    pub fn write_response(&mut self, response: &Response) -> io::Result<()> {
        if response.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        for line in &response.lines {
            match (self.colored, line.style) {
                (false, _) | (true, LineStyle::Text) => writeln!(self.out, "{}", line.text)?,
                (true, LineStyle::Directory) => writeln!(self.out, "{}", line.text.blue().bold())?,
                (true, LineStyle::Error) => writeln!(self.out, "{}", line.text.red())?,
            }
        }
        self.out.flush()
    }
}
