use ratatui::crossterm::style::{Color, Stylize};
use std::io::{self, Write};

use crate::api::LookupError;

/// Line-oriented console writer. Colour can be switched off for pipes and tests.
pub struct Console<W> {
    out: W,
    colored: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Console { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.colored {
            write!(self.out, "{}", text.with(color))
        } else {
            write!(self.out, "{}", text)
        }
    }

    fn line(&mut self, text: &str, color: Color) -> io::Result<()> {
        self.paint(text, color)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Question text, left on the same line as the answer.
    pub fn prompt(&mut self, question: &str) -> io::Result<()> {
        self.paint(question, Color::Cyan)?;
        self.out.flush()
    }

    pub fn loading(&mut self) -> io::Result<()> {
        self.line("\nChargement...", Color::Yellow)
    }

    pub fn invalid_count(&mut self) -> io::Result<()> {
        self.line("Pas de nom négatif ou nul", Color::Red)
    }

    pub fn lookup_failed(&mut self, err: &LookupError) -> io::Result<()> {
        self.line(&err.to_string(), Color::Red)
    }

    /// Header plus one numbered line per name, or the empty-result notice.
    pub fn places(&mut self, country: &str, names: &[String]) -> io::Result<()> {
        if names.is_empty() {
            return self.line("\nRien à afficher...", Color::Red);
        }

        self.line(
            &format!("\nGénéré(s) ({}) pour {} :", names.len(), country),
            Color::Green,
        )?;
        for (index, name) in names.iter().enumerate() {
            self.line(&format!("{}. {}", index + 1, name), Color::Blue)?;
        }
        Ok(())
    }
}
