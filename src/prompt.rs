use std::io::{self, BufRead, Write};
use std::num::NonZeroU64;
use thiserror::Error;

use crate::render::Console;

const COUNTRY_QUESTION: &str =
    "Entrez le code du pays par exemple JP pour Japon, FR pour France, etc.. : ";
const COUNT_QUESTION: &str = "Combien de noms voulez-vous générer ? : ";
const USERNAME_QUESTION: &str =
    "Entrez votre nom d'utilisateur GeoNames (Tu dois créer ton compte) : ";

/// The three answers of one run, trimmed but otherwise as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInput {
    pub country: String,
    pub count: String,
    pub username: String,
}

/// Owns the interactive input stream for the duration of a run.
pub struct Prompter<R> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Prompter { input }
    }

    /// Ask one question and return the trimmed answer. End of input reads as "",
    /// bytes that are not UTF-8 become U+FFFD.
    pub fn ask<W: Write>(&mut self, console: &mut Console<W>, question: &str) -> io::Result<String> {
        console.prompt(question)?;
        let mut answer = Vec::new();
        self.input.read_until(b'\n', &mut answer)?;
        Ok(String::from_utf8_lossy(&answer).trim().to_string())
    }

    /// Country, count, then username unless one was given up front.
    pub fn collect<W: Write>(
        &mut self,
        console: &mut Console<W>,
        preset_username: Option<&str>,
    ) -> io::Result<SessionInput> {
        let country = self.ask(console, COUNTRY_QUESTION)?;
        let count = self.ask(console, COUNT_QUESTION)?;
        let username = match preset_username {
            Some(name) => name.to_string(),
            None => self.ask(console, USERNAME_QUESTION)?,
        };

        Ok(SessionInput {
            country,
            count,
            username,
        })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CountError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("count must be greater than zero")]
    NotPositive,
}

/// Read a leading base-10 integer, ignoring whatever follows the digits
/// ("3 villes" is 3). Only strictly positive values pass; digit runs past
/// `u64::MAX` are clamped to it.
pub fn parse_count(text: &str) -> Result<NonZeroU64, CountError> {
    let text = text.trim();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(CountError::NotANumber(text.to_string()));
    }
    if negative {
        return Err(CountError::NotPositive);
    }

    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    NonZeroU64::new(value).ok_or(CountError::NotPositive)
}
