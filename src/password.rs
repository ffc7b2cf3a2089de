//! The password under evaluation.

use chrono::NaiveDate;
use secrecy::SecretString;

/// One piece of personal data an attacker could guess: a free-form string
/// (name, username, pet) or a date (birthday, anniversary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessableData {
    Text(String),
    Date(NaiveDate),
}

impl From<&str> for GuessableData {
    fn from(s: &str) -> Self {
        GuessableData::Text(s.to_string())
    }
}

impl From<String> for GuessableData {
    fn from(s: String) -> Self {
        GuessableData::Text(s)
    }
}

impl From<NaiveDate> for GuessableData {
    fn from(d: NaiveDate) -> Self {
        GuessableData::Date(d)
    }
}

/// A password plus the personal data attached to it. The secret is only
/// exposed inside rule evaluation.
pub struct Password {
    secret: SecretString,
    guessable: Vec<GuessableData>,
}

impl Password {
    pub fn new(secret: SecretString) -> Self {
        Password {
            secret,
            guessable: Vec::new(),
        }
    }

    /// Convenience constructor from a plain string.
    pub fn from_plain(password: impl Into<String>) -> Self {
        Self::new(SecretString::new(password.into().into()))
    }

    /// Attaches one guessable data item to this password.
    pub fn with_guessable(mut self, data: impl Into<GuessableData>) -> Self {
        self.guessable.push(data.into());
        self
    }

    /// Personal data attached to this password instance.
    pub fn guessable(&self) -> &[GuessableData] {
        &self.guessable
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }
}
