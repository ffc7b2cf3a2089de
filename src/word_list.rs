//! Word list collaborators
//!
//! The dictionary rule only needs one operation from its word list:
//! a fallible membership test. [`MemoryWordList`] is the in-memory
//! implementation; spell-checker or remote adapters implement [`WordList`]
//! themselves and surface their failures through [`BackingStoreError`].

use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a word list's backing store (file, spell-checker backend,
/// remote service). Never to be read as "word not found".
#[derive(Error, Debug)]
#[error("Word list backing store failure: {0}")]
pub struct BackingStoreError(#[source] Box<dyn Error + Send + Sync>);

impl BackingStoreError {
    pub fn new(cause: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        BackingStoreError(cause.into())
    }
}

/// A set of forbidden words, queried one candidate at a time.
pub trait WordList: Send + Sync {
    /// Checks membership of `word`, case-insensitively.
    ///
    /// # Errors
    /// Returns [`BackingStoreError`] when the backing store fails; callers
    /// must propagate it rather than treat it as a miss.
    fn contains(&self, word: &str) -> Result<bool, BackingStoreError>;
}

#[derive(Error, Debug)]
pub enum WordListError {
    #[error("Word list file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read word list file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Word list file is empty")]
    EmptyFile,
}

/// Returns the default word list file path.
///
/// Priority:
/// 1. Environment variable `PWD_WORDLIST_PATH`
/// 2. Default path `./assets/wordlist.txt`
pub fn get_word_list_path() -> PathBuf {
    std::env::var("PWD_WORDLIST_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./assets/wordlist.txt"))
}

/// In-memory word list backed by a case-insensitive `HashSet`.
#[derive(Debug, Clone)]
pub struct MemoryWordList {
    words: HashSet<String>,
}

impl MemoryWordList {
    /// Builds a word list from the given words (lowercased on insert).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        MemoryWordList { words }
    }

    /// Loads a word list from a newline-delimited file.
    ///
    /// Lines are trimmed and lowercased; blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File is empty
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, WordListError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Word list load FAILED: FileNotFound {:?}", path);
            return Err(WordListError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Word list load FAILED: Empty file {:?}", path);
            return Err(WordListError::EmptyFile);
        }

        let list = Self::from_words(content.lines());

        #[cfg(feature = "tracing")]
        tracing::info!("Word list loaded: {} words from {:?}", list.len(), path);

        Ok(list)
    }

    /// Loads the word list from the default path (see [`get_word_list_path`]).
    pub fn from_default_path() -> Result<Self, WordListError> {
        Self::from_path(get_word_list_path())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordList for MemoryWordList {
    fn contains(&self, word: &str) -> Result<bool, BackingStoreError> {
        Ok(self.words.contains(&word.to_lowercase()))
    }
}
