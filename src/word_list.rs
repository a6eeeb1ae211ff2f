//! The vocabulary: the read-only set of candidate words for a solve.
//!
//! Words are stored once and referred to everywhere else by `WordId`, their index in
//! `Vocabulary::words`. The list is deduplicated and sorted by (length, alphabetical) so that ids,
//! and therefore search order, are deterministic for a given input.
//!
//! The core treats words as opaque strings and never changes their case. The text loader
//! (`parse_from_str`/`load_from_path`) is the one place that normalizes input, to uppercase.

use std::collections::BTreeSet;
use std::path::Path;

use smallvec::SmallVec;

use crate::errors::{CrosswordError, Result};
use crate::MAX_SLOT_LENGTH;

/// An identifier for a given word, based on its index in the Vocabulary's `words` field.
pub type WordId = usize;

/// A struct representing a word that can be chosen for a given variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub chars: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let chars = string.chars().collect();
        Word { string, chars }
    }

    /// Length in characters, which is what a variable's length is measured against.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub words: Vec<Word>,
}

impl Vocabulary {
    /// Build a vocabulary from the given words as-is, dropping duplicates and empty strings.
    pub fn new<I, S>(words: I) -> Vocabulary
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> =
            words.into_iter().map(Into::into).filter(|word| !word.is_empty()).collect();

        let mut words: Vec<Word> = unique.into_iter().map(Word::new).collect();

        // `BTreeSet` already gives alphabetical order, and the sort is stable.
        words.sort_by_key(|word| word.len());

        Vocabulary { words }
    }

    /// Parse a word list with one word per line. Lines are trimmed, blank lines are skipped and
    /// every word is uppercased.
    pub fn parse_from_str(contents: &str) -> Vocabulary {
        Vocabulary::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_uppercase),
        )
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Vocabulary> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| CrosswordError::Io { path: path.to_path_buf(), source })?;

        Ok(Vocabulary::parse_from_str(&contents))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    pub fn word_id(&self, string: &str) -> Option<WordId> {
        self.words.iter().position(|word| word.string == string)
    }
}
