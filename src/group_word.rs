//! Group word checker.
//!
//! A group word is a word in which every character occurs in a single
//! contiguous run: `ccazzzzbb` and `kin` are group words, `aabbbccb` is not
//! because `b` shows up again after the `cc` run.

use crate::input::{self, InputError, InvalidInput, LineReader};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Longest word accepted in strict mode.
pub const MAX_WORD_LEN: usize = 100;

/// Allowed number of words in strict mode.
pub const WORD_COUNT: std::ops::RangeInclusive<usize> = 1..=100;

/// How the group word predicate is evaluated. Both give identical verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupWordAlgorithm {
    /// At every run boundary, look for the closing character in the rest of the word.
    #[default]
    SuffixScan,
    /// Remember which runs have closed; a character reopening one rejects the word.
    SinglePass,
}

impl FromStr for GroupWordAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "scan" => Ok(Self::SuffixScan),
            "single-pass" => Ok(Self::SinglePass),
            other => Err(format!(
                "unknown algorithm {other:?}, expected \"scan\" or \"single-pass\""
            )),
        }
    }
}

impl fmt::Display for GroupWordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SuffixScan => "scan",
            Self::SinglePass => "single-pass",
        })
    }
}

/// A single input word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    /// Validated word: 1 to [`MAX_WORD_LEN`] lowercase ASCII letters.
    pub fn new(text: &str) -> Result<Self, InvalidInput> {
        if text.is_empty() {
            return Err(InvalidInput::EmptyWord);
        }
        if let Some(ch) = text.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(InvalidInput::NotLowercase { ch });
        }
        if text.len() > MAX_WORD_LEN {
            return Err(InvalidInput::WordTooLong {
                len: text.len(),
                max: MAX_WORD_LEN,
            });
        }
        Ok(Self(text.to_owned()))
    }

    /// Any non-empty text, with no alphabet or length checks.
    pub fn lenient(text: &str) -> Result<Self, InvalidInput> {
        if text.is_empty() {
            return Err(InvalidInput::EmptyWord);
        }
        Ok(Self(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_group_word(&self, algorithm: GroupWordAlgorithm) -> bool {
        match algorithm {
            GroupWordAlgorithm::SuffixScan => is_group_word(&self.0),
            GroupWordAlgorithm::SinglePass => is_group_word_single_pass(&self.0),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks every run boundary `(j, j + 1)`: if the character at `j` appears
/// anywhere from `j + 1` on, it has a second run.
pub fn is_group_word(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    for j in 0..chars.len().saturating_sub(1) {
        if chars[j] != chars[j + 1] && chars[j + 1..].contains(&chars[j]) {
            return false;
        }
    }
    true
}

/// Linear variant of [`is_group_word`].
pub fn is_group_word_single_pass(word: &str) -> bool {
    let mut closed = HashSet::new();
    let mut current: Option<char> = None;
    for ch in word.chars() {
        if current == Some(ch) {
            continue;
        }
        if closed.contains(&ch) {
            return false;
        }
        if let Some(prev) = current {
            closed.insert(prev);
        }
        current = Some(ch);
    }
    true
}

/// Number of group words among the `total` words read so far.
///
/// Starts at `total` and is decremented for every rejected word, so once all
/// words are recorded [`value`](Self::value) is the number of group words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupWordCount {
    total: usize,
    processed: usize,
    rejected: usize,
}

impl GroupWordCount {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            rejected: 0,
        }
    }

    pub fn record(&mut self, is_group_word: bool) {
        self.processed += 1;
        if !is_group_word {
            self.rejected += 1;
        }
    }

    /// `total` minus the words rejected so far.
    pub fn value(&self) -> usize {
        self.total - self.rejected
    }

    /// Group words among the words processed so far.
    pub fn running(&self) -> usize {
        self.processed - self.rejected
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// Options shared by the stream and inline entry points.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    pub algorithm: GroupWordAlgorithm,
    pub lenient: bool,
}

/// Reads `N` and then `N` words, counting the group words.
///
/// In strict mode the count must be in [`WORD_COUNT`] and words must be
/// distinct lowercase words. Lines after the `N`-th word are not read.
pub fn count_from_lines(
    reader: &mut LineReader<'_>,
    options: CheckOptions,
) -> Result<GroupWordCount, InputError> {
    let bounds = (!options.lenient).then_some(WORD_COUNT);
    let total = reader.read_count(bounds)?;
    let mut checker = Checker::new(total, options);
    for _ in 0..total {
        let line = reader.expect_line("a word")?;
        checker.check(line.trim()).map_err(|e| reader.invalid(e))?;
    }
    Ok(checker.count)
}

/// Counts the group words among `words` directly, with no count line.
///
/// Strict mode applies [`WORD_COUNT`] to the number of words.
pub fn count_words<S: AsRef<str>>(
    words: &[S],
    options: CheckOptions,
) -> Result<GroupWordCount, InputError> {
    input::check_argument_count(words.len(), (!options.lenient).then_some(WORD_COUNT))?;
    let mut checker = Checker::new(words.len(), options);
    for (i, word) in words.iter().enumerate() {
        checker
            .check(word.as_ref())
            .map_err(|source| InputError::Argument {
                index: i + 1,
                source,
            })?;
    }
    Ok(checker.count)
}

struct Checker {
    options: CheckOptions,
    count: GroupWordCount,
    seen: HashSet<Word>,
}

impl Checker {
    fn new(total: usize, options: CheckOptions) -> Self {
        Self {
            options,
            count: GroupWordCount::new(total),
            seen: HashSet::new(),
        }
    }

    fn check(&mut self, text: &str) -> Result<(), InvalidInput> {
        let word = if self.options.lenient {
            Word::lenient(text)?
        } else {
            let word = Word::new(text)?;
            if !self.seen.insert(word.clone()) {
                return Err(InvalidInput::DuplicateWord { word: word.0 });
            }
            word
        };
        let verdict = word.is_group_word(self.options.algorithm);
        debug!(%word, verdict, algorithm = %self.options.algorithm, "checked word");
        self.count.record(verdict);
        Ok(())
    }
}
