//! Line-structured puzzle input.
//!
//! Every puzzle reads the same shape of input: a count on the first line, then
//! that many item lines. [`LineReader`] tracks line numbers so that errors can
//! point at the offending line.

use std::io::BufRead;
use std::ops::RangeInclusive;

/// Why a single value was rejected, independent of where it came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("empty word")]
    EmptyWord,

    #[error("word is {len} characters long, at most {max} allowed")]
    WordTooLong { len: usize, max: usize },

    #[error("character {ch:?} is not a lowercase letter")]
    NotLowercase { ch: char },

    #[error("duplicate word {word:?}")]
    DuplicateWord { word: String },

    #[error("expected \"R S\", got {text:?}")]
    MalformedRepeatLine { text: String },

    #[error("repeat factor {value} outside {min}..={max}")]
    RepeatFactorOutOfRange { value: String, min: usize, max: usize },

    #[error("text is {len} characters long, at most {max} allowed")]
    RepeatTextTooLong { len: usize, max: usize },

    #[error("character {ch:?} is not QR alphanumeric")]
    OutsideAlphabet { ch: char },
}

/// Errors raised while reading a puzzle's input stream.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEnd { line: usize, expected: &'static str },

    #[error("line {line}: {text:?} is not a count")]
    InvalidCount { line: usize, text: String },

    #[error("line {line}: count {value} outside {min}..={max}")]
    CountOutOfRange {
        line: usize,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("line {line}: {source}")]
    Invalid {
        line: usize,
        #[source]
        source: InvalidInput,
    },

    #[error("{value} items given, expected {min}..={max}")]
    ArgumentCount { value: usize, min: usize, max: usize },

    #[error("argument {index}: {source}")]
    Argument {
        index: usize,
        #[source]
        source: InvalidInput,
    },
}

/// Applies the count bounds to items given as arguments instead of a count line.
pub fn check_argument_count(
    value: usize,
    bounds: Option<RangeInclusive<usize>>,
) -> Result<(), InputError> {
    match bounds {
        Some(bounds) if !bounds.contains(&value) => Err(InputError::ArgumentCount {
            value,
            min: *bounds.start(),
            max: *bounds.end(),
        }),
        _ => Ok(()),
    }
}

/// Reads input one line at a time, stripping line terminators.
pub struct LineReader<'a> {
    inner: &'a mut dyn BufRead,
    line: usize,
}

impl<'a> LineReader<'a> {
    pub fn new(inner: &'a mut dyn BufRead) -> Self {
        Self { inner, line: 0 }
    }

    /// 1-based number of the last line returned, 0 before the first read.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Next line without its `\n` / `\r\n` terminator, `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>, InputError> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// Like [`next_line`](Self::next_line) but running out of input is an error.
    pub fn expect_line(&mut self, expected: &'static str) -> Result<String, InputError> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(InputError::UnexpectedEnd {
                line: self.line + 1,
                expected,
            }),
        }
    }

    /// Reads the item count line, checking it against `bounds` when given.
    pub fn read_count(
        &mut self,
        bounds: Option<RangeInclusive<usize>>,
    ) -> Result<usize, InputError> {
        let text = self.expect_line("a count")?;
        let value: usize = text.trim().parse().map_err(|_| InputError::InvalidCount {
            line: self.line,
            text: text.clone(),
        })?;
        if let Some(bounds) = bounds {
            if !bounds.contains(&value) {
                return Err(InputError::CountOutOfRange {
                    line: self.line,
                    value,
                    min: *bounds.start(),
                    max: *bounds.end(),
                });
            }
        }
        Ok(value)
    }

    /// Attaches the current line number to a value-level rejection.
    pub fn invalid(&self, source: InvalidInput) -> InputError {
        InputError::Invalid {
            line: self.line,
            source,
        }
    }
}
