//! Small line-oriented string puzzles behind a shell-like command runner.
//!
//! Each puzzle reads a count followed by that many short lines and answers with a
//! single linear pass per line:
//!
//! - `group-words` counts the words in which every letter forms one contiguous run.
//! - `repeat` repeats every character of a string `R` times in place.
//!
//! The main entry point is [`Interpreter`], which executes commands by name with
//! arguments using a set of pluggable factories. The puzzle logic itself lives in
//! [`group_word`] and [`repeat`], and can be used without the runner.

mod builtin;
pub mod command;
pub mod env;
pub mod group_word;
pub mod input;
mod interpreter;
pub mod repeat;

/// Just a convenient re-export of the command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
