use crate::env::Environment;
use anyhow::Result;
use std::io::{BufRead, Write};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Commands return 1 when they reject their input or their arguments.
pub type ExitCode = i32;

/// Object-safe trait for any command that can be executed by the interpreter.
///
/// Built-in puzzles get it through a blanket impl over [`FromArgs`](argh::FromArgs)
/// types; argument errors get it through a small adapter that replays argh's output.
pub trait ExecutableCommand {
    /// Executes the command, reading puzzle input from `stdin` and writing answers to `stdout`.
    fn execute(
        self: Box<Self>,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
