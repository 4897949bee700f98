use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::group_word::{self, CheckOptions, GroupWordAlgorithm};
use crate::input::LineReader;
use crate::interpreter::Factory;
use crate::repeat;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::{BufRead, Write};
use tracing::info;

/// Built-in commands known to the interpreter at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "repeat".
    fn name() -> &'static str;

    /// Executes the command using provided IO streams and environment.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(
        self,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match T::execute(*self, stdin, stdout, env) {
            Ok(x) => Ok(x),
            Err(e) => {
                eprintln!("{}: {:#}", T::name(), e);
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        if self.is_error {
            eprintln!("{}", self.output);
            Ok(1)
        } else {
            writeln!(stdout, "{}", self.output)?;
            Ok(0)
        }
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Count the group words: words in which every letter appears in one contiguous run.
/// Reads a count N and then N words, one per line, unless words are given as arguments.
pub struct GroupWords {
    #[argh(option, short = 'a')]
    /// checking algorithm, "scan" or "single-pass". Defaults to $PUZZLES_GROUP_ALGORITHM, then "scan".
    pub algorithm: Option<GroupWordAlgorithm>,

    #[argh(switch)]
    /// skip the count bounds, alphabet, length and duplicate checks.
    pub lenient: bool,

    #[argh(positional, greedy)]
    /// words to check instead of reading standard input.
    pub words: Vec<String>,
}

impl GroupWords {
    fn options(&self, env: &Environment) -> Result<CheckOptions> {
        let algorithm = match self.algorithm {
            Some(a) => a,
            None => env.group_algorithm()?,
        };
        Ok(CheckOptions {
            algorithm,
            lenient: self.lenient || env.lenient(),
        })
    }
}

impl BuiltinCommand for GroupWords {
    fn name() -> &'static str {
        "group-words"
    }

    fn execute(
        self,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let options = self.options(env)?;
        let count = if self.words.is_empty() {
            group_word::count_from_lines(&mut LineReader::new(stdin), options)?
        } else {
            group_word::count_words(&self.words, options)?
        };
        info!(
            total = count.total(),
            group_words = count.value(),
            algorithm = %options.algorithm,
            "counted group words"
        );
        writeln!(stdout, "{}", count.value())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Repeat every character of a string R times.
/// Reads a count T and then T lines of "R S" unless R S pairs are given as arguments.
pub struct Repeat {
    #[argh(switch)]
    /// skip the count bounds, repeat factor range and QR alphabet checks.
    pub lenient: bool,

    #[argh(positional, greedy)]
    /// repeat factor and string pairs to expand instead of reading standard input.
    pub pairs: Vec<String>,
}

impl BuiltinCommand for Repeat {
    fn name() -> &'static str {
        "repeat"
    }

    fn execute(
        self,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let lenient = self.lenient || env.lenient();
        let written = if self.pairs.is_empty() {
            repeat::expand_lines(&mut LineReader::new(stdin), stdout, lenient)?
        } else {
            repeat::expand_pairs(&self.pairs, stdout, lenient)?
        };
        info!(lines = written, lenient, "expanded repeat specs");
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Leave the interactive session.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        env.should_exit = true;
        Ok(0)
    }
}
