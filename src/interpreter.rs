use crate::command::{CommandFactory, ExitCode};
use crate::env::Environment;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{BufRead, Write};
use tracing::debug;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the builtin puzzle commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Runs puzzle commands by name.
///
/// The interpreter maintains an [`Environment`] and a list of [`CommandFactory`] objects
/// that are queried to create commands by name. See [`Default`] for the commands
/// included out of the box.
///
/// Example
/// ```
/// use string_puzzles::Interpreter;
/// let mut runner = Interpreter::default();
/// let mut out = Vec::new();
/// let code = runner
///     .run_with_io("repeat", &["3", "ABC"], &mut std::io::empty(), &mut out)
///     .unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(out, b"AAABBBCCC\n");
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
        }
    }

    /// Replace the captured process environment, e.g. to pin configuration in tests.
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Run a single command with the process' standard input and output.
    ///
    /// Returns the command's exit code or an error if the command cannot be created
    /// or fails to execute.
    pub fn run(&mut self, name: &str, args: &[&str]) -> anyhow::Result<ExitCode> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with_io(name, args, &mut stdin.lock(), &mut stdout.lock())
    }

    /// Run a single command against the given streams.
    pub fn run_with_io(
        &mut self,
        name: &str,
        args: &[&str],
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        debug!(name, ?args, "running command");
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, args) {
                let code = cmd.execute(stdin, stdout, &mut self.env)?;
                stdout.flush()?;
                return Ok(code);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Run one line of the interactive session: a command name followed by its arguments.
    ///
    /// Commands started this way see an empty standard input, so puzzles take their
    /// input from arguments. Blank lines succeed without doing anything.
    pub fn execute_line(&mut self, line: &str, stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((name, args)) = words.split_first() else {
            return Ok(0);
        };
        self.run_with_io(name, args, &mut std::io::empty(), stdout)
    }

    /// Read-Eval-Print Loop over [`execute_line`](Self::execute_line).
    ///
    /// Ends on `exit`, Ctrl-C or end of input.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.env.should_exit {
            match rl.readline("puzzles> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    let mut stdout = std::io::stdout();
                    match self.execute_line(&line, &mut stdout) {
                        Ok(code) => debug!(code, "command finished"),
                        Err(err) => eprintln!("{:#}", err),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// `group-words`, `repeat` and `exit`.
    fn default() -> Self {
        use crate::builtin::*;
        Self::new(vec![
            Box::new(Factory::<GroupWords>::default()),
            Box::new(Factory::<Repeat>::default()),
            Box::new(Factory::<Exit>::default()),
        ])
    }
}
