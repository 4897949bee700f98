use argh::FromArgs;
use string_puzzles::Interpreter;
use tracing::Level;

#[derive(FromArgs)]
/// Run a string puzzle, or start an interactive session when no command is given.
struct Cli {
    #[argh(switch, short = 'v')]
    /// log every checked item to standard error.
    verbose: bool,

    #[argh(positional, greedy)]
    /// command name followed by its arguments, e.g. `repeat 3 ABC`.
    command: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli: Cli = argh::from_env();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let mut interpreter = Interpreter::default();
    let Some((name, args)) = cli.command.split_first() else {
        interpreter.repl()?;
        return Ok(());
    };

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let code = interpreter.run(name, &args)?;
    std::process::exit(code);
}
