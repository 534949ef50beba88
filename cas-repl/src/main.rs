mod command;
mod error;

use cas_math::algebra::simplify::{Simplifier, SimplifyOptions};
use clap::{Parser, ValueEnum};
use command::{Command, Session};
use env_logger::Env;
use log::{debug, LevelFilter};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, path::PathBuf, process::ExitCode};

/// Simplify, differentiate, and rewrite algebraic expressions.
///
/// Each line of input is one command. Run `help` to list the commands.
#[derive(Parser)]
#[command(name = "cas-repl", version)]
struct Args {
    /// File to read commands from. If omitted, commands are read from stdin, or interactively if
    /// stdin is a terminal.
    file: Option<PathBuf>,

    /// Print the simplification steps applied to each result.
    #[arg(long)]
    steps: bool,

    /// Maximum number of simplification passes to apply to each expression.
    #[arg(long, default_value_t = SimplifyOptions::default().max_passes)]
    max_passes: usize,

    /// Set the log level.
    #[arg(long, value_enum, env = "CAS_LOG")]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Parses and runs a single line of input, printing the output or the error.
fn run_line(session: &Session, input: &str) {
    match Command::parse(input).and_then(|command| session.execute(&command)) {
        Ok(output) => println!("{}", output),
        Err(err) => err.report_to_stderr(input),
    }
}

/// Runs every non-empty line of the input.
fn run_batch(session: &Session, input: &str) {
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        debug!("running `{}`", line);
        run_line(session, line);
    }
}

/// Runs the interactive mode until the user exits.
fn run_repl(session: &Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, session: &Session) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        run_line(session, &input);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, session) {
            return match err {
                ReadlineError::Eof | ReadlineError::Interrupted => Ok(()),
                err => Err(err),
            };
        }
    }
}

/// Reads the whole batch input from the given file, or from stdin.
fn read_input(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = args.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    let session = Session {
        simplifier: Simplifier::new(SimplifyOptions { max_passes: args.max_passes }),
        show_steps: args.steps,
    };

    if args.file.is_some() || !io::stdin().is_terminal() {
        match read_input(args.file.as_ref()) {
            Ok(input) => run_batch(&session, &input),
            Err(err) => {
                eprintln!("error: could not read the input: {}", err);
                return ExitCode::FAILURE;
            },
        }
    } else if let Err(err) = run_repl(&session) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
