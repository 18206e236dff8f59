use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;
use virtis_lang::compiler::evaluator::{Echo, StdoutOutput};
use virtis_lang::Interpreter;

#[derive(ClapParser, Debug)]
#[clap(name = "virtis", author, version, about, long_about = None)]
pub struct Config {
    #[clap(short, long, help = "Source file to run; starts the shell when omitted")]
    pub file: Option<PathBuf>,

    #[clap(long, help = "Print the syntax tree before running a file")]
    pub tree: bool,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

fn main() -> ExitCode {
    let config: Config = Config::parse();

    let default_level = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut interpreter = match Interpreter::new() {
        Ok(interpreter) => interpreter,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    match &config.file {
        Some(path) => run_file(&mut interpreter, path, config.tree),
        None => match shell(&mut interpreter) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("IO error: {}", err);
                ExitCode::FAILURE
            },
        },
    }
}

fn run_file(interpreter: &mut Interpreter, path: &Path, print_tree: bool) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Cannot read {}: {}", path.to_string_lossy(), err);
            return ExitCode::FAILURE;
        },
    };

    let program = match virtis_lang::parse(&source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("[{}] {}", path.to_string_lossy(), err);
            return ExitCode::FAILURE;
        },
    };

    if print_tree {
        println!("Tree:\n{:#?}\n", program);
    }

    match interpreter.evaluate(&program, &mut StdoutOutput, Echo::Statements) {
        Ok(result) => {
            println!("\nResult: {}", result);
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("[{}] {}", path.to_string_lossy(), err);
            ExitCode::FAILURE
        },
    }
}

fn shell(interpreter: &mut Interpreter) -> std::io::Result<()> {
    println!("Shell ~ Virtis v{}", env!("CARGO_PKG_VERSION"));

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        let input = line.trim();

        if input.is_empty() {
            continue;
        } else if input == "exit" {
            return Ok(());
        }

        let program = match virtis_lang::parse(input) {
            Ok(program) => program,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            },
        };

        println!("\nTree:\n{:#?}\n", program);

        match interpreter.evaluate(&program, &mut StdoutOutput, Echo::Suppressed) {
            Ok(result) => println!("Result: {}\n\n-----\n", result),
            Err(err) => eprintln!("{}", err),
        }
    }
}
