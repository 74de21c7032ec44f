mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::path::PathBuf;

use clap::Parser;
use mini_core::{
    eval::{run_file, Evaluator},
    parser::prelude::parse_program,
    utils::prelude::Error
};

#[derive(Parser)]
enum Command {
    /// Parses and evaluates a source file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print ast instead of running the program
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    match Command::parse() {
        Command::Run { path, print_ast } => {
            let buf_writer = cli::stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            cli::print_running(path.to_str().unwrap());
            let start = std::time::Instant::now();

            let result = if print_ast {
                print_file_ast(path)
            } else {
                let mut evaluator = Evaluator::new();

                run_file(path, &mut evaluator).map(|_| ())
            };

            if let Err(err) = result {
                err.pretty(&mut buf);
                buf_writer
                    .print(&buf)
                    .expect("Writing error to stderr");
            }

            cli::print_finished(std::time::Instant::now() - start);
        },
        Command::Repl => {
            let _ = repl::start();
        },
        Command::Rlpl => {
            let _ = rlpl::start();
        },
        Command::Rppl => {
            let _ = rppl::start();
        }
    }
}

fn print_file_ast(path: PathBuf) -> Result<(), Error> {
    let src = std::fs::read_to_string(path.clone())
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let program = parse_program(&src)
        .map_err(|error| Error::Parse { path, src, error })?;

    println!("{:#?}", program);

    Ok(())
}
