//! Latch interpreter command-line.
//!
//! When called without argument it drops into an interactive
//! read-evaluate-print loop.
//!
//! When called with arguments, it interprets the corresponding files in a
//! single interpreter session (so code and data sharing is possible).

use std::env;
use std::fs;

use anyhow::{self, Context};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rlatch::interpreter::Interpreter;

fn main() -> Result<(), anyhow::Error> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    if !args.is_empty() {
        run_all_files(args)?;
    } else {
        run_prompt()?;
    }
    Ok(())
}

fn run_all_files(paths: Vec<String>) -> Result<(), anyhow::Error> {
    let mut interp = Interpreter::new();

    for p in &paths {
        let source =
            fs::read_to_string(p).with_context(|| format!("failed to open {}", p))?;
        interp.eval(&source)?;
    }

    Ok(())
}

fn run_prompt() -> Result<(), anyhow::Error> {
    let mut rl = DefaultEditor::new()?;
    let mut interp = Interpreter::new();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match interp.eval(&line) {
                    Ok(value) => println!("{}", value),
                    Err(e) => println!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
