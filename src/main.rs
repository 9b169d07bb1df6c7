// marl - A small Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use marl_core::eval::DEBUG_EVAL;
use marl_core::{Env, MarlVal, Symbol, load_file, new_root_env, rep, set_argv, set_max_eval_depth};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "user> ";

/// Run a marl script, or start an interactive session when none is given.
#[derive(Parser, Debug)]
#[command(name = "marl", version, about)]
struct Cli {
    /// Print every form before it is evaluated
    #[arg(long)]
    debug_eval: bool,

    /// Maximum evaluation nesting depth
    #[arg(long, env = "MARL_MAX_DEPTH", default_value_t = marl_core::eval::DEFAULT_MAX_EVAL_DEPTH)]
    max_depth: usize,

    /// Script to run
    script: Option<PathBuf>,

    /// Arguments exposed to the script as *ARGV*
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let code = run(cli);
    process::exit(code);
}

/// Install the stderr log subscriber, filtered by `MARL_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("MARL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run(cli: Cli) -> i32 {
    set_max_eval_depth(cli.max_depth);
    let env = new_root_env();
    if cli.debug_eval {
        env.define(Symbol::new(DEBUG_EVAL), MarlVal::Bool(true));
    }

    match cli.script {
        Some(script) => run_script(&script, &cli.args, &env),
        None => {
            run_repl(&env);
            0
        }
    }
}

/// Evaluate a script file, returning the process exit status.
fn run_script(script: &Path, args: &[String], env: &Env) -> i32 {
    debug!(script = %script.display(), args = args.len(), "running script");
    set_argv(env, args);
    match load_file(script, env) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Run the interactive read-eval-print loop until end of input.
fn run_repl(env: &Env) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialise line editor: {}", e);
            return;
        }
    };

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    debug!(error = %e, "could not record history");
                }
                match rep(&line, env) {
                    Ok(output) => println!("{}", output),
                    Err(e) => println!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}
