use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tnfa_core::postfix::render;
use tnfa_core::{Regex, StateSet, compile_debug};

#[derive(Parser)]
#[command(name = "tnfa")]
#[command(about = "tnfa - compile regexes to Thompson NFAs and test input against them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test a regex pattern against input
    Test {
        /// The regex pattern
        pattern: String,
        /// The input string to test
        input: String,
        /// Show the postfix form, transition table and state sets
        #[arg(short, long)]
        verbose: bool,
    },
    /// Check if pattern matches, exiting 0 on accept and 1 otherwise
    Match {
        /// The regex pattern
        pattern: String,
        /// The input string
        input: String,
    },
    /// Print the postfix form and transition table of a pattern
    Table {
        /// The regex pattern
        pattern: String,
    },
    /// Compile a pattern once, then test input lines until EOF or `exit`
    Repl {
        /// The regex pattern; read from stdin when neither this nor --file is given
        pattern: Option<String>,
        /// Read the pattern from the first line of a file
        #[arg(short, long, conflicts_with = "pattern")]
        file: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Test {
            pattern,
            input,
            verbose,
        } => cmd_test(&pattern, &input, verbose),
        Commands::Match { pattern, input } => cmd_match(&pattern, &input),
        Commands::Table { pattern } => cmd_table(&pattern),
        Commands::Repl { pattern, file } => cmd_repl(pattern, file.as_deref()),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}

fn compile_or_exit(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| fail(e))
}

fn format_set(states: &StateSet) -> String {
    let names: Vec<String> = states.iter().map(|s| format!("q{}", s)).collect();
    format!("{{{}}}", names.join(", "))
}

fn cmd_test(pattern: &str, input: &str, verbose: bool) {
    println!("{}", "Testing pattern...".bold());
    println!("  Pattern: {}", pattern.cyan());
    println!("  Input:   {}", input.yellow());
    println!();

    let regex = compile_or_exit(pattern);

    if verbose {
        println!("{}", "Postfix:".bold());
        println!("  {}", render(regex.postfix()));
        println!();
        println!("{}", "Transition table:".bold());
        for line in regex.nfa().to_string().lines() {
            println!("  {}", line);
        }
        println!();
        println!("{}", "State sets:".bold());
        let sets = regex.trace(input);
        println!("  start        {}", format_set(&sets[0]));
        for (c, set) in input.chars().zip(&sets[1..]) {
            println!("  after {:<6} {}", format!("{:?}", c), format_set(set));
        }
        println!();
    }

    if regex.is_match(input) {
        println!("{}", "✓ Accepted".green().bold());
    } else {
        println!("{}", "✗ Rejected".red());
    }
}

fn cmd_match(pattern: &str, input: &str) {
    let regex = compile_or_exit(pattern);

    if regex.is_match(input) {
        println!("{}", "true".green());
        std::process::exit(0);
    } else {
        println!("{}", "false".red());
        std::process::exit(1);
    }
}

fn cmd_table(pattern: &str) {
    match compile_debug(pattern) {
        Ok(result) => result.report(),
        Err(e) => fail(e),
    }
}

/// Read the pattern from `--file`, the positional argument, or a stdin prompt
fn read_pattern(pattern: Option<String>, file: Option<&Path>) -> io::Result<String> {
    if let Some(path) = file {
        debug!("reading pattern from {}", path.display());
        let contents = fs::read_to_string(path)?;
        return Ok(contents.lines().next().unwrap_or_default().to_string());
    }
    if let Some(pattern) = pattern {
        return Ok(pattern);
    }

    print!("Enter the regular expression: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn cmd_repl(pattern: Option<String>, file: Option<&Path>) {
    let pattern = read_pattern(pattern, file)
        .unwrap_or_else(|e| fail(format!("unable to read the pattern: {}", e)));

    let report = compile_debug(&pattern).unwrap_or_else(|e| fail(e));
    report.report();
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter the input string (exit to quit): ");
        if let Err(e) = io::stdout().flush() {
            fail(e);
        }

        let input = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => fail(e),
            None => break,
        };
        if input == "exit" {
            break;
        }

        if tnfa_core::matches(&report.nfa, &input) {
            println!("{}", "Accepted".green());
        } else {
            println!("{}", "Rejected".red());
        }
    }
}
