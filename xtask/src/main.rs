//! Workspace automation tasks.

use std::process::{Command, ExitCode, Stdio};

use clap::{Parser, Subcommand};

/// Workspace automation tasks.
#[derive(Parser)]
#[command(name = "xtask")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format code and run clippy with auto-fix.
    Tidy,
    /// Run all tests, including doctests.
    Test,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tidy => tidy(),
        Commands::Test => test(),
    }
}

fn run(description: &str, args: &[&str]) -> Result<bool, ExitCode> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();

    match status {
        Ok(status) => Ok(status.success()),
        Err(e) => {
            eprintln!("Failed to run {description}: {e}");
            Err(ExitCode::FAILURE)
        }
    }
}

fn tidy() -> ExitCode {
    println!("Formatting code...");
    match run("cargo fmt", &["fmt", "--all"]) {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("cargo fmt failed");
            return ExitCode::FAILURE;
        }
        Err(code) => return code,
    }

    println!("\nRunning clippy with auto-fix...");
    match run(
        "clippy",
        &[
            "clippy",
            "-q",
            "--fix",
            "--all",
            "--all-targets",
            "--allow-dirty",
            "--tests",
            "--examples",
        ],
    ) {
        Ok(true) => {
            println!("\nTidy complete!");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            eprintln!("clippy found issues");
            ExitCode::FAILURE
        }
        Err(code) => code,
    }
}

fn test() -> ExitCode {
    println!("Running tests...");
    match run("cargo test", &["test", "--all"]) {
        Ok(true) => {
            println!("\nAll tests passed!");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            eprintln!("Tests failed");
            ExitCode::FAILURE
        }
        Err(code) => code,
    }
}
