use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride_core workspace",
    long_about = "A unified CLI for running the ride lifecycle demo, tests,\n\
                  benchmarks, and CI checks in the ride_core workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ride lifecycle demo (Alice rides with Bob)
    Demo {
        /// Log filter passed to the demo
        #[arg(long, env = "RUST_LOG", default_value = "info")]
        log: String,
    },
    /// Run the ride_core test suite
    Test,
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run the demo
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str], envs: &[(&str, &str)]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .envs(envs.iter().copied())
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    run_cargo_with_env(args, &[]);
}

fn run_cargo_with_env(args: &[&str], envs: &[(&str, &str)]) {
    let status = cargo(args, envs);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_demo(log: &str) {
    run_cargo_with_env(
        &["run", "-p", "ride_core", "--example", "ride_demo"],
        &[("RUST_LOG", log)],
    );
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test ride_core");
    run_cargo(&["test", "-p", "ride_core"]);
}

fn ci_examples() {
    step("Run ride_demo");
    run_demo("info");
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "ride_core", "--bench", "performance"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { log } => run_demo(&log),
        Commands::Test => {
            run_cargo(&["test", "-p", "ride_core"]);
        }
        Commands::Bench => {
            run_cargo(&["bench", "--package", "ride_core", "--bench", "performance"]);
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn demo_accepts_log_filter() {
        let cli = Cli::try_parse_from(["xtask", "demo", "--log", "ride_core=debug"])
            .expect("demo should parse");
        match cli.command {
            Commands::Demo { log } => assert_eq!(log, "ride_core=debug"),
            _ => panic!("expected demo command"),
        }
    }

    #[test]
    fn only_workspace_tasks_are_offered() {
        for name in ["demo", "test", "bench", "ci"] {
            assert!(
                Cli::command().find_subcommand(name).is_some(),
                "missing subcommand {name}"
            );
        }
        assert!(Cli::try_parse_from(["xtask", "bench-compare"]).is_err());
        assert!(Cli::try_parse_from(["xtask", "ci", "all"]).is_ok());
    }
}
