use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for newton-display")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Run tests
    Test {
        /// Run doc tests only
        #[arg(long)]
        doc: bool,
        /// Limit unit tests to these library modules
        #[arg(short, long, value_enum)]
        module: Vec<Module>,
    },
    /// Run benchmarks
    Bench,
    /// Run the display window with the demo core
    Demo {
        /// Test pattern (ramp, checkerboard, sweep, sleep)
        #[arg(short, long, default_value = "ramp")]
        pattern: String,
        /// Number of frames to publish before the core stops
        #[arg(short = 'n', long)]
        frames: Option<u64>,
        /// Rotate the panel a quarter turn
        #[arg(long)]
        rotate: bool,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
}

/// Library modules with their own unit tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Module {
    Display,
    Ffi,
    Config,
    Demo,
}

impl Module {
    fn path(self) -> &'static str {
        match self {
            Module::Display => "display::",
            Module::Ffi => "ffi::",
            Module::Config => "config::",
            Module::Demo => "demo::",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Test { doc, module } => run_test(doc, &module),
        Commands::Bench => cargo(&["bench"]),
        Commands::Demo {
            pattern,
            frames,
            rotate,
            release,
        } => run_demo(&pattern, frames, rotate, release),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Test", || run_test(false, &[]), verbose)?;

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    if check {
        cargo(&["fmt", "--all", "--", "--check"])
    } else {
        cargo(&["fmt", "--all"])
    }
}

fn run_clippy(fix: bool) -> Result<()> {
    if fix {
        cargo(&["clippy", "--workspace", "--all-targets", "--fix"])
    } else {
        cargo(&[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ])
    }
}

fn run_test(doc: bool, modules: &[Module]) -> Result<()> {
    if doc {
        return cargo(&["test", "--doc"]);
    }

    if modules.is_empty() {
        return cargo(&["test"]);
    }

    let mut failed = Vec::new();

    for module in modules {
        println!("{} Running {:?} tests...", "→".blue(), module);

        match cargo(&["test", "--lib", module.path()]) {
            Ok(()) => println!("{} {:?} tests passed\n", "✓".green(), module),
            Err(_) => {
                println!("{} {:?} tests failed\n", "✗".red(), module);
                failed.push(*module);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Tests failed in: {:?}", failed)
    }
}

fn run_demo(pattern: &str, frames: Option<u64>, rotate: bool, release: bool) -> Result<()> {
    println!("{}", "=== Display Demo ===".bold().blue());
    println!("{} Pattern: {}", "→".blue(), pattern.cyan());
    println!(
        "{} Frames: {}",
        "→".blue(),
        frames.map_or_else(|| "until closed".to_string(), |n| n.to_string())
    );
    println!();

    let frames = frames.map(|n| n.to_string());
    let mut args = vec!["run", "--bin", "newton-display"];
    if release {
        args.push("--release");
    }
    args.extend(["--", "--pattern", pattern]);

    if let Some(n) = &frames {
        args.extend(["-n", n.as_str()]);
    }
    if rotate {
        args.push("--rotate");
    }

    cargo(&args)
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", elapsed.as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed with exit code: {}", args.join(" "), status);
    }

    Ok(())
}
