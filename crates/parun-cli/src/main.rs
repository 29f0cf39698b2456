//! parun CLI entry point.
//!
//! Usage:
//!   parun [--limitjobs n] [--pipe] [--halt-on-error] [--dry-run]
//!         [--argsfile argument-file] [cmd [fixed-args ...]]
//!         [::: per-task-args ...]

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use parun_cli::{commands, dry_run, sequential, settings};
use parun_engine::Engine;
use parun_types::{exit, EngineConfig};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // A bare per-task marker means zero commands: nothing to run.
    if args.len() == 1 && args[0] == ":::" {
        return Ok(ExitCode::from(exit::EMPTY_RUN));
    }

    let settings = match settings::parse(&args) {
        Ok(settings) => settings,
        Err(_) => {
            eprintln!("{}", settings::USAGE);
            return Ok(ExitCode::from(exit::USAGE));
        }
    };

    // The argument file must be readable before any mode runs.
    let args_reader = match &settings.args_file {
        Some(path) => match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(_) => {
                eprintln!("parun: Unable to read from file \"{}\"", path.display());
                return Ok(ExitCode::from(exit::BAD_ARGS_FILE));
            }
        },
        None => None,
    };

    if settings.sequential() {
        let rt = tokio::runtime::Runtime::new()?;
        let code = rt.block_on(async {
            install_interrupt_guard();
            let mut stdout = tokio::io::stdout();
            sequential::run(&settings, tokio::io::stdin(), &mut stdout).await
        })?;
        return Ok(ExitCode::from(code));
    }

    if settings.dry_run {
        let mut stdout = io::stdout();
        if !settings.tasks().is_empty() {
            dry_run::print_task_commands(&settings, &mut stdout)?;
        } else {
            match args_reader {
                Some(reader) => dry_run::print_line_commands(&settings, reader, &mut stdout)?,
                None => {
                    dry_run::print_line_commands(&settings, io::stdin().lock(), &mut stdout)?
                }
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let commands = match args_reader {
        Some(reader) => commands::from_lines(&settings, reader)?,
        None => commands::from_task_args(&settings),
    };
    tracing::debug!(commands = commands.len(), "generated command list");

    let config = EngineConfig::new(commands)
        .with_job_limit(settings.job_limit)
        .with_pipeline(settings.pipeline)
        .with_halt_on_failure(settings.halt_on_failure);
    let engine = Engine::new(config).context("engine rejected the configuration")?;

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(async {
        install_interrupt_guard();
        let mut stdout = tokio::io::stdout();
        engine.run(&mut stdout).await
    })?;
    Ok(ExitCode::from(report.exit_code))
}

/// An operator interrupt exits immediately with the fixed interrupt code.
/// In-flight children are not reaped on this path.
fn install_interrupt_guard() {
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("parun: execution interrupted - aborting");
            std::process::exit(i32::from(exit::INTERRUPTED));
        }
    });
}
