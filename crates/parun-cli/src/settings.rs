//! Command-line settings: parsing and validation.
//!
//! Parsing is a pure `argv → Result<Settings, UsageError>` function; file
//! access and mode dispatch stay in `main`.

use std::path::PathBuf;

use thiserror::Error;

use parun_types::{MAX_JOB_LIMIT, MIN_JOB_LIMIT};

/// The usage line printed on any command-line error.
pub const USAGE: &str = "Usage: parun [--limitjobs n] [--pipe] [--halt-on-error] \
[--dry-run] [--argsfile argument-file] [cmd [fixed-args ...]] \
[::: per-task-args ...]";

/// The command line could not be parsed or its options conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid command line")]
pub struct UsageError;

/// Everything the user asked for on the command line.
///
/// `fixed_args` and `task_args` distinguish "never given" (`None`) from
/// "given but empty" (`Some(vec![])`): a bare `:::` marks the per-task
/// list as present with zero entries, which matters for option-conflict
/// checks and mode selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub job_limit: usize,
    pub pipeline: bool,
    pub halt_on_failure: bool,
    pub dry_run: bool,
    pub args_file: Option<PathBuf>,
    pub fixed_args: Option<Vec<String>>,
    pub task_args: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            job_limit: MAX_JOB_LIMIT,
            pipeline: false,
            halt_on_failure: false,
            dry_run: false,
            args_file: None,
            fixed_args: None,
            task_args: None,
        }
    }
}

impl Settings {
    /// Fixed arguments prefixed to every command.
    pub fn fixed(&self) -> &[String] {
        self.fixed_args.as_deref().unwrap_or(&[])
    }

    /// Per-task arguments, one command each.
    pub fn tasks(&self) -> &[String] {
        self.task_args.as_deref().unwrap_or(&[])
    }

    /// True when commands come from stdin, one line at a time, run
    /// strictly in sequence.
    pub fn sequential(&self) -> bool {
        !self.dry_run && self.tasks().is_empty() && self.args_file.is_none() && !self.pipeline
    }
}

/// Parse the argument vector (without the program name).
///
/// Grammar: options first, each accepted at most once; the first argument
/// that is neither an option nor `:::` starts the fixed-args run, which
/// collects up to `:::` or the end; `:::` starts the per-task run. An
/// argument inside either run that is empty or starts with `--` is a
/// usage error, as is a second run of the same kind.
pub fn parse(args: &[String]) -> Result<Settings, UsageError> {
    let mut settings = Settings::default();
    let mut limit_seen = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "--halt-on-error" && !settings.halt_on_failure {
            settings.halt_on_failure = true;
        } else if arg == "--pipe" && !settings.pipeline {
            settings.pipeline = true;
        } else if arg == "--dry-run" && !settings.dry_run {
            settings.dry_run = true;
        } else if arg == "--argsfile" && settings.args_file.is_none() && i + 1 < args.len() {
            i += 1;
            settings.args_file = Some(PathBuf::from(&args[i]));
        } else if arg == "--limitjobs" && !limit_seen && i + 1 < args.len() {
            i += 1;
            settings.job_limit = parse_job_limit(&args[i])?;
            limit_seen = true;
        } else if arg == ":::" {
            let consumed = collect_run(&args[i + 1..], &mut settings.task_args)?;
            i += consumed;
        } else if !arg.starts_with("--") {
            let consumed = collect_run(&args[i..], &mut settings.fixed_args)?;
            i += consumed - 1;
        } else {
            // Unknown option, or a repeated one falling through its guard.
            return Err(UsageError);
        }
        i += 1;
    }

    validate(&settings)?;
    Ok(settings)
}

/// Collect one run of plain arguments into `dest`, stopping at `:::`.
/// Returns how many arguments were consumed.
fn collect_run(rest: &[String], dest: &mut Option<Vec<String>>) -> Result<usize, UsageError> {
    if dest.is_some() {
        return Err(UsageError);
    }
    let mut collected = Vec::new();
    for arg in rest {
        if arg == ":::" {
            break;
        }
        if arg.is_empty() || arg.starts_with("--") {
            return Err(UsageError);
        }
        collected.push(quote_if_blank(arg));
    }
    let consumed = collected.len();
    *dest = Some(collected);
    Ok(consumed)
}

/// An argument consisting purely of whitespace is stored wrapped in double
/// quotes so it stays visible in dry-run output.
fn quote_if_blank(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_whitespace()) {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}

/// The limit must be a plain integer in the accepted range: no decimal
/// point, no partial parse.
fn parse_job_limit(arg: &str) -> Result<usize, UsageError> {
    if arg.contains('.') {
        return Err(UsageError);
    }
    let limit: i64 = arg.parse().map_err(|_| UsageError)?;
    if !((MIN_JOB_LIMIT as i64)..=(MAX_JOB_LIMIT as i64)).contains(&limit) {
        return Err(UsageError);
    }
    Ok(limit as usize)
}

fn validate(settings: &Settings) -> Result<(), UsageError> {
    // An argument file and an explicit per-task list are exclusive.
    if settings.args_file.is_some() && settings.task_args.is_some() {
        return Err(UsageError);
    }
    // A pipeline needs a command source other than stdin.
    if settings.pipeline && settings.args_file.is_none() && settings.task_args.is_none() {
        return Err(UsageError);
    }
    Ok(())
}
