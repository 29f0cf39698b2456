//! Sequential mode: one command per input line, run to completion before
//! the next line is read.

use std::process::Stdio;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;

use parun_types::exit;

use crate::lexer::split_space_not_quote;
use crate::settings::Settings;

/// Result of the last line that was actually executed.
enum LineOutcome {
    Exited(i32),
    Abnormal,
}

/// Read commands from `input` one line at a time and run each to
/// completion. The child's stdout streams to `out` while it runs; stderr
/// is discarded; stdin stays shared with the engine's own.
///
/// Returns the engine exit code: the last executed command mapped like the
/// parallel path, or the fixed empty-run code when no line produced an
/// executable command.
pub async fn run<R, W>(settings: &Settings, input: R, out: &mut W) -> Result<u8>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    let mut last: Option<LineOutcome> = None;

    while let Some(line) = lines.next_line().await? {
        if line.is_empty() {
            continue;
        }
        let tokens = split_space_not_quote(&line);
        if tokens[0].text.is_empty() {
            eprintln!("parun: unable to execute empty command");
            continue;
        }

        let mut argv: Vec<String> = settings.fixed().to_vec();
        argv.extend(tokens.into_iter().map(|t| t.text));

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..])
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        match cmd.spawn() {
            Err(_) => {
                eprintln!("parun: \"{}\" not able to be executed", argv[0]);
                last = Some(LineOutcome::Abnormal);
            }
            Ok(mut child) => {
                if let Some(mut child_out) = child.stdout.take() {
                    tokio::io::copy(&mut child_out, out).await?;
                    out.flush().await?;
                }
                let status = child.wait().await?;
                last = Some(match status.code() {
                    Some(code) => LineOutcome::Exited(code),
                    None => LineOutcome::Abnormal,
                });
            }
        }
    }

    Ok(match last {
        None => exit::EMPTY_RUN,
        Some(LineOutcome::Exited(code)) => code as u8,
        Some(LineOutcome::Abnormal) => exit::LAST_RUN_FAILED,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_input(settings: &Settings, input: &str) -> (u8, String) {
        let mut out: Vec<u8> = Vec::new();
        let code = run(settings, input.as_bytes(), &mut out)
            .await
            .expect("sequential run");
        (code, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn runs_each_line_in_order() {
        let settings = Settings::default();
        let (code, out) = run_input(&settings, "echo one\necho two\n").await;
        assert_eq!(code, exit::SUCCESS);
        assert_eq!(out, "one\ntwo\n");
    }

    #[tokio::test]
    async fn last_command_decides_the_exit_code() {
        let settings = Settings::default();
        let (code, _) = run_input(&settings, "echo ok\nsh -c \"exit 5\"\n").await;
        assert_eq!(code, 5);
    }

    #[tokio::test]
    async fn fixed_args_prefix_each_line() {
        let settings = Settings {
            fixed_args: Some(vec!["echo".into(), "-n".into()]),
            ..Settings::default()
        };
        let (code, out) = run_input(&settings, "a\nb\n").await;
        assert_eq!(code, exit::SUCCESS);
        assert_eq!(out, "ab");
    }

    #[tokio::test]
    async fn empty_input_is_an_empty_run() {
        let settings = Settings::default();
        let (code, out) = run_input(&settings, "").await;
        assert_eq!(code, exit::EMPTY_RUN);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn empty_commands_are_skipped() {
        // A leading space makes the first token empty: not executable.
        let settings = Settings::default();
        let (code, _) = run_input(&settings, " echo hi\n").await;
        assert_eq!(code, exit::EMPTY_RUN);
    }

    #[tokio::test]
    async fn missing_program_fails_the_run() {
        let settings = Settings::default();
        let (code, _) = run_input(&settings, "/nonexistent-program-for-tests\n").await;
        assert_eq!(code, exit::LAST_RUN_FAILED);
    }
}
