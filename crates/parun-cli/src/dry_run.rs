//! `--dry-run`: print the generated commands without executing anything.

use std::io::{self, BufRead, Write};

use crate::lexer::split_space_not_quote;
use crate::settings::Settings;

/// Print the commands built from per-task arguments, numbered from 1.
/// In pipe mode every line except the last gets a trailing ` |`.
pub fn print_task_commands<W: Write>(settings: &Settings, out: &mut W) -> io::Result<()> {
    let tasks = settings.tasks();
    for (i, task) in tasks.iter().enumerate() {
        write!(out, "{}:", i + 1)?;
        for arg in settings.fixed() {
            write!(out, " {arg}")?;
        }
        if settings.pipeline && i + 1 < tasks.len() {
            writeln!(out, " {task} |")?;
        } else {
            writeln!(out, " {task}")?;
        }
    }
    Ok(())
}

/// Print the commands built from the lines of `reader`, numbered from 1.
/// Tokens that came from a quoted section are printed re-quoted.
pub fn print_line_commands<R: BufRead, W: Write>(
    settings: &Settings,
    reader: R,
    out: &mut W,
) -> io::Result<()> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        count += 1;
        write!(out, "{count}:")?;
        for arg in settings.fixed() {
            write!(out, " {arg}")?;
        }
        for token in split_space_not_quote(&line) {
            if token.quoted {
                write!(out, " \"{}\"", token.text)?;
            } else {
                write!(out, " {}", token.text)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn settings_with(fixed: &[&str], tasks: &[&str], pipeline: bool) -> Settings {
        Settings {
            pipeline,
            fixed_args: if fixed.is_empty() {
                None
            } else {
                Some(fixed.iter().map(|s| s.to_string()).collect())
            },
            task_args: if tasks.is_empty() {
                None
            } else {
                Some(tasks.iter().map(|s| s.to_string()).collect())
            },
            ..Settings::default()
        }
    }

    fn render_tasks(settings: &Settings) -> String {
        let mut out = Vec::new();
        print_task_commands(settings, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn numbers_task_commands_from_one() {
        let settings = settings_with(&["echo"], &["a", "b"], false);
        assert_eq!(render_tasks(&settings), "1: echo a\n2: echo b\n");
    }

    #[test]
    fn pipe_mode_marks_all_but_the_last_command() {
        let settings = settings_with(&["cat"], &["x", "y", "z"], true);
        assert_eq!(render_tasks(&settings), "1: cat x |\n2: cat y |\n3: cat z\n");
    }

    #[test]
    fn line_commands_requote_quoted_tokens() {
        let settings = settings_with(&["grep"], &[], false);
        let input = Cursor::new("\"two words\" file\n");
        let mut out = Vec::new();
        print_line_commands(&settings, input, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1: grep \"two words\" file\n"
        );
    }

    #[test]
    fn line_commands_skip_empty_lines() {
        let settings = settings_with(&[], &[], false);
        let input = Cursor::new("echo a\n\necho b\n");
        let mut out = Vec::new();
        print_line_commands(&settings, input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1: echo a\n2: echo b\n");
    }
}
