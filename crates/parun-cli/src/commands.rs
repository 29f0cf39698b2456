//! Building the executable command list.

use std::io::BufRead;

use crate::lexer::split_space_not_quote;
use crate::settings::Settings;

/// One command per per-task argument: `fixed-args ++ [task]`.
///
/// The per-task argument stays a single argv element, even if it contains
/// spaces.
pub fn from_task_args(settings: &Settings) -> Vec<Vec<String>> {
    settings
        .tasks()
        .iter()
        .map(|task| {
            let mut command: Vec<String> = settings.fixed().to_vec();
            command.push(task.clone());
            command
        })
        .collect()
}

/// One command per non-empty line of `reader`: `fixed-args ++ line tokens`.
pub fn from_lines<R: BufRead>(settings: &Settings, reader: R) -> std::io::Result<Vec<Vec<String>>> {
    let mut commands = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let mut command: Vec<String> = settings.fixed().to_vec();
        command.extend(split_space_not_quote(&line).into_iter().map(|t| t.text));
        commands.push(command);
    }
    Ok(commands)
}
