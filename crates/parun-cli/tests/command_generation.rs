//! From command line to command list, across the front-end layers.

use std::io::{BufReader, Write};

use parun_cli::{commands, settings};

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn task_arguments_build_one_command_each() {
    let settings = settings::parse(&argv(&["echo", "-n", ":::", "a", "b", "c"])).unwrap();
    let commands = commands::from_task_args(&settings);
    assert_eq!(
        commands,
        vec![
            vec!["echo", "-n", "a"],
            vec!["echo", "-n", "b"],
            vec!["echo", "-n", "c"],
        ]
    );
}

#[test]
fn argument_file_lines_build_commands() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "echo one").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "echo \"two words\"").unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let settings = settings::parse(&argv(&["--argsfile", &path])).unwrap();

    let reader = BufReader::new(std::fs::File::open(&settings.args_file.clone().unwrap()).unwrap());
    let commands = commands::from_lines(&settings, reader).unwrap();
    assert_eq!(
        commands,
        vec![vec!["echo", "one"], vec!["echo", "two words"]]
    );
}

#[test]
fn argument_file_combines_with_fixed_args() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "-l first").unwrap();
    writeln!(file, "-c second").unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let settings = settings::parse(&argv(&["--limitjobs", "2", "wc", "--argsfile", &path]));
    // Options may not follow the fixed-args run.
    assert!(settings.is_err());

    let settings = settings::parse(&argv(&["--limitjobs", "2", "--argsfile", &path, "wc"])).unwrap();
    let reader = BufReader::new(std::fs::File::open(settings.args_file.as_ref().unwrap()).unwrap());
    let commands = commands::from_lines(&settings, reader).unwrap();
    assert_eq!(
        commands,
        vec![vec!["wc", "-l", "first"], vec!["wc", "-c", "second"]]
    );
}

#[test]
fn empty_argument_file_yields_no_commands() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let settings = settings::parse(&argv(&["--argsfile", &path])).unwrap();
    let reader = BufReader::new(std::fs::File::open(settings.args_file.as_ref().unwrap()).unwrap());
    assert!(commands::from_lines(&settings, reader).unwrap().is_empty());
}
