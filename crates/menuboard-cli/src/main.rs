//! Replay a recorded editing session and print the resulting element views.

use menuboard_cli::Session;
use menuboard_core::{EditorConfig, EditorError, input::shortcuts};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

const USAGE: &str = "usage: menuboard <session.json> [--config <config.json>] | --shortcuts";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

enum Command {
    Replay { session: PathBuf, config: Option<PathBuf> },
    Shortcuts,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, CliError> {
    let mut session = None;
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--shortcuts" => return Ok(Command::Shortcuts),
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| CliError::Usage("--config needs a path".into()))?;
                config = Some(PathBuf::from(path));
            }
            other if other.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option {other}")));
            }
            other => session = Some(PathBuf::from(other)),
        }
    }
    let session = session.ok_or_else(|| CliError::Usage("missing session file".into()))?;
    Ok(Command::Replay { session, config })
}

fn run() -> Result<(), CliError> {
    match parse_args(std::env::args().skip(1))? {
        Command::Shortcuts => {
            for shortcut in shortcuts() {
                println!("{:<16} {}", shortcut.format(), shortcut.description);
            }
        }
        Command::Replay { session, config } => {
            let config = match config {
                Some(path) => EditorConfig::load(path)?,
                None => EditorConfig::default(),
            };
            log::info!("Replaying {}", session.display());
            let report = Session::load(&session)?.replay(config);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            if matches!(err, CliError::Usage(_)) {
                eprintln!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_replay() {
        match parse_args(args(&["s.json", "--config", "c.json"])).unwrap() {
            Command::Replay { session, config } => {
                assert_eq!(session, PathBuf::from("s.json"));
                assert_eq!(config, Some(PathBuf::from("c.json")));
            }
            Command::Shortcuts => panic!("expected replay"),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_args(args(&[])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["--config"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["--bogus"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["--shortcuts"])), Ok(Command::Shortcuts)));
    }
}
