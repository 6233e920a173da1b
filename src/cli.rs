//! Command-line arguments.
//!
//! ```text
//! hyprring [--config <path>] [--dry-run] [--switch <n>]
//! ```
//!
//! Without `--switch` the overlay is shown.  `--switch` dispatches directly
//! and never touches the toolkit, which makes it usable from keybinds.

use crate::workspace::Workspace;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage: hyprring [OPTIONS]

  --switch <n>     switch to workspace n (1-13) without showing the ring
  --dry-run        log dispatches instead of sending them
  --config <path>  read configuration from <path>
  -h, --help       print this message";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub switch: Option<Workspace>,
    pub dry_run: bool,
    pub help: bool,
}

/// Invalid command line.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unknown argument: {0}")]
    Unknown(String),
    #[error("{0} expects a value")]
    MissingValue(&'static str),
    #[error("invalid workspace: {0}")]
    Workspace(String),
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dry-run" => parsed.dry_run = true,
                "-h" | "--help" => parsed.help = true,
                "--config" => {
                    let path = args.next().ok_or(ArgsError::MissingValue("--config"))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--switch" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--switch"))?;
                    let ws = value.parse().map_err(ArgsError::Workspace)?;
                    parsed.switch = Some(ws);
                }
                _ => return Err(ArgsError::Unknown(arg)),
            }
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_runs_overlay() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn switch_and_flags() {
        let args = parse(&["--dry-run", "--switch", "13", "--config", "/tmp/c.json"]).unwrap();
        assert!(args.dry_run);
        assert_eq!(args.switch, Some(Workspace::SPECIAL));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn bad_workspace() {
        assert!(matches!(
            parse(&["--switch", "14"]),
            Err(ArgsError::Workspace(_))
        ));
        assert!(matches!(
            parse(&["--switch", "two"]),
            Err(ArgsError::Workspace(_))
        ));
    }

    #[test]
    fn missing_value_and_unknown() {
        assert_eq!(
            parse(&["--switch"]),
            Err(ArgsError::MissingValue("--switch"))
        );
        assert_eq!(
            parse(&["--verbose"]),
            Err(ArgsError::Unknown("--verbose".into()))
        );
    }
}
