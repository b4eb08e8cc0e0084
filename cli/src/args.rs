//! Command-line arguments

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "clinic-sim",
    version,
    about = "Run a patient roster through the consultation scheduler"
)]
pub struct Args {
    /// Patient roster, one `<id> <type> <urgency> <duration>` per line
    #[arg(default_value = "patients1.txt")]
    pub roster: PathBuf,

    /// JSON scheduler configuration
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the output log and summary as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Also print the event log
    #[arg(long, action = ArgAction::SetTrue)]
    pub events: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("clinic-sim").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.roster, PathBuf::from("patients1.txt"));
        assert_eq!(args.config, None);
        assert!(!args.json && !args.events);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&["roster.txt", "--config", "cfg.json", "--json", "--events"]).unwrap();
        assert_eq!(args.roster, PathBuf::from("roster.txt"));
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert!(args.json && args.events);
    }

    #[test]
    fn test_rejects_unknown_and_extra() {
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
        assert!(parse(&["--config"]).is_err());
    }
}
