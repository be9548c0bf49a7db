//! Notification settings CLI commands.

use chrono::NaiveTime;
use clap::{Parser, Subcommand};

/// Notification settings commands.
#[derive(Debug, Parser)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

/// Available settings actions.
#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Show the reminder cutoffs.
    Show,
    /// Change one or more reminder cutoffs.
    Set {
        /// Cutoff on day shifts (HH:MM).
        #[arg(long, value_parser = super::parse_time)]
        day: Option<NaiveTime>,
        /// Cutoff on night shifts (HH:MM).
        #[arg(long, value_parser = super::parse_time)]
        night: Option<NaiveTime>,
        /// Cutoff on every other day (HH:MM).
        #[arg(long, value_parser = super::parse_time)]
        off: Option<NaiveTime>,
    },
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use super::*;

    #[test]
    fn test_parse_set_partial() {
        let cli = Cli::try_parse_from(["rotacal", "settings", "set", "--night", "19:30"]).unwrap();
        match cli.command {
            Commands::Settings(SettingsCommand {
                action: SettingsAction::Set { day, night, off },
            }) => {
                assert_eq!(day, None);
                assert_eq!(night, NaiveTime::from_hms_opt(19, 30, 0));
                assert_eq!(off, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_malformed_time() {
        assert!(Cli::try_parse_from(["rotacal", "settings", "set", "--day", "7am"]).is_err());
    }
}
