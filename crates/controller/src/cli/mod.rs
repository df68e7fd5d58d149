// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Settings;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use types::core::EventId;
use uuid::Uuid;

mod events;
mod register;

#[derive(Parser, Debug, Clone)]
#[clap(name = "checkin-portal", version)]
pub struct Args {
    #[clap(
        short,
        long,
        default_value = "config.toml",
        help = "Specify path to configuration file"
    )]
    pub config: PathBuf,

    #[clap(subcommand)]
    cmd: Option<SubCommand>,
}

#[derive(Subcommand, Debug, Clone)]
#[clap(rename_all = "kebab_case")]
enum SubCommand {
    /// Migrate the db. This is done automatically during start of the controller,
    /// but can be done without starting the controller using this command.
    MigrateDb,
    /// List the upcoming events
    Events,
    /// Open the registration form of an event on the terminal
    Register {
        /// Id of the event, see `events`
        event_id: Uuid,
    },
}

impl Args {
    /// Returns true if we want to startup the controller after we finished the cli part
    pub fn controller_should_start(&self) -> bool {
        self.cmd.is_none()
    }
}

/// Parses the CLI-Arguments into [`Args`]
///
/// Also runs (optional) cli commands if necessary
pub async fn parse_args() -> Result<Args> {
    let args = Args::parse();

    if let Some(sub_command) = args.cmd.clone() {
        let settings = Settings::load(&args.config)?;

        match sub_command {
            SubCommand::MigrateDb => {
                db_storage::migrations::migrate_from_url(&settings.database.url)
                    .await
                    .context("Failed to migrate database")?;
            }
            SubCommand::Events => {
                events::list_upcoming(settings).await?;
            }
            SubCommand::Register { event_id } => {
                register::open_form(settings, EventId::from(event_id)).await?;
            }
        }
    }

    Ok(args)
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert()
    }

    #[test]
    fn parse_register() {
        let args = Args::try_parse_from([
            "checkin-portal",
            "--config",
            "other.toml",
            "register",
            "5c8b1d2e-0f37-4c4f-9a0e-6f1f8b9a2c11",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("other.toml"));
        assert!(!args.controller_should_start());
        assert!(matches!(args.cmd, Some(SubCommand::Register { .. })));
    }

    #[test]
    fn no_subcommand_starts_the_controller() {
        let args = Args::try_parse_from(["checkin-portal"]).unwrap();

        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(args.controller_should_start());
    }
}
