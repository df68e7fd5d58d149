// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Line based registration form for a single event

use anyhow::Result;
use registration::notify::Level;
use registration::{Notification, Notifier, RegistrationDesk, SessionState};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use types::core::AttendeeCode;

const HELP: &str = "\
Commands:
  search <text>   list attendees matching <text>
  select <code>   select the attendee with <code> and check for a registration
  reset           discard the selection
  submit          register the selected attendee
  state           show the current state
  help            show this text
  quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Select(AttendeeCode),
    Reset,
    Submit,
    State,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (line, ""),
        };

        match name {
            "search" | "s" => Ok(Command::Search(argument.to_owned())),
            "select" => {
                if argument.is_empty() {
                    return Err(ParseCommandError::MissingArgument("select"));
                }

                Ok(Command::Select(argument.into()))
            }
            "reset" => Ok(Command::Reset),
            "submit" => Ok(Command::Submit),
            "state" => Ok(Command::State),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseCommandError::Unknown(other.to_owned())),
        }
    }
}

/// Prints notifications to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellNotifier;

impl Notifier for ShellNotifier {
    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            Level::Success => "ok",
            Level::Info => "info",
            Level::Error => "error",
        };

        println!("[{tag}] {}", notification.message);
    }
}

fn describe(state: &SessionState) -> String {
    match state {
        SessionState::Idle => "nothing selected".into(),
        SessionState::Searching { query } => format!("searching for `{query}`"),
        SessionState::PendingVerification { attendee } => {
            format!("checking {} ({})", attendee.name, attendee.code)
        }
        SessionState::Clean { attendee } => {
            format!("{} ({}) can be registered", attendee.name, attendee.code)
        }
        SessionState::Duplicate { attendee } => {
            format!("{} ({}) is already registered", attendee.name, attendee.code)
        }
        SessionState::VerificationFailed { attendee, reason } => {
            format!("could not check {}: {reason}", attendee.name)
        }
        SessionState::Submitting { attendee } => format!("registering {}", attendee.name),
        SessionState::Submitted {
            attendee,
            registration_id,
        } => format!("{} is registered ({registration_id})", attendee.name),
    }
}

/// Reads commands from `input` until it ends or `quit` is entered
pub async fn run<R, W>(desk: &RegistrationDesk, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let event = desk.event();

    writeln!(out, "Registration for {} on {}", event.name, event.date)?;
    if let Some(time_range) = event.time_range() {
        writeln!(out, "Time: {time_range}")?;
    }
    if let Some(location) = &event.location {
        writeln!(out, "Location: {location}")?;
    }
    writeln!(out, "{HELP}")?;

    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match command {
            Command::Search(text) => {
                let candidates = desk.search_attendees(&text);

                if candidates.is_empty() {
                    writeln!(out, "no matches")?;
                }

                for attendee in candidates {
                    writeln!(
                        out,
                        "  {:<12} {} ({})",
                        attendee.code, attendee.name, attendee.group_name
                    )?;
                }
            }
            Command::Select(code) => {
                let Some(attendee) = desk.roster().lookup(&code).cloned() else {
                    writeln!(out, "no attendee with code {code}")?;
                    continue;
                };

                // Outcomes are reported through the notifier
                let _ = desk.select_attendee(attendee).await;
                writeln!(out, "{}", describe(&desk.state()))?;
            }
            Command::Reset => {
                desk.reset_selection();
                writeln!(out, "{}", describe(&desk.state()))?;
            }
            Command::Submit => {
                let _ = desk.submit_registration().await;
                writeln!(out, "{}", describe(&desk.state()))?;
            }
            Command::State => writeln!(out, "{}", describe(&desk.state()))?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    Ok(())
}
