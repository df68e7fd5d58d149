// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Settings;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use database::Db;
use db_storage::events::Event;
use tabled::{Style, Table, Tabled};
use types::core::EventId;

#[derive(Tabled)]
struct EventTableRow {
    id: EventId,
    name: String,
    date: NaiveDate,
    time: String,
    location: String,
    soon: &'static str,
}

impl EventTableRow {
    fn from_event(event: types::events::Event, today: NaiveDate) -> Self {
        Self {
            id: event.id,
            time: event.time_range().unwrap_or_default(),
            soon: if event.is_soon(today) { "yes" } else { "" },
            name: event.name,
            date: event.date,
            location: event.location.unwrap_or_default(),
        }
    }
}

/// Implementation of the `checkin-portal events` command
pub(super) async fn list_upcoming(settings: Settings) -> Result<()> {
    let db = Db::connect_url(&settings.database.url, 1, None)
        .context("Failed to connect to database")?;
    let mut conn = db.get_conn()?;

    let today = chrono::Local::now().date_naive();

    let events = Event::get_upcoming(&mut conn, today)?;
    let rows: Vec<EventTableRow> = events
        .into_iter()
        .map(|event| EventTableRow::from_event(event.into(), today))
        .collect();

    println!("{}", Table::new(rows).with(Style::psql()));

    Ok(())
}
