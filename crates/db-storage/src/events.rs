// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::schema::events;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use database::{DbConnection, Result};
use diesel::{ExpressionMethods, Insertable, QueryDsl, Queryable, RunQueryDsl};
use types::core::EventId;

#[derive(Debug, Clone, Queryable, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub id_serial: i64,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    #[tracing::instrument(err, skip_all)]
    pub fn get(conn: &mut DbConnection, event_id: EventId) -> Result<Event> {
        let query = events::table.filter(events::id.eq(event_id));

        let event = query.first(conn)?;

        Ok(event)
    }

    /// Returns all events, ordered by date and start time
    #[tracing::instrument(err, skip_all)]
    pub fn get_all(conn: &mut DbConnection) -> Result<Vec<Event>> {
        let query = events::table.order_by((
            events::date.asc(),
            events::start_time.asc(),
            events::id_serial.asc(),
        ));

        let events = query.load(conn)?;

        Ok(events)
    }

    /// Returns all events taking place on `today` or later, ordered by date and start time
    #[tracing::instrument(err, skip_all, fields(today = %today))]
    pub fn get_upcoming(conn: &mut DbConnection, today: NaiveDate) -> Result<Vec<Event>> {
        let query = events::table
            .filter(events::date.ge(today))
            .order_by((
                events::date.asc(),
                events::start_time.asc(),
                events::id_serial.asc(),
            ));

        let events = query.load(conn)?;

        Ok(events)
    }
}

impl From<Event> for types::events::Event {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location,
            responsible: event.responsible,
            notes: event.notes,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = events)]
pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
}

impl NewEvent {
    #[tracing::instrument(err, skip_all)]
    pub fn insert(self, conn: &mut DbConnection) -> Result<Event> {
        let query = self.insert_into(events::table);

        let event = query.get_result(conn)?;

        Ok(event)
    }
}
