// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Events as published by the organizers.
//!
//! Events are read-only to the portal. Dates carry no time zone and are compared at day
//! granularity against the local wall-clock date.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::core::EventId;

/// Number of days ahead in which an event counts as "soon"
pub const SOON_WINDOW_DAYS: i64 = 7;

/// An event attendees can register for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique id of the event
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Calendar date of the event
    pub date: NaiveDate,
    /// Optional start time (local wall-clock)
    pub start_time: Option<NaiveTime>,
    /// Optional end time (local wall-clock)
    pub end_time: Option<NaiveTime>,
    /// Where the event takes place, e.g. a lab or room
    pub location: Option<String>,
    /// The person responsible for the event
    pub responsible: Option<String>,
    /// Free text notes or description
    pub notes: Option<String>,
}

impl Event {
    /// Returns true if the event takes place today or later
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }

    /// Whole days between `today` and the event date, negative for past events
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }

    /// Returns true if the event is at most [`SOON_WINDOW_DAYS`] ahead
    pub fn is_soon(&self, today: NaiveDate) -> bool {
        (0..=SOON_WINDOW_DAYS).contains(&self.days_until(today))
    }

    /// Formats the time of the event as `"start - end"` or just `"start"`
    ///
    /// Returns `None` when no start time is known.
    pub fn time_range(&self) -> Option<String> {
        let start = self.start_time?.format("%H:%M");

        Some(match self.end_time {
            Some(end) => format!("{start} - {}", end.format("%H:%M")),
            None => start.to_string(),
        })
    }
}

/// Filters the given events down to upcoming ones, sorted ascending by date and start time
///
/// Events without a start time come last on their date. The sort is stable, events on the
/// same date and time keep their input order.
pub fn upcoming<I>(events: I, today: NaiveDate) -> Vec<Event>
where
    I: IntoIterator<Item = Event>,
{
    let mut upcoming: Vec<Event> = events
        .into_iter()
        .filter(|event| event.is_upcoming(today))
        .collect();

    upcoming.sort_by_key(|event| (event.date, event.start_time.is_none(), event.start_time));

    upcoming
}
