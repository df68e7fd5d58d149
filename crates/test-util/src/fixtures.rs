// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Shorthand constructors for roster and event data

use chrono::{NaiveDate, NaiveTime};
use types::core::{EventId, GroupName};
use types::events::Event;
use types::roster::{Attendee, ClassRoster, RosterEntry};

pub fn attendee(code: &str, name: &str, group_name: &str) -> Attendee {
    Attendee {
        code: code.into(),
        name: name.into(),
        group_name: GroupName::from(group_name.to_owned()),
    }
}

/// A class roster with `(code, name)` students in the given order
pub fn class(name: &str, students: &[(&str, &str)]) -> ClassRoster {
    ClassRoster {
        name: GroupName::from(name.to_owned()),
        students: students
            .iter()
            .map(|(code, name)| RosterEntry {
                code: (*code).into(),
                name: (*name).into(),
            })
            .collect(),
    }
}

/// An event with a fresh id on the given day of January 2030, starting at 10:00
pub fn event(name: &str, day: u32) -> Event {
    let date = NaiveDate::from_ymd_opt(2030, 1, day).expect("day must be within January");

    Event {
        start_time: NaiveTime::from_hms_opt(10, 0, 0),
        ..event_on(name, date)
    }
}

/// An event with a fresh id on `date` without times or details
pub fn event_on(name: &str, date: NaiveDate) -> Event {
    Event {
        id: EventId::from(uuid::Uuid::new_v4()),
        name: name.into(),
        date,
        start_time: None,
        end_time: None,
        location: None,
        responsible: None,
        notes: None,
    }
}
