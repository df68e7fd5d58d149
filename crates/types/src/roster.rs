// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Attendees as listed in the class rosters.

use serde::{Deserialize, Serialize};

use crate::core::{AttendeeCode, GroupName};

/// A pre-registered attendee taken from a class roster
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attendee {
    /// Unique (per roster snapshot) registration number
    pub code: AttendeeCode,
    /// Display name
    pub name: String,
    /// The class the attendee belongs to
    pub group_name: GroupName,
}

/// A class as delivered by the roster source, students in roster order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoster {
    /// Name of the class, copied into each attendee's `group_name`
    pub name: GroupName,
    /// Students of this class
    pub students: Vec<RosterEntry>,
}

/// A single student entry of a [`ClassRoster`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Registration number
    pub code: AttendeeCode,
    /// Display name
    pub name: String,
}

impl ClassRoster {
    /// Flattens the roster into attendees, tagging each with the class name
    pub fn attendees(&self) -> impl Iterator<Item = Attendee> + '_ {
        self.students.iter().map(|student| Attendee {
            code: student.code.clone(),
            name: student.name.clone(),
            group_name: self.name.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attendee_json() {
        let attendee = Attendee {
            code: "20231".into(),
            name: "Ana Souza".into(),
            group_name: GroupName::from("3A".to_owned()),
        };

        let json = serde_json::to_string_pretty(&attendee).unwrap();

        let expected = r#"{
  "code": "20231",
  "name": "Ana Souza",
  "group_name": "3A"
}"#;

        assert_eq!(json, expected);
    }

    #[test]
    fn class_roster_flattens_in_order() {
        let class = ClassRoster {
            name: GroupName::from("2B".to_owned()),
            students: vec![
                RosterEntry {
                    code: "2".into(),
                    name: "Bia".into(),
                },
                RosterEntry {
                    code: "1".into(),
                    name: "Caio".into(),
                },
            ],
        };

        let names: Vec<String> = class.attendees().map(|a| a.name).collect();

        assert_eq!(names, vec!["Bia".to_owned(), "Caio".to_owned()]);
        assert!(class
            .attendees()
            .all(|a| a.group_name == GroupName::from("2B".to_owned())));
    }
}
