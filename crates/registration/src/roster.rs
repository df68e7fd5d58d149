// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use std::collections::HashSet;
use types::core::AttendeeCode;
use types::roster::{Attendee, ClassRoster};

/// Queries shorter than this (in characters) yield no candidates
pub const MIN_QUERY_CHARS: usize = 2;

/// Maximum number of candidates returned by [`RosterIndex::search`]
pub const MAX_RESULTS: usize = 5;

/// Read-only, searchable projection of all attendees of a roster snapshot
///
/// Rebuilt wholesale whenever a new roster snapshot arrives.
#[derive(Debug, Default, Clone)]
pub struct RosterIndex {
    attendees: Vec<Attendee>,
    lowercase_names: Vec<String>,
}

impl RosterIndex {
    /// Builds the index, keeping roster order
    ///
    /// Entries with a blank code or name are skipped. If a code occurs more than once, the
    /// first entry wins.
    pub fn new<I>(attendees: I) -> Self
    where
        I: IntoIterator<Item = Attendee>,
    {
        let mut seen = HashSet::new();
        let mut index = Self::default();

        for attendee in attendees {
            if attendee.code.is_blank() || attendee.name.trim().is_empty() {
                tracing::warn!(code = %attendee.code, "Skipping roster entry without code or name");
                continue;
            }

            if !seen.insert(attendee.code.clone()) {
                tracing::warn!(code = %attendee.code, "Skipping duplicate roster code");
                continue;
            }

            index.lowercase_names.push(attendee.name.to_lowercase());
            index.attendees.push(attendee);
        }

        index
    }

    /// Flattens class rosters into an index, classes and students in delivery order
    pub fn from_classes(classes: &[ClassRoster]) -> Self {
        Self::new(classes.iter().flat_map(ClassRoster::attendees))
    }

    /// Returns up to [`MAX_RESULTS`] attendees matching `query`, in roster order
    ///
    /// An attendee matches if its name contains the query case-insensitively or its code
    /// contains the query. Queries shorter than [`MIN_QUERY_CHARS`] return nothing.
    pub fn search(&self, query: &str) -> Vec<Attendee> {
        let query = query.trim();

        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let lowercase_query = query.to_lowercase();

        self.attendees
            .iter()
            .zip(&self.lowercase_names)
            .filter(|(attendee, name)| {
                name.contains(&lowercase_query) || attendee.code.as_str().contains(query)
            })
            .map(|(attendee, _)| attendee.clone())
            .take(MAX_RESULTS)
            .collect()
    }

    /// Returns the attendee with exactly this code
    pub fn lookup(&self, code: &AttendeeCode) -> Option<&Attendee> {
        self.attendees.iter().find(|attendee| &attendee.code == code)
    }

    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }
}
