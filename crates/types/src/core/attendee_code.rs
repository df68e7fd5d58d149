// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use std::{convert::Infallible, str::FromStr};

crate::diesel_newtype! {
    /// The externally assigned registration number of an attendee
    ///
    /// Rosters may carry numeric codes, they are always handled in their string form.
    AttendeeCode(String) => diesel::sql_types::Text
}

impl AttendeeCode {
    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        self.inner()
    }

    /// Returns true if the code consists only of whitespace or nothing at all
    pub fn is_blank(&self) -> bool {
        self.inner().trim().is_empty()
    }
}

impl FromStr for AttendeeCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.trim().into()))
    }
}

impl From<u64> for AttendeeCode {
    fn from(value: u64) -> Self {
        Self::from(value.to_string())
    }
}

impl From<&str> for AttendeeCode {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}
