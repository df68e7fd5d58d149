// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::diesel_newtype! {
    /// The id of an event
    #[derive(Copy)] EventId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl EventId {
    /// Create a ZERO event id, e.g. for testing purposes
    pub const fn nil() -> Self {
        Self::from(uuid::Uuid::nil())
    }
}
