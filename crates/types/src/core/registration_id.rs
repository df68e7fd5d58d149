// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

crate::diesel_newtype! {
    /// The id of a stored registration
    #[derive(Copy)] RegistrationId(uuid::Uuid) => diesel::sql_types::Uuid
}

impl RegistrationId {
    /// Create a ZERO registration id, e.g. for testing purposes
    pub const fn nil() -> Self {
        Self::from(uuid::Uuid::nil())
    }
}
