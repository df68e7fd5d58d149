// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use async_trait::async_trait;
use types::core::{AttendeeCode, EventId, GroupName, RegistrationId};
use types::events::Event;
use types::roster::Attendee;

/// Failure of the registration store, always retryable by repeating the action
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("registration store is unreachable: {0}")]
    Unavailable(String),
    #[error("registration store query failed: {0}")]
    Query(String),
}

/// Result of an insert against the store's `(event, attendee code)` uniqueness constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(RegistrationId),
    /// Another registration for the same pair exists, nothing was written
    AlreadyExists,
}

/// Everything needed to write a registration
///
/// The creation timestamp is assigned by the store, `checked_in` always starts out false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub event_id: EventId,
    pub event_name: String,
    pub attendee_code: AttendeeCode,
    pub attendee_name: String,
    pub attendee_group: GroupName,
}

impl RegistrationRequest {
    pub fn new(event: &Event, attendee: &Attendee) -> Self {
        Self {
            event_id: event.id,
            event_name: event.name.clone(),
            attendee_code: attendee.code.clone(),
            attendee_name: attendee.name.clone(),
            attendee_group: attendee.group_name.clone(),
        }
    }
}

/// The registration collection of the backing store
///
/// Implementations must enforce uniqueness of `(event_id, attendee_code)` on insert, the
/// lookup alone cannot prevent two independent clients from racing.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Returns true if a registration for the pair exists
    async fn registration_exists(
        &self,
        event_id: EventId,
        attendee_code: &AttendeeCode,
    ) -> Result<bool, StoreError>;

    /// Writes the registration unless one for the same pair exists
    async fn insert_registration(
        &self,
        request: RegistrationRequest,
    ) -> Result<InsertOutcome, StoreError>;
}
