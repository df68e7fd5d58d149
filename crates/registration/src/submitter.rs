// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::store::{InsertOutcome, RegistrationRequest, RegistrationStore, StoreError};
use std::sync::Arc;
use types::core::RegistrationId;
use types::events::Event;
use types::roster::Attendee;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The store rejected the insert because the attendee is already registered
    #[error("attendee is already registered for this event")]
    AlreadyRegistered,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Writes registrations, at most one per attendee and event
#[derive(Clone)]
pub struct RegistrationSubmitter {
    store: Arc<dyn RegistrationStore>,
}

impl RegistrationSubmitter {
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store }
    }

    /// Performs exactly one insert. Nothing is retried, a retry is up to the user.
    #[tracing::instrument(skip_all, fields(event_id = %event.id, attendee_code = %attendee.code))]
    pub async fn submit(
        &self,
        event: &Event,
        attendee: &Attendee,
    ) -> Result<RegistrationId, SubmitError> {
        let request = RegistrationRequest::new(event, attendee);

        match self.store.insert_registration(request).await? {
            InsertOutcome::Inserted(id) => {
                tracing::info!(registration_id = %id, "Registration created");
                Ok(id)
            }
            InsertOutcome::AlreadyExists => {
                tracing::info!("Registration rejected by uniqueness constraint");
                Err(SubmitError::AlreadyRegistered)
            }
        }
    }
}

