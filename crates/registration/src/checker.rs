// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::store::{RegistrationStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use types::core::{AttendeeCode, EventId};

/// Outcome of a successful duplicate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verification {
    /// No registration exists yet
    Clean,
    /// The attendee is already registered for the event
    Duplicate,
}

/// Looks up existing registrations by event and attendee code
#[derive(Clone)]
pub struct DuplicateChecker {
    store: Arc<dyn RegistrationStore>,
}

impl DuplicateChecker {
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store }
    }

    /// Store failures are returned as errors and never count as clean.
    #[tracing::instrument(level = "debug", skip_all, fields(event_id = %event_id, attendee_code = %attendee_code))]
    pub async fn check(
        &self,
        event_id: EventId,
        attendee_code: &AttendeeCode,
    ) -> Result<Verification, StoreError> {
        let exists = self
            .store
            .registration_exists(event_id, attendee_code)
            .await?;

        if exists {
            Ok(Verification::Duplicate)
        } else {
            Ok(Verification::Clean)
        }
    }
}

