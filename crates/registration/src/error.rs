// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::session::StateKind;
use crate::store::StoreError;
use serde::Serialize;

/// Errors returned to the frontend by the [`RegistrationDesk`](crate::RegistrationDesk)
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("no attendee selected")]
    NoSelection,
    #[error("registration is not possible while the selection is {0}")]
    NotSubmittable(StateKind),
    #[error("a registration for this selection is already being submitted")]
    SubmissionInFlight,
    #[error("the selection was changed before the verification completed")]
    Superseded,
    #[error("attendee is already registered for this event")]
    AlreadyRegistered,
    /// The store rejected the insert, another client registered the attendee in between
    #[error("attendee was registered for this event in the meantime")]
    ConstraintViolation,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coarse classification of a [`RegistrationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The action is not allowed in the current state, nothing was sent to the store
    Validation,
    /// The attendee is already registered
    Duplicate,
    /// The store failed, the action can be repeated
    TransientStore,
    /// The store's uniqueness constraint rejected the insert
    ConstraintViolation,
}

impl RegistrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistrationError::NoSelection
            | RegistrationError::NotSubmittable(_)
            | RegistrationError::SubmissionInFlight
            | RegistrationError::Superseded => ErrorKind::Validation,
            RegistrationError::AlreadyRegistered => ErrorKind::Duplicate,
            RegistrationError::ConstraintViolation => ErrorKind::ConstraintViolation,
            RegistrationError::Store(_) => ErrorKind::TransientStore,
        }
    }

    /// Duplicates found by the check and those rejected by the store look the same to the user
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Duplicate | ErrorKind::ConstraintViolation
        )
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::TransientStore
    }
}
