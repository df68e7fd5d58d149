// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! The selection session state machine
//!
//! ```text
//! Idle ⇄ Searching → PendingVerification → Clean | Duplicate | VerificationFailed
//!                                          Clean → Submitting → Submitted
//! ```
//!
//! Every selection and every reset hands out a new [`SelectionToken`]. Results of the
//! checker or submitter are only applied when they carry the current token, anything
//! else is a late answer for a selection that no longer exists and is dropped.

use crate::checker::Verification;
use crate::error::RegistrationError;
use crate::store::StoreError;
use crate::submitter::SubmitError;
use serde::Serialize;
use std::fmt;
use types::core::RegistrationId;
use types::roster::Attendee;

/// Identifies one selection, strictly increasing over the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SelectionToken(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Searching {
        query: String,
    },
    PendingVerification {
        attendee: Attendee,
    },
    Clean {
        attendee: Attendee,
    },
    Duplicate {
        attendee: Attendee,
    },
    VerificationFailed {
        attendee: Attendee,
        reason: String,
    },
    Submitting {
        attendee: Attendee,
    },
    Submitted {
        attendee: Attendee,
        registration_id: RegistrationId,
    },
}

/// Payload-free discriminant of [`SessionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Idle,
    Searching,
    PendingVerification,
    Clean,
    Duplicate,
    VerificationFailed,
    Submitting,
    Submitted,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateKind::Idle => "idle",
            StateKind::Searching => "searching",
            StateKind::PendingVerification => "pending verification",
            StateKind::Clean => "clean",
            StateKind::Duplicate => "a duplicate",
            StateKind::VerificationFailed => "not verified",
            StateKind::Submitting => "being submitted",
            StateKind::Submitted => "submitted",
        };

        f.write_str(s)
    }
}

impl SessionState {
    pub fn kind(&self) -> StateKind {
        match self {
            SessionState::Idle => StateKind::Idle,
            SessionState::Searching { .. } => StateKind::Searching,
            SessionState::PendingVerification { .. } => StateKind::PendingVerification,
            SessionState::Clean { .. } => StateKind::Clean,
            SessionState::Duplicate { .. } => StateKind::Duplicate,
            SessionState::VerificationFailed { .. } => StateKind::VerificationFailed,
            SessionState::Submitting { .. } => StateKind::Submitting,
            SessionState::Submitted { .. } => StateKind::Submitted,
        }
    }

    /// The currently selected attendee, if any
    pub fn attendee(&self) -> Option<&Attendee> {
        match self {
            SessionState::Idle | SessionState::Searching { .. } => None,
            SessionState::PendingVerification { attendee }
            | SessionState::Clean { attendee }
            | SessionState::Duplicate { attendee }
            | SessionState::VerificationFailed { attendee, .. }
            | SessionState::Submitting { attendee }
            | SessionState::Submitted { attendee, .. } => Some(attendee),
        }
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, SessionState::Clean { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Submitted { .. })
    }
}

/// One registration attempt for one event
#[derive(Debug)]
pub struct SelectionSession {
    state: SessionState,
    token: SelectionToken,
}

impl Default for SelectionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            token: SelectionToken(0),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> SelectionToken {
        self.token
    }

    fn next_token(&mut self) -> SelectionToken {
        self.token = SelectionToken(self.token.0 + 1);
        self.token
    }

    /// Records the search input. Returns false if the session has a selection.
    ///
    /// An empty input moves the session back to idle.
    pub fn search_input(&mut self, query: &str) -> bool {
        match self.state {
            SessionState::Idle | SessionState::Searching { .. } => {
                self.state = if query.is_empty() {
                    SessionState::Idle
                } else {
                    SessionState::Searching {
                        query: query.to_owned(),
                    }
                };

                true
            }
            _ => false,
        }
    }

    /// Selects an attendee, replacing any previous selection
    ///
    /// The returned token has to be passed to [`Self::complete_verification`].
    pub fn select(&mut self, attendee: Attendee) -> Result<SelectionToken, RegistrationError> {
        match self.state.kind() {
            kind @ (StateKind::Submitting | StateKind::Submitted) => {
                Err(RegistrationError::NotSubmittable(kind))
            }
            _ => {
                let token = self.next_token();
                self.state = SessionState::PendingVerification { attendee };
                Ok(token)
            }
        }
    }

    /// Applies the checker's answer. Returns false if the answer is stale and was dropped.
    pub fn complete_verification(
        &mut self,
        token: SelectionToken,
        result: Result<Verification, &StoreError>,
    ) -> bool {
        if token != self.token {
            return false;
        }

        let attendee = match &self.state {
            SessionState::PendingVerification { attendee } => attendee.clone(),
            _ => return false,
        };

        self.state = match result {
            Ok(Verification::Clean) => SessionState::Clean { attendee },
            Ok(Verification::Duplicate) => SessionState::Duplicate { attendee },
            Err(e) => SessionState::VerificationFailed {
                attendee,
                reason: e.to_string(),
            },
        };

        true
    }

    /// Returns to idle unconditionally, in-flight results become stale
    ///
    /// A submitted session is final and is left untouched.
    pub fn reset(&mut self) {
        if self.state.is_terminal() {
            return;
        }

        let _ = self.next_token();
        self.state = SessionState::Idle;
    }

    /// Moves a clean selection into submitting
    ///
    /// Fails without side effects in any other state, in particular while a submission for
    /// the same selection is still outstanding.
    pub fn begin_submit(&mut self) -> Result<(SelectionToken, Attendee), RegistrationError> {
        let attendee = match &self.state {
            SessionState::Clean { attendee } => attendee.clone(),
            SessionState::Idle | SessionState::Searching { .. } => {
                return Err(RegistrationError::NoSelection)
            }
            SessionState::Duplicate { .. } => return Err(RegistrationError::AlreadyRegistered),
            SessionState::Submitting { .. } => return Err(RegistrationError::SubmissionInFlight),
            state => return Err(RegistrationError::NotSubmittable(state.kind())),
        };

        self.state = SessionState::Submitting {
            attendee: attendee.clone(),
        };

        Ok((self.token, attendee))
    }

    /// Applies the submitter's answer. Returns false if the answer is stale and was dropped.
    ///
    /// A store failure returns the selection to clean so the user can try again.
    pub fn complete_submit(
        &mut self,
        token: SelectionToken,
        result: &Result<RegistrationId, SubmitError>,
    ) -> bool {
        if token != self.token {
            return false;
        }

        let attendee = match &self.state {
            SessionState::Submitting { attendee } => attendee.clone(),
            _ => return false,
        };

        self.state = match result {
            Ok(registration_id) => SessionState::Submitted {
                attendee,
                registration_id: *registration_id,
            },
            Err(SubmitError::AlreadyRegistered) => SessionState::Duplicate { attendee },
            Err(SubmitError::Store(_)) => SessionState::Clean { attendee },
        };

        true
    }
}
