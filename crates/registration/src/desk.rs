// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::checker::{DuplicateChecker, Verification};
use crate::error::RegistrationError;
use crate::notify::{Notification, Notifier};
use crate::roster::RosterIndex;
use crate::session::{SelectionSession, SessionState};
use crate::store::RegistrationStore;
use crate::submitter::{RegistrationSubmitter, SubmitError};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use types::core::RegistrationId;
use types::events::Event;
use types::roster::Attendee;

/// Registration form of a single event
///
/// Owns the [`SelectionSession`] and drives the checker and submitter for it. Every state
/// change is published to the receivers returned by [`RegistrationDesk::subscribe`].
pub struct RegistrationDesk {
    event: Event,
    roster: Arc<RosterIndex>,
    checker: DuplicateChecker,
    submitter: RegistrationSubmitter,
    notifier: Arc<dyn Notifier>,
    session: Mutex<SelectionSession>,
    state_tx: watch::Sender<SessionState>,
}

impl RegistrationDesk {
    pub fn new(
        event: Event,
        roster: Arc<RosterIndex>,
        store: Arc<dyn RegistrationStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session = SelectionSession::new();
        let (state_tx, _) = watch::channel(session.state().clone());

        Self {
            event,
            roster,
            checker: DuplicateChecker::new(store.clone()),
            submitter: RegistrationSubmitter::new(store),
            notifier,
            session: Mutex::new(session),
            state_tx,
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn roster(&self) -> &RosterIndex {
        &self.roster
    }

    pub fn state(&self) -> SessionState {
        self.session.lock().state().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn publish(&self, session: &SelectionSession) {
        let _ = self.state_tx.send_replace(session.state().clone());
    }

    /// Returns the candidates for the search input
    pub fn search_attendees(&self, text: &str) -> Vec<Attendee> {
        {
            let mut session = self.session.lock();

            if session.search_input(text) {
                self.publish(&session);
            }
        }

        self.roster.search(text)
    }

    /// Selects `attendee` and waits for the duplicate check
    ///
    /// Returns [`RegistrationError::Superseded`] if the selection was reset or replaced while
    /// the check was running. The late result is dropped in that case.
    #[tracing::instrument(skip_all, fields(event_id = %self.event.id, attendee_code = %attendee.code))]
    pub async fn select_attendee(
        &self,
        attendee: Attendee,
    ) -> Result<Verification, RegistrationError> {
        let token = {
            let mut session = self.session.lock();
            let token = session.select(attendee.clone())?;
            self.publish(&session);
            token
        };

        let result = self.checker.check(self.event.id, &attendee.code).await;

        {
            let mut session = self.session.lock();

            if !session.complete_verification(token, result.as_ref().copied()) {
                tracing::debug!("Dropping verification of a previous selection");
                return Err(RegistrationError::Superseded);
            }

            self.publish(&session);
        }

        match &result {
            Ok(Verification::Clean) => {}
            Ok(Verification::Duplicate) => self.notifier.notify(Notification::error(format!(
                "{} is already registered for {}",
                attendee.name, self.event.name
            ))),
            Err(e) => {
                tracing::warn!("Duplicate check failed, {}", e);
                self.notifier.notify(Notification::error(
                    "Could not check for an existing registration, please select again",
                ));
            }
        }

        result.map_err(RegistrationError::from)
    }

    /// Discards the selection, results still in flight are dropped when they arrive
    pub fn reset_selection(&self) {
        let mut session = self.session.lock();
        session.reset();
        self.publish(&session);
    }

    /// Registers the verified attendee
    ///
    /// A rejection by the store's uniqueness constraint is reported as
    /// [`RegistrationError::ConstraintViolation`].
    #[tracing::instrument(skip_all, fields(event_id = %self.event.id))]
    pub async fn submit_registration(&self) -> Result<RegistrationId, RegistrationError> {
        let started = {
            let mut session = self.session.lock();
            let started = session.begin_submit();

            if started.is_ok() {
                self.publish(&session);
            }

            started
        };

        let (token, attendee) = match started {
            Ok(started) => started,
            Err(e) => {
                self.notifier.notify(Notification::error(e.to_string()));
                return Err(e);
            }
        };

        let result = self.submitter.submit(&self.event, &attendee).await;

        {
            let mut session = self.session.lock();

            if session.complete_submit(token, &result) {
                self.publish(&session);
            } else {
                tracing::debug!("Selection was reset during submission");
            }
        }

        match result {
            Ok(id) => {
                self.notifier.notify(Notification::success(format!(
                    "{} is registered for {}",
                    attendee.name, self.event.name
                )));

                Ok(id)
            }
            Err(SubmitError::AlreadyRegistered) => {
                self.notifier.notify(Notification::error(format!(
                    "{} was registered for {} in the meantime",
                    attendee.name, self.event.name
                )));

                Err(RegistrationError::ConstraintViolation)
            }
            Err(SubmitError::Store(e)) => {
                self.notifier.notify(Notification::error(
                    "Registration could not be saved, please try again",
                ));

                Err(RegistrationError::Store(e))
            }
        }
    }
}
