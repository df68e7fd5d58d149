// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Registration core of the check-in portal
//!
//! Ensures that an attendee is registered at most once per event. The flow driven by the
//! frontend is `search → select → verify → submit`:
//!
//! 1. [`RosterIndex::search`] turns free text into at most five candidates.
//! 2. [`RegistrationDesk::select_attendee`] moves the [`SelectionSession`] into pending
//!    verification and asks the [`DuplicateChecker`] whether a registration exists.
//! 3. Only a clean verification makes the session submittable,
//!    [`RegistrationDesk::submit_registration`] then writes exactly one registration through
//!    the [`RegistrationSubmitter`].
//!
//! The client side check is an optimistic shortcut. The store rejects a second insert for the
//! same `(event, attendee code)` pair, which surfaces as [`RegistrationError::ConstraintViolation`].

pub mod catalog;
pub mod checker;
pub mod desk;
pub mod error;
pub mod notify;
pub mod roster;
pub mod session;
pub mod store;
pub mod submitter;

pub use catalog::{Catalog, CatalogSource, Readiness};
pub use checker::{DuplicateChecker, Verification};
pub use desk::RegistrationDesk;
pub use error::{ErrorKind, RegistrationError};
pub use notify::{Notification, Notifier, TracingNotifier};
pub use roster::RosterIndex;
pub use session::{SelectionSession, SelectionToken, SessionState, StateKind};
pub use store::{InsertOutcome, RegistrationRequest, RegistrationStore, StoreError};
pub use submitter::{RegistrationSubmitter, SubmitError};
