// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

#![allow(clippy::extra_unused_lifetimes)]

//! Contains the database ORM and database migrations for the check-in portal
//! Builds upon checkin-database
//!
//! Events and class rosters are only read here, registrations are the single entity
//! the portal writes. The `registrations` table carries a unique constraint on
//! `(event_id, attendee_code)` which is the actual guarantee against double registrations.

mod schema;

pub mod events;
pub mod migrations;
pub mod registrations;
pub mod rosters;
