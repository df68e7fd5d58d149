// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::schema::registrations;
use chrono::{DateTime, Utc};
use database::{DbConnection, Result};
use diesel::dsl::exists;
use diesel::{
    BoolExpressionMethods, ExpressionMethods, Insertable, QueryDsl, Queryable, RunQueryDsl,
};
use types::core::{AttendeeCode, EventId, GroupName, RegistrationId};

#[derive(Debug, Clone, Queryable, PartialEq, Eq)]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub attendee_code: AttendeeCode,
    pub attendee_name: String,
    pub attendee_group: GroupName,
    pub event_name: String,
    pub created_at: DateTime<Utc>,
    pub checked_in: bool,
}

impl Registration {
    /// Returns true if the attendee with `attendee_code` is registered for the event
    ///
    /// Deduplication is keyed by the attendee code only, names are not unique across a roster.
    #[tracing::instrument(err, skip_all, fields(event_id = %event_id, attendee_code = %attendee_code))]
    pub fn exists(
        conn: &mut DbConnection,
        event_id: EventId,
        attendee_code: &AttendeeCode,
    ) -> Result<bool> {
        let query = diesel::select(exists(
            registrations::table.filter(
                registrations::event_id
                    .eq(event_id)
                    .and(registrations::attendee_code.eq(attendee_code)),
            ),
        ));

        let exists = query.get_result(conn)?;

        Ok(exists)
    }

    #[tracing::instrument(err, skip_all)]
    pub fn get_for_event(conn: &mut DbConnection, event_id: EventId) -> Result<Vec<Registration>> {
        let query = registrations::table
            .filter(registrations::event_id.eq(event_id))
            .order_by(registrations::created_at.asc());

        let registrations = query.load(conn)?;

        Ok(registrations)
    }
}

/// A registration about to be written, `created_at` and `checked_in` are set by the database
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrations)]
pub struct NewRegistration {
    pub event_id: EventId,
    pub attendee_code: AttendeeCode,
    pub attendee_name: String,
    pub attendee_group: GroupName,
    pub event_name: String,
}

impl NewRegistration {
    /// Tries to insert the Registration into the database
    ///
    /// When yielding a unique key violation, None is returned.
    #[tracing::instrument(err, skip_all, fields(event_id = %self.event_id, attendee_code = %self.attendee_code))]
    pub fn try_insert(self, conn: &mut DbConnection) -> Result<Option<Registration>> {
        let query = self.insert_into(registrations::table);

        let result = query.get_result(conn);

        match result {
            Ok(registration) => Ok(Some(registration)),
            Err(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                ..,
            )) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
