// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Database backed implementations of the registration store and the catalog source

use crate::block;
use async_trait::async_trait;
use chrono::NaiveDate;
use database::{DatabaseError, Db};
use db_storage::events::Event;
use db_storage::registrations::{NewRegistration, Registration};
use db_storage::rosters;
use registration::{CatalogSource, InsertOutcome, RegistrationRequest, RegistrationStore, StoreError};
use std::sync::Arc;
use types::core::{AttendeeCode, EventId};
use types::roster::ClassRoster;

/// Runs `f` with a pooled connection on the blocking thread pool
async fn with_conn<F, R>(db: &Arc<Db>, f: F) -> Result<R, StoreError>
where
    F: FnOnce(&mut database::DbConnection) -> database::Result<R> + Send + 'static,
    R: Send + 'static,
{
    let db = db.clone();

    block(move || {
        let mut conn = db.get_conn()?;
        f(&mut conn)
    })
    .await
    .map_err(|e| StoreError::Query(e.to_string()))?
    .map_err(store_error)
}

fn store_error(e: DatabaseError) -> StoreError {
    if e.is_connection_error() {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Query(e.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DbRegistrationStore {
    db: Arc<Db>,
}

impl DbRegistrationStore {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationStore for DbRegistrationStore {
    async fn registration_exists(
        &self,
        event_id: EventId,
        attendee_code: &AttendeeCode,
    ) -> Result<bool, StoreError> {
        let attendee_code = attendee_code.clone();

        with_conn(&self.db, move |conn| {
            Registration::exists(conn, event_id, &attendee_code)
        })
        .await
    }

    async fn insert_registration(
        &self,
        request: RegistrationRequest,
    ) -> Result<InsertOutcome, StoreError> {
        let new_registration = NewRegistration {
            event_id: request.event_id,
            attendee_code: request.attendee_code,
            attendee_name: request.attendee_name,
            attendee_group: request.attendee_group,
            event_name: request.event_name,
        };

        let inserted = with_conn(&self.db, move |conn| new_registration.try_insert(conn)).await?;

        match inserted {
            Some(registration) => Ok(InsertOutcome::Inserted(registration.id)),
            None => Ok(InsertOutcome::AlreadyExists),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbCatalogSource {
    db: Arc<Db>,
}

impl DbCatalogSource {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogSource for DbCatalogSource {
    async fn load_events(&self, today: NaiveDate) -> Result<Vec<types::events::Event>, StoreError> {
        let events = with_conn(&self.db, move |conn| Event::get_upcoming(conn, today)).await?;

        Ok(events.into_iter().map(Into::into).collect())
    }

    async fn load_rosters(&self) -> Result<Vec<ClassRoster>, StoreError> {
        with_conn(&self.db, rosters::load_rosters).await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pool_errors_are_unavailable() {
        let error = store_error(DatabaseError::R2D2Error("timed out".into()));
        assert!(matches!(error, StoreError::Unavailable(_)));

        let error = store_error(DatabaseError::Custom("bad row".into()));
        assert!(matches!(error, StoreError::Query(_)));
    }
}
