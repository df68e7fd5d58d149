// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! In-memory registration store
//!
//! Enforces the `(event, attendee code)` uniqueness like the database does and allows tests
//! to inject failures or hold lookups and inserts until released.

use async_trait::async_trait;
use parking_lot::Mutex;
use registration::{InsertOutcome, RegistrationRequest, RegistrationStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use types::core::{AttendeeCode, EventId, RegistrationId};
use types::events::Event;
use types::roster::Attendee;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRegistration {
    pub id: RegistrationId,
    pub request: RegistrationRequest,
    pub checked_in: bool,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    registrations: Mutex<Vec<StoredRegistration>>,
    gates: Mutex<HashMap<AttendeeCode, Arc<Semaphore>>>,
    insert_gates: Mutex<HashMap<AttendeeCode, Arc<Semaphore>>>,
    lookups: AtomicUsize,
    inserts: AtomicUsize,
    fail_lookups: AtomicBool,
    fail_inserts: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a registration without counting it as an insert
    pub fn seed(&self, event: &Event, attendee: &Attendee) -> RegistrationId {
        let id = RegistrationId::from(uuid::Uuid::new_v4());

        self.registrations.lock().push(StoredRegistration {
            id,
            request: RegistrationRequest::new(event, attendee),
            checked_in: false,
        });

        id
    }

    pub fn registrations(&self) -> Vec<StoredRegistration> {
        self.registrations.lock().clone()
    }

    pub fn count_for(&self, event_id: EventId, attendee_code: &AttendeeCode) -> usize {
        self.registrations
            .lock()
            .iter()
            .filter(|r| r.request.event_id == event_id && &r.request.attendee_code == attendee_code)
            .count()
    }

    /// Number of lookups that reached the store, including failed ones
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of insert attempts that reached the store, including rejected ones
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn set_fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Lookups for `code` wait until [`MemoryStore::release_lookups`] is called
    pub fn hold_lookups(&self, code: &AttendeeCode) {
        self.gates
            .lock()
            .insert(code.clone(), Arc::new(Semaphore::new(0)));
    }

    pub fn release_lookups(&self, code: &AttendeeCode) {
        if let Some(gate) = self.gates.lock().remove(code) {
            gate.close();
        }
    }

    /// Inserts for `code` wait until [`MemoryStore::release_inserts`] is called
    pub fn hold_inserts(&self, code: &AttendeeCode) {
        self.insert_gates
            .lock()
            .insert(code.clone(), Arc::new(Semaphore::new(0)));
    }

    pub fn release_inserts(&self, code: &AttendeeCode) {
        if let Some(gate) = self.insert_gates.lock().remove(code) {
            gate.close();
        }
    }
}

async fn pass(gates: &Mutex<HashMap<AttendeeCode, Arc<Semaphore>>>, code: &AttendeeCode) {
    let gate = gates.lock().get(code).cloned();

    if let Some(gate) = gate {
        // Closed on release
        let _ = gate.acquire().await;
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn registration_exists(
        &self,
        event_id: EventId,
        attendee_code: &AttendeeCode,
    ) -> Result<bool, StoreError> {
        pass(&self.gates, attendee_code).await;

        let _ = self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("lookup failed".into()));
        }

        Ok(self.count_for(event_id, attendee_code) > 0)
    }

    async fn insert_registration(
        &self,
        request: RegistrationRequest,
    ) -> Result<InsertOutcome, StoreError> {
        pass(&self.insert_gates, &request.attendee_code).await;

        let _ = self.inserts.fetch_add(1, Ordering::SeqCst);

        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("insert failed".into()));
        }

        let mut registrations = self.registrations.lock();

        let exists = registrations.iter().any(|r| {
            r.request.event_id == request.event_id
                && r.request.attendee_code == request.attendee_code
        });

        if exists {
            return Ok(InsertOutcome::AlreadyExists);
        }

        let id = RegistrationId::from(uuid::Uuid::new_v4());

        registrations.push(StoredRegistration {
            id,
            request,
            checked_in: false,
        });

        Ok(InsertOutcome::Inserted(id))
    }
}
