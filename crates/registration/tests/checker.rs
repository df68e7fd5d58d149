// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use checkin_registration::{DuplicateChecker, StoreError, Verification};
use std::sync::Arc;
use test_util::fixtures::{attendee, event};
use test_util::store::MemoryStore;

#[tokio::test]
async fn clean_when_nothing_registered() {
    let store = Arc::new(MemoryStore::new());
    let checker = DuplicateChecker::new(store.clone());

    let robotics = event("Robotics", 3);
    let ana = attendee("1", "Ana", "1A");

    assert_eq!(
        checker.check(robotics.id, &ana.code).await,
        Ok(Verification::Clean)
    );
    assert_eq!(store.lookup_count(), 1);
}

#[tokio::test]
async fn duplicate_only_for_the_same_event() {
    let store = Arc::new(MemoryStore::new());
    let checker = DuplicateChecker::new(store.clone());

    let robotics = event("Robotics", 3);
    let chess = event("Chess", 4);
    let ana = attendee("1", "Ana", "1A");

    let _ = store.seed(&robotics, &ana);

    assert_eq!(
        checker.check(robotics.id, &ana.code).await,
        Ok(Verification::Duplicate)
    );
    assert_eq!(
        checker.check(chess.id, &ana.code).await,
        Ok(Verification::Clean)
    );
}

#[tokio::test]
async fn same_name_other_code_is_not_a_duplicate() {
    let store = Arc::new(MemoryStore::new());
    let checker = DuplicateChecker::new(store.clone());

    let robotics = event("Robotics", 3);
    let _ = store.seed(&robotics, &attendee("1", "Maria Silva", "1A"));

    let namesake = attendee("2", "Maria Silva", "2B");

    assert_eq!(
        checker.check(robotics.id, &namesake.code).await,
        Ok(Verification::Clean)
    );
}

#[tokio::test]
async fn store_failure_is_not_clean() {
    let store = Arc::new(MemoryStore::new());
    store.set_fail_lookups(true);

    let checker = DuplicateChecker::new(store);
    let result = checker.check(event("Robotics", 3).id, &"1".into()).await;

    assert!(matches!(result, Err(StoreError::Unavailable(_))));
}
