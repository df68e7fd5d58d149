// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use checkin_registration::notify::Level;
use checkin_registration::{
    ErrorKind, RegistrationDesk, RegistrationError, RosterIndex, SessionState, StateKind,
    Verification,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_util::fixtures::{attendee, event};
use test_util::notify::RecordingNotifier;
use test_util::store::MemoryStore;
use types::events::Event;
use types::roster::Attendee;

fn ana() -> Attendee {
    attendee("1", "Ana", "1A")
}

fn bruno() -> Attendee {
    attendee("2", "Bruno", "1A")
}

fn roster() -> Arc<RosterIndex> {
    Arc::new(RosterIndex::new(vec![
        ana(),
        bruno(),
        attendee("3", "Carla", "1B"),
    ]))
}

fn desk(
    store: &Arc<MemoryStore>,
    event: &Event,
) -> (RegistrationDesk, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());

    let desk = RegistrationDesk::new(event.clone(), roster(), store.clone(), notifier.clone());

    (desk, notifier)
}

#[tokio::test]
async fn search_select_submit() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);
    let (desk, notifier) = desk(&store, &robotics);

    let candidates = desk.search_attendees("an");
    assert_eq!(candidates, vec![ana()]);
    assert_eq!(desk.state().kind(), StateKind::Searching);

    assert_eq!(
        desk.select_attendee(ana()).await,
        Ok(Verification::Clean)
    );
    assert!(desk.state().can_submit());

    let id = desk.submit_registration().await.unwrap();

    assert_eq!(
        desk.state(),
        SessionState::Submitted {
            attendee: ana(),
            registration_id: id,
        }
    );
    assert_eq!(store.count_for(robotics.id, &ana().code), 1);

    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, Level::Success);
}

#[tokio::test(flavor = "current_thread")]
async fn late_verification_of_a_reset_selection_is_dropped() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);
    let (desk, notifier) = desk(&store, &robotics);

    // Ana is already registered, the answer for her arrives after Bruno was selected
    let _ = store.seed(&robotics, &ana());
    store.hold_lookups(&ana().code);

    let (first, second) = tokio::join!(desk.select_attendee(ana()), async {
        tokio::task::yield_now().await;

        desk.reset_selection();
        let verification = desk.select_attendee(bruno()).await;

        store.release_lookups(&ana().code);
        verification
    });

    assert_eq!(first, Err(RegistrationError::Superseded));
    assert_eq!(second, Ok(Verification::Clean));
    assert_eq!(
        desk.state(),
        SessionState::Clean { attendee: bruno() }
    );
    assert!(notifier.errors().is_empty());
}

#[tokio::test]
async fn double_submit_writes_one_registration() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);
    let (desk, _) = desk(&store, &robotics);

    let _ = desk.select_attendee(ana()).await.unwrap();

    // The first insert stays in flight until the second submit was answered
    store.hold_inserts(&ana().code);

    let (first, second) = tokio::join!(desk.submit_registration(), async {
        let second = desk.submit_registration().await;
        store.release_inserts(&ana().code);
        second
    });

    assert!(first.is_ok());
    assert_eq!(second, Err(RegistrationError::SubmissionInFlight));
    assert_eq!(store.count_for(robotics.id, &ana().code), 1);
    assert_eq!(store.insert_count(), 1);
    assert_eq!(desk.state().kind(), StateKind::Submitted);
}

#[tokio::test]
async fn submit_after_success_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);
    let (desk, _) = desk(&store, &robotics);

    let _ = desk.select_attendee(ana()).await.unwrap();
    let _ = desk.submit_registration().await.unwrap();

    assert_eq!(
        desk.submit_registration().await,
        Err(RegistrationError::NotSubmittable(StateKind::Submitted))
    );
    assert_eq!(store.insert_count(), 1);
}

#[tokio::test]
async fn submit_while_duplicate_leaves_the_store_untouched() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);
    let (desk, notifier) = desk(&store, &robotics);

    let _ = store.seed(&robotics, &ana());

    assert_eq!(
        desk.select_attendee(ana()).await,
        Ok(Verification::Duplicate)
    );
    assert_eq!(notifier.errors().len(), 1);

    let result = desk.submit_registration().await;

    assert_eq!(result, Err(RegistrationError::AlreadyRegistered));
    assert_eq!(store.insert_count(), 0);
    assert_eq!(store.count_for(robotics.id, &ana().code), 1);
    assert_eq!(desk.state().kind(), StateKind::Duplicate);
}

#[tokio::test]
async fn racing_desks_are_stopped_by_the_store() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);

    let (first_desk, _) = desk(&store, &robotics);
    let (second_desk, second_notifier) = desk(&store, &robotics);

    // Both clients verify before either one submitted
    assert_eq!(
        first_desk.select_attendee(ana()).await,
        Ok(Verification::Clean)
    );
    assert_eq!(
        second_desk.select_attendee(ana()).await,
        Ok(Verification::Clean)
    );

    assert!(first_desk.submit_registration().await.is_ok());

    let error = second_desk.submit_registration().await.unwrap_err();

    assert_eq!(error, RegistrationError::ConstraintViolation);
    assert!(error.is_duplicate());
    assert_eq!(second_desk.state().kind(), StateKind::Duplicate);
    assert_eq!(second_notifier.errors().len(), 1);
    assert_eq!(store.count_for(robotics.id, &ana().code), 1);
}

#[tokio::test]
async fn failed_verification_blocks_submit_until_reset() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);
    let (desk, notifier) = desk(&store, &robotics);

    store.set_fail_lookups(true);

    let error = desk.select_attendee(ana()).await.unwrap_err();
    assert!(error.is_retryable());
    assert_eq!(desk.state().kind(), StateKind::VerificationFailed);
    assert_eq!(notifier.errors().len(), 1);

    assert_eq!(
        desk.submit_registration().await,
        Err(RegistrationError::NotSubmittable(
            StateKind::VerificationFailed
        ))
    );
    assert_eq!(store.insert_count(), 0);

    desk.reset_selection();
    assert_eq!(desk.search_attendees("bru"), vec![bruno()]);
    assert_eq!(desk.state().kind(), StateKind::Searching);
}

#[tokio::test]
async fn store_failure_on_submit_can_be_retried() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);
    let (desk, _) = desk(&store, &robotics);

    let _ = desk.select_attendee(ana()).await.unwrap();

    store.set_fail_inserts(true);
    let error = desk.submit_registration().await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TransientStore);
    assert!(desk.state().can_submit());

    store.set_fail_inserts(false);
    assert!(desk.submit_registration().await.is_ok());
    assert_eq!(store.count_for(robotics.id, &ana().code), 1);
}

#[tokio::test]
async fn subscribers_see_every_transition() {
    let store = Arc::new(MemoryStore::new());
    let robotics = event("Robotics", 3);
    let (desk, _) = desk(&store, &robotics);

    let mut states = desk.subscribe();
    assert_eq!(states.borrow_and_update().kind(), StateKind::Idle);

    let _ = desk.select_attendee(ana()).await.unwrap();

    assert!(states.has_changed().unwrap());
    assert_eq!(states.borrow_and_update().kind(), StateKind::Clean);

    desk.reset_selection();
    assert_eq!(*states.borrow_and_update(), SessionState::Idle);
}
