// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use checkin_db_storage::events::Event;
use checkin_db_storage::registrations::{NewRegistration, Registration};
use chrono::NaiveDate;
use database::DbConnection;
use pretty_assertions::assert_eq;
use serial_test::serial;
use types::core::{AttendeeCode, GroupName};

fn new_registration(event: &Event, code: &str, name: &str) -> NewRegistration {
    NewRegistration {
        event_id: event.id,
        attendee_code: code.into(),
        attendee_name: name.into(),
        attendee_group: GroupName::from("1A".to_owned()),
        event_name: event.name.clone(),
    }
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, month, day).unwrap()
}

fn count(conn: &mut DbConnection, event: &Event) -> usize {
    Registration::get_for_event(conn, event.id).unwrap().len()
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres server"]
async fn second_insert_for_the_same_pair_is_rejected() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    let robotics = db_ctx.create_test_event("Robotics", date(1, 3)).unwrap();
    let chess = db_ctx.create_test_event("Chess", date(1, 4)).unwrap();

    let mut conn = db_ctx.db.get_conn().unwrap();

    let inserted = new_registration(&robotics, "1", "Ana")
        .try_insert(&mut conn)
        .unwrap()
        .expect("first insert must succeed");

    assert_eq!(inserted.attendee_code, AttendeeCode::from("1".to_string()));
    assert_eq!(inserted.event_name, "Robotics");
    assert!(!inserted.checked_in);

    let rejected = new_registration(&robotics, "1", "Ana")
        .try_insert(&mut conn)
        .unwrap();
    assert!(rejected.is_none());

    // Same attendee, other event
    assert!(new_registration(&chess, "1", "Ana")
        .try_insert(&mut conn)
        .unwrap()
        .is_some());

    assert_eq!(count(&mut conn, &robotics), 1);
    assert_eq!(count(&mut conn, &chess), 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires a running postgres server"]
async fn exists_is_keyed_by_event_and_code() {
    let db_ctx = test_util::database::DatabaseContext::new(true).await;

    let robotics = db_ctx.create_test_event("Robotics", date(1, 3)).unwrap();
    let chess = db_ctx.create_test_event("Chess", date(1, 4)).unwrap();

    let mut conn = db_ctx.db.get_conn().unwrap();

    new_registration(&robotics, "1", "Ana")
        .try_insert(&mut conn)
        .unwrap();

    assert!(Registration::exists(&mut conn, robotics.id, &"1".into()).unwrap());
    assert!(!Registration::exists(&mut conn, robotics.id, &"2".into()).unwrap());
    assert!(!Registration::exists(&mut conn, chess.id, &"1".into()).unwrap());
}
