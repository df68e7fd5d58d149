// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use async_trait::async_trait;
use checkin_registration::catalog::{refresh, SourceStatus};
use checkin_registration::notify::Level;
use checkin_registration::{Catalog, CatalogSource, StoreError};
use chrono::NaiveDate;
use parking_lot::Mutex;
use test_util::fixtures::{class, event_on};
use test_util::notify::RecordingNotifier;
use types::events::Event;
use types::roster::ClassRoster;

#[derive(Default)]
struct FakeSource {
    events: Mutex<Option<Vec<Event>>>,
    rosters: Mutex<Option<Vec<ClassRoster>>>,
}

impl FakeSource {
    fn set_events(&self, events: Option<Vec<Event>>) {
        *self.events.lock() = events;
    }

    fn set_rosters(&self, rosters: Option<Vec<ClassRoster>>) {
        *self.rosters.lock() = rosters;
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn load_events(&self, _today: NaiveDate) -> Result<Vec<Event>, StoreError> {
        self.events
            .lock()
            .clone()
            .ok_or_else(|| StoreError::Unavailable("events".into()))
    }

    async fn load_rosters(&self) -> Result<Vec<ClassRoster>, StoreError> {
        self.rosters
            .lock()
            .clone()
            .ok_or_else(|| StoreError::Unavailable("rosters".into()))
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 10).unwrap()
}

#[tokio::test]
async fn refresh_delivers_both_sources() {
    let source = FakeSource::default();
    source.set_events(Some(vec![event_on("Robotics", today())]));
    source.set_rosters(Some(vec![class("1A", &[("1", "Ana")])]));

    let notifier = RecordingNotifier::new();

    let catalog = refresh(&Catalog::new(), &source, today(), &notifier).await;

    assert!(catalog.is_ready());
    assert!(!catalog.readiness().is_degraded());
    assert_eq!(catalog.events().len(), 1);
    assert_eq!(catalog.roster().len(), 1);
    assert!(notifier.notifications().is_empty());
}

#[tokio::test]
async fn failing_source_degrades_with_one_persistent_error() {
    let source = FakeSource::default();
    source.set_events(Some(vec![event_on("Robotics", today())]));

    let notifier = RecordingNotifier::new();

    let catalog = refresh(&Catalog::new(), &source, today(), &notifier).await;

    assert!(catalog.is_ready());
    assert!(catalog.roster().is_empty());
    assert!(matches!(
        catalog.readiness().status(Catalog::ROSTER),
        Some(SourceStatus::Failed(_))
    ));

    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].persistent);

    // Still failing, no new notification
    let catalog = refresh(&catalog, &source, today(), &notifier).await;
    assert_eq!(notifier.errors().len(), 1);

    source.set_rosters(Some(vec![class("1A", &[("1", "Ana")])]));
    let catalog = refresh(&catalog, &source, today(), &notifier).await;

    assert!(!catalog.readiness().is_degraded());
    assert_eq!(catalog.roster().len(), 1);

    let notifications = notifier.notifications();
    let recovered = notifications.last().unwrap();
    assert_eq!(recovered.level, Level::Info);
    assert_eq!(recovered.message, "Attendees are available again");
    assert!(!recovered.persistent);

    // Delivering again is not another recovery
    let _ = refresh(&catalog, &source, today(), &notifier).await;
    assert_eq!(notifier.notifications().len(), notifications.len());
}

#[tokio::test]
async fn failed_reload_keeps_previous_events() {
    let source = FakeSource::default();
    source.set_events(Some(vec![event_on("Robotics", today())]));
    source.set_rosters(Some(Vec::new()));

    let notifier = RecordingNotifier::new();

    let catalog = refresh(&Catalog::new(), &source, today(), &notifier).await;

    source.set_events(None);
    let catalog = refresh(&catalog, &source, today(), &notifier).await;

    assert_eq!(catalog.events().len(), 1);
    assert_eq!(catalog.events()[0].name, "Robotics");
    assert_eq!(notifier.errors().len(), 1);
}
