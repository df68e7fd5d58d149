// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Snapshot of the upcoming events and the attendee roster
//!
//! Both are replaced wholesale whenever a source delivers, handing out a new [`Catalog`]
//! each time. Readers keep working on the snapshot they hold.

use crate::notify::{Notification, Notifier};
use crate::roster::RosterIndex;
use crate::store::StoreError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use types::events::{self, Event};
use types::roster::ClassRoster;

/// Delivery status of a single catalog source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    /// Nothing was delivered yet
    Pending,
    Delivered,
    /// The last load failed, the catalog keeps the previous data
    Failed(String),
}

/// Conjunction of named sources, ready once every source delivered or failed at least once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    sources: Vec<(&'static str, SourceStatus)>,
}

impl Readiness {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            sources: names
                .iter()
                .map(|name| (*name, SourceStatus::Pending))
                .collect(),
        }
    }

    fn entry(&mut self, name: &'static str) -> &mut SourceStatus {
        if let Some(index) = self.sources.iter().position(|(n, _)| *n == name) {
            &mut self.sources[index].1
        } else {
            self.sources.push((name, SourceStatus::Pending));
            let last = self.sources.len() - 1;
            &mut self.sources[last].1
        }
    }

    pub fn mark_delivered(&mut self, name: &'static str) {
        *self.entry(name) = SourceStatus::Delivered;
    }

    /// Returns true if the source was not failed before
    pub fn mark_failed(&mut self, name: &'static str, reason: impl Into<String>) -> bool {
        let entry = self.entry(name);
        let newly_failed = !matches!(entry, SourceStatus::Failed(_));

        *entry = SourceStatus::Failed(reason.into());

        newly_failed
    }

    pub fn status(&self, name: &str) -> Option<&SourceStatus> {
        self.sources
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, status)| status)
    }

    pub fn is_failed(&self, name: &str) -> bool {
        matches!(self.status(name), Some(SourceStatus::Failed(_)))
    }

    pub fn is_ready(&self) -> bool {
        self.sources
            .iter()
            .all(|(_, status)| *status != SourceStatus::Pending)
    }

    /// Sources whose last load failed, with the reason
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.sources.iter().filter_map(|(name, status)| match status {
            SourceStatus::Failed(reason) => Some((*name, reason.as_str())),
            _ => None,
        })
    }

    pub fn is_degraded(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Upcoming events and roster index as currently known
#[derive(Debug, Clone)]
pub struct Catalog {
    events: Arc<[Event]>,
    roster: Arc<RosterIndex>,
    readiness: Readiness,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub const EVENTS: &'static str = "events";
    pub const ROSTER: &'static str = "roster";

    pub fn new() -> Self {
        Self {
            events: Arc::from(Vec::new()),
            roster: Arc::new(RosterIndex::default()),
            readiness: Readiness::new(&[Self::EVENTS, Self::ROSTER]),
        }
    }

    /// Upcoming events, soonest first
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the upcoming event with `id`
    pub fn event(&self, id: types::core::EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn roster(&self) -> Arc<RosterIndex> {
        self.roster.clone()
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// Replaces the event list with the events upcoming as of `today`
    pub fn apply_events(&mut self, events: Vec<Event>, today: NaiveDate) {
        self.events = Arc::from(events::upcoming(events, today));
        self.readiness.mark_delivered(Self::EVENTS);
    }

    /// Replaces the roster index
    pub fn apply_roster(&mut self, classes: &[ClassRoster]) {
        self.roster = Arc::new(RosterIndex::from_classes(classes));
        self.readiness.mark_delivered(Self::ROSTER);
    }

    /// Records a failed load, see [`Readiness::mark_failed`]
    pub fn source_failed(&mut self, name: &'static str, reason: impl Into<String>) -> bool {
        self.readiness.mark_failed(name, reason)
    }
}

/// Where the catalog data comes from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads all events dated `today` or later
    async fn load_events(&self, today: NaiveDate) -> Result<Vec<Event>, StoreError>;

    /// Loads all class rosters
    async fn load_rosters(&self) -> Result<Vec<ClassRoster>, StoreError>;
}

/// Reloads both sources and returns the next catalog snapshot
///
/// A failing source keeps its previous data. A persistent error notification is sent the
/// first time a source fails, not again until it recovered in between. The recovery itself is
/// announced with an info notification.
#[tracing::instrument(level = "debug", skip_all, fields(today = %today))]
pub async fn refresh(
    current: &Catalog,
    source: &dyn CatalogSource,
    today: NaiveDate,
    notifier: &dyn Notifier,
) -> Catalog {
    let mut next = current.clone();

    match source.load_events(today).await {
        Ok(events) => {
            next.apply_events(events, today);

            if current.readiness().is_failed(Catalog::EVENTS) {
                notifier.notify(Notification::info("Events are available again"));
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load events, {}", e);

            if next.source_failed(Catalog::EVENTS, e.to_string()) {
                notifier.notify(Notification::error("Events could not be loaded").persistent());
            }
        }
    }

    match source.load_rosters().await {
        Ok(classes) => {
            next.apply_roster(&classes);

            if current.readiness().is_failed(Catalog::ROSTER) {
                notifier.notify(Notification::info("Attendees are available again"));
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load rosters, {}", e);

            if next.source_failed(Catalog::ROSTER, e.to_string()) {
                notifier.notify(Notification::error("Attendees could not be loaded").persistent());
            }
        }
    }

    next
}

#[cfg(test)]
mod test {
    use super::*;
    use test_util::fixtures::{class, event_on};

    #[test]
    fn ready_once_all_sources_reported() {
        let mut readiness = Readiness::new(&["a", "b"]);
        assert!(!readiness.is_ready());

        readiness.mark_delivered("a");
        assert!(!readiness.is_ready());

        assert!(readiness.mark_failed("b", "timeout"));
        assert!(readiness.is_ready());
        assert!(readiness.is_degraded());
        assert_eq!(readiness.failures().collect::<Vec<_>>(), vec![("b", "timeout")]);
    }

    #[test]
    fn repeated_failure_is_not_new() {
        let mut readiness = Readiness::new(&["a"]);

        assert!(readiness.mark_failed("a", "first"));
        assert!(!readiness.mark_failed("a", "second"));
        assert_eq!(
            readiness.status("a"),
            Some(&SourceStatus::Failed("second".into()))
        );

        readiness.mark_delivered("a");
        assert!(readiness.mark_failed("a", "third"));
    }

    #[test]
    fn catalog_keeps_upcoming_events_sorted() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let past = event_on("Past", NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let later = event_on("Later", NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        let now = event_on("Today", today);

        let mut catalog = Catalog::new();
        assert!(!catalog.is_ready());

        let past_id = past.id;
        let later_id = later.id;

        catalog.apply_events(vec![past, later, now], today);

        let names: Vec<_> = catalog.events().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Today", "Later"]);
        assert_eq!(catalog.event(later_id).map(|e| e.name.as_str()), Some("Later"));
        assert!(catalog.event(past_id).is_none());
        assert!(!catalog.is_ready());

        catalog.apply_roster(&[class("1A", &[("1", "Ana")])]);
        assert!(catalog.is_ready());
        assert_eq!(catalog.roster().len(), 1);
    }

    #[test]
    fn snapshots_are_independent() {
        let mut catalog = Catalog::new();
        catalog.apply_roster(&[class("1A", &[("1", "Ana")])]);

        let before = catalog.roster();
        catalog.apply_roster(&[class("1A", &[("1", "Ana"), ("2", "Bruno")])]);

        assert_eq!(before.len(), 1);
        assert_eq!(catalog.roster().len(), 2);
    }
}
