// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Periodic reload of the catalog
//!
//! Every tick reloads events and rosters and publishes a whole new [`Catalog`] snapshot.

use registration::catalog::refresh;
use registration::{Catalog, CatalogSource, Notifier};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::time::{interval, MissedTickBehavior};

/// Spawns the reload task, the first reload happens immediately
///
/// The task exits on the shutdown signal or once every receiver is gone.
pub fn spawn(
    source: Arc<dyn CatalogSource>,
    notifier: Arc<dyn Notifier>,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> watch::Receiver<Arc<Catalog>> {
    let (tx, rx) = watch::channel(Arc::new(Catalog::new()));

    tokio::spawn(async move {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticks.tick() => {}
            }

            let today = chrono::Local::now().date_naive();
            let current = tx.borrow().clone();

            let next = refresh(&current, source.as_ref(), today, notifier.as_ref()).await;

            if next.is_ready() && !current.is_ready() {
                log::info!(
                    "Catalog ready with {} upcoming events and {} attendees",
                    next.events().len(),
                    next.roster().len()
                );
            }

            if tx.send(Arc::new(next)).is_err() {
                log::debug!("All catalog receivers dropped, stopping reload");
                break;
            }
        }
    });

    rx
}
