// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Settings;
use crate::shell::{self, ShellNotifier};
use crate::store::{DbCatalogSource, DbRegistrationStore};
use anyhow::{bail, Context, Result};
use database::{Db, OptionalExt};
use db_storage::events::Event;
use registration::catalog::refresh;
use registration::{Catalog, RegistrationDesk};
use std::sync::Arc;
use tokio::io::BufReader;
use types::core::EventId;

/// Implementation of the `checkin-portal register <event-id>` command
pub(super) async fn open_form(settings: Settings, event_id: EventId) -> Result<()> {
    let db = Arc::new(
        Db::connect_url(&settings.database.url, 2, None)
            .context("Failed to connect to database")?,
    );

    let today = chrono::Local::now().date_naive();

    let notifier = Arc::new(ShellNotifier);
    let catalog = refresh(
        &Catalog::new(),
        &DbCatalogSource::new(db.clone()),
        today,
        notifier.as_ref(),
    )
    .await;

    if let Some((_, reason)) = catalog.readiness().failures().next() {
        bail!("Catalog could not be loaded, {reason}");
    }

    let event = match catalog.event(event_id) {
        Some(event) => event.clone(),
        None => bail!("{}", missing_event(&db, event_id).await?),
    };

    let desk = RegistrationDesk::new(
        event,
        catalog.roster(),
        Arc::new(DbRegistrationStore::new(db)),
        notifier,
    );

    let stdin = BufReader::new(tokio::io::stdin());
    shell::run(&desk, stdin, &mut std::io::stdout()).await
}

/// Explains why `event_id` is not among the upcoming events
async fn missing_event(db: &Arc<Db>, event_id: EventId) -> Result<String> {
    let db = db.clone();

    let event = crate::block(move || {
        let mut conn = db.get_conn()?;
        Event::get(&mut conn, event_id).optional()
    })
    .await??;

    Ok(match event {
        Some(event) => format!(
            "{} took place on {}, registration is closed",
            event.name, event.date
        ),
        None => format!("There is no upcoming event with id {event_id}"),
    })
}
