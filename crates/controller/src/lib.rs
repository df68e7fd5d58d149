// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Core library of the *Check-in Portal*
//!
//! # Example
//!
//! ```no_run
//! use checkin_controller::Controller;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main()  {
//!     checkin_controller::try_or_exit(run()).await;
//! }
//!
//! async fn run() -> Result<()> {
//!    if let Some(controller) = Controller::create("Check-in Portal").await? {
//!         controller.run().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::settings::Settings;
use crate::store::DbCatalogSource;
use anyhow::{Context, Result};
use database::Db;
use registration::{Catalog, TracingNotifier};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::ctrl_c;
use tokio::sync::{broadcast, watch};
use tokio::time::sleep;

mod cli;
mod trace;

pub mod settings;
pub mod shell;
pub mod store;
pub mod sync;

#[derive(Debug, thiserror::Error)]
#[error("Blocking thread has panicked")]
pub struct BlockingError;

/// Custom version of `tokio::task::spawn_blocking` which retains the current tracing span
pub async fn block<F, R>(f: F) -> Result<R, BlockingError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let span = tracing::Span::current();
    let fut = tokio::task::spawn_blocking(move || span.in_scope(f));
    fut.await.map_err(|_| BlockingError)
}

/// Wrapper of the main function. Correctly outputs the error to the logging utility or stderr.
pub async fn try_or_exit<T, F>(f: F) -> T
where
    F: std::future::Future<Output = Result<T>>,
{
    match f.await {
        Ok(ok) => ok,
        Err(err) => {
            if log::log_enabled!(log::Level::Error) {
                log::error!("Crashed with error: {:?}", err);
            } else {
                eprintln!("Crashed with error: {err:?}");
            }

            std::process::exit(-1);
        }
    }
}

/// Controller struct representation containing all fields required to drive the portal
pub struct Controller {
    /// Settings loaded on [Controller::create]
    pub startup_settings: Arc<Settings>,

    db: Arc<Db>,

    /// Shutdown signal which is triggered when the controller is exiting.
    ///
    /// `controller.shutdown.subscribe()` to receive a receiver to the shutdown-signal.
    pub shutdown: broadcast::Sender<()>,
}

impl Controller {
    /// Tries to create a controller from CLI arguments and then the settings.
    ///
    /// This can return Ok(None) which would indicate that the controller executed a CLI
    /// subprogram (e.g. `migrate-db`) and must now exit.
    ///
    /// Otherwise it will return itself which can then be run using [`Controller::run`]
    pub async fn create(program_name: &str) -> Result<Option<Self>> {
        let args = cli::parse_args().await?;

        // Some args run commands by them self and thus should exit here
        if !args.controller_should_start() {
            return Ok(None);
        }

        let settings = Settings::load(&args.config)?;

        trace::init(&settings.logging)?;

        log::info!("Starting {}", program_name);

        let controller = Self::init(settings).await?;

        Ok(Some(controller))
    }

    #[tracing::instrument(err, skip(settings))]
    async fn init(settings: Settings) -> Result<Self> {
        let settings = Arc::new(settings);

        db_storage::migrations::migrate_from_url(&settings.database.url)
            .await
            .context("Failed to migrate database")?;

        // Connect to postgres
        let db = Arc::new(
            Db::connect_url(
                &settings.database.url,
                settings.database.max_connections,
                Some(settings.database.min_idle_connections),
            )
            .context("Failed to connect to database")?,
        );

        let (shutdown, _) = broadcast::channel::<()>(1);

        Ok(Self {
            startup_settings: settings,
            db,
            shutdown,
        })
    }

    /// Reloads the catalog until a shutdown is requested (e.g. Ctrl-C).
    pub async fn run(self) -> Result<()> {
        let catalog = sync::spawn(
            Arc::new(DbCatalogSource::new(self.db.clone())),
            Arc::new(TracingNotifier),
            self.startup_settings.sync.interval,
            self.shutdown.subscribe(),
        );

        log::info!("Startup finished");

        let watcher = tokio::spawn(log_catalog_updates(catalog, self.shutdown.subscribe()));

        ctrl_c()
            .await
            .context("Failed to register termination signal handler")?;

        log::info!("Got termination signal, exiting");

        // ==== Begin shutdown sequence ====

        // Send shutdown signals to all tasks within our application
        let _ = self.shutdown.send(());

        // Check in a 1 second interval for 10 seconds if all tasks have exited
        // by inspecting the receiver count of the broadcast-channel
        for _ in 0..10 {
            let receiver_count = self.shutdown.receiver_count();

            if receiver_count > 0 {
                log::debug!("Waiting for {} tasks to be stopped", receiver_count);
                sleep(Duration::from_secs(1)).await;
            }
        }

        if watcher.await.is_err() {
            log::error!("Catalog watcher panicked");
        }

        if self.shutdown.receiver_count() > 0 {
            log::error!("Not all tasks stopped. Exiting anyway");
        } else {
            log::info!("All tasks stopped, goodbye!");
        }

        Ok(())
    }
}

async fn log_catalog_updates(
    mut catalog: watch::Receiver<Arc<Catalog>>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut last_failures = Vec::new();

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            changed = catalog.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        let snapshot = catalog.borrow_and_update().clone();

        let failures: Vec<String> = snapshot
            .readiness()
            .failures()
            .map(|(source, reason)| format!("{source}: {reason}"))
            .collect();

        if failures != last_failures {
            if failures.is_empty() {
                log::info!("All catalog sources recovered");
            } else {
                log::warn!("Catalog degraded, {}", failures.join(", "));
            }

            last_failures = failures;
        }

        log::debug!(
            "Catalog holds {} upcoming events and {} attendees",
            snapshot.events().len(),
            snapshot.roster().len()
        );
    }
}
