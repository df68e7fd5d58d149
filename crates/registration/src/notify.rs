// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! User facing notifications

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A message for the user
///
/// Persistent notifications stay visible until dismissed, all others disappear on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub persistent: bool,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            persistent: false,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
            persistent: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            persistent: false,
        }
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }
}

/// Delivers notifications to whatever presents them
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success | Level::Info => {
                tracing::info!(persistent = notification.persistent, "{}", notification.message)
            }
            Level::Error => {
                tracing::warn!(persistent = notification.persistent, "{}", notification.message)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_util::assert_eq_json;

    #[test]
    fn notification_json() {
        let notification = Notification::error("Roster could not be loaded").persistent();

        assert_eq_json!(
            notification,
            {
                "level": "error",
                "message": "Roster could not be loaded",
                "persistent": true,
            }
        );
    }

    #[test]
    fn info_is_transient() {
        assert_eq_json!(
            Notification::info("Roster is available again"),
            {
                "level": "info",
                "message": "Roster is available again",
                "persistent": false,
            }
        );
    }
}
