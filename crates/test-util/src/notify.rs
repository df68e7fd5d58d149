// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use parking_lot::Mutex;
use registration::notify::Level;
use registration::{Notification, Notifier};

/// Keeps every notification for later inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .iter()
            .filter(|n| n.level == Level::Error)
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}
