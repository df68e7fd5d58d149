// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Simple newtypes shared by the storage layer and the registration core.

mod attendee_code;
mod event_id;
mod group_name;
mod registration_id;

pub use attendee_code::AttendeeCode;
pub use event_id::EventId;
pub use group_name::GroupName;
pub use registration_id::RegistrationId;
