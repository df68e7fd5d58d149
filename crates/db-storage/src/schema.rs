// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

diesel::table! {
    use diesel::sql_types::*;

    class_students (class_id, position) {
        class_id -> Int8,
        position -> Int4,
        code -> Text,
        name -> Text,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    classes (id) {
        id -> Int8,
        name -> Text,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    events (id) {
        id -> Uuid,
        id_serial -> Int8,
        name -> Text,
        date -> Date,
        start_time -> Nullable<Time>,
        end_time -> Nullable<Time>,
        location -> Nullable<Text>,
        responsible -> Nullable<Text>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    registrations (id) {
        id -> Uuid,
        event_id -> Uuid,
        attendee_code -> Text,
        attendee_name -> Text,
        attendee_group -> Text,
        event_name -> Text,
        created_at -> Timestamptz,
        checked_in -> Bool,
    }
}

diesel::joinable!(class_students -> classes (class_id));
diesel::joinable!(registrations -> events (event_id));

diesel::allow_tables_to_appear_in_same_query!(class_students, classes, events, registrations,);
