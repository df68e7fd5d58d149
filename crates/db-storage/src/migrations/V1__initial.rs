// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use barrel::backend::Pg;
use barrel::{types, Migration};

pub fn migration() -> String {
    let mut migr = Migration::new();

    migr.create_table("events", |table| {
        table.add_column(
            "id",
            types::custom("UUID DEFAULT gen_random_uuid()").primary(true),
        );
        table.add_column("id_serial", types::custom("BIGSERIAL").unique(true));
        table.add_column("name", types::text().nullable(false));
        // calendar date without a time zone, compared at day granularity
        table.add_column("date", types::custom("DATE").nullable(false));
        table.add_column("start_time", types::custom("TIME").nullable(true));
        table.add_column("end_time", types::custom("TIME").nullable(true));
        table.add_column("location", types::text().nullable(true));
        table.add_column("responsible", types::text().nullable(true));
        table.add_column("notes", types::text().nullable(true));
        table.add_column(
            "created_at",
            types::custom("TIMESTAMPTZ DEFAULT now()").nullable(false),
        );
    });

    migr.create_table("classes", |table| {
        table.add_column("id", types::custom("BIGSERIAL").primary(true));
        table.add_column("name", types::text().nullable(false));
    });

    migr.create_table("class_students", |table| {
        table.add_column(
            "class_id",
            types::custom("BIGINT REFERENCES classes(id) ON DELETE CASCADE").nullable(false),
        );
        table.add_column("position", types::integer().nullable(false));
        table.add_column("code", types::text().nullable(false));
        table.add_column("name", types::text().nullable(false));
        table.inject_custom("PRIMARY KEY (class_id, position)");
    });

    migr.create_table("registrations", |table| {
        table.add_column(
            "id",
            types::custom("UUID DEFAULT gen_random_uuid()").primary(true),
        );
        table.add_column(
            "event_id",
            types::custom("UUID REFERENCES events(id) ON DELETE CASCADE").nullable(false),
        );
        table.add_column("attendee_code", types::text().nullable(false));
        table.add_column("attendee_name", types::text().nullable(false));
        table.add_column("attendee_group", types::text().nullable(false));
        table.add_column("event_name", types::text().nullable(false));
        table.add_column(
            "created_at",
            types::custom("TIMESTAMPTZ DEFAULT now()").nullable(false),
        );
        table.add_column("checked_in", types::custom("BOOLEAN DEFAULT false").nullable(false));
        // one registration per attendee and event, rejects racing inserts of other clients
        table.inject_custom("UNIQUE (event_id, attendee_code)");
    });

    migr.make::<Pg>()
}
