// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Class rosters
//!
//! Rosters are imported by an external tool, the portal only reads them. Insertion is
//! provided for seeding and tests.

use crate::schema::{class_students, classes};
use database::{DatabaseError, DbConnection, Result};
use diesel::{Connection, ExpressionMethods, Insertable, QueryDsl, Queryable, RunQueryDsl};
use types::core::{AttendeeCode, GroupName};
use types::roster::{ClassRoster, RosterEntry};

#[derive(Debug, Clone, Queryable)]
pub struct Class {
    pub id: i64,
    pub name: GroupName,
}

#[derive(Debug, Clone, Queryable)]
pub struct ClassStudent {
    pub class_id: i64,
    pub position: i32,
    pub code: AttendeeCode,
    pub name: String,
}

/// Loads all classes with their students, both in roster order
#[tracing::instrument(err, skip_all)]
pub fn load_rosters(conn: &mut DbConnection) -> Result<Vec<ClassRoster>> {
    let classes: Vec<Class> = classes::table.order_by(classes::id.asc()).load(conn)?;

    let students: Vec<ClassStudent> = class_students::table
        .order_by((class_students::class_id.asc(), class_students::position.asc()))
        .load(conn)?;

    Ok(group_students(classes, students))
}

/// Attaches every student to its class, keeping the order of both inputs
///
/// Students of unknown classes are dropped.
fn group_students(classes: Vec<Class>, students: Vec<ClassStudent>) -> Vec<ClassRoster> {
    let mut rosters: Vec<(i64, ClassRoster)> = classes
        .into_iter()
        .map(|class| {
            (
                class.id,
                ClassRoster {
                    name: class.name,
                    students: Vec::new(),
                },
            )
        })
        .collect();

    for student in students {
        match rosters.iter_mut().find(|(id, _)| *id == student.class_id) {
            Some((_, roster)) => roster.students.push(RosterEntry {
                code: student.code,
                name: student.name,
            }),
            None => log::warn!(
                "Dropping student at position {} of unknown class {}",
                student.position,
                student.class_id
            ),
        }
    }

    rosters.into_iter().map(|(_, roster)| roster).collect()
}

#[derive(Debug, Insertable)]
#[diesel(table_name = classes)]
struct NewClass {
    name: GroupName,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = class_students)]
struct NewClassStudent {
    class_id: i64,
    position: i32,
    code: AttendeeCode,
    name: String,
}

/// Inserts a whole class roster in a single transaction
#[tracing::instrument(err, skip_all)]
pub fn insert_roster(conn: &mut DbConnection, roster: &ClassRoster) -> Result<Class> {
    conn.transaction::<_, DatabaseError, _>(|conn| {
        let class: Class = NewClass {
            name: roster.name.clone(),
        }
        .insert_into(classes::table)
        .get_result(conn)?;

        let students: Vec<NewClassStudent> = roster
            .students
            .iter()
            .zip(0..)
            .map(|(student, position)| NewClassStudent {
                class_id: class.id,
                position,
                code: student.code.clone(),
                name: student.name.clone(),
            })
            .collect();

        diesel::insert_into(class_students::table)
            .values(&students)
            .execute(conn)?;

        Ok(class)
    })
}
