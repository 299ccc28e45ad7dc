// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Table-level access to the content store. Every collection offers an
//! ordered select-all, an upsert against its derived conflict key, and a
//! delete-by-id; the settings row only ever upserts against its fixed key.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::models::{
    Event, EventChange, FacultyMember, FacultyMemberChange, Project, ProjectChange, Registration,
    SiteSettings, SiteSettingsChange, TeamMember, TeamMemberChange,
};
use crate::db::schema::{events, faculty, projects, registrations, settings, team};
use crate::forms::ConflictKey;

pub type Conn<'a> =
    diesel_async::pooled_connection::bb8::PooledConnection<'a, diesel_async::AsyncPgConnection>;

pub async fn list_registrations(conn: &mut Conn<'_>) -> QueryResult<Vec<Registration>> {
    registrations::table
        .order(registrations::created_at.desc())
        .select(Registration::as_select())
        .load(conn)
        .await
}

pub async fn list_events(conn: &mut Conn<'_>) -> QueryResult<Vec<Event>> {
    events::table
        .order(events::date.desc())
        .select(Event::as_select())
        .load(conn)
        .await
}

pub async fn list_projects(conn: &mut Conn<'_>) -> QueryResult<Vec<Project>> {
    projects::table
        .order(projects::created_at.desc())
        .select(Project::as_select())
        .load(conn)
        .await
}

pub async fn list_team(conn: &mut Conn<'_>) -> QueryResult<Vec<TeamMember>> {
    team::table
        .order((team::sort_order.asc(), team::slug.asc()))
        .select(TeamMember::as_select())
        .load(conn)
        .await
}

pub async fn list_faculty(conn: &mut Conn<'_>) -> QueryResult<Vec<FacultyMember>> {
    faculty::table
        .order((faculty::sort_order.asc(), faculty::slug.asc()))
        .select(FacultyMember::as_select())
        .load(conn)
        .await
}

pub async fn get_settings(conn: &mut Conn<'_>) -> QueryResult<Option<SiteSettings>> {
    settings::table
        .select(SiteSettings::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn upsert_event(conn: &mut Conn<'_>, change: &EventChange) -> QueryResult<Event> {
    match change.conflict_key() {
        ConflictKey::Id => {
            diesel::insert_into(events::table)
                .values(change)
                .on_conflict(events::id)
                .do_update()
                .set(change)
                .returning(Event::as_returning())
                .get_result(conn)
                .await
        }
        ConflictKey::Slug => {
            diesel::insert_into(events::table)
                .values(change)
                .on_conflict(events::slug)
                .do_update()
                .set(change)
                .returning(Event::as_returning())
                .get_result(conn)
                .await
        }
    }
}

pub async fn upsert_project(conn: &mut Conn<'_>, change: &ProjectChange) -> QueryResult<Project> {
    match change.conflict_key() {
        ConflictKey::Id => {
            diesel::insert_into(projects::table)
                .values(change)
                .on_conflict(projects::id)
                .do_update()
                .set(change)
                .returning(Project::as_returning())
                .get_result(conn)
                .await
        }
        ConflictKey::Slug => {
            diesel::insert_into(projects::table)
                .values(change)
                .on_conflict(projects::slug)
                .do_update()
                .set(change)
                .returning(Project::as_returning())
                .get_result(conn)
                .await
        }
    }
}

pub async fn upsert_team_member(
    conn: &mut Conn<'_>,
    change: &TeamMemberChange,
) -> QueryResult<TeamMember> {
    match change.conflict_key() {
        ConflictKey::Id => {
            diesel::insert_into(team::table)
                .values(change)
                .on_conflict(team::id)
                .do_update()
                .set(change)
                .returning(TeamMember::as_returning())
                .get_result(conn)
                .await
        }
        ConflictKey::Slug => {
            diesel::insert_into(team::table)
                .values(change)
                .on_conflict(team::slug)
                .do_update()
                .set(change)
                .returning(TeamMember::as_returning())
                .get_result(conn)
                .await
        }
    }
}

pub async fn upsert_faculty_member(
    conn: &mut Conn<'_>,
    change: &FacultyMemberChange,
) -> QueryResult<FacultyMember> {
    match change.conflict_key() {
        ConflictKey::Id => {
            diesel::insert_into(faculty::table)
                .values(change)
                .on_conflict(faculty::id)
                .do_update()
                .set(change)
                .returning(FacultyMember::as_returning())
                .get_result(conn)
                .await
        }
        ConflictKey::Slug => {
            diesel::insert_into(faculty::table)
                .values(change)
                .on_conflict(faculty::slug)
                .do_update()
                .set(change)
                .returning(FacultyMember::as_returning())
                .get_result(conn)
                .await
        }
    }
}

pub async fn upsert_settings(
    conn: &mut Conn<'_>,
    change: &SiteSettingsChange,
) -> QueryResult<SiteSettings> {
    diesel::insert_into(settings::table)
        .values(change)
        .on_conflict(settings::id)
        .do_update()
        .set(change)
        .returning(SiteSettings::as_returning())
        .get_result(conn)
        .await
}

pub async fn find_event(conn: &mut Conn<'_>, id: Uuid) -> QueryResult<Option<Event>> {
    events::table
        .filter(events::id.eq(id))
        .select(Event::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn find_project(conn: &mut Conn<'_>, id: Uuid) -> QueryResult<Option<Project>> {
    projects::table
        .filter(projects::id.eq(id))
        .select(Project::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn find_team_member(conn: &mut Conn<'_>, id: Uuid) -> QueryResult<Option<TeamMember>> {
    team::table
        .filter(team::id.eq(id))
        .select(TeamMember::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn find_faculty_member(
    conn: &mut Conn<'_>,
    id: Uuid,
) -> QueryResult<Option<FacultyMember>> {
    faculty::table
        .filter(faculty::id.eq(id))
        .select(FacultyMember::as_select())
        .first(conn)
        .await
        .optional()
}

pub async fn delete_registration(conn: &mut Conn<'_>, id: i32) -> QueryResult<usize> {
    diesel::delete(registrations::table.filter(registrations::id.eq(id)))
        .execute(conn)
        .await
}

pub async fn delete_event(conn: &mut Conn<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::delete(events::table.filter(events::id.eq(id)))
        .execute(conn)
        .await
}

pub async fn delete_project(conn: &mut Conn<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::delete(projects::table.filter(projects::id.eq(id)))
        .execute(conn)
        .await
}

pub async fn delete_team_member(conn: &mut Conn<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::delete(team::table.filter(team::id.eq(id)))
        .execute(conn)
        .await
}

pub async fn delete_faculty_member(conn: &mut Conn<'_>, id: Uuid) -> QueryResult<usize> {
    diesel::delete(faculty::table.filter(faculty::id.eq(id)))
        .execute(conn)
        .await
}
