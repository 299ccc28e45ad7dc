// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, NaiveDate, Utc};
use diesel::associations::Identifiable;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::*;

/* =========================
 * REGISTRATIONS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Registration {
    pub id: i32,
    pub name: String,
    pub roll_no: String,
    pub year: String,
    pub department: String,
    pub sub_group: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = registrations)]
pub struct NewRegistration {
    pub name: String,
    pub roll_no: String,
    pub year: String,
    pub department: String,
    pub sub_group: String,
}

/* =========================
 * EVENTS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Event {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub link_url: Option<String>,
}

/// Full-record write for an event, as produced by the form normalizer.
/// `None` means "unset": with `treat_none_as_null` an update clears the
/// column rather than leaving it untouched.
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = events)]
#[diesel(treat_none_as_null = true)]
pub struct EventChange {
    pub id: Option<Uuid>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub link_url: Option<String>,
}

/* =========================
 * PROJECTS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub live_url: Option<String>,
    pub images: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChange {
    pub id: Option<Uuid>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub live_url: Option<String>,
    pub images: Option<Vec<String>>,
}

/* =========================
 * TEAM
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = team)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamMember {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub role: String,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    pub sort_order: i32,
}

#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = team)]
#[diesel(treat_none_as_null = true)]
pub struct TeamMemberChange {
    pub id: Option<Uuid>,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    pub sort_order: i32,
}

/* =========================
 * FACULTY
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = faculty)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FacultyMember {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub designation: String,
    pub photo: Option<String>,
    pub is_hod: bool,
    pub sort_order: i32,
}

#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = faculty)]
#[diesel(treat_none_as_null = true)]
pub struct FacultyMemberChange {
    pub id: Option<Uuid>,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub designation: Option<String>,
    pub photo: Option<String>,
    pub is_hod: bool,
    pub sort_order: i32,
}

/* =========================
 * SETTINGS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SiteSettings {
    pub id: String,
    pub tagline: Option<String>,
    pub years_active: i32,
    pub founded_year: i32,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// The settings row is a singleton: `id` is always the fixed identity key,
/// regardless of what the submitted form carried.
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = settings)]
#[diesel(treat_none_as_null = true)]
pub struct SiteSettingsChange {
    pub id: String,
    pub tagline: Option<String>,
    pub years_active: i32,
    pub founded_year: i32,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}
