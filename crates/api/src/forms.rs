// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Normalization of submitted form fields into persistence-ready records.
//!
//! The admin frontend submits every field as a string (arrays comma-joined,
//! checkboxes as their marker value). Each collection has a typed normalizer
//! that turns that flat bag into a change record for the store, plus the
//! inverse serialization used to seed an edit buffer from an existing row.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::models::{
    Event, EventChange, FacultyMember, FacultyMemberChange, Project, ProjectChange, SiteSettings,
    SiteSettingsChange, TeamMember, TeamMemberChange,
};

/// Fixed identity key of the singleton settings row.
pub const SETTINGS_ID: &str = "general";

/// Raw submitted form fields, keyed by field name.
pub type FormData = BTreeMap<String, String>;

#[derive(juniper::GraphQLEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Registrations,
    Events,
    Projects,
    Team,
    Faculty,
    Settings,
}

/// Column an upsert resolves duplicates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKey {
    Id,
    Slug,
}

pub fn insert_field(form: &mut FormData, name: &str, value: Option<String>) {
    if let Some(value) = value {
        form.insert(name.to_string(), value);
    }
}

/// Empty strings are never persisted; they signal "unset".
fn non_empty(form: &FormData, key: &str) -> Option<String> {
    form.get(key).filter(|v| !v.is_empty()).cloned()
}

/// A missing, empty, or literal `"undefined"` id means "insert new".
/// A value that does not parse as a UUID is treated the same way.
fn form_id(form: &FormData) -> Option<Uuid> {
    let raw = form.get("id")?;
    if raw.is_empty() || raw == "undefined" {
        return None;
    }
    Uuid::parse_str(raw).ok()
}

/// Comma-joined image URLs; whitespace trimmed, empty segments dropped.
/// An all-blank or absent field normalizes to `None`, not an empty list.
fn form_images(form: &FormData) -> Option<Vec<String>> {
    let raw = form.get("images")?;
    let urls: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if urls.is_empty() { None } else { Some(urls) }
}

/// Checkbox coercion: only the marker values count as set.
fn form_flag(form: &FormData, key: &str) -> bool {
    matches!(form.get(key).map(String::as_str), Some("on") | Some("true"))
}

/// Malformed numeric input silently defaults to 0 rather than failing.
fn form_int(form: &FormData, key: &str) -> i32 {
    form.get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn form_date(form: &FormData) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(form.get("date")?, "%Y-%m-%d").ok()
}

fn key_for(id: &Option<Uuid>) -> ConflictKey {
    if id.is_some() {
        ConflictKey::Id
    } else {
        ConflictKey::Slug
    }
}

pub fn normalize_event(form: &FormData) -> EventChange {
    EventChange {
        id: form_id(form),
        slug: non_empty(form, "slug"),
        title: non_empty(form, "title"),
        date: form_date(form),
        images: form_images(form),
        description: non_empty(form, "description"),
        link_url: non_empty(form, "link_url"),
    }
}

pub fn normalize_project(form: &FormData) -> ProjectChange {
    ProjectChange {
        id: form_id(form),
        slug: non_empty(form, "slug"),
        title: non_empty(form, "title"),
        description: non_empty(form, "description"),
        github_url: non_empty(form, "github_url"),
        linkedin_url: non_empty(form, "linkedin_url"),
        live_url: non_empty(form, "live_url"),
        images: form_images(form),
    }
}

pub fn normalize_team_member(form: &FormData) -> TeamMemberChange {
    TeamMemberChange {
        id: form_id(form),
        slug: non_empty(form, "slug"),
        name: non_empty(form, "name"),
        role: non_empty(form, "role"),
        photo: non_empty(form, "photo"),
        bio: non_empty(form, "bio"),
        linkedin: non_empty(form, "linkedin"),
        sort_order: form_int(form, "order"),
    }
}

pub fn normalize_faculty_member(form: &FormData) -> FacultyMemberChange {
    FacultyMemberChange {
        id: form_id(form),
        slug: non_empty(form, "slug"),
        name: non_empty(form, "name"),
        designation: non_empty(form, "designation"),
        photo: non_empty(form, "photo"),
        is_hod: form_flag(form, "is_hod"),
        sort_order: form_int(form, "order"),
    }
}

/// Settings always target the fixed identity key; a submitted `id` is
/// ignored rather than trusted.
pub fn normalize_settings(form: &FormData) -> SiteSettingsChange {
    SiteSettingsChange {
        id: SETTINGS_ID.to_string(),
        tagline: non_empty(form, "tagline"),
        years_active: form_int(form, "years_active"),
        founded_year: form_int(form, "founded_year"),
        instagram: non_empty(form, "instagram"),
        linkedin: non_empty(form, "linkedin"),
        github: non_empty(form, "github"),
    }
}

impl EventChange {
    pub fn conflict_key(&self) -> ConflictKey {
        key_for(&self.id)
    }

    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id.map(|id| id.to_string()));
        insert_field(&mut form, "slug", self.slug.clone());
        insert_field(&mut form, "title", self.title.clone());
        insert_field(
            &mut form,
            "date",
            self.date.map(|d| d.format("%Y-%m-%d").to_string()),
        );
        insert_field(&mut form, "images", self.images.as_ref().map(|i| i.join(",")));
        insert_field(&mut form, "description", self.description.clone());
        insert_field(&mut form, "link_url", self.link_url.clone());
        form
    }
}

impl ProjectChange {
    pub fn conflict_key(&self) -> ConflictKey {
        key_for(&self.id)
    }

    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id.map(|id| id.to_string()));
        insert_field(&mut form, "slug", self.slug.clone());
        insert_field(&mut form, "title", self.title.clone());
        insert_field(&mut form, "description", self.description.clone());
        insert_field(&mut form, "github_url", self.github_url.clone());
        insert_field(&mut form, "linkedin_url", self.linkedin_url.clone());
        insert_field(&mut form, "live_url", self.live_url.clone());
        insert_field(&mut form, "images", self.images.as_ref().map(|i| i.join(",")));
        form
    }
}

impl TeamMemberChange {
    pub fn conflict_key(&self) -> ConflictKey {
        key_for(&self.id)
    }

    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id.map(|id| id.to_string()));
        insert_field(&mut form, "slug", self.slug.clone());
        insert_field(&mut form, "name", self.name.clone());
        insert_field(&mut form, "role", self.role.clone());
        insert_field(&mut form, "photo", self.photo.clone());
        insert_field(&mut form, "bio", self.bio.clone());
        insert_field(&mut form, "linkedin", self.linkedin.clone());
        form.insert("order".to_string(), self.sort_order.to_string());
        form
    }
}

impl FacultyMemberChange {
    pub fn conflict_key(&self) -> ConflictKey {
        key_for(&self.id)
    }

    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id.map(|id| id.to_string()));
        insert_field(&mut form, "slug", self.slug.clone());
        insert_field(&mut form, "name", self.name.clone());
        insert_field(&mut form, "designation", self.designation.clone());
        insert_field(&mut form, "photo", self.photo.clone());
        // Unchecked checkboxes submit nothing at all.
        if self.is_hod {
            form.insert("is_hod".to_string(), "true".to_string());
        }
        form.insert("order".to_string(), self.sort_order.to_string());
        form
    }
}

impl SiteSettingsChange {
    pub fn conflict_key(&self) -> ConflictKey {
        ConflictKey::Id
    }

    pub fn to_form(&self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "tagline", self.tagline.clone());
        form.insert("years_active".to_string(), self.years_active.to_string());
        form.insert("founded_year".to_string(), self.founded_year.to_string());
        insert_field(&mut form, "instagram", self.instagram.clone());
        insert_field(&mut form, "linkedin", self.linkedin.clone());
        insert_field(&mut form, "github", self.github.clone());
        form
    }
}

impl From<&Event> for EventChange {
    fn from(row: &Event) -> Self {
        EventChange {
            id: Some(row.id),
            slug: Some(row.slug.clone()),
            title: Some(row.title.clone()),
            date: Some(row.date),
            images: row.images.clone(),
            description: row.description.clone(),
            link_url: row.link_url.clone(),
        }
    }
}

impl From<&Project> for ProjectChange {
    fn from(row: &Project) -> Self {
        ProjectChange {
            id: Some(row.id),
            slug: Some(row.slug.clone()),
            title: Some(row.title.clone()),
            description: row.description.clone(),
            github_url: row.github_url.clone(),
            linkedin_url: row.linkedin_url.clone(),
            live_url: row.live_url.clone(),
            images: row.images.clone(),
        }
    }
}

impl From<&TeamMember> for TeamMemberChange {
    fn from(row: &TeamMember) -> Self {
        TeamMemberChange {
            id: Some(row.id),
            slug: Some(row.slug.clone()),
            name: Some(row.name.clone()),
            role: Some(row.role.clone()),
            photo: row.photo.clone(),
            bio: row.bio.clone(),
            linkedin: row.linkedin.clone(),
            sort_order: row.sort_order,
        }
    }
}

impl From<&FacultyMember> for FacultyMemberChange {
    fn from(row: &FacultyMember) -> Self {
        FacultyMemberChange {
            id: Some(row.id),
            slug: Some(row.slug.clone()),
            name: Some(row.name.clone()),
            designation: Some(row.designation.clone()),
            photo: row.photo.clone(),
            is_hod: row.is_hod,
            sort_order: row.sort_order,
        }
    }
}

impl From<&SiteSettings> for SiteSettingsChange {
    fn from(row: &SiteSettings) -> Self {
        SiteSettingsChange {
            id: SETTINGS_ID.to_string(),
            tagline: row.tagline.clone(),
            years_active: row.years_active,
            founded_year: row.founded_year,
            instagram: row.instagram.clone(),
            linkedin: row.linkedin.clone(),
            github: row.github.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> FormData {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_images_are_split_trimmed_and_filtered() {
        let change = normalize_event(&form(&[("images", "a.png, b.png ,,c.png")]));
        assert_eq!(
            change.images,
            Some(vec![
                "a.png".to_string(),
                "b.png".to_string(),
                "c.png".to_string()
            ])
        );
    }

    #[test]
    fn test_blank_or_absent_images_normalize_to_null() {
        assert_eq!(normalize_event(&form(&[("images", " , ,")])).images, None);
        assert_eq!(normalize_event(&form(&[])).images, None);
    }

    #[test]
    fn test_empty_strings_become_null() {
        let change = normalize_project(&form(&[
            ("title", "Telemetry Dashboard"),
            ("github_url", ""),
            ("description", ""),
        ]));
        assert_eq!(change.title.as_deref(), Some("Telemetry Dashboard"));
        assert_eq!(change.github_url, None);
        assert_eq!(change.description, None);
    }

    #[test]
    fn test_unusable_ids_are_dropped() {
        for raw in ["", "undefined", "not-a-uuid"] {
            let change = normalize_event(&form(&[("id", raw), ("slug", "x")]));
            assert_eq!(change.id, None, "id {raw:?} should be dropped");
            assert_eq!(change.conflict_key(), ConflictKey::Slug);
        }
    }

    #[test]
    fn test_present_id_wins_the_conflict_key() {
        let id = Uuid::now_v7();
        let change = normalize_event(&form(&[("id", &id.to_string()), ("slug", "x")]));
        assert_eq!(change.id, Some(id));
        assert_eq!(change.conflict_key(), ConflictKey::Id);
    }

    #[test]
    fn test_hod_flag_coercion() {
        assert!(normalize_faculty_member(&form(&[("is_hod", "on")])).is_hod);
        assert!(normalize_faculty_member(&form(&[("is_hod", "true")])).is_hod);
        assert!(!normalize_faculty_member(&form(&[("is_hod", "yes")])).is_hod);
        assert!(!normalize_faculty_member(&form(&[("is_hod", "")])).is_hod);
        assert!(!normalize_faculty_member(&form(&[])).is_hod);
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        assert_eq!(normalize_team_member(&form(&[("order", "abc")])).sort_order, 0);
        assert_eq!(normalize_team_member(&form(&[("order", "7")])).sort_order, 7);
        assert_eq!(normalize_settings(&form(&[("years_active", "two")])).years_active, 0);
    }

    #[test]
    fn test_settings_always_upsert_the_singleton() {
        let change = normalize_settings(&form(&[
            ("id", "8b33a6b2-2f9f-4d8e-9a47-123456789abc"),
            ("tagline", "Driven by data"),
        ]));
        assert_eq!(change.id, SETTINGS_ID);
        assert_eq!(change.conflict_key(), ConflictKey::Id);
    }

    #[test]
    fn test_create_event_scenario() {
        let change = normalize_event(&form(&[
            ("title", "AI Bootcamp"),
            ("slug", "ai-bootcamp-2026"),
            ("date", "2026-03-15"),
            ("images", "http://x/1.png, http://x/2.png"),
            ("description", "Intro to AI"),
        ]));
        assert_eq!(change.id, None);
        assert_eq!(change.conflict_key(), ConflictKey::Slug);
        assert_eq!(
            change.images,
            Some(vec!["http://x/1.png".to_string(), "http://x/2.png".to_string()])
        );
        assert_eq!(change.date, Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
        assert_eq!(change.title.as_deref(), Some("AI Bootcamp"));
    }

    #[test]
    fn test_bad_date_is_dropped() {
        assert_eq!(normalize_event(&form(&[("date", "15/03/2026")])).date, None);
    }

    #[test]
    fn test_event_normalization_is_idempotent() {
        let first = normalize_event(&form(&[
            ("title", "AI Bootcamp"),
            ("slug", "ai-bootcamp-2026"),
            ("date", "2026-03-15"),
            ("images", " http://x/1.png ,, http://x/2.png"),
            ("link_url", ""),
        ]));
        let second = normalize_event(&first.to_form());
        assert_eq!(first, second);
    }

    #[test]
    fn test_faculty_normalization_is_idempotent() {
        let first = normalize_faculty_member(&form(&[
            ("name", "Dr. Rao"),
            ("slug", "dr-rao"),
            ("designation", "Professor"),
            ("is_hod", "on"),
            ("order", "junk"),
        ]));
        let second = normalize_faculty_member(&first.to_form());
        assert_eq!(first, second);
    }

    #[test]
    fn test_settings_normalization_is_idempotent() {
        let first = normalize_settings(&form(&[
            ("tagline", "Driven by data"),
            ("years_active", "3"),
            ("founded_year", "2024"),
            ("instagram", ""),
        ]));
        let second = normalize_settings(&first.to_form());
        assert_eq!(first, second);
    }

    #[test]
    fn test_edit_buffer_round_trips_a_row() {
        let row = Event {
            id: Uuid::now_v7(),
            slug: "hack-night".to_string(),
            title: "Hack Night".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            images: Some(vec!["http://x/a.png".to_string()]),
            description: None,
            link_url: Some("https://example.com/signup".to_string()),
        };
        let change = normalize_event(&EventChange::from(&row).to_form());
        assert_eq!(change.id, Some(row.id));
        assert_eq!(change.slug.as_deref(), Some("hack-night"));
        assert_eq!(change.description, None);
        assert_eq!(change.images, row.images);
    }
}
