// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shapes of the legacy Markdown documents and their conversion into store
//! change records. The legacy tree used per-kind defaults and a few quirks
//! (`isHOD`, images as a single string) that are preserved here.

use chrono::NaiveDate;
use serde::Deserialize;
use slugify::slugify;

use nexus_api::db::models::{
    EventChange, FacultyMemberChange, SiteSettingsChange, TeamMemberChange,
};
use nexus_api::forms::SETTINGS_ID;

/// Markdown documents of one content kind, in a stable order.
pub fn markdown_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    files
}

/// The record slug is the document's file name, sanitized.
pub fn file_slug(path: &std::path::Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    slugify!(&stem)
}

/// Legacy frontmatter sometimes stored a single image as a bare string.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ImagesField {
    One(String),
    Many(Vec<String>),
}

impl ImagesField {
    fn into_vec(self) -> Vec<String> {
        match self {
            ImagesField::One(image) => vec![image],
            ImagesField::Many(images) => images,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct TeamFront {
    pub name: Option<String>,
    pub role: Option<String>,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    #[serde(default)]
    pub order: i32,
}

pub fn team_change(slug: String, front: TeamFront) -> TeamMemberChange {
    TeamMemberChange {
        id: None,
        slug: Some(slug),
        name: Some(front.name.unwrap_or_else(|| "Unknown".to_string())),
        role: Some(front.role.unwrap_or_else(|| "Member".to_string())),
        photo: front.photo,
        bio: front.bio,
        linkedin: front.linkedin,
        sort_order: front.order,
    }
}

#[derive(Deserialize, Debug)]
pub struct EventFront {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(default)]
    pub images: Option<ImagesField>,
    pub description: Option<String>,
}

pub fn event_change(
    slug: String,
    front: EventFront,
    body: &str,
    fallback_date: NaiveDate,
) -> EventChange {
    let description = front.description.or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        }
    });
    EventChange {
        id: None,
        slug: Some(slug),
        title: Some(front.title.unwrap_or_else(|| "Untitled Event".to_string())),
        date: Some(
            front
                .date
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
                .unwrap_or(fallback_date),
        ),
        images: front
            .images
            .map(ImagesField::into_vec)
            .filter(|images| !images.is_empty()),
        description,
        link_url: None,
    }
}

#[derive(Deserialize, Debug)]
pub struct FacultyFront {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub photo: Option<String>,
    #[serde(rename = "isHOD", default)]
    pub is_hod: bool,
    #[serde(default)]
    pub order: i32,
}

pub fn faculty_change(slug: String, front: FacultyFront) -> FacultyMemberChange {
    FacultyMemberChange {
        id: None,
        slug: Some(slug),
        name: Some(front.name.unwrap_or_else(|| "Unknown".to_string())),
        designation: Some(front.designation.unwrap_or_else(|| "Faculty".to_string())),
        photo: front.photo,
        is_hod: front.is_hod,
        sort_order: front.order,
    }
}

#[derive(Deserialize, Debug)]
pub struct SettingsFront {
    pub tagline: Option<String>,
    #[serde(default)]
    pub years_active: i32,
    #[serde(default)]
    pub founded_year: i32,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

pub fn settings_change(front: SettingsFront) -> SiteSettingsChange {
    SiteSettingsChange {
        id: SETTINGS_ID.to_string(),
        tagline: front.tagline,
        years_active: front.years_active,
        founded_year: front.founded_year,
        instagram: front.instagram,
        linkedin: front.linkedin,
        github: front.github,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter;

    #[test]
    fn test_team_documents_get_legacy_defaults() {
        let doc = "---\nphoto: /images/asha.png\norder: 3\n---\n";
        let (front, _) = frontmatter::parse::<TeamFront>(doc).unwrap();
        let change = team_change("asha-rao".to_string(), front);
        assert_eq!(change.slug.as_deref(), Some("asha-rao"));
        assert_eq!(change.name.as_deref(), Some("Unknown"));
        assert_eq!(change.role.as_deref(), Some("Member"));
        assert_eq!(change.sort_order, 3);
        assert_eq!(change.id, None);
    }

    #[test]
    fn test_event_single_string_image_and_body_description() {
        let doc = "---\ntitle: Hack Night\ndate: \"2025-11-02\"\nimages: /images/hack.png\n---\nAn evening of building.\n";
        let (front, body) = frontmatter::parse::<EventFront>(doc).unwrap();
        let fallback = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let change = event_change("hack-night".to_string(), front, &body, fallback);
        assert_eq!(change.images, Some(vec!["/images/hack.png".to_string()]));
        assert_eq!(change.date, NaiveDate::from_ymd_opt(2025, 11, 2));
        assert_eq!(change.description.as_deref(), Some("An evening of building."));
    }

    #[test]
    fn test_event_with_unparseable_date_uses_fallback() {
        let doc = "---\ntitle: Hack Night\ndate: soon\n---\n";
        let (front, body) = frontmatter::parse::<EventFront>(doc).unwrap();
        let fallback = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let change = event_change("hack-night".to_string(), front, &body, fallback);
        assert_eq!(change.date, Some(fallback));
        assert_eq!(change.description, None);
        assert_eq!(change.images, None);
    }

    #[test]
    fn test_faculty_legacy_hod_key() {
        let doc = "---\nname: Dr. Rao\nisHOD: true\n---\n";
        let (front, _) = frontmatter::parse::<FacultyFront>(doc).unwrap();
        let change = faculty_change("dr-rao".to_string(), front);
        assert!(change.is_hod);
        assert_eq!(change.designation.as_deref(), Some("Faculty"));
    }

    #[test]
    fn test_markdown_files_are_filtered_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zeta.md"), "---\n---\n").unwrap();
        std::fs::write(dir.path().join("alpha.md"), "---\n---\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = markdown_files(dir.path());
        let names: Vec<String> = files.iter().map(|p| file_slug(p)).collect();
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);

        assert!(markdown_files(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn test_file_slug_sanitizes_the_stem() {
        assert_eq!(
            file_slug(std::path::Path::new("content/team/Asha Rao.md")),
            "asha-rao"
        );
    }

    #[test]
    fn test_settings_target_the_fixed_key() {
        let doc = "---\ntagline: Driven by data\nyears_active: 2\nfounded_year: 2024\n---\n";
        let (front, _) = frontmatter::parse::<SettingsFront>(doc).unwrap();
        let change = settings_change(front);
        assert_eq!(change.id, SETTINGS_ID);
        assert_eq!(change.years_active, 2);
    }
}
