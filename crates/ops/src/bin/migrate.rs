// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! One-shot migration of the legacy Markdown content tree into the store.
//! Walks `content/{team,events,faculty}` plus `content/settings/general.md`,
//! upserting each document on its slug. Exit code 1 if anything failed.

use std::path::Path;

use diesel::prelude::*;

use nexus_api::db::schema::{events, faculty, settings, team};
use nexus_ops::frontmatter;
use nexus_ops::legacy;
use nexus_ops::legacy::{file_slug, markdown_files};

fn migrate_team(conn: &mut PgConnection, dir: &Path, failures: &mut usize) {
    for path in markdown_files(dir) {
        let slug = file_slug(&path);
        let result = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                frontmatter::parse::<legacy::TeamFront>(&contents).map_err(|e| e.to_string())
            })
            .and_then(|(front, _)| {
                let change = legacy::team_change(slug.clone(), front);
                diesel::insert_into(team::table)
                    .values(&change)
                    .on_conflict(team::slug)
                    .do_update()
                    .set(&change)
                    .execute(conn)
                    .map_err(|e| e.to_string())
            });
        match result {
            Ok(_) => tracing::info!("Migrated team member: {slug}"),
            Err(e) => {
                tracing::error!("Failed to migrate team member {slug}: {e}");
                *failures += 1;
            }
        }
    }
}

fn migrate_events(conn: &mut PgConnection, dir: &Path, failures: &mut usize) {
    let fallback_date = chrono::Utc::now().date_naive();
    for path in markdown_files(dir) {
        let slug = file_slug(&path);
        let result = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                frontmatter::parse::<legacy::EventFront>(&contents).map_err(|e| e.to_string())
            })
            .and_then(|(front, body)| {
                let change = legacy::event_change(slug.clone(), front, &body, fallback_date);
                diesel::insert_into(events::table)
                    .values(&change)
                    .on_conflict(events::slug)
                    .do_update()
                    .set(&change)
                    .execute(conn)
                    .map_err(|e| e.to_string())
            });
        match result {
            Ok(_) => tracing::info!("Migrated event: {slug}"),
            Err(e) => {
                tracing::error!("Failed to migrate event {slug}: {e}");
                *failures += 1;
            }
        }
    }
}

fn migrate_faculty(conn: &mut PgConnection, dir: &Path, failures: &mut usize) {
    for path in markdown_files(dir) {
        let slug = file_slug(&path);
        let result = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                frontmatter::parse::<legacy::FacultyFront>(&contents).map_err(|e| e.to_string())
            })
            .and_then(|(front, _)| {
                let change = legacy::faculty_change(slug.clone(), front);
                diesel::insert_into(faculty::table)
                    .values(&change)
                    .on_conflict(faculty::slug)
                    .do_update()
                    .set(&change)
                    .execute(conn)
                    .map_err(|e| e.to_string())
            });
        match result {
            Ok(_) => tracing::info!("Migrated faculty member: {slug}"),
            Err(e) => {
                tracing::error!("Failed to migrate faculty member {slug}: {e}");
                *failures += 1;
            }
        }
    }
}

fn migrate_settings(conn: &mut PgConnection, content_dir: &Path, failures: &mut usize) {
    let path = content_dir.join("settings").join("general.md");
    if !path.exists() {
        return;
    }
    let result = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|contents| {
            frontmatter::parse::<legacy::SettingsFront>(&contents).map_err(|e| e.to_string())
        })
        .and_then(|(front, _)| {
            let change = legacy::settings_change(front);
            diesel::insert_into(settings::table)
                .values(&change)
                .on_conflict(settings::id)
                .do_update()
                .set(&change)
                .execute(conn)
                .map_err(|e| e.to_string())
        });
    match result {
        Ok(_) => tracing::info!("Migrated general settings"),
        Err(e) => {
            tracing::error!("Failed to migrate settings: {e}");
            *failures += 1;
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let content_dir = std::env::args().nth(1).unwrap_or_else(|| "content".to_string());
    let content_dir = Path::new(&content_dir);

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("DATABASE_URL must be set");
            std::process::exit(1);
        }
    };
    let mut conn = match PgConnection::establish(&database_url) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let mut failures = 0usize;
    migrate_team(&mut conn, &content_dir.join("team"), &mut failures);
    migrate_events(&mut conn, &content_dir.join("events"), &mut failures);
    migrate_faculty(&mut conn, &content_dir.join("faculty"), &mut failures);
    migrate_settings(&mut conn, content_dir, &mut failures);

    if failures > 0 {
        tracing::error!("Migration finished with {failures} failed documents");
        std::process::exit(1);
    }
    tracing::info!("Migration finished");
}
