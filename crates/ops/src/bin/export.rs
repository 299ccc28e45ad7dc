// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! One-shot export of all member registrations to a CSV file, ordered by
//! roll number. Operator-invoked; reports through the exit code.

use diesel::prelude::*;

use nexus_api::db::models::Registration;
use nexus_api::db::schema::registrations;
use nexus_api::graphql::registrations_to_csv;

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "club_registrations.csv".to_string());

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

    let rows: Vec<Registration> = match registrations::table
        .order(registrations::roll_no.asc())
        .select(Registration::as_select())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to read registrations: {e}");
            std::process::exit(1);
        }
    };

    if rows.is_empty() {
        tracing::info!("No registrations stored yet. No CSV exported.");
        return;
    }

    let csv = registrations_to_csv(&rows);
    if let Err(e) = std::fs::write(&output_path, csv) {
        tracing::error!("Failed to write {output_path}: {e}");
        std::process::exit(1);
    }

    tracing::info!("Exported {} registrations to {output_path}", rows.len());
}
