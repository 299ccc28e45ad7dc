// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use http_body_util::BodyExt;
use hyper::{Response, StatusCode, header};
use juniper::graphql_object;
use serde::Deserialize;

use crate::captcha;
use crate::db::models::{NewRegistration, Registration};
use crate::graphql::{BaseContext, Context};
use crate::store;

#[graphql_object]
impl Registration {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roll_no(&self) -> &str {
        &self.roll_no
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn sub_group(&self) -> &str {
        &self.sub_group
    }

    pub fn created_at(&self) -> String {
        self.created_at.to_rfc3339()
    }
}

pub async fn get_registrations(ctx: &Context) -> juniper::FieldResult<Vec<Registration>> {
    ctx.require_admin()?;
    Ok(store::list_registrations(&mut ctx.get_db_conn().await).await?)
}

/// CSV export of the currently stored registrations; derived data only,
/// never mutates the store.
pub async fn registrations_csv(ctx: &Context) -> juniper::FieldResult<String> {
    ctx.require_admin()?;
    let rows = store::list_registrations(&mut ctx.get_db_conn().await).await?;
    Ok(registrations_to_csv(&rows))
}

fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn registrations_to_csv(rows: &[Registration]) -> String {
    let mut csv =
        String::from("Roll Number,Full Name,Year,Department,Sub-Group,Registration Date\n");
    for row in rows {
        let fields = [
            csv_quote(&row.roll_no),
            csv_quote(&row.name),
            csv_quote(&row.year),
            csv_quote(&row.department),
            csv_quote(&row.sub_group),
            csv_quote(&row.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    csv
}

/// Roll numbers are exactly 10 alphanumeric characters. The check runs
/// server-side regardless of what the join page already validated.
pub fn roll_no_is_valid(roll_no: &str) -> bool {
    roll_no.len() == 10 && roll_no.chars().all(|c| c.is_ascii_alphanumeric())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub name: String,
    pub roll_no: String,
    pub year: String,
    pub department: String,
    pub sub_group: String,
    #[serde(default)]
    pub captcha: Option<String>,
}

fn json_response(status: StatusCode, body: serde_json::Value) -> Response<String> {
    let mut resp = Response::new(body.to_string());
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    resp
}

fn join_error(status: StatusCode, message: &str) -> Response<String> {
    json_response(status, serde_json::json!({ "error": message }))
}

/// `POST /api/join` — the public membership application flow. This is the
/// only writer of the registrations table.
pub async fn join_route(
    base: &BaseContext,
    req: hyper::Request<hyper::body::Incoming>,
) -> Response<String> {
    let bytes = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return join_error(StatusCode::BAD_REQUEST, "Unreadable request body"),
    };
    let request: JoinRequest = match serde_json::from_slice(&bytes) {
        Ok(request) => request,
        Err(_) => return join_error(StatusCode::BAD_REQUEST, "Malformed request body"),
    };

    if !roll_no_is_valid(&request.roll_no) {
        return join_error(
            StatusCode::BAD_REQUEST,
            "Invalid Roll Number. Roll numbers must be exactly 10 alphanumeric characters.",
        );
    }

    if !captcha::verify_solution(request.captcha.as_deref()) {
        return join_error(StatusCode::BAD_REQUEST, "Captcha verification failed.");
    }

    let roll_no = request.roll_no.to_uppercase();

    let mut conn = match base.db_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("no database connection for join request: {e}");
            return join_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    use crate::db::schema::registrations;

    let duplicate = registrations::table
        .filter(registrations::roll_no.eq(&roll_no))
        .select(Registration::as_select())
        .first(&mut conn)
        .await
        .optional();
    match duplicate {
        Ok(Some(_)) => {
            return join_error(
                StatusCode::BAD_REQUEST,
                "This Roll Number has already applied to join the club.",
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("duplicate check failed: {e}");
            return join_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    }

    let new_registration = NewRegistration {
        name: request.name,
        roll_no,
        year: request.year,
        department: request.department,
        sub_group: request.sub_group,
    };

    let inserted = diesel::insert_into(registrations::table)
        .values(&new_registration)
        .execute(&mut conn)
        .await;
    match inserted {
        Ok(_) => json_response(
            StatusCode::OK,
            serde_json::json!({
                "success": true,
                "message": "Application received and successfully stored.",
            }),
        ),
        // The unique constraint still catches a race between check and insert.
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => join_error(
            StatusCode::BAD_REQUEST,
            "This Roll Number has already applied to join the club.",
        ),
        Err(e) => {
            tracing::error!("failed to store registration: {e}");
            join_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_roll_no_validation() {
        assert!(roll_no_is_valid("22J25A3201"));
        assert!(roll_no_is_valid("abcde12345"));
        assert!(!roll_no_is_valid("22J25A320"));
        assert!(!roll_no_is_valid("22J25A32011"));
        assert!(!roll_no_is_valid("22J25A32-1"));
        assert!(!roll_no_is_valid(""));
    }

    #[test]
    fn test_join_request_uses_camel_case_keys() {
        let request: JoinRequest = serde_json::from_str(
            r#"{"name":"Asha","rollNo":"22j25a3201","year":"II","department":"CSE (Data Science)","subGroup":"AI/ML"}"#,
        )
        .unwrap();
        assert_eq!(request.roll_no, "22j25a3201");
        assert_eq!(request.sub_group, "AI/ML");
        assert_eq!(request.captcha, None);
    }

    #[test]
    fn test_csv_has_fixed_header_and_quoted_rows() {
        let rows = vec![Registration {
            id: 1,
            name: "Asha \"Ace\" Rao".to_string(),
            roll_no: "22J25A3201".to_string(),
            year: "II".to_string(),
            department: "CSE".to_string(),
            sub_group: "AI/ML".to_string(),
            created_at: chrono::Utc.with_ymd_and_hms(2026, 1, 20, 9, 30, 0).unwrap(),
        }];
        let csv = registrations_to_csv(&rows);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Roll Number,Full Name,Year,Department,Sub-Group,Registration Date")
        );
        assert_eq!(
            lines.next(),
            Some(
                "\"22J25A3201\",\"Asha \"\"Ace\"\" Rao\",\"II\",\"CSE\",\"AI/ML\",\"2026-01-20 09:30:00\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_csv_is_just_the_header() {
        let csv = registrations_to_csv(&[]);
        assert_eq!(
            csv,
            "Roll Number,Full Name,Year,Department,Sub-Group,Registration Date\n"
        );
    }
}
