// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod events;
pub mod faculty;
pub mod projects;
pub mod registrations;
pub mod session;
pub mod settings;
pub mod team;
pub mod uploads;

use juniper::FieldResult;
use uuid::Uuid;

use crate::db::models::{
    EventChange, FacultyMemberChange, ProjectChange, SiteSettingsChange, TeamMemberChange,
};
use crate::forms::{Collection, FormData};
use crate::graphql::Context;
use crate::store;

/// One raw form field, as the admin frontend submits and re-displays it.
#[derive(juniper::GraphQLObject)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

pub fn form_fields(form: FormData) -> Vec<FormField> {
    form.into_iter()
        .map(|(name, value)| FormField { name, value })
        .collect()
}

/// Store rejections surface verbatim, plus the one hint that covers the
/// most common misconfiguration.
pub fn store_rejection(e: diesel::result::Error) -> juniper::FieldError {
    juniper::FieldError::new(
        format!("Database rejected changes: {e}. Hint: make sure the uploads bucket is public."),
        juniper::Value::null(),
    )
}

/// Deletion requires explicit confirmation; without it, no store call is
/// ever made.
pub fn confirm_delete(confirmed: bool) -> FieldResult<()> {
    if confirmed {
        Ok(())
    } else {
        Err(juniper::FieldError::new(
            "Deletion was not confirmed; nothing was removed",
            juniper::Value::null(),
        ))
    }
}

fn parse_uuid(id: &str) -> FieldResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| {
        juniper::FieldError::new("Invalid record id", juniper::Value::null())
    })
}

pub async fn delete_record(
    ctx: &Context,
    collection: Collection,
    id: String,
    confirmed: bool,
) -> FieldResult<bool> {
    ctx.require_admin()?;
    confirm_delete(confirmed)?;

    let deleted = match collection {
        Collection::Registrations => {
            let id: i32 = id.parse().map_err(|_| {
                juniper::FieldError::new("Invalid registration id", juniper::Value::null())
            })?;
            store::delete_registration(&mut ctx.get_db_conn().await, id).await?
        }
        Collection::Events => {
            store::delete_event(&mut ctx.get_db_conn().await, parse_uuid(&id)?).await?
        }
        Collection::Projects => {
            store::delete_project(&mut ctx.get_db_conn().await, parse_uuid(&id)?).await?
        }
        Collection::Team => {
            store::delete_team_member(&mut ctx.get_db_conn().await, parse_uuid(&id)?).await?
        }
        Collection::Faculty => {
            store::delete_faculty_member(&mut ctx.get_db_conn().await, parse_uuid(&id)?).await?
        }
        Collection::Settings => {
            return Err(juniper::FieldError::new(
                "Site settings cannot be deleted",
                juniper::Value::null(),
            ));
        }
    };

    Ok(deleted > 0)
}

/// Form fields for the edit buffer: a clean serialization of the selected
/// row, or an empty buffer when creating. Seeding happens per row id, so
/// switching rows always starts from the stored state.
pub async fn edit_buffer(
    ctx: &Context,
    collection: Collection,
    id: Option<String>,
) -> FieldResult<Vec<FormField>> {
    ctx.require_admin()?;

    let Some(id) = id else {
        return Ok(Vec::new());
    };

    let form = match collection {
        Collection::Registrations => {
            return Err(juniper::FieldError::new(
                "Registrations are read-only",
                juniper::Value::null(),
            ));
        }
        Collection::Events => {
            let row = store::find_event(&mut ctx.get_db_conn().await, parse_uuid(&id)?)
                .await?
                .ok_or_else(not_found)?;
            EventChange::from(&row).to_form()
        }
        Collection::Projects => {
            let row = store::find_project(&mut ctx.get_db_conn().await, parse_uuid(&id)?)
                .await?
                .ok_or_else(not_found)?;
            ProjectChange::from(&row).to_form()
        }
        Collection::Team => {
            let row = store::find_team_member(&mut ctx.get_db_conn().await, parse_uuid(&id)?)
                .await?
                .ok_or_else(not_found)?;
            TeamMemberChange::from(&row).to_form()
        }
        Collection::Faculty => {
            let row = store::find_faculty_member(&mut ctx.get_db_conn().await, parse_uuid(&id)?)
                .await?
                .ok_or_else(not_found)?;
            FacultyMemberChange::from(&row).to_form()
        }
        Collection::Settings => {
            let row = store::get_settings(&mut ctx.get_db_conn().await)
                .await?
                .ok_or_else(not_found)?;
            SiteSettingsChange::from(&row).to_form()
        }
    };

    Ok(form_fields(form))
}

fn not_found() -> juniper::FieldError {
    juniper::FieldError::new("Record not found", juniper::Value::null())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfirmed_delete_is_refused_before_any_store_call() {
        assert!(confirm_delete(false).is_err());
        assert!(confirm_delete(true).is_ok());
    }

    #[test]
    fn test_form_fields_keep_map_order() {
        let mut form = FormData::new();
        form.insert("title".to_string(), "x".to_string());
        form.insert("slug".to_string(), "y".to_string());
        let fields = form_fields(form);
        assert_eq!(fields[0].name, "slug");
        assert_eq!(fields[1].name, "title");
    }
}
