// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::{FieldResult, graphql_object};

use crate::forms::Collection;
use crate::graphql::handlers::{self, session::SessionCredentials};
use crate::uploads::AttachmentMode;

use super::Context;

pub struct Mutation;

#[graphql_object]
#[graphql(
    context = Context,
)]
impl Mutation {
    async fn login(context: &Context, password: String) -> FieldResult<SessionCredentials> {
        handlers::session::login(context, password).await
    }

    async fn save_event(
        context: &Context,
        form: handlers::events::EventForm,
    ) -> FieldResult<crate::db::models::Event> {
        handlers::events::save_event(context, form).await
    }

    async fn save_project(
        context: &Context,
        form: handlers::projects::ProjectForm,
    ) -> FieldResult<crate::db::models::Project> {
        handlers::projects::save_project(context, form).await
    }

    async fn save_team_member(
        context: &Context,
        form: handlers::team::TeamMemberForm,
    ) -> FieldResult<crate::db::models::TeamMember> {
        handlers::team::save_team_member(context, form).await
    }

    async fn save_faculty_member(
        context: &Context,
        form: handlers::faculty::FacultyMemberForm,
    ) -> FieldResult<crate::db::models::FacultyMember> {
        handlers::faculty::save_faculty_member(context, form).await
    }

    async fn save_settings(
        context: &Context,
        form: handlers::settings::SettingsForm,
    ) -> FieldResult<crate::db::models::SiteSettings> {
        handlers::settings::save_settings(context, form).await
    }

    /// Deletes one row after explicit confirmation; unconfirmed calls make
    /// no store call at all.
    async fn delete_record(
        context: &Context,
        collection: Collection,
        id: String,
        confirm: bool,
    ) -> FieldResult<bool> {
        handlers::delete_record(context, collection, id, confirm).await
    }

    async fn attach_images(
        context: &Context,
        mode: AttachmentMode,
        existing: Option<String>,
        files: Vec<handlers::uploads::FileInput>,
    ) -> FieldResult<handlers::uploads::AttachmentOutcome> {
        handlers::uploads::attach_images(context, mode, existing, files).await
    }
}
