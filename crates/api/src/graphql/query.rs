// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::graphql_object;

use super::Context;
use crate::forms::Collection;

pub struct Query;

#[graphql_object]
#[graphql(context = Context)]
impl Query {
    fn is_authenticated(context: &Context) -> bool {
        context.is_authenticated()
    }

    async fn events(context: &Context) -> juniper::FieldResult<Vec<crate::db::models::Event>> {
        crate::graphql::handlers::events::get_events(context).await
    }

    async fn projects(context: &Context) -> juniper::FieldResult<Vec<crate::db::models::Project>> {
        crate::graphql::handlers::projects::get_projects(context).await
    }

    async fn team(context: &Context) -> juniper::FieldResult<Vec<crate::db::models::TeamMember>> {
        crate::graphql::handlers::team::get_team(context).await
    }

    async fn faculty(
        context: &Context,
    ) -> juniper::FieldResult<Vec<crate::db::models::FacultyMember>> {
        crate::graphql::handlers::faculty::get_faculty(context).await
    }

    async fn settings(
        context: &Context,
    ) -> juniper::FieldResult<Option<crate::db::models::SiteSettings>> {
        crate::graphql::handlers::settings::get_settings(context).await
    }

    async fn site_stats(context: &Context) -> juniper::FieldResult<crate::graphql::SiteStats> {
        crate::graphql::get_site_stats(context).await
    }

    async fn registrations(
        context: &Context,
    ) -> juniper::FieldResult<Vec<crate::db::models::Registration>> {
        crate::graphql::handlers::registrations::get_registrations(context).await
    }

    async fn registrations_csv(context: &Context) -> juniper::FieldResult<String> {
        crate::graphql::handlers::registrations::registrations_csv(context).await
    }

    async fn edit_buffer(
        context: &Context,
        collection: Collection,
        id: Option<String>,
    ) -> juniper::FieldResult<Vec<crate::graphql::handlers::FormField>> {
        crate::graphql::handlers::edit_buffer(context, collection, id).await
    }

    fn captcha_challenge() -> juniper::FieldResult<crate::captcha::CaptchaChallenge> {
        crate::captcha::get_challenge()
    }
}
