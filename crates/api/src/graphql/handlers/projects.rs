// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::graphql_object;

use super::store_rejection;
use crate::db::models::Project;
use crate::forms::{Collection, FormData, insert_field, normalize_project};
use crate::graphql::Context;
use crate::store;

#[graphql_object]
impl Project {
    pub fn id(&self) -> String {
        self.id.to_string()
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn github_url(&self) -> Option<&str> {
        self.github_url.as_deref()
    }

    pub fn linkedin_url(&self) -> Option<&str> {
        self.linkedin_url.as_deref()
    }

    pub fn live_url(&self) -> Option<&str> {
        self.live_url.as_deref()
    }

    pub fn images(&self) -> Option<Vec<String>> {
        self.images.clone()
    }

    pub fn created_at(&self) -> String {
        self.created_at.to_rfc3339()
    }
}

#[derive(juniper::GraphQLInputObject)]
pub struct ProjectForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub live_url: Option<String>,
    pub images: Option<String>,
}

impl ProjectForm {
    fn into_form(self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id);
        insert_field(&mut form, "title", self.title);
        insert_field(&mut form, "slug", self.slug);
        insert_field(&mut form, "description", self.description);
        insert_field(&mut form, "github_url", self.github_url);
        insert_field(&mut form, "linkedin_url", self.linkedin_url);
        insert_field(&mut form, "live_url", self.live_url);
        insert_field(&mut form, "images", self.images);
        form
    }
}

pub async fn get_projects(ctx: &Context) -> juniper::FieldResult<Vec<Project>> {
    Ok(store::list_projects(&mut ctx.get_db_conn().await).await?)
}

pub async fn save_project(ctx: &Context, form: ProjectForm) -> juniper::FieldResult<Project> {
    ctx.require_admin()?;

    let change = normalize_project(&form.into_form());
    let saved = store::upsert_project(&mut ctx.get_db_conn().await, &change)
        .await
        .map_err(store_rejection)?;

    ctx.revalidator().notify(Collection::Projects).await;

    Ok(saved)
}
