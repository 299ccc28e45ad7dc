// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::graphql_object;

use super::store_rejection;
use crate::db::models::SiteSettings;
use crate::forms::{Collection, FormData, insert_field, normalize_settings};
use crate::graphql::Context;
use crate::store;

#[graphql_object]
impl SiteSettings {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }

    pub fn years_active(&self) -> i32 {
        self.years_active
    }

    pub fn founded_year(&self) -> i32 {
        self.founded_year
    }

    pub fn instagram(&self) -> Option<&str> {
        self.instagram.as_deref()
    }

    pub fn linkedin(&self) -> Option<&str> {
        self.linkedin.as_deref()
    }

    pub fn github(&self) -> Option<&str> {
        self.github.as_deref()
    }
}

#[derive(juniper::GraphQLInputObject)]
pub struct SettingsForm {
    /// Ignored: the settings row always writes against its fixed key.
    pub id: Option<String>,
    pub tagline: Option<String>,
    pub years_active: Option<String>,
    pub founded_year: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl SettingsForm {
    fn into_form(self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id);
        insert_field(&mut form, "tagline", self.tagline);
        insert_field(&mut form, "years_active", self.years_active);
        insert_field(&mut form, "founded_year", self.founded_year);
        insert_field(&mut form, "instagram", self.instagram);
        insert_field(&mut form, "linkedin", self.linkedin);
        insert_field(&mut form, "github", self.github);
        form
    }
}

pub async fn get_settings(ctx: &Context) -> juniper::FieldResult<Option<SiteSettings>> {
    Ok(store::get_settings(&mut ctx.get_db_conn().await).await?)
}

pub async fn save_settings(
    ctx: &Context,
    form: SettingsForm,
) -> juniper::FieldResult<SiteSettings> {
    ctx.require_admin()?;

    let change = normalize_settings(&form.into_form());
    let saved = store::upsert_settings(&mut ctx.get_db_conn().await, &change)
        .await
        .map_err(store_rejection)?;

    ctx.revalidator().notify(Collection::Settings).await;

    Ok(saved)
}
