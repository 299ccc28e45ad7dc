// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::graphql_object;

use super::store_rejection;
use crate::db::models::Event;
use crate::forms::{Collection, FormData, insert_field, normalize_event};
use crate::graphql::Context;
use crate::store;

#[graphql_object]
impl Event {
    pub fn id(&self) -> String {
        self.id.to_string()
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Calendar date of the event, `YYYY-MM-DD`; no time component.
    pub fn date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn images(&self) -> Option<Vec<String>> {
        self.images.clone()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn link_url(&self) -> Option<&str> {
        self.link_url.as_deref()
    }
}

/// Raw form fields for an event, exactly as the admin form submits them.
#[derive(juniper::GraphQLInputObject)]
pub struct EventForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    /// Comma-joined image URLs as serialized by the attachment field.
    pub images: Option<String>,
    pub link_url: Option<String>,
    pub description: Option<String>,
}

impl EventForm {
    fn into_form(self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id);
        insert_field(&mut form, "title", self.title);
        insert_field(&mut form, "slug", self.slug);
        insert_field(&mut form, "date", self.date);
        insert_field(&mut form, "images", self.images);
        insert_field(&mut form, "link_url", self.link_url);
        insert_field(&mut form, "description", self.description);
        form
    }
}

pub async fn get_events(ctx: &Context) -> juniper::FieldResult<Vec<Event>> {
    Ok(store::list_events(&mut ctx.get_db_conn().await).await?)
}

pub async fn save_event(ctx: &Context, form: EventForm) -> juniper::FieldResult<Event> {
    ctx.require_admin()?;

    let change = normalize_event(&form.into_form());
    let saved = store::upsert_event(&mut ctx.get_db_conn().await, &change)
        .await
        .map_err(store_rejection)?;

    ctx.revalidator().notify(Collection::Events).await;

    Ok(saved)
}
