// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::graphql_object;

use super::store_rejection;
use crate::db::models::TeamMember;
use crate::forms::{Collection, FormData, insert_field, normalize_team_member};
use crate::graphql::Context;
use crate::store;

#[graphql_object]
impl TeamMember {
    pub fn id(&self) -> String {
        self.id.to_string()
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn linkedin(&self) -> Option<&str> {
        self.linkedin.as_deref()
    }

    /// Display position; lower comes first.
    pub fn order(&self) -> i32 {
        self.sort_order
    }
}

#[derive(juniper::GraphQLInputObject)]
pub struct TeamMemberForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub role: Option<String>,
    pub photo: Option<String>,
    pub linkedin: Option<String>,
    pub order: Option<String>,
    pub bio: Option<String>,
}

impl TeamMemberForm {
    fn into_form(self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id);
        insert_field(&mut form, "name", self.name);
        insert_field(&mut form, "slug", self.slug);
        insert_field(&mut form, "role", self.role);
        insert_field(&mut form, "photo", self.photo);
        insert_field(&mut form, "linkedin", self.linkedin);
        insert_field(&mut form, "order", self.order);
        insert_field(&mut form, "bio", self.bio);
        form
    }
}

pub async fn get_team(ctx: &Context) -> juniper::FieldResult<Vec<TeamMember>> {
    Ok(store::list_team(&mut ctx.get_db_conn().await).await?)
}

pub async fn save_team_member(
    ctx: &Context,
    form: TeamMemberForm,
) -> juniper::FieldResult<TeamMember> {
    ctx.require_admin()?;

    let change = normalize_team_member(&form.into_form());
    let saved = store::upsert_team_member(&mut ctx.get_db_conn().await, &change)
        .await
        .map_err(store_rejection)?;

    ctx.revalidator().notify(Collection::Team).await;

    Ok(saved)
}
