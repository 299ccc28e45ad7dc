// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::graphql_object;

use super::store_rejection;
use crate::db::models::FacultyMember;
use crate::forms::{Collection, FormData, insert_field, normalize_faculty_member};
use crate::graphql::Context;
use crate::store;

#[graphql_object]
impl FacultyMember {
    pub fn id(&self) -> String {
        self.id.to_string()
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    /// Uniqueness is not enforced; every row claiming HOD gets the badge.
    pub fn is_hod(&self) -> bool {
        self.is_hod
    }

    pub fn order(&self) -> i32 {
        self.sort_order
    }
}

#[derive(juniper::GraphQLInputObject)]
pub struct FacultyMemberForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub designation: Option<String>,
    pub photo: Option<String>,
    /// Checkbox marker value: `"on"`/`"true"`, or absent when unchecked.
    pub is_hod: Option<String>,
    pub order: Option<String>,
}

impl FacultyMemberForm {
    fn into_form(self) -> FormData {
        let mut form = FormData::new();
        insert_field(&mut form, "id", self.id);
        insert_field(&mut form, "name", self.name);
        insert_field(&mut form, "slug", self.slug);
        insert_field(&mut form, "designation", self.designation);
        insert_field(&mut form, "photo", self.photo);
        insert_field(&mut form, "is_hod", self.is_hod);
        insert_field(&mut form, "order", self.order);
        form
    }
}

pub async fn get_faculty(ctx: &Context) -> juniper::FieldResult<Vec<FacultyMember>> {
    Ok(store::list_faculty(&mut ctx.get_db_conn().await).await?)
}

pub async fn save_faculty_member(
    ctx: &Context,
    form: FacultyMemberForm,
) -> juniper::FieldResult<FacultyMember> {
    ctx.require_admin()?;

    let change = normalize_faculty_member(&form.into_form());
    let saved = store::upsert_faculty_member(&mut ctx.get_db_conn().await, &change)
        .await
        .map_err(store_rejection)?;

    ctx.revalidator().notify(Collection::Faculty).await;

    Ok(saved)
}
