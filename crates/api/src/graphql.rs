// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;
use std::time::Duration;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use juniper::EmptySubscription;
pub use mutation::Mutation;
pub use query::Query;

use crate::graphql::auth::{Authenticator, SessionClaims};
use crate::revalidate::Revalidator;
use crate::uploads::{BlobStore, StorageClient};

pub mod auth;
mod handlers;
mod mutation;
mod query;

pub use handlers::registrations::{join_route, registrations_to_csv};

#[derive(Clone)]
pub struct BaseContext {
    pub db_pool: diesel_async::pooled_connection::bb8::Pool<diesel_async::AsyncPgConnection>,
    pub keypair: ed25519_dalek::SigningKey,
    pub authenticator: Authenticator,
    pub storage: Option<Arc<StorageClient>>,
    pub revalidator: Revalidator,
    pub http: reqwest::Client,
}

pub struct Context {
    base: BaseContext,
    session: Option<SessionClaims>,
}

impl juniper::Context for Context {}

impl Context {
    pub fn new(base: BaseContext, session: Option<SessionClaims>) -> Self {
        Self { base, session }
    }

    pub async fn get_db_conn(
        &self,
    ) -> diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>
    {
        self.base
            .db_pool
            .get()
            .await
            .expect("Failed to get DB connection")
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn require_admin(&self) -> juniper::FieldResult<&SessionClaims> {
        self.session.as_ref().ok_or_else(|| {
            juniper::FieldError::new("Authentication required", juniper::Value::null())
        })
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.base.authenticator
    }

    pub fn blob_store(&self) -> Option<&dyn BlobStore> {
        self.base.storage.as_deref().map(|s| s as &dyn BlobStore)
    }

    pub fn revalidator(&self) -> &Revalidator {
        &self.base.revalidator
    }

    pub fn get_signing_key(&self) -> &ed25519_dalek::SigningKey {
        &self.base.keypair
    }
}

/// Aggregate shown on the public front page. Collection counts come from
/// the store, the year figures from the settings row (with the historical
/// defaults when no row exists yet).
#[derive(juniper::GraphQLObject, Clone)]
pub struct SiteStats {
    pub members: i32,
    pub events: i32,
    pub projects: i32,
    pub years_active: i32,
    pub founded_year: i32,
}

#[cached::proc_macro::cached(time = 300, key = "()", convert = "{ }", result = true)]
pub async fn get_site_stats(context: &Context) -> juniper::FieldResult<SiteStats> {
    let conn = &mut context.get_db_conn().await;
    let member_count: i64 = crate::db::schema::team::table.count().get_result(conn).await?;
    let event_count: i64 = crate::db::schema::events::table.count().get_result(conn).await?;
    let project_count: i64 = crate::db::schema::projects::table
        .count()
        .get_result(conn)
        .await?;
    let site_settings = crate::store::get_settings(conn).await?;

    Ok(SiteStats {
        members: member_count as i32,
        events: event_count as i32,
        projects: project_count as i32,
        years_active: site_settings.as_ref().map(|s| s.years_active).unwrap_or(1),
        founded_year: site_settings
            .as_ref()
            .map(|s| s.founded_year)
            .unwrap_or(2024),
    })
}

pub type Schema = juniper::RootNode<Query, Mutation, EmptySubscription<Context>>;
