// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use juniper::GraphQLObject;

use crate::graphql::{
    Context,
    auth::{SessionClaims, issue_session_token},
};

#[derive(GraphQLObject)]
pub struct SessionCredentials {
    pub access_token: String,
}

/// The single-operator login: verify the shared secret and issue a signed
/// session token. There is no per-user account behind it.
pub async fn login(ctx: &Context, password: String) -> juniper::FieldResult<SessionCredentials> {
    ctx.authenticator()
        .verify(&password)
        .map_err(|e| juniper::FieldError::new(e.to_string(), juniper::Value::null()))?;

    let claims = SessionClaims::new();
    let access_token = issue_session_token(&claims, ctx.get_signing_key())?;
    tracing::info!("administrator session {} opened", claims.sid);

    Ok(SessionCredentials { access_token })
}
