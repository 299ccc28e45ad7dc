// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, error::Error, net::SocketAddr, sync::Arc};

use diesel::Connection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use ed25519_dalek::SigningKey;
use hyper::{Method, Response, StatusCode, service::service_fn};
use hyper_util::rt::{TokioExecutor, TokioIo};
use juniper::{EmptySubscription, RootNode};
use juniper_hyper::{graphiql, graphql, playground};
use tokio::net::TcpListener;

use crate::graphql::{Context, Mutation, Query, Schema};

mod captcha;
mod db;
mod forms;
mod graphql;
mod oauth;
mod revalidate;
mod store;
mod uploads;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    // Set RUST_LOG to debug
    unsafe {
        std::env::set_var("RUST_LOG", "debug");
    }
    tracing_subscriber::fmt::init();

    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to set AWS-LC-RS as default TLS provider");

    if std::env::var("ADMIN_PASSWORD").is_err() && std::env::var("ADMIN_PASSWORD_HASH").is_err() {
        tracing::warn!(
            "Neither ADMIN_PASSWORD nor ADMIN_PASSWORD_HASH is set; administrator login is disabled!"
        );
    }
    for var in &["STORAGE_URL", "STORAGE_SERVICE_KEY", "REVALIDATE_ENDPOINT"] {
        if std::env::var(var).is_err() {
            tracing::warn!("Environment variable {var} is not set; the matching integration is disabled");
        }
    }

    let root_node: Arc<Schema> = Arc::new(RootNode::new(Query, Mutation, EmptySubscription::new()));

    let addr = SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(addr).await?;

    let key_file = std::env::var("SIGNING_KEY_FILE").unwrap_or_else(|_| "key.json".to_string());
    let key_file = std::path::Path::new(&key_file);
    if !key_file.exists() {
        let mut csprng = rand::rngs::OsRng;
        let signing_key: SigningKey = SigningKey::generate(&mut csprng);
        let keypair_json = serde_json::to_string_pretty(&signing_key)?;
        std::fs::write(key_file, keypair_json)?;
        tracing::info!("Generated new signing key and saved to key.json");
    }
    let keypair_json = std::fs::read_to_string(key_file)?;
    let signing_key: SigningKey = serde_json::from_str(&keypair_json)?;

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    {
        let mut pg_connection = diesel::pg::PgConnection::establish(&database_url)
            .expect("Failed to connect to database for migrations");
        db::run_migrations(&mut pg_connection).expect("Failed to run database migrations");
    }
    let ctx = graphql::BaseContext {
        db_pool: {
            let manager =
                AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(database_url);
            diesel_async::pooled_connection::bb8::Pool::builder()
                .build(manager)
                .await
                .expect("Failed to create DB connection pool")
        },
        keypair: signing_key,
        authenticator: graphql::auth::Authenticator::from_env(),
        storage: uploads::StorageClient::from_env().map(Arc::new),
        revalidator: revalidate::Revalidator::from_env(),
        http: reqwest::Client::new(),
    };
    tracing::info!("Listening on http://{addr}");
    loop {
        let (stream, _remote_addr) = listener.accept().await?;

        let io = TokioIo::new(stream);

        let root_node = root_node.clone();
        let ctx = ctx.clone();

        tokio::spawn(async move {
            let root_node = root_node.clone();
            let ctx = ctx.clone();

            if let Err(e) = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                .serve_connection(
                    io,
                    service_fn(move |req| {
                        let root_node = root_node.clone();
                        let ctx = ctx.clone();

                        let session = req
                            .headers()
                            .get("authorization")
                            .and_then(|auth_header| {
                                let auth_str = auth_header.to_str().ok()?;
                                auth_str.strip_prefix("Bearer ").map(str::to_string)
                            })
                            .and_then(|token| {
                                graphql::auth::verify_session_token(
                                    &token,
                                    &ctx.keypair.verifying_key(),
                                )
                                .ok()
                            });

                        async move {
                            Ok::<_, Infallible>(match (req.method(), req.uri().path()) {
                                (&Method::GET, "/graphql") | (&Method::POST, "/graphql") => {
                                    let gql_ctx = Context::new(ctx.clone(), session);
                                    graphql(root_node, Arc::new(gql_ctx), req).await
                                }
                                (&Method::OPTIONS, "/graphql") => {
                                    let mut resp = Response::new(String::new());
                                    *resp.status_mut() = StatusCode::NO_CONTENT;
                                    resp
                                }
                                (&Method::GET, "/graphiql") => graphiql("/graphql", None).await,
                                (&Method::GET, "/playground") => playground("/graphql", None).await,
                                (&Method::POST, "/api/join") => {
                                    graphql::join_route(&ctx, req).await
                                }
                                (&Method::GET, "/api/oauth") => oauth::authorize(),
                                (&Method::GET, "/api/oauth/callback") => {
                                    let query = req.uri().query().map(str::to_string);
                                    oauth::callback(&ctx.http, query.as_deref()).await
                                }
                                _ => {
                                    let mut resp = Response::new(String::new());
                                    *resp.status_mut() = StatusCode::NOT_FOUND;
                                    resp
                                }
                            })
                        }
                    }),
                )
                .await
            {
                tracing::error!("Error serving connection: {e}");
            }
        });
    }
}
