// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Best-effort cache invalidation for the statically rendered site.
//!
//! After a successful write the renderer is told which public route went
//! stale. Staleness is self-healing, so every failure here is swallowed:
//! a save must never fail because the renderer could not be reached.

use serde::Deserialize;

use crate::forms::Collection;

/// Public route derived from a collection. Collections without a dedicated
/// page fall back to the front page.
pub fn route_for(collection: Collection) -> &'static str {
    match collection {
        Collection::Events => "/events",
        Collection::Projects => "/projects",
        Collection::Team => "/team",
        _ => "/",
    }
}

#[derive(Deserialize)]
struct RevalidateAck {
    revalidated: bool,
}

#[derive(Clone)]
pub struct Revalidator {
    endpoint: Option<String>,
    http: reqwest::Client,
}

impl Revalidator {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("REVALIDATE_ENDPOINT").ok())
    }

    /// Notify the renderer that `collection`'s route is stale. Never fails.
    pub async fn notify(&self, collection: Collection) {
        let Some(endpoint) = &self.endpoint else {
            return;
        };
        let path = route_for(collection);
        let result = self
            .http
            .post(endpoint)
            .json(&serde_json::json!({ "path": path }))
            .send()
            .await;
        match result {
            Ok(response) => match response.json::<RevalidateAck>().await {
                Ok(ack) if ack.revalidated => {
                    tracing::debug!("revalidated {path}");
                }
                Ok(_) => tracing::warn!("renderer declined to revalidate {path}"),
                Err(e) => tracing::warn!("unreadable revalidation response for {path}: {e}"),
            },
            Err(e) => tracing::warn!("revalidation request for {path} failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collections_map_to_their_public_routes() {
        assert_eq!(route_for(Collection::Events), "/events");
        assert_eq!(route_for(Collection::Projects), "/projects");
        assert_eq!(route_for(Collection::Team), "/team");
        assert_eq!(route_for(Collection::Faculty), "/");
        assert_eq!(route_for(Collection::Settings), "/");
        assert_eq!(route_for(Collection::Registrations), "/");
    }

    #[tokio::test]
    async fn test_notify_without_endpoint_is_a_no_op() {
        let revalidator = Revalidator::new(None);
        revalidator.notify(Collection::Events).await;
    }
}
