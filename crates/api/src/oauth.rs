// SPDX-FileCopyrightText: 2026 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! OAuth relay for the git-based CMS login flow: redirect the operator to
//! the GitHub authorize page, then exchange the callback code for a token
//! and hand it back to the CMS window via postMessage. Plain request/response
//! glue, no state kept.

use hyper::{Response, StatusCode, header};
use serde::Deserialize;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const SCOPE: &str = "repo,user";

#[derive(Deserialize)]
struct TokenExchange {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

fn client_id() -> Option<String> {
    std::env::var("GITHUB_CLIENT_ID").ok()
}

fn html_response(body: String) -> Response<String> {
    let mut resp = Response::new(body);
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html; charset=utf-8"),
    );
    resp
}

/// The page the CMS popup expects: it answers the opener's handshake and
/// posts the auth result back to it.
fn render_callback_html(status: &str, content: &serde_json::Value) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <script>
    (function() {{
      function receiveMessage(e) {{
        if (!window.opener) return;
        window.opener.postMessage(
          'authorization:github:{status}:{content}',
          e.origin
        );
      }}
      window.addEventListener("message", receiveMessage, false);
      window.opener.postMessage("authorizing:github", "*");
    }})()
  </script>
</body>
</html>
"#
    )
}

/// `GET /api/oauth` — send the operator to the GitHub authorize page.
pub fn authorize() -> Response<String> {
    let Some(client_id) = client_id() else {
        let mut resp = Response::new(r#"{"error":"GITHUB_CLIENT_ID is not set"}"#.to_string());
        *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        return resp;
    };
    let location = format!("{AUTHORIZE_URL}?client_id={client_id}&scope={SCOPE}");
    let mut resp = Response::new(String::new());
    *resp.status_mut() = StatusCode::FOUND;
    if let Ok(value) = header::HeaderValue::from_str(&location) {
        resp.headers_mut().insert(header::LOCATION, value);
    }
    resp
}

/// `GET /api/oauth/callback?code=...` — exchange the code and relay the
/// result to the CMS. Errors render as the error variant of the same page.
pub async fn callback(http: &reqwest::Client, query: Option<&str>) -> Response<String> {
    let code = query.and_then(|q| {
        q.split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "code")
            .map(|(_, value)| value.to_string())
    });
    let Some(code) = code else {
        return html_response(render_callback_html(
            "error",
            &serde_json::json!({ "message": "No code provided" }),
        ));
    };

    let exchange = http
        .post(TOKEN_URL)
        .header(reqwest::header::ACCEPT, "application/json")
        .json(&serde_json::json!({
            "client_id": std::env::var("GITHUB_CLIENT_ID").unwrap_or_default(),
            "client_secret": std::env::var("GITHUB_CLIENT_SECRET").unwrap_or_default(),
            "code": code,
        }))
        .send()
        .await;

    let body = match exchange {
        Ok(response) => match response.json::<TokenExchange>().await {
            Ok(TokenExchange {
                access_token: Some(token),
                ..
            }) => render_callback_html(
                "success",
                &serde_json::json!({ "token": token, "provider": "github" }),
            ),
            Ok(TokenExchange {
                error,
                error_description,
                ..
            }) => render_callback_html(
                "error",
                &serde_json::json!({
                    "message": error_description
                        .or(error)
                        .unwrap_or_else(|| "Token exchange failed".to_string())
                }),
            ),
            Err(e) => render_callback_html(
                "error",
                &serde_json::json!({ "message": format!("Unreadable token response: {e}") }),
            ),
        },
        Err(e) => render_callback_html(
            "error",
            &serde_json::json!({ "message": format!("Token exchange failed: {e}") }),
        ),
    };
    html_response(body)
}
