//! Operator session: identity, login and logout.

use serde::{Deserialize, Serialize};

use crate::http::{Client, HttpResult, RequestError, RequestOptions};

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Identity {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Identity {
    /// Header text: `"<email> · <role>"`.
    pub fn display(&self) -> String {
        format!(
            "{} · {}",
            self.email.as_deref().unwrap_or_default(),
            self.role.as_deref().unwrap_or_default()
        )
    }
}

/// Where the console stands with the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    SignedIn(Identity),
    /// The front-end must send the operator to the login screen.
    SignedOut,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `GET /auth/me`.
pub async fn me(client: &Client) -> HttpResult<Identity> {
    client.get_json("/auth/me").await
}

/// Resolve the session. Any failure counts as signed out.
pub async fn status(client: &Client) -> AuthStatus {
    match me(client).await {
        Ok(identity) if identity.authenticated => AuthStatus::SignedIn(identity),
        Ok(_) => AuthStatus::SignedOut,
        Err(err) => {
            log::debug!("session check failed: {err}");
            AuthStatus::SignedOut
        }
    }
}

/// `POST /auth/login`. The email is trimmed; the password is sent as typed.
///
/// On success the session cookie is held by the client's jar.
pub async fn login(client: &Client, email: &str, password: &str) -> HttpResult<Identity> {
    let body = LoginRequest {
        email: email.trim(),
        password,
    };
    let options = RequestOptions::post()
        .json(&body)
        .map_err(|e| RequestError::transport(e.to_string()))?;

    let mut identity: Identity = client.decoded("/auth/login", options).await?;
    identity.authenticated = true;
    Ok(identity)
}

/// `POST /auth/logout`, best effort. The local session is cleared either way.
pub async fn logout(client: &Client) {
    if let Err(err) = client.request("/auth/logout", RequestOptions::post()).await {
        log::warn!("logout request failed: {err}");
    }
    client.clear_session();
}
