// Gateway HTTP client
//
// Wraps `reqwest::Client` with base-URL handling, credential attachment and
// status-code classification. Endpoint groups (rooms, bookings, menu,
// supply, auth) are implemented as inherent methods in sibling modules so
// this file stays focused on transport mechanics.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::session::{Session, SessionStore};
use crate::transport::{TransportConfig, sensitive_header};

const REST_PREFIX: &str = "rest/v1/";
const AUTH_PREFIX: &str = "auth/v1/";

/// Error body shapes the backend uses. PostgREST sends `message`, the auth
/// service sends `error_description` or `msg`, proxies sometimes send `error`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error_description)
            .or(self.msg)
            .or(self.error)
    }
}

/// Typed HTTP client for the hotel backend.
///
/// One instance serves every domain (rooms, bookings, menu, orders, supply,
/// auth) against a single base URL. Table operations live under
/// `/rest/v1/{table}`, auth under `/auth/v1/`. The current session's bearer
/// token is attached when present; otherwise the anon API key doubles as the
/// bearer, which is how the backend identifies unauthenticated callers.
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
    session: SessionStore,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a gateway from a base URL, optional anon API key, and the
    /// application's session store.
    ///
    /// The `apikey` header is installed as a default header when a key is given.
    pub fn new(
        base_url: &str,
        api_key: Option<SecretString>,
        session: SessionStore,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(ref key) = api_key {
            headers.insert("apikey", sensitive_header(key.expose_secret())?);
        }
        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            api_key,
            session,
        })
    }

    /// Wrap an existing `reqwest::Client`. The `apikey` header, if needed,
    /// must already be configured on it.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        api_key: Option<SecretString>,
        session: SessionStore,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            api_key,
            session,
        })
    }

    /// Ensure the base URL ends with `/` so relative joins append rather
    /// than replace the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session store this gateway reads credentials from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/rest/v1/{table}`
    pub(crate) fn rest_url(&self, table: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(REST_PREFIX)?.join(table)?)
    }

    /// `{base}/auth/v1/{path}`
    pub(crate) fn auth_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(AUTH_PREFIX)?.join(path)?)
    }

    // ── Credentials ──────────────────────────────────────────────────

    /// Attach the bearer credential: session token if logged in, else the
    /// anon key, else nothing. Returns the session whose token was sent so
    /// a 401 can be tied back to it.
    pub(crate) fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> (reqwest::RequestBuilder, Option<Arc<Session>>) {
        if let Some(session) = self.session.current() {
            trace!("attaching session bearer");
            let builder = builder.bearer_auth(session.access_token.expose_secret());
            (builder, Some(session))
        } else if let Some(ref key) = self.api_key {
            (builder.bearer_auth(key.expose_secret()), None)
        } else {
            (builder, None)
        }
    }

    // ── Table helpers ────────────────────────────────────────────────

    /// `GET /rest/v1/{table}` with PostgREST query parameters.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let url = self.rest_url(table)?;
        debug!("GET {url} params={params:?}");

        let (builder, sent) = self.authorize(self.http.get(url).query(params));
        let resp = builder.send().await?;
        self.handle_response(resp, sent.as_ref()).await
    }

    /// `POST /rest/v1/{table}` returning the inserted row.
    pub(crate) async fn insert<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.rest_url(table)?;
        debug!("POST {url}");

        let (builder, sent) = self.authorize(
            self.http
                .post(url)
                .header("Prefer", "return=representation")
                .json(body),
        );
        let resp = builder.send().await?;
        let rows: Vec<T> = self.handle_response(resp, sent.as_ref()).await?;
        single_row(rows, table, "insert")
    }

    /// `PATCH /rest/v1/{table}?id=eq.{id}` returning the updated row.
    pub(crate) async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.rest_url(table)?;
        debug!("PATCH {url} id={id}");

        let (builder, sent) = self.authorize(
            self.http
                .patch(url)
                .query(&[("id", format!("eq.{id}"))])
                .header("Prefer", "return=representation")
                .json(body),
        );
        let resp = builder.send().await?;
        let rows: Vec<T> = self.handle_response(resp, sent.as_ref()).await?;
        single_row(rows, table, id)
    }

    // ── Response handling ────────────────────────────────────────────

    /// Decode a 2xx body, or classify the failure. `sent` is the session
    /// whose token authorized the request, if any.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        sent: Option<&Arc<Session>>,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp, sent).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Validation {
                status: status.as_u16(),
                message: format!("unexpected response shape: {e} (body preview: {preview:?})"),
            }
        })
    }

    /// Accept any 2xx without decoding a body.
    pub(crate) async fn handle_empty(
        &self,
        resp: reqwest::Response,
        sent: Option<&Arc<Session>>,
    ) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp, sent).await)
        }
    }

    /// Map a non-2xx response into the failure taxonomy.
    ///
    /// A 401 tears down the session that sent the request before the error
    /// is returned, so every later call in the process sees the anonymous
    /// state. A session established since then is kept.
    async fn parse_error(
        &self,
        status: reqwest::StatusCode,
        resp: reqwest::Response,
        sent: Option<&Arc<Session>>,
    ) -> Error {
        let message = error_message(status, resp).await;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            if let Some(sent) = sent {
                self.session.expire_if_current(sent);
            }
            return Error::Auth { message };
        }

        if status.is_server_error() {
            Error::Server {
                status: status.as_u16(),
                message,
            }
        } else {
            Error::Validation {
                status: status.as_u16(),
                message,
            }
        }
    }
}

/// Pull a human-readable message out of an error body, falling back to the
/// raw text or the status line.
pub(crate) async fn error_message(status: reqwest::StatusCode, resp: reqwest::Response) -> String {
    let raw = resp.text().await.unwrap_or_default();

    if let Ok(body) = serde_json::from_str::<ErrorBody>(&raw) {
        if let Some(message) = body.into_message() {
            return message;
        }
    }

    if raw.trim().is_empty() {
        status.to_string()
    } else {
        raw.chars().take(200).collect()
    }
}

/// Writes with `Prefer: return=representation` answer with the affected rows;
/// exactly one is expected.
fn single_row<T>(rows: Vec<T>, table: &str, target: &str) -> Result<T, Error> {
    rows.into_iter().next().ok_or_else(|| Error::Validation {
        status: 404,
        message: format!("no {table} row returned for {target}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> Gateway {
        Gateway::with_client(reqwest::Client::new(), base, None, SessionStore::new()).unwrap()
    }

    #[test]
    fn rest_url_appends_to_base_path() {
        let gw = gateway("https://example.supabase.co");
        assert_eq!(
            gw.rest_url("rooms").unwrap().as_str(),
            "https://example.supabase.co/rest/v1/rooms"
        );

        let nested = gateway("https://proxy.local/hotel/");
        assert_eq!(
            nested.rest_url("bookings").unwrap().as_str(),
            "https://proxy.local/hotel/rest/v1/bookings"
        );
    }

    #[test]
    fn auth_url_keeps_query() {
        let gw = gateway("https://example.supabase.co/");
        assert_eq!(
            gw.auth_url("token?grant_type=password").unwrap().as_str(),
            "https://example.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Gateway::with_client(reqwest::Client::new(), "not a url", None, SessionStore::new())
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn single_row_requires_a_row() {
        let err = single_row::<u32>(Vec::new(), "rooms", "r-1").unwrap_err();
        assert!(matches!(err, Error::Validation { status: 404, .. }));
        assert_eq!(single_row(vec![7_u32, 8], "rooms", "r-1").unwrap(), 7);
    }

    #[test]
    fn error_body_prefers_message_fields_in_order() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid login credentials"));
    }
}
