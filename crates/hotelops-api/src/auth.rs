// Password authentication against the auth service.
//
// Login failures are reported as `Auth` without touching an existing session:
// a wrong password is not evidence that the stored credential went stale.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::client::{Gateway, error_message};
use crate::error::Error;
use crate::session::{Session, SessionUser};
use crate::types::TokenResponse;

/// New-account details for [`Gateway::register`].
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
}

impl Gateway {
    /// Exchange email + password for a session and install it.
    ///
    /// `POST /auth/v1/token?grant_type=password`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Arc<Session>, Error> {
        let url = self.auth_url("token?grant_type=password")?;
        debug!("POST {url}");

        let resp = self
            .http()
            .post(url)
            .json(&json!({
                "email": email,
                "password": password.expose_secret(),
            }))
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let message = error_message(status, resp).await;
            return Err(Error::Auth { message });
        }

        let token: TokenResponse = self.handle_response(resp, None).await?;
        let user = SessionUser {
            id: token.user.id.clone(),
            email: token.user.email.or_else(|| Some(email.to_owned())),
            first_name: token.user.user_metadata.first_name,
            last_name: token.user.user_metadata.last_name,
        };
        let session = Session::new(SecretString::from(token.access_token), token.user.id).with_user(user);

        let session = self.session().establish(session);
        info!(user_id = %session.user_id, "logged in");
        Ok(session)
    }

    /// Create an account, then log into it.
    ///
    /// `POST /auth/v1/signup` followed by [`login`](Self::login). The names
    /// travel as user metadata.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Arc<Session>, Error> {
        let url = self.auth_url("signup")?;
        debug!("POST {url}");

        let resp = self
            .http()
            .post(url)
            .json(&json!({
                "email": request.email,
                "password": request.password.expose_secret(),
                "data": {
                    "firstName": request.first_name,
                    "lastName": request.last_name,
                },
            }))
            .send()
            .await?;
        self.handle_empty(resp, None).await?;
        info!(email = %request.email, "account registered");

        self.login(&request.email, &request.password).await
    }

    /// End the session.
    ///
    /// The remote revocation is best effort; the local session is cleared
    /// whatever the backend answers.
    pub async fn logout(&self) -> Result<(), Error> {
        if self.session().current().is_some() {
            let url = self.auth_url("logout")?;
            debug!("POST {url}");

            let (builder, _) = self.authorize(self.http().post(url));
            let outcome = builder.send().await;
            match outcome {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => debug!(status = %resp.status(), "remote logout rejected"),
                Err(e) => warn!(error = %e, "remote logout failed"),
            }
        }

        if self.session().clear() {
            info!("logged out");
        }
        Ok(())
    }
}
