use std::fmt;
use std::time::Duration;

use log::{debug, error, info, warn};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::transport::{Request, Response, Transport, UNAUTHORIZED};
use crate::types::{Envelope, LoginData};
use crate::{Error, Result};

const LOGIN_PATH: [&str; 3] = ["auth", "login", "employee"];

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Owns the bearer token and is the only place that logs in again after a 401.
///
/// The token sits behind an async mutex: a caller that has to renew it holds
/// the lock for the whole login, and any caller that queued behind it picks up
/// the renewed token instead of logging in a second time.
pub struct Session<T> {
    transport: T,
    credentials: Credentials,
    timeout: Duration,
    token: Mutex<Option<String>>,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, credentials: Credentials, timeout: Duration) -> Self {
        Self {
            transport,
            credentials,
            timeout,
            token: Mutex::new(None),
        }
    }

    pub async fn authenticate(&self) -> Result<()> {
        let mut current = self.token.lock().await;
        *current = Some(self.login().await?);

        Ok(())
    }

    /// Sends `request` with the current token attached. A 401 triggers one
    /// renewal and one retry; `None` means the call could not be completed.
    pub async fn call_with_refresh(&self, request: Request) -> Option<Response> {
        let token = self.token.lock().await.clone();

        let response = self.send_with_token(&request, token.as_deref()).await?;
        if response.status_code != UNAUTHORIZED {
            return Some(response);
        }

        info!("token expired, renewing");

        let token = match self.refresh(token).await {
            Ok(token) => token,
            Err(err) => {
                error!("token expired and renewal failed: {err}");
                return None;
            }
        };

        let response = self.send_with_token(&request, Some(&token)).await?;
        if response.status_code == UNAUTHORIZED {
            warn!(
                "/{} is still unauthorized after token renewal",
                request.path.join("/")
            );
            return None;
        }

        Some(response)
    }

    async fn refresh(&self, stale: Option<String>) -> Result<String> {
        let mut current = self.token.lock().await;

        if let Some(token) = current.as_ref() {
            if stale.as_ref() != Some(token) {
                debug!("token was already renewed");
                return Ok(token.clone());
            }
        }

        let token = self.login().await?;
        *current = Some(token.clone());

        Ok(token)
    }

    async fn login(&self) -> Result<String> {
        let body = serde_json::to_value(&self.credentials)?;
        let response = self.send(Request::post(LOGIN_PATH, body)).await?;

        if !response.is_success() {
            return Err(Error::Status(response.status_code));
        }

        let envelope: Envelope<LoginData> = serde_json::from_slice(&response.body)?;
        info!("authenticated as {}", self.credentials.username);

        Ok(envelope.data.token)
    }

    async fn send_with_token(&self, request: &Request, token: Option<&str>) -> Option<Response> {
        let mut request = request.clone();
        request.bearer = token.map(str::to_string);

        let path = request.path.join("/");

        match self.send(request).await {
            Ok(response) => Some(response),
            Err(err) => {
                error!("request to /{path} failed: {err}");
                None
            }
        }
    }

    async fn send(&self, request: Request) -> Result<Response> {
        Ok(timeout(self.timeout, self.transport.send(request)).await??)
    }
}
