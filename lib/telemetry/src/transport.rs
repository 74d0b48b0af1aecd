use async_trait::async_trait;
use chipp_http::{HttpClient, HttpMethod, NoInterceptor};
use log::trace;
use serde_json::Value;

use crate::Result;

pub const UNAUTHORIZED: u16 = 401;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Description of a single API call, relative to the base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: Vec<String>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl Request {
    pub fn get<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Get,
            path: path.into_iter().map(Into::into).collect(),
            bearer: None,
            body: None,
        }
    }

    pub fn post<I, S>(path: I, body: Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Post,
            path: path.into_iter().map(Into::into).collect(),
            bearer: None,
            body: Some(body),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

pub struct HttpTransport {
    client: HttpClient<NoInterceptor>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = HttpClient::new(base_url)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let segments: Vec<&str> = request.path.iter().map(String::as_str).collect();
        let mut http_request = self.client.new_request(&segments);

        match request.method {
            Method::Get => http_request.set_method(HttpMethod::Get),
            Method::Post => http_request.set_method(HttpMethod::Post),
        }

        if let Some(token) = &request.bearer {
            http_request.add_header("Authorization", format!("Bearer {token}"));
        }

        if let Some(body) = &request.body {
            http_request.set_json_body(body);
        }

        trace!("{:?} {}", request.method, request.path.join("/"));

        let response = self
            .client
            .perform_request(http_request, |_, response| {
                Ok(Response {
                    status_code: u16::try_from(response.status_code).unwrap_or(u16::MAX),
                    body: response.body,
                })
            })
            .await?;

        trace!("response status {}", response.status_code);

        Ok(response)
    }
}
