use anyhow::{Context, Result};
use reqwest::{
    cookie::Jar,
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, RequestBuilder, Url,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::api::dev_backend::DevBackend;
use crate::config::{Endpoints, WorklogConfig};
use crate::worklog::issue_actions::{
    AbandonRequest, CommentPayload, CommentRequest, NoPayload, PollRequest, UpdatesPayload,
};
use crate::worklog::submission::{SubmitPayload, WorkLogPayload};
use crate::worklog::RemoteResult;

const SESSION_COOKIE: &str = "PHPSESSID";

/// Client for the issue page endpoints. Cheap to clone; clones share the
/// connection pool and cookie jar, so spawned requests each own one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    endpoints: Endpoints,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(config: &WorklogConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
        let jar = Arc::new(Jar::default());
        if let Some(session) = config.session_cookie.as_deref().filter(|s| !s.is_empty()) {
            jar.add_cookie_str(
                &format!("{}={}; Path=/", SESSION_COOKIE, session),
                &base_url,
            );
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .default_headers(default_headers())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            endpoints: config.endpoints.clone(),
            dev_backend: None,
        })
    }

    /// A client that answers from an in-memory backend and never touches the network.
    pub fn dev() -> Result<Self> {
        Self::with_dev_backend(DevBackend::new())
    }

    pub fn with_dev_backend(backend: DevBackend) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: Url::parse("http://localhost/")?,
            endpoints: Endpoints::default(),
            dev_backend: Some(backend),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for path {}", path))
    }

    /// Page the user lands on after leaving an issue.
    pub fn available_issues_url(&self) -> String {
        self.endpoint(&self.endpoints.available_issues)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| self.endpoints.available_issues.clone())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to call {}", call_name))?;
        response
            .error_for_status_ref()
            .with_context(|| format!("{} returned error", call_name))?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", call_name))
    }

    pub async fn submit_work_log(
        &self,
        payload: &WorkLogPayload,
    ) -> Result<RemoteResult<SubmitPayload>> {
        if let Some(dev) = &self.dev_backend {
            return dev.submit_work_log(payload);
        }

        self.get_json(
            self.client
                .post(self.endpoint(&self.endpoints.submit_work_log)?)
                .form(payload),
            "POST submit work log",
        )
        .await
    }

    pub async fn abandon_issue(
        &self,
        request: &AbandonRequest,
    ) -> Result<RemoteResult<NoPayload>> {
        if let Some(dev) = &self.dev_backend {
            return dev.abandon_issue(request);
        }

        self.get_json(
            self.client
                .post(self.endpoint(&self.endpoints.abandon_issue)?)
                .form(request),
            "POST abandon issue",
        )
        .await
    }

    pub async fn add_comment(
        &self,
        request: &CommentRequest,
    ) -> Result<RemoteResult<CommentPayload>> {
        if let Some(dev) = &self.dev_backend {
            return dev.add_comment(request);
        }

        self.get_json(
            self.client
                .post(self.endpoint(&self.endpoints.add_comment)?)
                .form(request),
            "POST add comment",
        )
        .await
    }

    pub async fn poll_updates(
        &self,
        request: &PollRequest,
    ) -> Result<RemoteResult<UpdatesPayload>> {
        if let Some(dev) = &self.dev_backend {
            return dev.poll_updates(request);
        }

        self.get_json(
            self.client
                .get(self.endpoint(&self.endpoints.poll_updates)?)
                .query(request),
            "GET issue updates",
        )
        .await
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        "x-requested-with",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers
}
