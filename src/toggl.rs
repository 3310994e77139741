use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt;

use crate::dates::RunWindow;
use crate::models::{DetailedReport, Workspace};
use crate::sync::TimeReportSource;

// The reports API rejects requests without a user_agent query parameter.
const USER_AGENT: &str = "toggl2ninja";

#[derive(Debug, Clone)]
pub enum TogglError {
    Unauthorized,
    RateLimited,
    ServerError(String),
    Network(String),
}

impl fmt::Display for TogglError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TogglError::Unauthorized => write!(f, "Toggl rejected the API token"),
            TogglError::RateLimited => write!(f, "Toggl rate limit exceeded"),
            TogglError::ServerError(message) => write!(f, "{message}"),
            TogglError::Network(message) => write!(f, "Toggl network error: {message}"),
        }
    }
}

impl Error for TogglError {}

pub struct TogglClient {
    client: Client,
    token: String,
}

impl TogglClient {
    pub fn new(token: String) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");
        Self { client, token }
    }

    fn fetch<T: DeserializeOwned>(&self, url: String) -> Result<T, TogglError> {
        let credentials = STANDARD.encode(format!("{}:api_token", self.token));
        let response = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Basic {}", credentials))
            .send()
            .map_err(|err| TogglError::Network(err.to_string()))?;

        if response.status() == 401 || response.status() == 403 {
            return Err(TogglError::Unauthorized);
        }

        if response.status() == 429 {
            return Err(TogglError::RateLimited);
        }

        if response.status().is_server_error() {
            return Err(TogglError::ServerError(format!(
                "Toggl API error: {}",
                response.status()
            )));
        }

        if !response.status().is_success() {
            return Err(TogglError::Network(format!(
                "Toggl API error: {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .map_err(|err| TogglError::Network(err.to_string()))
    }
}

impl TimeReportSource for TogglClient {
    fn workspaces(&self) -> Result<Vec<Workspace>, TogglError> {
        let url = "https://api.track.toggl.com/api/v9/workspaces".to_string();
        self.fetch(url)
    }

    fn detailed_report(
        &self,
        workspace_id: u64,
        window: &RunWindow,
    ) -> Result<DetailedReport, TogglError> {
        let base = "https://api.track.toggl.com/reports/api/v2/details";
        let workspace_id = workspace_id.to_string();
        let since = window.since_param();
        let until = window.until_param();
        let url = reqwest::Url::parse_with_params(
            base,
            &[
                ("user_agent", USER_AGENT),
                ("workspace_id", workspace_id.as_str()),
                ("since", since.as_str()),
                ("until", until.as_str()),
            ],
        )
        .map_err(|err| TogglError::Network(err.to_string()))?;
        self.fetch(url.to_string())
    }
}
