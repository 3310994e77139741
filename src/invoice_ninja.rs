use reqwest::blocking::Client;
use std::error::Error;
use std::fmt;

use crate::models::Task;
use crate::sync::TaskSink;

#[derive(Debug, Clone)]
pub enum NinjaError {
    Unauthorized,
    ServerError(String),
    Network(String),
}

impl fmt::Display for NinjaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NinjaError::Unauthorized => write!(f, "InvoiceNinja rejected the API token"),
            NinjaError::ServerError(message) => write!(f, "{message}"),
            NinjaError::Network(message) => write!(f, "InvoiceNinja network error: {message}"),
        }
    }
}

impl Error for NinjaError {}

pub struct NinjaClient {
    client: Client,
    base_url: String,
    token: String,
}

impl NinjaClient {
    pub fn new(base_url: String, token: String) -> Self {
        let client = Client::builder()
            .user_agent("toggl2ninja")
            .build()
            .expect("Failed to build HTTP client");
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token,
        }
    }
}

impl TaskSink for NinjaClient {
    fn save_new_task(&self, task: &Task) -> Result<(), NinjaError> {
        let url = format!("{}/api/v1/tasks", self.base_url);
        let response = self
            .client
            .post(url)
            .header("X-Ninja-Token", &self.token)
            .json(task)
            .send()
            .map_err(|err| NinjaError::Network(err.to_string()))?;

        if response.status() == 401 || response.status() == 403 {
            return Err(NinjaError::Unauthorized);
        }

        if response.status().is_server_error() {
            return Err(NinjaError::ServerError(format!(
                "InvoiceNinja API error: {}",
                response.status()
            )));
        }

        if !response.status().is_success() {
            return Err(NinjaError::Network(format!(
                "InvoiceNinja API error: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
