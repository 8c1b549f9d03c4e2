//! HTTP bridge from the terminal client to the submission endpoint.

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{ChatReply, GatewayError, SubmissionGateway};

/// Posts answer sets to the backend's chat endpoint.
pub struct HttpSubmissionGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionGateway {
    /// Creates a gateway against the given server base URL.
    pub fn new(server_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat", server_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn submit(&self, payload: &Value) -> Result<ChatReply, GatewayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let gateway = HttpSubmissionGateway::new("http://localhost:5000/");
        assert_eq!(gateway.endpoint, "http://localhost:5000/chat");
    }
}
