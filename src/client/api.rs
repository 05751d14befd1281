use crate::config::ClientConfig;
use crate::domain::{RegistrationApi, RegistrationRecord, RegistrationRequest};
use crate::server::ErrorBody;
use crate::utils::error::{PassError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Talks to the registration service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    client: Client,
    register_url: String,
}

impl HttpRegistrationClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            register_url: config.register_url(),
        })
    }

    pub fn register_url(&self) -> &str {
        &self.register_url
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationClient {
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationRecord> {
        tracing::debug!("Making registration request to: {}", self.register_url);
        let response = self
            .client
            .post(&self.register_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Registration response status: {}", status);

        if !status.is_success() {
            // 伺服器錯誤訊息只記錄，不影響使用者看到的提示
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.error);
            tracing::warn!(
                "Registration rejected ({}): {}",
                status,
                message.as_deref().unwrap_or("no error body")
            );
            return Err(PassError::RegistrationRejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<RegistrationRecord>().await?)
    }
}
