//! The registration call.

use core::future::Future;
use core::pin::Pin;

use serde::Deserialize;

use crate::error::SubmissionError;
use crate::state::FormState;

#[cfg(feature = "http")]
use crate::config::FormConfig;
#[cfg(feature = "http")]
use crate::error::ConfigError;
#[cfg(feature = "http")]
use url::Url;

pub type RegistrationFuture =
    Pin<Box<dyn Future<Output = Result<RegistrationReply, SubmissionError>> + Send + 'static>>;

/// Body returned by the registration endpoint, on success and on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationReply {
    #[serde(default)]
    pub message: String,
}

impl RegistrationReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sends a filled-in form to the registration service.
///
/// `register` only prepares the request. The returned future performs it when
/// polled and resolves with the service's reply.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Transport: Send + Sync {
    fn register(&self, form: &FormState) -> RegistrationFuture;
}

/// [`Transport`] that POSTs the form as JSON with `reqwest`.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new(config: &FormConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.endpoint_url()?))
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[cfg(feature = "http")]
impl Transport for HttpTransport {
    fn register(&self, form: &FormState) -> RegistrationFuture {
        let request = self.client.post(self.endpoint.clone()).json(form);
        let endpoint = self.endpoint.clone();

        Box::pin(async move {
            tracing::debug!(%endpoint, "sending registration");
            let response = request
                .send()
                .await
                .map_err(|err| SubmissionError::Transport(err.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|err| SubmissionError::Transport(err.to_string()))?;

            interpret_response(status.as_u16(), status.is_success(), &body)
        })
    }
}

/// Map a raw response onto the reply contract.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
fn interpret_response(
    status: u16,
    success: bool,
    body: &str,
) -> Result<RegistrationReply, SubmissionError> {
    let reply = serde_json::from_str::<RegistrationReply>(body).ok();

    if success {
        return Ok(reply.unwrap_or_default());
    }

    match reply {
        Some(reply) if !reply.message.is_empty() => Err(SubmissionError::Rejected {
            status,
            message: reply.message,
        }),
        _ => Err(SubmissionError::MissingMessage { status }),
    }
}
