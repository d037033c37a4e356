//! HuggingFace Inference API driver using reqwest.

use crate::http;
use crate::huggingface::conversions;
use async_trait::async_trait;
use reqwest::Client;
use storyboard_core::{GenerateRequest, GenerateResponse};
use storyboard_error::{ModelsError, ModelsErrorKind, ModelsResult, StoryboardResult};
use storyboard_interface::TextDriver;
use storyboard_rate_limit::LlmConfig;
use tracing::{debug, instrument};

const PROVIDER: &str = "huggingface";

/// HuggingFace Inference API driver.
#[derive(Clone)]
pub struct HuggingFaceDriver {
    client: Client,
    api_token: String,
    config: LlmConfig,
}

impl HuggingFaceDriver {
    /// Creates a new HuggingFace driver with an explicit API token.
    ///
    /// # Errors
    ///
    /// Returns error if the token is blank or the client cannot be initialized.
    #[instrument(skip(api_token, config), fields(model = %config.model))]
    pub fn new(api_token: impl Into<String>, config: &LlmConfig) -> ModelsResult<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::InvalidConfiguration(
                "HuggingFace API token is empty".to_string(),
            )));
        }

        let client = http::client(PROVIDER, config.timeout_secs)?;

        debug!(model = %config.model, "Created HuggingFace driver");

        Ok(Self {
            client,
            api_token,
            config: config.clone(),
        })
    }

    /// Endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        self.endpoint_for(&self.config.model)
    }

    /// Endpoint for a specific model on the configured base URL.
    pub fn endpoint_for(&self, model: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), model)
    }
}

impl std::fmt::Debug for HuggingFaceDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceDriver")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

#[async_trait]
impl TextDriver for HuggingFaceDriver {
    #[instrument(skip(self, req), fields(model = %self.config.model, messages = req.messages().len()))]
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        let hf_request = conversions::to_huggingface_request(req, &self.config)?;
        let url = self.endpoint_for(conversions::request_model(req, &self.config));

        debug!(
            url = %url,
            inputs_len = hf_request.inputs().len(),
            "Sending request to HuggingFace"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&hf_request)
            .send()
            .await
            .map_err(|e| http::send_error(PROVIDER, self.config.timeout_secs, e))?;

        let response = http::check_status(PROVIDER, response).await?;
        let body = http::body_text(PROVIDER, response).await?;

        debug!(response_len = body.len(), "Received response");

        Ok(conversions::from_huggingface_body(
            &body,
            hf_request.inputs(),
        )?)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
