//! Stability AI text-to-image driver using reqwest.

use crate::http;
use crate::stability::{StabilityRequest, StabilityResponse};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use storyboard_core::{ImageData, ImageRequest};
use storyboard_error::{ModelsError, ModelsErrorKind, ModelsResult, StoryboardResult};
use storyboard_interface::ImageDriver;
use storyboard_rate_limit::ImageConfig;
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "stability";

/// Stability AI text-to-image driver.
#[derive(Clone)]
pub struct StabilityDriver {
    client: Client,
    api_key: String,
    organization_id: Option<String>,
    config: ImageConfig,
}

impl StabilityDriver {
    /// Creates a new Stability driver.
    ///
    /// `organization_id`, when set, is sent as the `X-Organization` header.
    ///
    /// # Errors
    ///
    /// Returns error if the key is blank or the client cannot be initialized.
    #[instrument(skip(api_key, organization_id, config), fields(engine = %config.engine))]
    pub fn new(
        api_key: impl Into<String>,
        organization_id: Option<String>,
        config: &ImageConfig,
    ) -> ModelsResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::InvalidConfiguration(
                "Stability API key is empty".to_string(),
            )));
        }

        let client = http::client(PROVIDER, config.timeout_secs)?;

        debug!(engine = %config.engine, "Created Stability driver");

        Ok(Self {
            client,
            api_key,
            organization_id,
            config: config.clone(),
        })
    }

    /// Text-to-image endpoint for the configured engine.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/generation/{}/text-to-image",
            self.config.host.trim_end_matches('/'),
            self.config.engine
        )
    }
}

impl std::fmt::Debug for StabilityDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StabilityDriver")
            .field("engine", &self.config.engine)
            .field("host", &self.config.host)
            .field("organization_id", &self.organization_id)
            .finish()
    }
}

/// Decode the first artifact of a response body into PNG bytes.
fn decode_first_artifact(body: &str) -> ModelsResult<ImageData> {
    let response: StabilityResponse = serde_json::from_str(body).map_err(|e| {
        ModelsError::new(ModelsErrorKind::ResponseConversion(format!(
            "{}: unexpected response shape: {}",
            PROVIDER, e
        )))
    })?;

    let artifact = response
        .artifacts()
        .first()
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse { provider: PROVIDER }))?;

    match artifact.finish_reason().as_deref() {
        None | Some("SUCCESS") => {}
        Some(reason) => warn!(finish_reason = %reason, "Image artifact did not finish cleanly"),
    }

    let bytes = STANDARD.decode(artifact.base64()).map_err(|e| {
        ModelsError::new(ModelsErrorKind::ResponseConversion(format!(
            "{}: invalid base64 artifact: {}",
            PROVIDER, e
        )))
    })?;

    if bytes.is_empty() {
        return Err(ModelsError::new(ModelsErrorKind::EmptyResponse {
            provider: PROVIDER,
        }));
    }

    Ok(ImageData::png(bytes))
}

#[async_trait]
impl ImageDriver for StabilityDriver {
    #[instrument(skip(self, req), fields(engine = %self.config.engine, frame_number = req.frame_number()))]
    async fn render(&self, req: &ImageRequest) -> StoryboardResult<ImageData> {
        let body = StabilityRequest::from_image_request(req, &self.config)
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;
        let url = self.endpoint();

        debug!(url = %url, prompts = body.text_prompts().len(), "Sending request to Stability");

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body);
        if let Some(org) = &self.organization_id {
            request = request.header("X-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| http::send_error(PROVIDER, self.config.timeout_secs, e))?;

        let response = http::check_status(PROVIDER, response).await?;
        let text = http::body_text(PROVIDER, response).await?;

        let image = decode_first_artifact(&text)?;
        debug!(size = image.bytes.len(), "Received image");
        Ok(image)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
