//! API credentials.

use storyboard_error::{ConfigError, StoryboardResult};
use tracing::{instrument, warn};

/// Environment variable holding the HuggingFace token (required).
const HF_API_TOKEN: &str = "HF_API_TOKEN";
/// Environment variable holding the Stability key (needed for images only).
const STABILITY_API_KEY: &str = "STABILITY_API_KEY";
/// Environment variable holding an optional organization id for the image API.
const ORGANIZATION_ID: &str = "ORGANIZATION_ID";

/// Opaque API credentials, validated non-empty at startup.
///
/// Debug output never includes secret values.
///
/// # Examples
///
/// ```
/// use storyboard_rate_limit::Credentials;
///
/// let creds = Credentials::new("hf_secret", None, None).unwrap();
/// assert!(creds.stability_api_key().is_none());
/// assert!(!format!("{:?}", creds).contains("hf_secret"));
///
/// assert!(Credentials::new("  ", None, None).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    hf_api_token: String,
    stability_api_key: Option<String>,
    organization_id: Option<String>,
}

impl Credentials {
    /// Build credentials from explicit values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HuggingFace token is blank, or
    /// if an optional value is present but blank.
    pub fn new(
        hf_api_token: impl Into<String>,
        stability_api_key: Option<String>,
        organization_id: Option<String>,
    ) -> StoryboardResult<Self> {
        let hf_api_token = hf_api_token.into();
        if hf_api_token.trim().is_empty() {
            Err(ConfigError::new(format!(
                "{} is not set. Please set it in a .env file.",
                HF_API_TOKEN
            )))?
        }

        for (name, value) in [
            (STABILITY_API_KEY, &stability_api_key),
            (ORGANIZATION_ID, &organization_id),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                Err(ConfigError::new(format!("{} is set but empty", name)))?
            }
        }

        Ok(Self {
            hf_api_token,
            stability_api_key,
            organization_id,
        })
    }

    /// Read credentials through a lookup function.
    ///
    /// ```
    /// use storyboard_rate_limit::Credentials;
    ///
    /// let creds = Credentials::from_lookup(|key| match key {
    ///     "HF_API_TOKEN" => Some("hf_secret".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(creds.hf_api_token(), "hf_secret");
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StoryboardResult<Self> {
        let hf_api_token = lookup(HF_API_TOKEN).ok_or_else(|| {
            ConfigError::new(format!(
                "{} environment variable is not set. Please set it in a .env file.",
                HF_API_TOKEN
            ))
        })?;

        let stability_api_key = lookup(STABILITY_API_KEY);
        if stability_api_key.is_none() {
            warn!(
                "{} is not set. Image generation will not be available.",
                STABILITY_API_KEY
            );
        }

        Self::new(hf_api_token, stability_api_key, lookup(ORGANIZATION_ID))
    }

    /// Read credentials from the process environment.
    #[instrument]
    pub fn from_env() -> StoryboardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// HuggingFace API token.
    pub fn hf_api_token(&self) -> &str {
        &self.hf_api_token
    }

    /// Stability API key, if image generation is available.
    pub fn stability_api_key(&self) -> Option<&str> {
        self.stability_api_key.as_deref()
    }

    /// Organization id sent to the image API, if any.
    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("hf_api_token", &"<redacted>")
            .field(
                "stability_api_key",
                &self.stability_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("organization_id", &self.organization_id)
            .finish()
    }
}
