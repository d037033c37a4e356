//! Configuration structures.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from storyboard.toml)
//! - User overrides (~/.config/storyboard/storyboard.toml, then ./storyboard.toml)
//! - Environment overrides (`STORYBOARD__IMAGES__STEPS=40`, `MODEL_NAME=...`)

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use storyboard_error::{ConfigError, StoryboardError, StoryboardResult};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

/// Text-completion service settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Model identifier passed to the inference API
    pub model: String,
    /// Inference API base URL; the model id is appended as a path segment
    pub base_url: String,
    /// Maximum tokens generated per call
    pub max_new_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

/// Requests-per-minute and concurrency bounds for a provider.
///
/// `None` means unlimited for `rpm`; `max_concurrent` always has a floor of one.
///
/// ```toml
/// [images.rate_limit]
/// rpm = 60
/// max_concurrent = 2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub struct RateLimitConfig {
    /// Requests per minute limit
    #[serde(default)]
    pub rpm: Option<u32>,

    /// Maximum concurrent requests
    #[serde(default)]
    pub max_concurrent: Option<u32>,
}

impl RateLimitConfig {
    /// A configuration with no per-minute limit and a single worker.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Effective worker count.
    pub fn workers(&self) -> usize {
        self.max_concurrent.unwrap_or(1).max(1) as usize
    }
}

/// Image-generation service settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageConfig {
    /// API host
    pub host: String,
    /// Engine identifier
    pub engine: String,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Diffusion steps
    pub steps: u32,
    /// Classifier-free guidance scale
    pub cfg_scale: f32,
    /// Images per request
    pub samples: u32,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Default style appended to every frame description
    pub style: String,
    /// Default negative prompt
    pub negative: String,
    /// Request bounds for the image worker pool
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

/// Where results are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for images and the HTML overview
    pub dir: String,
}

/// Top-level Storyboard configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard_rate_limit::StoryboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryboardConfig::load()?;
/// println!("Model: {}", config.llm.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoryboardConfig {
    /// Text-completion settings
    pub llm: LlmConfig,
    /// Image-generation settings
    pub images: ImageConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl StoryboardConfig {
    /// The bundled defaults alone, with no user files or environment applied.
    ///
    /// ```
    /// use storyboard_rate_limit::StoryboardConfig;
    ///
    /// let config = StoryboardConfig::bundled().unwrap();
    /// assert_eq!(config.output.dir, "generated_frames");
    /// ```
    pub fn bundled() -> StoryboardResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load the bundled defaults overlaid with a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");

        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence (later sources override earlier):
    /// 1. Bundled defaults (storyboard.toml shipped with the binary)
    /// 2. User config in home directory (~/.config/storyboard/storyboard.toml)
    /// 3. User config in current directory (./storyboard.toml)
    /// 4. `STORYBOARD__SECTION__KEY` environment variables
    /// 5. `MODEL_NAME` for the text model
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("storyboard").required(false))
            .add_source(
                Environment::with_prefix("STORYBOARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("llm.model", std::env::var("MODEL_NAME").ok())
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to apply MODEL_NAME override: {}",
                    e
                )))
            })?;

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> StoryboardResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later at request time.
    pub fn validate(&self) -> StoryboardResult<()> {
        if self.llm.model.trim().is_empty() {
            Err(ConfigError::new("llm.model must not be empty"))?
        }
        if self.llm.base_url.trim().is_empty() {
            Err(ConfigError::new("llm.base_url must not be empty"))?
        }
        if self.images.engine.trim().is_empty() {
            Err(ConfigError::new("images.engine must not be empty"))?
        }
        if self.llm.timeout_secs == 0 || self.images.timeout_secs == 0 {
            Err(ConfigError::new("timeout_secs must be greater than zero"))?
        }
        if self.output.dir.trim().is_empty() {
            Err(ConfigError::new("output.dir must not be empty"))?
        }
        Ok(())
    }
}
