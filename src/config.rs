//! Config handling

use tracing::log::LevelFilter;
use url::Url;

use crate::cli::CliOptions;
use crate::constants::{DEFAULT_IMAGE_MODEL, DEFAULT_OPENAI_BASE_URL};

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Runtime settings handed to the web layer.
///
/// Built once at startup and shared by every request, nothing in the request
/// path looks at the process environment.
#[derive(Clone)]
pub struct StudioConfig {
    /// Bearer credential for the images API. `None` makes the endpoint answer 500.
    pub openai_api_key: Option<String>,
    /// Base URL of the images API, `/images/edits` is appended.
    pub openai_base_url: Url,
    /// Model name sent upstream.
    pub image_model: String,
    /// Run the upload validator on the server too.
    pub enforce_upload_limits: bool,
}

impl StudioConfig {
    /// Returns the API key if one is set and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }
}

impl std::fmt::Debug for StudioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url.as_str())
            .field("image_model", &self.image_model)
            .field("enforce_upload_limits", &self.enforce_upload_limits)
            .finish()
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        #[allow(clippy::expect_used)]
        let openai_base_url =
            Url::parse(DEFAULT_OPENAI_BASE_URL).expect("default base URL is valid");
        Self {
            openai_api_key: None,
            openai_base_url,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            enforce_upload_limits: false,
        }
    }
}

impl From<&CliOptions> for StudioConfig {
    fn from(cli: &CliOptions) -> Self {
        Self {
            openai_api_key: cli.openai_api_key.clone(),
            openai_base_url: cli.openai_base_url.clone(),
            image_model: cli.image_model.clone(),
            enforce_upload_limits: cli.enforce_upload_limits,
        }
    }
}
