//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use url::Url;

use crate::constants::{DEFAULT_IMAGE_MODEL, DEFAULT_OPENAI_BASE_URL};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "SACKBOY_DEBUG")]
    /// Enable debug logging. Env: SACKBOY_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "3000", env = "SACKBOY_PORT")]
    /// http listener, defaults to `3000`.
    /// Env: SACKBOY_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "SACKBOY_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: SACKBOY_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    /// OpenAI API key. The server starts without one, but generation requests fail until it's set.
    /// Env: OPENAI_API_KEY
    pub openai_api_key: Option<String>,

    #[clap(long, default_value = DEFAULT_OPENAI_BASE_URL, env = "SACKBOY_OPENAI_BASE_URL")]
    /// Base URL of the images API, eg `https://api.openai.com/v1`.
    /// Env: SACKBOY_OPENAI_BASE_URL
    pub openai_base_url: Url,

    #[clap(long, default_value = DEFAULT_IMAGE_MODEL, env = "SACKBOY_IMAGE_MODEL")]
    /// Image model sent upstream.
    /// Env: SACKBOY_IMAGE_MODEL
    pub image_model: String,

    #[clap(long, env = "SACKBOY_ENFORCE_UPLOAD_LIMITS")]
    /// Re-check upload type and size on the server, not just in the browser.
    /// Env: SACKBOY_ENFORCE_UPLOAD_LIMITS
    pub enforce_upload_limits: bool,
}
