//! Process-wide configuration, read once at startup from flags and
//! environment variables.

use anyhow::{Result, bail};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::consts::{
    ANTHROPIC_BASE_URL, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PROVIDER_TIMEOUT_SECS,
    DEFAULT_TEXT_MODEL, DEFAULT_VISION_MODEL, GEMINI_BASE_URL, default_upload_dir,
};
use crate::recommend::BreedCatalog;

#[derive(Parser)]
#[command(
    name = "kennel",
    version,
    about = "Breed suggestions and photo health screening for dogs."
)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "KENNEL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "KENNEL_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Gemini API key for breed suggestions
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Anthropic API key for photo screening
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: String,

    /// HS256 secret used to verify bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Gemini model name
    #[arg(long, env = "KENNEL_TEXT_MODEL", default_value = DEFAULT_TEXT_MODEL)]
    pub text_model: String,

    /// Anthropic model name
    #[arg(long, env = "KENNEL_VISION_MODEL", default_value = DEFAULT_VISION_MODEL)]
    pub vision_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = GEMINI_BASE_URL, hide = true)]
    pub gemini_base_url: String,

    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = ANTHROPIC_BASE_URL, hide = true)]
    pub anthropic_base_url: String,

    /// Directory for transient uploads (default: <tmp>/kennel-uploads)
    #[arg(long, env = "KENNEL_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Provider call timeout in seconds
    #[arg(long, env = "KENNEL_PROVIDER_TIMEOUT", default_value_t = DEFAULT_PROVIDER_TIMEOUT_SECS)]
    pub provider_timeout: u64,

    /// Largest accepted upload, in bytes
    #[arg(long, env = "KENNEL_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Comma-separated breed catalog, in index order
    #[arg(long, env = "KENNEL_BREEDS", value_delimiter = ',')]
    pub breeds: Vec<String>,
}

/// Validated, immutable configuration shared by all handlers.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub anthropic_api_key: String,
    pub jwt_secret: String,
    pub text_model: String,
    pub vision_model: String,
    pub gemini_base_url: String,
    pub anthropic_base_url: String,
    pub upload_dir: PathBuf,
    pub provider_timeout: Duration,
    pub max_upload_bytes: usize,
    pub catalog: BreedCatalog,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.anthropic_api_key.trim().is_empty() {
            bail!("ANTHROPIC_API_KEY is not set");
        }
        if args.jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET is not set");
        }
        if args.provider_timeout == 0 {
            bail!("provider timeout must be at least one second");
        }

        let catalog = if args.breeds.is_empty() {
            BreedCatalog::default()
        } else {
            BreedCatalog::new(&args.breeds)?
        };

        Ok(Self {
            host: args.host,
            port: args.port,
            gemini_api_key: args.gemini_api_key.filter(|k| !k.trim().is_empty()),
            anthropic_api_key: args.anthropic_api_key,
            jwt_secret: args.jwt_secret,
            text_model: args.text_model,
            vision_model: args.vision_model,
            gemini_base_url: args.gemini_base_url,
            anthropic_base_url: args.anthropic_base_url,
            upload_dir: args.upload_dir.unwrap_or_else(default_upload_dir),
            provider_timeout: Duration::from_secs(args.provider_timeout),
            max_upload_bytes: args.max_upload_bytes,
            catalog,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .field("anthropic_api_key", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("text_model", &self.text_model)
            .field("vision_model", &self.vision_model)
            .field("upload_dir", &self.upload_dir)
            .field("provider_timeout", &self.provider_timeout)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("catalog", &self.catalog)
            .finish()
    }
}
