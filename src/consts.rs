//! Project-wide constants.

use std::path::PathBuf;

/// Default Gemini model for breed suggestions.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash";

/// Default Anthropic model for photo screening.
pub const DEFAULT_VISION_MODEL: &str = "claude-3-7-sonnet-20250219";

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Upper bound on a single provider call, in seconds.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Largest request body accepted on `/v1/analyze`.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Breeds offered to the text model when none are configured.
pub const DEFAULT_BREEDS: &[&str] = &["Pomeranian", "Doberman", "Shiba Inu"];

/// Attached to every successful photo analysis.
pub const DISCLAIMER: &str = "This result is an AI-based analysis and cannot replace a diagnosis \
     by a professional veterinarian. If you are worried about your dog's health, consult a vet.";

/// Shown when the model says the photo has no dog in it and gives no message of its own.
pub const NOT_A_DOG_MESSAGE: &str = "Please upload a photo of a dog.";

/// Default directory for transient uploads: `<tmp>/kennel-uploads`.
pub fn default_upload_dir() -> PathBuf {
    std::env::temp_dir().join("kennel-uploads")
}
